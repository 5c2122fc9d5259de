//! # Games
//!
//! Outcome logic for the randomized mini-games. Every draw is uniform over a
//! fixed, finite outcome set. Functions take the RNG as a parameter; the
//! command handlers pass `OsRng`.

use crate::strings::games::{EIGHT_BALL_NO, EIGHT_BALL_UNKNOWN, EIGHT_BALL_YES};
use rand::Rng;
use rand::seq::SliceRandom;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    #[error("a dice needs at least one side, got {0}")]
    NonPositiveSides(i64),
}

/// Uniform over `1..=sides`. Non-positive side counts are rejected before any draw.
pub fn roll_die<R: Rng + ?Sized>(rng: &mut R, sides: i64) -> Result<u64, DiceError> {
    if sides <= 0 {
        return Err(DiceError::NonPositiveSides(sides));
    }
    Ok(rng.gen_range(1..=sides as u64))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoinSide {
    Heads,
    Tails,
}

impl CoinSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoinSide::Heads => "heads",
            CoinSide::Tails => "tails",
        }
    }
}

pub fn flip_coin<R: Rng + ?Sized>(rng: &mut R) -> CoinSide {
    if rng.gen_bool(0.5) {
        CoinSide::Heads
    } else {
        CoinSide::Tails
    }
}

/// A playing card rank as drawn, `1..=13`. Aces rank highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card(u8);

impl Card {
    #[cfg(test)]
    pub fn new(rank: u8) -> Option<Self> {
        (1..=13).contains(&rank).then_some(Self(rank))
    }

    /// Comparison value: Ace is 14, everything else its rank.
    pub fn value(&self) -> u8 {
        if self.0 == 1 { 14 } else { self.0 }
    }

    pub fn name(&self) -> String {
        match self.0 {
            1 => "Ace".to_string(),
            11 => "Jack".to_string(),
            12 => "Queen".to_string(),
            13 => "King".to_string(),
            n => n.to_string(),
        }
    }
}

pub fn draw_card<R: Rng + ?Sized>(rng: &mut R) -> Card {
    Card(rng.gen_range(1..=13))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    UserWins,
    BotWins,
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighCardRound {
    pub user: Card,
    pub bot: Card,
}

impl HighCardRound {
    pub fn outcome(&self) -> Outcome {
        match self.user.value().cmp(&self.bot.value()) {
            std::cmp::Ordering::Greater => Outcome::UserWins,
            std::cmp::Ordering::Less => Outcome::BotWins,
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }
}

pub fn high_card<R: Rng + ?Sized>(rng: &mut R) -> HighCardRound {
    let user = draw_card(rng);
    let bot = draw_card(rng);
    HighCardRound { user, bot }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpsChoice {
    Rock,
    Paper,
    Scissors,
}

impl RpsChoice {
    pub const ALL: [RpsChoice; 3] = [RpsChoice::Rock, RpsChoice::Paper, RpsChoice::Scissors];

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "rock" => Some(RpsChoice::Rock),
            "paper" => Some(RpsChoice::Paper),
            "scissors" => Some(RpsChoice::Scissors),
            _ => None,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RpsChoice::Rock => "rock",
            RpsChoice::Paper => "paper",
            RpsChoice::Scissors => "scissors",
        }
    }

    pub fn capitalized(&self) -> &'static str {
        match self {
            RpsChoice::Rock => "Rock",
            RpsChoice::Paper => "Paper",
            RpsChoice::Scissors => "Scissors",
        }
    }

    fn beats(&self, other: RpsChoice) -> bool {
        matches!(
            (self, other),
            (RpsChoice::Rock, RpsChoice::Scissors)
                | (RpsChoice::Scissors, RpsChoice::Paper)
                | (RpsChoice::Paper, RpsChoice::Rock)
        )
    }
}

pub fn rps_outcome(user: RpsChoice, bot: RpsChoice) -> Outcome {
    if user == bot {
        Outcome::Tie
    } else if user.beats(bot) {
        Outcome::UserWins
    } else {
        Outcome::BotWins
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerCategory {
    Yes,
    No,
    Unknown,
}

impl AnswerCategory {
    pub const ALL: [AnswerCategory; 3] =
        [AnswerCategory::Yes, AnswerCategory::No, AnswerCategory::Unknown];

    pub fn answers(&self) -> &'static [&'static str] {
        match self {
            AnswerCategory::Yes => EIGHT_BALL_YES,
            AnswerCategory::No => EIGHT_BALL_NO,
            AnswerCategory::Unknown => EIGHT_BALL_UNKNOWN,
        }
    }
}

/// Category first, then an answer inside it, so each category has a one in
/// three chance however long its list is.
pub fn eight_ball<R: Rng + ?Sized>(rng: &mut R) -> (AnswerCategory, &'static str) {
    let category = AnswerCategory::ALL[rng.gen_range(0..AnswerCategory::ALL.len())];
    let answers = category.answers();
    (category, answers[rng.gen_range(0..answers.len())])
}

pub fn pick_file<'a, R: Rng + ?Sized>(rng: &mut R, files: &'a [PathBuf]) -> Option<&'a PathBuf> {
    files.choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};
    use std::collections::HashMap;

    struct UntouchableRng;

    impl RngCore for UntouchableRng {
        fn next_u32(&mut self) -> u32 {
            panic!("random source must not be used");
        }
        fn next_u64(&mut self) -> u64 {
            panic!("random source must not be used");
        }
        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            panic!("random source must not be used");
        }
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            panic!("random source must not be used");
        }
    }

    fn assert_roughly_even<K: std::fmt::Debug>(counts: &HashMap<K, usize>, buckets: usize, draws: usize) {
        assert_eq!(counts.len(), buckets, "some outcome never appeared: {counts:?}");
        let expected = draws as f64 / buckets as f64;
        for (k, &n) in counts {
            let deviation = (n as f64 - expected).abs() / expected;
            assert!(deviation < 0.1, "{k:?} drawn {n} times, expected about {expected}");
        }
    }

    #[test]
    fn test_roll_rejects_non_positive_without_drawing() {
        let mut rng = UntouchableRng;
        assert_eq!(roll_die(&mut rng, 0), Err(DiceError::NonPositiveSides(0)));
        assert_eq!(roll_die(&mut rng, -5), Err(DiceError::NonPositiveSides(-5)));
    }

    #[test]
    fn test_roll_is_uniform_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let draws = 60_000;
        let mut counts = HashMap::new();
        for _ in 0..draws {
            let r = roll_die(&mut rng, 6).unwrap();
            assert!((1..=6).contains(&r));
            *counts.entry(r).or_insert(0) += 1;
        }
        assert_roughly_even(&counts, 6, draws);
    }

    #[test]
    fn test_one_sided_die() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(roll_die(&mut rng, 1), Ok(1));
    }

    #[test]
    fn test_card_names_and_values() {
        let name = |r| Card::new(r).unwrap().name();
        assert_eq!(name(1), "Ace");
        assert_eq!(name(7), "7");
        assert_eq!(name(11), "Jack");
        assert_eq!(name(12), "Queen");
        assert_eq!(name(13), "King");
        assert_eq!(Card::new(1).unwrap().value(), 14);
        assert!(Card::new(0).is_none());
        assert!(Card::new(14).is_none());
    }

    #[test]
    fn test_high_card_outcomes() {
        let round = |u, b| HighCardRound {
            user: Card::new(u).unwrap(),
            bot: Card::new(b).unwrap(),
        };
        assert_eq!(round(1, 13).outcome(), Outcome::UserWins);
        assert_eq!(round(2, 1).outcome(), Outcome::BotWins);
        assert_eq!(round(9, 9).outcome(), Outcome::Tie);

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let r = high_card(&mut rng);
            let expected = match r.user.value().cmp(&r.bot.value()) {
                std::cmp::Ordering::Greater => Outcome::UserWins,
                std::cmp::Ordering::Less => Outcome::BotWins,
                std::cmp::Ordering::Equal => Outcome::Tie,
            };
            assert_eq!(r.outcome(), expected);
        }
    }

    #[test]
    fn test_rps_rules() {
        use RpsChoice::*;
        assert_eq!(rps_outcome(Rock, Scissors), Outcome::UserWins);
        assert_eq!(rps_outcome(Scissors, Paper), Outcome::UserWins);
        assert_eq!(rps_outcome(Paper, Rock), Outcome::UserWins);
        assert_eq!(rps_outcome(Scissors, Rock), Outcome::BotWins);
        assert_eq!(rps_outcome(Paper, Paper), Outcome::Tie);
        assert_eq!(RpsChoice::parse(" ROCK "), Some(Rock));
        assert_eq!(RpsChoice::parse("lizard"), None);
    }

    #[test]
    fn test_eight_ball_categories_equally_likely() {
        // The lists differ in length; categories must not.
        assert_ne!(EIGHT_BALL_YES.len(), EIGHT_BALL_UNKNOWN.len());

        let mut rng = StdRng::seed_from_u64(42);
        let draws = 60_000;
        let mut counts = HashMap::new();
        for _ in 0..draws {
            let (category, answer) = eight_ball(&mut rng);
            assert!(category.answers().contains(&answer));
            *counts.entry(category).or_insert(0) += 1;
        }
        assert_roughly_even(&counts, 3, draws);
    }

    #[test]
    fn test_coin_covers_both_sides() {
        let mut rng = StdRng::seed_from_u64(9);
        let draws = 20_000;
        let mut counts = HashMap::new();
        for _ in 0..draws {
            *counts.entry(flip_coin(&mut rng)).or_insert(0) += 1;
        }
        assert_roughly_even(&counts, 2, draws);
    }

    #[test]
    fn test_pick_file_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(pick_file(&mut rng, &[]).is_none());
        let files = vec![PathBuf::from("a.png")];
        assert_eq!(pick_file(&mut rng, &files), Some(&files[0]));
    }
}
