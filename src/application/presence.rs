//! # Presence Rotation
//!
//! Picks a random status for the bot and refreshes it on a fixed interval.

use crate::domain::traits::BotClient;
use crate::domain::types::{Activity, ActivityKind};
use crate::strings::{logs, presence};
use rand::Rng;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

fn phrases(kind: ActivityKind) -> &'static [&'static str] {
    match kind {
        ActivityKind::Playing => presence::PLAYING,
        ActivityKind::Watching => presence::WATCHING,
        ActivityKind::Streaming => presence::STREAMING,
        ActivityKind::Listening => presence::LISTENING,
    }
}

/// Kind first, then a phrase of that kind, both uniform.
pub fn random_activity<R: Rng + ?Sized>(rng: &mut R) -> Activity {
    let kind = ActivityKind::ALL[rng.gen_range(0..ActivityKind::ALL.len())];
    let text = phrases(kind).choose(rng).copied().unwrap_or_default();
    Activity {
        kind,
        text: text.to_string(),
    }
}

/// Sets a fresh activity right away and then every `interval` until shutdown.
/// A failed update is logged and retried on the next tick.
pub async fn run_rotation(client: Arc<dyn BotClient>, interval: Duration, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = tokio::time::interval(interval);
    tracing::info!("{}", logs::task_started("presence rotation"));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let activity = random_activity(&mut OsRng);
                match client.set_presence(&activity).await {
                    Ok(()) => tracing::info!("{}", logs::activity_set(activity.kind.as_str(), &activity.text)),
                    Err(e) => tracing::warn!("{}", logs::presence_fail(&e)),
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockClient;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    #[test]
    fn test_activity_phrase_matches_kind() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let activity = random_activity(&mut rng);
            assert!(phrases(activity.kind).contains(&activity.text.as_str()));
        }
    }

    #[test]
    fn test_kinds_equiprobable() {
        let mut rng = StdRng::seed_from_u64(11);
        let draws = 40_000;
        let mut counts: HashMap<ActivityKind, usize> = HashMap::new();
        for _ in 0..draws {
            *counts.entry(random_activity(&mut rng).kind).or_default() += 1;
        }
        let expected = draws / ActivityKind::ALL.len();
        for kind in ActivityKind::ALL {
            let n = counts[&kind];
            assert!(n.abs_diff(expected) < expected / 10, "{kind:?}: {n}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rotation_sets_immediately_and_per_interval() {
        let client = Arc::new(MockClient::new());
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(run_rotation(client.clone(), Duration::from_secs(300), rx));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(client.presences.lock().unwrap().len(), 1);

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(client.presences.lock().unwrap().len(), 2);

        tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
