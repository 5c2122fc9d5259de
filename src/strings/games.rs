//! # Game Strings
//!
//! Answer pools for the eight ball.

pub const EIGHT_BALL_YES: &[&str] = &[
    "yes",
    "why not",
    "absolutely",
    "hell yeah",
    "without a doubt",
    "uh, obviously",
];

pub const EIGHT_BALL_NO: &[&str] = &[
    "no",
    "absolutely not",
    "nah",
    "are you stupid? no",
    "nuh uh",
    "not happening",
];

pub const EIGHT_BALL_UNKNOWN: &[&str] = &[
    "i'm not too sure",
    "i don't know",
    "the answer lies in the question itself",
    "the answer can be found in your soul",
    "do what your heart desires",
    "whatever you feel like",
    "idk, ask the next guy",
];
