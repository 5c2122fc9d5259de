//! Status phrases, one pool per activity kind.

pub const PLAYING: &[&str] = &[
    "with your electric box",
    "with the doll in my basement",
    "with dotz's sanity",
];

pub const WATCHING: &[&str] = &["you", "over everything you say", "the drama"];

pub const STREAMING: &[&str] = &[
    "your webcam",
    "your browser history",
    "the hidden camera in your room",
    "your fridge",
];

pub const LISTENING: &[&str] = &[
    "the voices in my head",
    "the drama",
    "the silence",
    "how useless i am",
];
