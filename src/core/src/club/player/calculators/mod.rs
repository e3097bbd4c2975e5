mod calculator;

pub use calculator::*;
