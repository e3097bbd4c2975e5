pub mod random;
pub mod time;

pub use random::*;
pub use time::*;
