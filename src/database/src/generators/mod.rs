mod college;
mod generator;

pub use college::*;
pub use generator::*;
