pub mod generator;
pub mod layout;
pub mod structure;

pub use generator::*;
pub use layout::*;
pub use structure::*;
