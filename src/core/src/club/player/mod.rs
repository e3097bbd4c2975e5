pub mod builder;
pub mod calculators;
pub mod contract;
pub mod development;
pub mod generator;
pub mod player;

pub use builder::*;
pub use calculators::*;
pub use contract::*;
pub use development::*;
pub use generator::*;
pub use player::*;
