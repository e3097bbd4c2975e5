pub mod revenue;
pub mod wages;

pub use revenue::*;
pub use wages::*;
