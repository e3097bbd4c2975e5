mod entity;
mod error;
mod storage;

pub use entity::*;
pub use error::*;
pub use storage::*;
