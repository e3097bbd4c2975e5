mod generators;
mod loaders;
mod storage;

pub use generators::*;
pub use loaders::*;
pub use storage::*;
