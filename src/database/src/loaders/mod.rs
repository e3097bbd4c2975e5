mod college;
mod lnf;
mod settings;

pub use college::*;
pub use lnf::*;
pub use settings::*;
