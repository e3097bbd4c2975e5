pub mod draft;
pub mod market;
pub mod transfer;
pub mod window;

pub use draft::*;
pub use market::*;
pub use transfer::*;
pub use window::*;
