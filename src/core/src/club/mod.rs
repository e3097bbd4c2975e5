pub mod club;
pub mod coach;
pub mod collection;
pub mod finance;
pub mod player;

pub use club::*;
pub use coach::*;
pub use collection::*;
pub use finance::*;
pub use player::*;
