pub mod calendar;
pub mod playoffs;
pub mod schedule;
pub mod table;

pub use calendar::*;
pub use playoffs::*;
pub use schedule::*;
pub use table::*;
