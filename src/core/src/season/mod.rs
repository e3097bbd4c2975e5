pub mod result;
pub mod state;
pub mod year_end;

pub use result::*;
pub use state::*;
pub use year_end::*;
