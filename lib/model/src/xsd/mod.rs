mod date_time;
mod double;
mod float;

pub use date_time::*;
pub use double::*;
pub use float::*;
