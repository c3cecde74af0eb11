//! Type definitions

pub mod fleet;
pub mod job;
pub mod messages;
pub mod optimization;
pub mod schedule;
pub mod time_of_day;

pub use fleet::*;
pub use job::*;
pub use messages::*;
pub use optimization::*;
pub use schedule::*;
pub use time_of_day::*;
