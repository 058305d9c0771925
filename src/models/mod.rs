pub mod calendar;
pub mod common;
pub mod holiday;
pub mod user;
pub mod vacation;

pub use calendar::*;
pub use common::*;
pub use holiday::*;
pub use user::*;
pub use vacation::*;
