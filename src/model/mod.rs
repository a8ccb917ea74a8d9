//! Pure data: the economy's counters and the robot action catalogue.

pub mod action;
pub mod stock;

pub use action::*;
pub use stock::*;
