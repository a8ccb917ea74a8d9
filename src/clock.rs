//! Simulated time.
//!
//! Every delay in the factory is expressed in abstract units. [`SimClock`] turns
//! units into wall-clock durations by dividing by the speed factor, so a run at
//! speed 10 is ten times faster but otherwise identical.

use crate::error::FactoryError;
use crate::model::RELOCATION_UNITS;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimClock {
    speed: u32,
}

impl SimClock {
    pub fn new(speed: u32) -> Result<Self, FactoryError> {
        if speed == 0 {
            return Err(FactoryError::InvalidSpeed(speed));
        }
        Ok(Self { speed })
    }

    /// Wall-clock time for `units` of simulated work.
    pub fn duration(&self, units: f64) -> Duration {
        Duration::from_secs_f64(units.max(0.0) / f64::from(self.speed))
    }

    /// Time a robot spends walking between two different tasks.
    pub fn relocation(&self) -> Duration {
        self.duration(RELOCATION_UNITS)
    }
}
