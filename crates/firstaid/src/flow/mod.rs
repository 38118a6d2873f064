//! Step-by-step guidance engines.
//!
//! [`StepFlowEngine`] walks a linear [`StepList`](crate::content::StepList),
//! narrating each step and driving an optional countdown.
//! [`CprFlowEngine`] adds the age-group gate and the compression rhythm.

pub mod cpr;
pub mod step;

pub use cpr::{AgeGroup, CprFlowEngine, CprRetreat, CprSnapshot, RhythmPulse};
pub use step::{Retreat, StepFlowEngine, StepSnapshot, TimerState};
