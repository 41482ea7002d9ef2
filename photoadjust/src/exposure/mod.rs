//! Exposure-time estimation.
//!
//! One pass of the photometric optimization loop: refit every camera's
//! exposure time against the current albedo mosaic and write the results
//! back to the project.

mod accumulator;
mod update;

pub use accumulator::TimeDeltaAccumulator;
pub use update::{update_exposure_times, CameraUpdate, UpdateError, UpdateOptions, UpdateSummary};
