pub mod aggregate;
pub mod materialize;
pub mod sweep;

pub use aggregate::{FuzzReport, OutcomeMap, SweepOutcomes};
pub use materialize::{fuzz_target, FuzzError};
pub use sweep::{sweep, sweep_parallel, SweepError, SweepOptions};
