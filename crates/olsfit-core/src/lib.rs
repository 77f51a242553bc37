pub mod data;
pub mod pipeline;
pub mod plot;
pub mod processevent;
pub mod slope;
pub mod stats;

pub use stats::{Estimator, FitError, LinReg, MetricsError};
