pub mod fiterror;
pub mod linreg;
pub mod metrics;
pub mod quality;

pub use fiterror::{ErrorKind, FitError, FitResult, MetricsError, MetricsResult};
pub use linreg::{Estimator, LinReg};
pub use metrics::{mean_absolute_error, mean_squared_error, r_squared, root_mean_squared_error};
pub use quality::{MetricSet, MseQuality, R2Quality};
