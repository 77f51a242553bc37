use crate::stats::fiterror::MetricsResult;
use crate::stats::metrics::{
    mean_absolute_error, mean_squared_error, r_squared, root_mean_squared_error,
};

use serde::Serialize;
use std::fmt;

/// The four standard metrics for one evaluation set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSet {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    pub r2: f64,
}

impl MetricSet {
    pub fn compute(y_true: &[f64], y_pred: &[f64]) -> MetricsResult<Self> {
        Ok(Self {
            mse: mean_squared_error(y_true, y_pred)?,
            rmse: root_mean_squared_error(y_true, y_pred)?,
            mae: mean_absolute_error(y_true, y_pred)?,
            r2: r_squared(y_true, y_pred)?,
        })
    }

    pub fn r2_quality(&self) -> R2Quality {
        R2Quality::from_r2(self.r2)
    }

    pub fn mse_quality(&self) -> MseQuality {
        MseQuality::from_mse(self.mse)
    }
}

impl fmt::Display for MetricSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "MSE: {:.4}, RMSE: {:.4}, MAE: {:.4}, R²: {:.4} ({:.2}% explained)",
            self.mse,
            self.rmse,
            self.mae,
            self.r2,
            self.r2 * 100.0
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum R2Quality {
    Excellent,
    Good,
    Moderate,
    Poor,
    WorseThanBaseline,
}

impl R2Quality {
    pub fn from_r2(r2: f64) -> Self {
        if r2 >= 0.9 {
            R2Quality::Excellent
        } else if r2 >= 0.7 {
            R2Quality::Good
        } else if r2 >= 0.5 {
            R2Quality::Moderate
        } else if r2 >= 0.0 {
            R2Quality::Poor
        } else {
            // also NaN
            R2Quality::WorseThanBaseline
        }
    }
}

impl fmt::Display for R2Quality {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            R2Quality::Excellent => write!(f, "excellent fit"),
            R2Quality::Good => write!(f, "good fit"),
            R2Quality::Moderate => write!(f, "moderate fit"),
            R2Quality::Poor => write!(f, "poor fit"),
            R2Quality::WorseThanBaseline => write!(f, "worse than a horizontal line"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MseQuality {
    Excellent,
    Good,
    Moderate,
    Low,
}

impl MseQuality {
    pub fn from_mse(mse: f64) -> Self {
        if mse < 0.1 {
            MseQuality::Excellent
        } else if mse < 1.0 {
            MseQuality::Good
        } else if mse < 10.0 {
            MseQuality::Moderate
        } else {
            MseQuality::Low
        }
    }
}

impl fmt::Display for MseQuality {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MseQuality::Excellent => write!(f, "excellent precision"),
            MseQuality::Good => write!(f, "good precision"),
            MseQuality::Moderate => write!(f, "moderate precision"),
            MseQuality::Low => write!(f, "low precision"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::fiterror::MetricsError;

    #[test]
    fn test_metric_set() {
        let set = MetricSet::compute(&[1., 2., 3., 4.], &[2., 2., 2., 2.]).unwrap();
        assert_eq!(set.mse, 1.5);
        assert_eq!(set.mae, 1.0);
        assert_eq!(set.rmse, 1.5_f64.sqrt());
        assert!(set.r2 < 0.0);
        assert_eq!(set.r2_quality(), R2Quality::WorseThanBaseline);
        assert_eq!(set.mse_quality(), MseQuality::Moderate);
    }

    #[test]
    fn test_metric_set_propagates_errors() {
        assert_eq!(MetricSet::compute(&[], &[]), Err(MetricsError::Empty));
    }

    #[test]
    fn test_r2_bands() {
        assert_eq!(R2Quality::from_r2(1.0), R2Quality::Excellent);
        assert_eq!(R2Quality::from_r2(0.9), R2Quality::Excellent);
        assert_eq!(R2Quality::from_r2(0.75), R2Quality::Good);
        assert_eq!(R2Quality::from_r2(0.5), R2Quality::Moderate);
        assert_eq!(R2Quality::from_r2(0.0), R2Quality::Poor);
        assert_eq!(R2Quality::from_r2(-0.1), R2Quality::WorseThanBaseline);
        assert_eq!(R2Quality::from_r2(f64::NAN), R2Quality::WorseThanBaseline);
    }

    #[test]
    fn test_mse_bands() {
        assert_eq!(MseQuality::from_mse(0.0), MseQuality::Excellent);
        assert_eq!(MseQuality::from_mse(0.1), MseQuality::Good);
        assert_eq!(MseQuality::from_mse(9.99), MseQuality::Moderate);
        assert_eq!(MseQuality::from_mse(f64::INFINITY), MseQuality::Low);
    }
}
