use crate::stats::fiterror::{FitError, FitResult};
use crate::stats::metrics::{mean_squared_error, r_squared};

use std::fmt;

/// A fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinReg {
    pub intercept: f64,
    pub slope: f64,
}

impl fmt::Display for LinReg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.equation())
    }
}

fn check_lengths(x: &[f64], y: &[f64]) -> FitResult<()> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch { len_x: x.len(), len_y: y.len() });
    }
    Ok(())
}

impl LinReg {
    pub fn from_val(intercept: f64, slope: f64) -> Self {
        Self { intercept, slope }
    }

    /// Closed-form ordinary least squares over raw sums.
    ///
    /// Sums are accumulated once, in input order, without centering.
    pub fn train(x: &[f64], y: &[f64]) -> FitResult<Self> {
        check_lengths(x, y)?;
        if x.len() < 2 {
            return Err(FitError::NotEnoughPoints { len: x.len(), needed: 2 });
        }

        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut sum_xy = 0.0;
        let mut sum_xx = 0.0;
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        for (&xi, &yi) in x.iter().zip(y) {
            sum_x += xi;
            sum_y += yi;
            sum_xy += xi * yi;
            sum_xx += xi * xi;
            x_min = x_min.min(xi);
            x_max = x_max.max(xi);
        }

        let n = x.len() as f64;
        let denominator = n * sum_xx - sum_x * sum_x;

        // all x identical: no unique line. Non-finite sums fall through so NaN/inf propagate.
        if denominator.is_finite() && (x_min == x_max || denominator == 0.0) {
            return Err(FitError::DegenerateX);
        }

        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;

        Ok(Self { intercept, slope })
    }

    pub fn calculate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn predict(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|&xi| self.calculate(xi)).collect()
    }

    /// Mean squared error of the line against `y`.
    ///
    /// An empty evaluation set carries no signal and yields `+inf`.
    pub fn evaluate_mse(&self, x: &[f64], y: &[f64]) -> FitResult<f64> {
        check_lengths(x, y)?;
        if x.is_empty() {
            return Ok(f64::INFINITY);
        }
        Ok(mean_squared_error(y, &self.predict(x))?)
    }

    /// R² of the line against `y`. An empty evaluation set yields `0.0`.
    pub fn evaluate_r2(&self, x: &[f64], y: &[f64]) -> FitResult<f64> {
        check_lengths(x, y)?;
        if x.is_empty() {
            return Ok(0.0);
        }
        Ok(r_squared(y, &self.predict(x))?)
    }

    pub fn equation(&self) -> String {
        format!("y = {:.4}x + {:.4}", self.slope, self.intercept)
    }
}

/// Estimator lifecycle: unfitted until the first successful [`Estimator::fit`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Estimator {
    #[default]
    Unfitted,
    Fitted(LinReg),
}

impl Estimator {
    pub fn new() -> Self {
        Self::Unfitted
    }

    /// Fits a line to `x` and `y`, replacing any previous fit.
    ///
    /// On error the estimator keeps whatever state it had before.
    pub fn fit(&mut self, x: &[f64], y: &[f64]) -> FitResult<()> {
        *self = Estimator::Fitted(LinReg::train(x, y)?);
        Ok(())
    }

    pub fn model(&self) -> FitResult<&LinReg> {
        match self {
            Estimator::Fitted(model) => Ok(model),
            Estimator::Unfitted => Err(FitError::NotFitted),
        }
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self, Estimator::Fitted(_))
    }

    pub fn slope(&self) -> Option<f64> {
        self.model().ok().map(|m| m.slope)
    }

    pub fn intercept(&self) -> Option<f64> {
        self.model().ok().map(|m| m.intercept)
    }

    pub fn predict(&self, x: &[f64]) -> FitResult<Vec<f64>> {
        Ok(self.model()?.predict(x))
    }

    pub fn evaluate_mse(&self, x: &[f64], y: &[f64]) -> FitResult<f64> {
        self.model()?.evaluate_mse(x, y)
    }

    pub fn evaluate_r2(&self, x: &[f64], y: &[f64]) -> FitResult<f64> {
        self.model()?.evaluate_r2(x, y)
    }
}
