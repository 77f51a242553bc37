//! Regression error metrics over paired ground truth and predictions.
//!
//! Every function rejects empty input and mismatched lengths with
//! [`MetricsError`]. Sums are accumulated in input order.

use crate::stats::fiterror::{MetricsError, MetricsResult};

fn check_pair(y_true: &[f64], y_pred: &[f64]) -> MetricsResult<()> {
    if y_true.len() != y_pred.len() {
        return Err(MetricsError::LengthMismatch { len_true: y_true.len(), len_pred: y_pred.len() });
    }
    if y_true.is_empty() {
        return Err(MetricsError::Empty);
    }
    Ok(())
}

fn sum_squared_residuals(y_true: &[f64], y_pred: &[f64]) -> f64 {
    y_true.iter().zip(y_pred).map(|(&yi, &yhi)| (yi - yhi).powi(2)).sum()
}

/// `mean((y_true[i] - y_pred[i])^2)`
pub fn mean_squared_error(y_true: &[f64], y_pred: &[f64]) -> MetricsResult<f64> {
    check_pair(y_true, y_pred)?;
    Ok(sum_squared_residuals(y_true, y_pred) / y_true.len() as f64)
}

pub fn root_mean_squared_error(y_true: &[f64], y_pred: &[f64]) -> MetricsResult<f64> {
    Ok(mean_squared_error(y_true, y_pred)?.sqrt())
}

/// `mean(|y_true[i] - y_pred[i]|)`
pub fn mean_absolute_error(y_true: &[f64], y_pred: &[f64]) -> MetricsResult<f64> {
    check_pair(y_true, y_pred)?;
    let sum_abs: f64 = y_true.iter().zip(y_pred).map(|(&yi, &yhi)| (yi - yhi).abs()).sum();
    Ok(sum_abs / y_true.len() as f64)
}

/// Coefficient of determination, `1 - SS_res / SS_tot`.
///
/// When every true value is identical `SS_tot` is zero and the result is
/// exactly `1.0`, whatever the predictions are. The value is not clamped and
/// goes negative for predictions worse than the mean of `y_true`.
pub fn r_squared(y_true: &[f64], y_pred: &[f64]) -> MetricsResult<f64> {
    check_pair(y_true, y_pred)?;

    let y_mean = y_true.iter().sum::<f64>() / y_true.len() as f64;
    let ss_tot: f64 = y_true.iter().map(|&yi| (yi - y_mean).powi(2)).sum();
    let ss_res = sum_squared_residuals(y_true, y_pred);

    if ss_tot == 0.0 {
        return Ok(1.0);
    }
    Ok(1.0 - ss_res / ss_tot)
}
