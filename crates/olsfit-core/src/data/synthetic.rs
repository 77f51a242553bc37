use log::debug;
use rand::Rng;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntheticError {
    #[error("noise must be a finite, non-negative number, got {0}")]
    InvalidNoise(f64),
}

/// Parameters of a noisy straight line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Synthetic {
    pub n_samples: usize,
    /// Relative noise: each `y` moves by up to `noise * |y|`.
    pub noise: f64,
    pub slope: f64,
    pub intercept: f64,
}

impl Default for Synthetic {
    fn default() -> Self {
        Self { n_samples: 100, noise: 0.1, slope: 2.0, intercept: 1.0 }
    }
}

/// `x` spreads over roughly `[0, 100)` with ±5 jitter.
pub fn generate_linear_data<R: Rng + ?Sized>(
    params: &Synthetic,
    rng: &mut R,
) -> Result<(Vec<f64>, Vec<f64>), SyntheticError> {
    let noise = params.noise;
    if !(noise.is_finite() && noise >= 0.0) {
        return Err(SyntheticError::InvalidNoise(noise));
    }

    let mut x = Vec::with_capacity(params.n_samples);
    let mut y = Vec::with_capacity(params.n_samples);
    let step = 100.0 / params.n_samples.max(1) as f64;

    for i in 0..params.n_samples {
        let x_val = i as f64 * step + rng.random_range(-5.0_f64..5.0);
        let y_perfect = params.slope * x_val + params.intercept;
        let y_val = y_perfect + rng.random_range(-noise..=noise) * y_perfect.abs();
        x.push(x_val);
        y.push(y_val);
    }

    debug!(
        "Generated {} samples around y = {}x + {} (noise {})",
        params.n_samples, params.slope, params.intercept, params.noise
    );
    Ok((x, y))
}

pub fn write_csv<W: Write>(writer: W, x: &[f64], y: &[f64]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["x", "y"])?;
    for (xi, yi) in x.iter().zip(y) {
        wtr.write_record([xi.to_string(), yi.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}
