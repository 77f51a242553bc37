use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    #[error("x and y have different lengths: {len_x} vs {len_y}")]
    LengthMismatch { len_x: usize, len_y: usize },
    #[error("no data to split")]
    Empty,
    #[error("test size must be between 0 and 1, got {0}")]
    InvalidTestSize(f64),
}

/// Disjoint train and test partitions of one dataset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Split {
    pub x_train: Vec<f64>,
    pub y_train: Vec<f64>,
    pub x_test: Vec<f64>,
    pub y_test: Vec<f64>,
}

/// Shuffles the observation indices with `rng` and puts the last
/// `floor(n * test_size)` of them in the test set.
pub fn train_test_split<R: Rng + ?Sized>(
    x: &[f64],
    y: &[f64],
    test_size: f64,
    rng: &mut R,
) -> Result<Split, SplitError> {
    if x.len() != y.len() {
        return Err(SplitError::LengthMismatch { len_x: x.len(), len_y: y.len() });
    }
    if x.is_empty() {
        return Err(SplitError::Empty);
    }
    if !(0.0..=1.0).contains(&test_size) {
        return Err(SplitError::InvalidTestSize(test_size));
    }

    let mut indices: Vec<usize> = (0..x.len()).collect();
    indices.shuffle(rng);

    let test_len = (x.len() as f64 * test_size) as usize;
    let (train_idx, test_idx) = indices.split_at(x.len() - test_len);

    let split = Split {
        x_train: train_idx.iter().map(|&i| x[i]).collect(),
        y_train: train_idx.iter().map(|&i| y[i]).collect(),
        x_test: test_idx.iter().map(|&i| x[i]).collect(),
        y_test: test_idx.iter().map(|&i| y[i]).collect(),
    };
    debug!("Split {} rows into {} train / {} test", x.len(), train_idx.len(), test_idx.len());
    Ok(split)
}
