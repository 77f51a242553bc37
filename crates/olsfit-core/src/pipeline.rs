//! Load, split, fit, evaluate and plot in one run.
//!
//! Progress is reported through a [`ProcessEventSink`]; nothing here prints.

use crate::data::{load_csv, train_test_split, Dataset, LoadError, SplitError};
use crate::plot::{plot_path, save_regression_png, PlotText};
use crate::processevent::{
    EvalEvent, EvalSet, FitEvent, LoadEvent, PlotEvent, ProcessEvent, ProcessEventSink,
    SplitEvent,
};
use crate::slope::SlopeExpectation;
use crate::stats::{FitError, LinReg, MetricSet, MetricsError};

use rand::Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Split(#[from] SplitError),
    #[error(transparent)]
    Fit(#[from] FitError),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FitJob {
    pub input: PathBuf,
    pub delimiter: u8,
    /// Fraction held out for testing; `0.0` fits on every row.
    pub test_size: f64,
    pub plot_dir: Option<PathBuf>,
    pub expect_slope: SlopeExpectation,
    pub predict: Vec<f64>,
}

impl FitJob {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            delimiter: b',',
            test_size: 0.0,
            plot_dir: None,
            expect_slope: SlopeExpectation::Any,
            predict: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitReport {
    pub source: String,
    pub n_rows: usize,
    pub n_train: usize,
    pub n_test: usize,
    pub slope: f64,
    pub intercept: f64,
    pub equation: String,
    pub slope_as_expected: bool,
    pub train: MetricSet,
    pub test: Option<MetricSet>,
    pub predictions: Vec<Prediction>,
    pub plot: Option<String>,
}

impl FitReport {
    pub fn model(&self) -> LinReg {
        LinReg::from_val(self.intercept, self.slope)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Loads `job.input` and runs the rest of the job on it.
pub fn run<R, S>(job: &FitJob, rng: &mut R, sink: &mut S) -> Result<FitReport, PipelineError>
where
    R: Rng + ?Sized,
    S: ProcessEventSink + ?Sized,
{
    sink.apply(ProcessEvent::Load(LoadEvent::file(&job.input)));
    let data = match load_csv(&job.input, job.delimiter) {
        Ok(data) => data,
        Err(e) => {
            sink.apply(ProcessEvent::Load(LoadEvent::Fail(e.to_string())));
            sink.apply(ProcessEvent::Done(Err(e.to_string())));
            return Err(e.into());
        },
    };
    run_on_dataset(job, &data, rng, sink)
}

/// Runs a job on data that is already in memory. `job.input` only names the
/// plot file.
pub fn run_on_dataset<R, S>(
    job: &FitJob,
    data: &Dataset,
    rng: &mut R,
    sink: &mut S,
) -> Result<FitReport, PipelineError>
where
    R: Rng + ?Sized,
    S: ProcessEventSink + ?Sized,
{
    let res = fit_and_evaluate(job, data, rng, sink);
    match &res {
        Ok(_) => sink.apply(ProcessEvent::Done(Ok(()))),
        Err(e) => sink.apply(ProcessEvent::Done(Err(e.to_string()))),
    }
    res
}

fn fit_and_evaluate<R, S>(
    job: &FitJob,
    data: &Dataset,
    rng: &mut R,
    sink: &mut S,
) -> Result<FitReport, PipelineError>
where
    R: Rng + ?Sized,
    S: ProcessEventSink + ?Sized,
{
    if data.column_count > 2 {
        sink.apply(ProcessEvent::Load(LoadEvent::ExtraColumns(data.column_count)));
    }
    sink.apply(ProcessEvent::Load(LoadEvent::Rows(data.len())));

    // anything but zero goes through the splitter, which rejects NaN and out-of-range sizes
    let split = if job.test_size != 0.0 {
        let split = train_test_split(&data.x, &data.y, job.test_size, rng)?;
        sink.apply(ProcessEvent::Split(SplitEvent::Sizes {
            train: split.x_train.len(),
            test: split.x_test.len(),
        }));
        Some(split)
    } else {
        sink.apply(ProcessEvent::Split(SplitEvent::Skipped));
        None
    };
    let (x_train, y_train, x_test, y_test): (&[f64], &[f64], &[f64], &[f64]) = match &split {
        Some(s) => {
            (s.x_train.as_slice(), s.y_train.as_slice(), s.x_test.as_slice(), s.y_test.as_slice())
        },
        None => (data.x.as_slice(), data.y.as_slice(), &[][..], &[][..]),
    };

    sink.apply(ProcessEvent::Fit(FitEvent::Started(x_train.len())));
    let model = match LinReg::train(x_train, y_train) {
        Ok(model) => model,
        Err(e) => {
            sink.apply(ProcessEvent::Fit(FitEvent::Fail(e.to_string())));
            return Err(e.into());
        },
    };
    sink.apply(ProcessEvent::Fit(FitEvent::Fitted(model)));

    let slope_as_expected = job.expect_slope.check(model.slope);
    if job.expect_slope != SlopeExpectation::Any {
        if slope_as_expected {
            sink.apply(ProcessEvent::Fit(FitEvent::SlopeOk(model)));
        } else {
            sink.apply(ProcessEvent::Fit(FitEvent::SlopeUnexpected {
                model,
                expected: job.expect_slope.to_string(),
            }));
        }
    }

    let train = MetricSet::compute(y_train, &model.predict(x_train))?;
    sink.apply(ProcessEvent::Eval(EvalEvent::Metrics(EvalSet::Train, train)));

    let test = if x_test.is_empty() {
        if split.is_some() {
            sink.apply(ProcessEvent::Eval(EvalEvent::Empty(EvalSet::Test)));
        }
        None
    } else {
        let test = MetricSet::compute(y_test, &model.predict(x_test))?;
        sink.apply(ProcessEvent::Eval(EvalEvent::Metrics(EvalSet::Test, test)));
        Some(test)
    };

    let predictions: Vec<Prediction> =
        job.predict.iter().map(|&x| Prediction { x, y: model.calculate(x) }).collect();
    for p in &predictions {
        sink.apply(ProcessEvent::Eval(EvalEvent::Prediction { x: p.x, y: p.y }));
    }

    let plot = job.plot_dir.as_deref().and_then(|dir| plot_all(dir, job, data, &model, sink));

    Ok(FitReport {
        source: job.input.display().to_string(),
        n_rows: data.len(),
        n_train: x_train.len(),
        n_test: x_test.len(),
        slope: model.slope,
        intercept: model.intercept,
        equation: model.equation(),
        slope_as_expected,
        train,
        test,
        predictions,
        plot,
    })
}

// plot failures are reported, never fatal
fn plot_all<S: ProcessEventSink + ?Sized>(
    dir: &Path,
    job: &FitJob,
    data: &Dataset,
    model: &LinReg,
    sink: &mut S,
) -> Option<String> {
    let path = plot_path(dir, &job.input);
    let text = PlotText { title: format!("Linear regression: {}", model.equation()), ..PlotText::default() };
    match save_regression_png(&path, &data.x, &data.y, &model.predict(&data.x), &text) {
        Ok(()) => {
            sink.apply(ProcessEvent::Plot(PlotEvent::saved(&path)));
            Some(path.display().to_string())
        },
        Err(e) => {
            sink.apply(ProcessEvent::Plot(PlotEvent::Fail(e.to_string())));
            None
        },
    }
}
