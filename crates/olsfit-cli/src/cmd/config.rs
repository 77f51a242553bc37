use olsfit_core::data::{generate_linear_data, write_csv, Synthetic, SyntheticError};
use olsfit_core::pipeline::{self, FitJob, FitReport, PipelineError};
use olsfit_core::processevent::{
    EvalEvent, EvalSet, FitEvent, LoadEvent, PlotEvent, ProcessEventSink, SplitEvent,
};

use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use thiserror::Error;

/* =================== Public configuration types =================== */

#[derive(Debug)]
pub struct Config {
    pub action: Action,
}

#[derive(Debug, Clone)]
pub enum Action {
    Fit(Fit),
    Generate(Generate),
}

#[derive(Debug, Clone)]
pub struct Fit {
    pub job: FitJob,
    pub seed: Option<u64>,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct Generate {
    pub synthetic: Synthetic,
    pub seed: Option<u64>,
    pub output: PathBuf,
}

#[derive(Debug, Error)]
pub enum CmdError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Synthetic(#[from] SyntheticError),
}

impl CmdError {
    /// Pipeline failures have already been logged by the event sink.
    pub fn is_reported(&self) -> bool {
        matches!(self, CmdError::Pipeline(_))
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/* =================== Entry point =================== */

impl Config {
    pub fn run(&mut self) -> Result<(), CmdError> {
        match &self.action.clone() {
            Action::Fit(f) => self.run_fit(f).map(|_| ()),
            Action::Generate(g) => self.run_generate(g),
        }
    }
}

/* =================== Actions =================== */

impl Config {
    fn run_fit(&mut self, f: &Fit) -> Result<FitReport, CmdError> {
        let mut rng = make_rng(f.seed);
        let report = pipeline::run(&f.job, &mut rng, self)?;

        if f.json {
            println!("{}", report.to_json_pretty()?);
        }
        Ok(report)
    }

    fn run_generate(&self, g: &Generate) -> Result<(), CmdError> {
        let mut rng = make_rng(g.seed);
        let (x, y) = generate_linear_data(&g.synthetic, &mut rng)?;

        if let Some(parent) = g.output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(&g.output)?;
        write_csv(BufWriter::new(file), &x, &y)?;
        info!("Wrote {} samples to {}", x.len(), g.output.display());
        Ok(())
    }
}

impl ProcessEventSink for Config {
    fn on_load_event(&mut self, ev: &LoadEvent) {
        match ev {
            LoadEvent::File(path) => info!("Loading data from CSV: {}", path),
            LoadEvent::Rows(n) => info!("Data loaded: {} samples", n),
            LoadEvent::ExtraColumns(n) => warn!("CSV has {} columns, using only the first 2", n),
            LoadEvent::Fail(msg) => debug!("Could not load data: {}", msg),
        }
    }

    fn on_split_event(&mut self, ev: &SplitEvent) {
        match ev {
            SplitEvent::Skipped => {},
            SplitEvent::Sizes { train, test } => {
                info!("Split data: {} training / {} test samples", train, test)
            },
        }
    }

    fn on_fit_event(&mut self, ev: &FitEvent) {
        match ev {
            FitEvent::Started(n) => info!("Fitting least squares line on {} samples", n),
            FitEvent::Fitted(model) => {
                info!("Slope (m): {:.4}", model.slope);
                info!("Intercept (b): {:.4}", model.intercept);
                info!("Equation: {}", model);
            },
            FitEvent::SlopeOk(model) => info!("Slope {:.4} points the expected way", model.slope),
            FitEvent::SlopeUnexpected { model, expected } => {
                warn!("Slope {:.4} is not {} as expected", model.slope, expected)
            },
            FitEvent::Fail(msg) => debug!("Fit failed: {}", msg),
        }
    }

    fn on_eval_event(&mut self, ev: &EvalEvent) {
        match ev {
            EvalEvent::Metrics(set, m) => {
                let label = match set {
                    EvalSet::Train => "train",
                    EvalSet::Test => "test",
                };
                info!("[{}] {}", label, m);
                info!("[{}] {}, {}", label, m.mse_quality(), m.r2_quality());
            },
            EvalEvent::Empty(_) => warn!("Test set is empty, nothing to evaluate"),
            EvalEvent::Prediction { x, y } => info!("x = {:.2} -> y = {:.2}", x, y),
        }
    }

    fn on_plot_event(&mut self, ev: &PlotEvent) {
        match ev {
            PlotEvent::Saved(path) => info!("Plot saved to {}", path),
            PlotEvent::Fail(msg) => warn!("Could not draw plot: {}", msg),
        }
    }

    fn on_done(&mut self, res: &Result<(), String>) {
        match res {
            Ok(()) => info!("Pipeline finished"),
            Err(e) => error!("Pipeline failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("olsfit-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_generate_then_fit() {
        let csv = tmp_path("gen.csv");
        let mut cfg = Config {
            action: Action::Generate(Generate {
                synthetic: Synthetic { n_samples: 40, noise: 0.0, slope: -1.5, intercept: 4.0 },
                seed: Some(9),
                output: csv.clone(),
            }),
        };
        cfg.run().unwrap();

        let fit = Fit { job: FitJob { test_size: 0.25, ..FitJob::new(&csv) }, seed: Some(1), json: false };
        let report = cfg.run_fit(&fit).unwrap();
        assert!((report.slope + 1.5).abs() < 1e-9);
        assert!((report.intercept - 4.0).abs() < 1e-9);
        assert_eq!(report.n_test, 10);

        std::fs::remove_file(&csv).ok();
    }

    #[test]
    fn test_fit_missing_file() {
        let mut cfg = Config {
            action: Action::Fit(Fit {
                job: FitJob::new(tmp_path("missing.csv")),
                seed: None,
                json: false,
            }),
        };
        assert!(matches!(cfg.run(), Err(CmdError::Pipeline(PipelineError::Load(_)))));
    }

    #[test]
    fn test_bad_noise_rejected() {
        for noise in [-1.0, f64::NAN, f64::INFINITY] {
            let output = tmp_path("never.csv");
            let mut cfg = Config {
                action: Action::Generate(Generate {
                    synthetic: Synthetic { noise, ..Default::default() },
                    seed: Some(0),
                    output: output.clone(),
                }),
            };
            let err = cfg.run().unwrap_err();
            assert!(matches!(err, CmdError::Synthetic(SyntheticError::InvalidNoise(_))));
            assert!(!err.is_reported());
            assert!(!output.exists());
        }
    }

    #[test]
    fn test_pipeline_errors_are_reported_once() {
        let mut cfg = Config {
            action: Action::Fit(Fit {
                job: FitJob::new(tmp_path("also-missing.csv")),
                seed: Some(0),
                json: false,
            }),
        };
        assert!(cfg.run().unwrap_err().is_reported());
    }
}
