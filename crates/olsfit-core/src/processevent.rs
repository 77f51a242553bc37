use crate::stats::{LinReg, MetricSet};

#[derive(Debug)]
pub enum ProcessEvent {
    Load(LoadEvent),
    Split(SplitEvent),
    Fit(FitEvent),
    Eval(EvalEvent),
    Plot(PlotEvent),
    Done(Result<(), String>),
}

#[derive(Debug)]
pub enum LoadEvent {
    File(String),
    Rows(usize),
    ExtraColumns(usize),
    Fail(String),
}

#[derive(Debug)]
pub enum SplitEvent {
    Skipped,
    Sizes { train: usize, test: usize },
}

#[derive(Debug)]
pub enum FitEvent {
    Started(usize),
    Fitted(LinReg),
    SlopeOk(LinReg),
    SlopeUnexpected { model: LinReg, expected: String },
    Fail(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalSet {
    Train,
    Test,
}

#[derive(Debug)]
pub enum EvalEvent {
    Metrics(EvalSet, MetricSet),
    Empty(EvalSet),
    Prediction { x: f64, y: f64 },
}

#[derive(Debug)]
pub enum PlotEvent {
    Saved(String),
    Fail(String),
}

pub trait ProcessEventSink {
    fn on_load_event(&mut self, ev: &LoadEvent);
    fn on_split_event(&mut self, ev: &SplitEvent);
    fn on_fit_event(&mut self, ev: &FitEvent);
    fn on_eval_event(&mut self, ev: &EvalEvent);
    fn on_plot_event(&mut self, ev: &PlotEvent);
    fn on_done(&mut self, res: &Result<(), String>);

    fn apply(&mut self, msg: ProcessEvent) {
        match msg {
            ProcessEvent::Load(ev) => self.on_load_event(&ev),
            ProcessEvent::Split(ev) => self.on_split_event(&ev),
            ProcessEvent::Fit(ev) => self.on_fit_event(&ev),
            ProcessEvent::Eval(ev) => self.on_eval_event(&ev),
            ProcessEvent::Plot(ev) => self.on_plot_event(&ev),
            ProcessEvent::Done(res) => self.on_done(&res),
        }
    }
}

/// Collects every event, for callers that inspect the run afterwards.
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<ProcessEvent>,
}

impl ProcessEventSink for EventLog {
    fn on_load_event(&mut self, _ev: &LoadEvent) {}
    fn on_split_event(&mut self, _ev: &SplitEvent) {}
    fn on_fit_event(&mut self, _ev: &FitEvent) {}
    fn on_eval_event(&mut self, _ev: &EvalEvent) {}
    fn on_plot_event(&mut self, _ev: &PlotEvent) {}
    fn on_done(&mut self, _res: &Result<(), String>) {}

    fn apply(&mut self, msg: ProcessEvent) {
        self.events.push(msg);
    }
}

impl LoadEvent {
    pub fn file(path: impl AsRef<std::path::Path>) -> Self {
        Self::File(path.as_ref().to_string_lossy().into_owned())
    }
}

impl PlotEvent {
    pub fn saved(path: impl AsRef<std::path::Path>) -> Self {
        Self::Saved(path.as_ref().to_string_lossy().into_owned())
    }
}
