use log::debug;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Paired observations read from a two-column CSV.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Widest row seen, header excluded.
    pub column_count: usize,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.x.len()
    }
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowIssueKind {
    TooFewColumns(usize),
    NotANumber(String),
    NonFinite(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowIssue {
    /// 1-based line in the file, the header being line 1.
    pub line: u64,
    pub kind: RowIssueKind,
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RowIssueKind::TooFewColumns(n) => {
                write!(f, "line {}: found {} value(s), need at least 2", self.line, n)
            },
            RowIssueKind::NotANumber(v) => write!(f, "line {}: '{}' is not a number", self.line, v),
            RowIssueKind::NonFinite(v) => write!(f, "line {}: '{}' is not finite", self.line, v),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed data: {} of {total_rows} row(s) invalid, {valid_rows} valid; every row needs two numbers, e.g. 150000,4000", .issues.len())]
    Malformed { issues: Vec<RowIssue>, total_rows: usize, valid_rows: usize },
    #[error("no valid rows found; expected lines of the form number1,number2")]
    NoData,
}

pub fn load_csv<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    debug!("Opening {}", path.display());
    let file = File::open(path)?;
    load_csv_from_reader(file, delimiter)
}

fn parse_field(raw: &str, line: u64) -> Result<f64, RowIssue> {
    let value: f64 = raw
        .parse()
        .map_err(|_| RowIssue { line, kind: RowIssueKind::NotANumber(raw.to_owned()) })?;
    if !value.is_finite() {
        return Err(RowIssue { line, kind: RowIssueKind::NonFinite(raw.to_owned()) });
    }
    Ok(value)
}

/// Reads `x` from the first column and `y` from the second.
///
/// The first row is a header. Any invalid data row fails the whole load.
pub fn load_csv_from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Dataset, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut data = Dataset::default();
    let mut issues = Vec::new();
    let mut total_rows = 0;

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(i as u64 + 2);

        if record.iter().all(|field| field.is_empty()) {
            debug!("Skipping blank line {}", line);
            continue;
        }
        total_rows += 1;
        data.column_count = data.column_count.max(record.len());

        if record.len() < 2 {
            issues.push(RowIssue { line, kind: RowIssueKind::TooFewColumns(record.len()) });
            continue;
        }

        match (parse_field(&record[0], line), parse_field(&record[1], line)) {
            (Ok(x), Ok(y)) => {
                data.x.push(x);
                data.y.push(y);
            },
            (Err(issue), _) | (_, Err(issue)) => issues.push(issue),
        }
    }

    if !issues.is_empty() {
        for issue in &issues {
            debug!("{}", issue);
        }
        return Err(LoadError::Malformed { issues, total_rows, valid_rows: data.len() });
    }
    if data.is_empty() {
        return Err(LoadError::NoData);
    }

    debug!("Parsed {} rows", data.len());
    Ok(data)
}
