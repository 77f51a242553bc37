use std::fmt;
use std::str::FromStr;

#[derive(Debug)]
pub struct ParseSlopeError(String);

impl fmt::Display for ParseSlopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for ParseSlopeError {}

// which way the fitted line is expected to point
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum SlopeExpectation {
    #[default]
    Any,
    Negative,
    Positive,
}

impl FromStr for SlopeExpectation {
    type Err = ParseSlopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(SlopeExpectation::Any),
            "negative" | "neg" | "descending" => Ok(SlopeExpectation::Negative),
            "positive" | "pos" | "ascending" => Ok(SlopeExpectation::Positive),
            other => Err(ParseSlopeError(format!("invalid slope expectation: {other}"))),
        }
    }
}

impl SlopeExpectation {
    /// A zero slope never satisfies a directional expectation.
    pub fn check(&self, slope: f64) -> bool {
        match self {
            SlopeExpectation::Any => true,
            SlopeExpectation::Negative => slope < 0.0,
            SlopeExpectation::Positive => slope > 0.0,
        }
    }
}

impl fmt::Display for SlopeExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlopeExpectation::Any => write!(f, "any"),
            SlopeExpectation::Negative => write!(f, "negative"),
            SlopeExpectation::Positive => write!(f, "positive"),
        }
    }
}
