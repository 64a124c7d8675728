//! Benchmark log parsing
//!
//! Two log shapes are recognised:
//!
//! - **Combined**: one `SEQUENTIAL: <t>s` or `PARALLEL: <t>s` line plus a
//!   `Score: <n>` line (MPI runs and the sequential/parallel pairs).
//! - **Split**: `Total time: <t>s`, `Parallel time: <t>s` and
//!   `Sequential time: <t>s`, all required, plus `Score: <n>` (threaded runs).
//!
//! Fields are found by unanchored search over the whole text, so the score
//! matrix dumps and debug lines the LCS programs print are ignored. A parse
//! either yields a complete [`RawMeasurement`] or a [`ParseError`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::experiment::{Mode, RawMeasurement};

/// Log grammar a run file follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogShape {
    /// `SEQUENTIAL:`/`PARALLEL:` tagged elapsed time.
    Combined,
    /// Separate total, parallel and sequential time lines.
    Split,
    /// Split when a `Total time:` line is present, combined otherwise.
    #[default]
    Auto,
}

/// Why a log could not be turned into a measurement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A field required by the detected shape was not found
    #[error("missing `{0}` field")]
    MissingField(&'static str),

    /// A field was found but its value is not a non-negative number
    #[error("field `{field}` is not a non-negative number: {value:?}")]
    InvalidNumber {
        /// Field name as it appears in the log
        field: &'static str,
        /// Offending token
        value: String,
    },
}

const TOTAL: &str = "Total time";
const PARALLEL: &str = "Parallel time";
const SEQUENTIAL: &str = "Sequential time";
const SCORE: &str = "Score";
const ELAPSED: &str = "SEQUENTIAL/PARALLEL";

/// Compiled field patterns for one log shape.
#[derive(Debug, Clone)]
pub struct LogParser {
    shape: LogShape,
    elapsed: Regex,
    total: Regex,
    parallel: Regex,
    sequential: Regex,
    score: Regex,
}

impl LogParser {
    /// Compile the field patterns.
    ///
    /// # Errors
    ///
    /// Returns `Error::Pattern` if a pattern fails to compile.
    pub fn new(shape: LogShape) -> crate::Result<Self> {
        Ok(Self {
            shape,
            elapsed: Regex::new(r"\b(SEQUENTIAL|PARALLEL):\s*(\S+)")?,
            total: Regex::new(r"Total time:\s*(\S+)")?,
            parallel: Regex::new(r"Parallel time:\s*(\S+)")?,
            sequential: Regex::new(r"Sequential time:\s*(\S+)")?,
            score: Regex::new(r"\bScore:\s*(\S+)")?,
        })
    }

    /// Shape this parser was built for.
    #[must_use]
    pub const fn shape(&self) -> LogShape {
        self.shape
    }

    /// Parse the full text of one log file.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` when a required field is missing or a found field
    /// is not a non-negative number.
    ///
    /// # Example
    ///
    /// ```
    /// use lcs_perf::parser::{LogParser, LogShape};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let parser = LogParser::new(LogShape::Combined)?;
    /// let run = parser.parse("Score: 12\nPARALLEL: 0.002520s\n")?;
    /// assert_eq!(run.total_time(), Some(0.002520));
    /// assert_eq!(run.score(), 12);
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse(&self, text: &str) -> Result<RawMeasurement, ParseError> {
        match self.shape {
            LogShape::Combined => self.parse_combined(text),
            LogShape::Split => self.parse_split(text),
            LogShape::Auto if self.total.is_match(text) => self.parse_split(text),
            LogShape::Auto => self.parse_combined(text),
        }
    }

    fn parse_combined(&self, text: &str) -> Result<RawMeasurement, ParseError> {
        let caps = self
            .elapsed
            .captures(text)
            .ok_or(ParseError::MissingField(ELAPSED))?;
        let mode = if &caps[1] == "PARALLEL" {
            Mode::Parallel
        } else {
            Mode::Sequential
        };
        let elapsed = parse_seconds(ELAPSED, &caps[2])?;
        let score = self.parse_score(text)?;

        Ok(RawMeasurement::combined(mode, elapsed, score))
    }

    fn parse_split(&self, text: &str) -> Result<RawMeasurement, ParseError> {
        let total = find_seconds(&self.total, TOTAL, text)?;
        let parallel = find_seconds(&self.parallel, PARALLEL, text)?;
        let sequential = find_seconds(&self.sequential, SEQUENTIAL, text)?;
        let score = self.parse_score(text)?;

        Ok(RawMeasurement::split(total, parallel, sequential, score))
    }

    fn parse_score(&self, text: &str) -> Result<u64, ParseError> {
        let caps = self
            .score
            .captures(text)
            .ok_or(ParseError::MissingField(SCORE))?;
        caps[1].parse().map_err(|_| ParseError::InvalidNumber {
            field: SCORE,
            value: caps[1].to_string(),
        })
    }
}

fn find_seconds(re: &Regex, field: &'static str, text: &str) -> Result<f64, ParseError> {
    let caps = re.captures(text).ok_or(ParseError::MissingField(field))?;
    parse_seconds(field, &caps[1])
}

/// Parse `1.250000s` / `1.25` into seconds.
fn parse_seconds(field: &'static str, token: &str) -> Result<f64, ParseError> {
    let digits = token.strip_suffix('s').unwrap_or(token);
    match digits.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(ParseError::InvalidNumber {
            field,
            value: token.to_string(),
        }),
    }
}
