//! Plate matcher: picks at most one plate from normalized lines.
//!
//! Rules are tried in a fixed order and the first rule that matches wins:
//! 1. single line `XXX YYY`;
//! 2. two adjacent short tokens, joined with one space;
//! 3. a 5 to 8 character token that is not all digits.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::error::PlateError;
use crate::types::{NormalizedLine, PlateMatch, PlateResult, PlateTier};

static SINGLE_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]{3} [A-Z0-9]{3}$").unwrap());

static FALLBACK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9]{5,8}$").unwrap());

static ALL_DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Default token length for the two-line rule.
///
/// Deployments have used both exactly 3 and 2..=4; 3 is the default and the
/// wider range is opt-in through configuration.
pub const DEFAULT_TWO_LINE_MIN: usize = 3;
pub const DEFAULT_TWO_LINE_MAX: usize = 3;

/// Inclusive length bounds for each half of a two-line plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenRange {
    pub min: usize,
    pub max: usize,
}

impl TokenRange {
    pub fn new(min: usize, max: usize) -> Result<Self, PlateError> {
        if min == 0 || min > max {
            return Err(PlateError::InvalidTokenRange { min, max });
        }
        Ok(Self { min, max })
    }
}

impl Default for TokenRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_TWO_LINE_MIN,
            max: DEFAULT_TWO_LINE_MAX,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlateMatcher {
    two_line_range: TokenRange,
    two_line_re: Regex,
}

impl PlateMatcher {
    pub fn new(two_line_range: TokenRange) -> Result<Self, PlateError> {
        let range = TokenRange::new(two_line_range.min, two_line_range.max)?;
        let two_line_re = Regex::new(&format!(r"^[A-Z0-9]{{{},{}}}$", range.min, range.max))?;
        Ok(Self {
            two_line_range: range,
            two_line_re,
        })
    }

    pub fn two_line_range(&self) -> TokenRange {
        self.two_line_range
    }

    /// Select a plate from `lines`. Never fails; `None` means no rule matched.
    pub fn find_plate(&self, lines: &[NormalizedLine]) -> PlateResult {
        self.single_line(lines)
            .or_else(|| self.two_line(lines))
            .or_else(|| self.fallback(lines))
    }

    fn single_line(&self, lines: &[NormalizedLine]) -> PlateResult {
        let line = lines.iter().find(|l| SINGLE_LINE_RE.is_match(l.as_str()))?;
        trace!(plate = %line, "single-line rule matched");
        Some(PlateMatch {
            plate: line.as_str().to_string(),
            tier: PlateTier::SingleLine,
        })
    }

    fn two_line(&self, lines: &[NormalizedLine]) -> PlateResult {
        let pair = lines.windows(2).find(|pair| {
            self.two_line_re.is_match(pair[0].as_str()) && self.two_line_re.is_match(pair[1].as_str())
        })?;
        let plate = format!("{} {}", pair[0], pair[1]);
        trace!(plate = %plate, "two-line rule matched");
        Some(PlateMatch {
            plate,
            tier: PlateTier::TwoLine,
        })
    }

    fn fallback(&self, lines: &[NormalizedLine]) -> PlateResult {
        let line = lines.iter().find(|l| {
            FALLBACK_RE.is_match(l.as_str()) && !ALL_DIGITS_RE.is_match(l.as_str())
        })?;
        trace!(plate = %line, "fallback rule matched");
        Some(PlateMatch {
            plate: line.as_str().to_string(),
            tier: PlateTier::Fallback,
        })
    }
}

impl Default for PlateMatcher {
    fn default() -> Self {
        Self {
            two_line_range: TokenRange::default(),
            two_line_re: Regex::new(r"^[A-Z0-9]{3,3}$").unwrap(),
        }
    }
}
