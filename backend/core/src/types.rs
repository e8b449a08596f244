use std::fmt;

use serde::{Deserialize, Serialize};

/// Granularity of a single OCR detection.
///
/// Serialized with the upper-case labels used by text-detection services
/// (`"LINE"`, `"WORD"`). Any other label is kept verbatim in [`DetectionKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DetectionKind {
    Line,
    Word,
    Other(String),
}

impl DetectionKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Line => "LINE",
            Self::Word => "WORD",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for DetectionKind {
    fn from(label: String) -> Self {
        if label.eq_ignore_ascii_case("LINE") {
            Self::Line
        } else if label.eq_ignore_ascii_case("WORD") {
            Self::Word
        } else {
            Self::Other(label)
        }
    }
}

impl From<DetectionKind> for String {
    fn from(kind: DetectionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for DetectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One item returned by a text detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDetection {
    pub kind: DetectionKind,
    /// Recognized text, as returned. `None` when the detector omitted it.
    #[serde(default)]
    pub text: Option<String>,
    /// Detector confidence in percent. Carried through but never used for matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl RawDetection {
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            kind: DetectionKind::Line,
            text: Some(text.into()),
            confidence: None,
        }
    }

    pub fn word(text: impl Into<String>) -> Self {
        Self {
            kind: DetectionKind::Word,
            text: Some(text.into()),
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Minimum length of a plate candidate, after trimming.
pub const MIN_LINE_LEN: usize = 3;

/// A cleaned plate candidate: `[A-Z0-9 ]` only, trimmed, at least
/// [`MIN_LINE_LEN`] characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedLine(String);

impl NormalizedLine {
    /// Clean `raw` into a candidate line, or `None` if it can never be one.
    ///
    /// Only ASCII letters are upper-cased, so accented or non-Latin text is
    /// rejected instead of being folded into something plate-like.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.chars().count() < MIN_LINE_LEN {
            return None;
        }
        let upper = raw.to_ascii_uppercase();
        let allowed = upper
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == ' ');
        if !allowed {
            return None;
        }
        let trimmed = upper.trim();
        if trimmed.len() < MIN_LINE_LEN {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for NormalizedLine {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which matcher rule produced a plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlateTier {
    /// `XXX YYY` on one line.
    SingleLine,
    /// Two adjacent short tokens joined with a space.
    TwoLine,
    /// Any 5 to 8 character alphanumeric token that is not all digits.
    Fallback,
}

impl fmt::Display for PlateTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SingleLine => "single-line",
            Self::TwoLine => "two-line",
            Self::Fallback => "fallback",
        };
        f.write_str(label)
    }
}

/// A selected plate and the rule that selected it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlateMatch {
    pub plate: String,
    pub tier: PlateTier,
}

/// Outcome of matching one request's lines. `None` means no plate was found.
pub type PlateResult = Option<PlateMatch>;
