//! `platescan-core`: licence-plate extraction from OCR output.
//!
//! Raw detections pass through the [`normalize`] step and then the
//! [`PlateMatcher`]. Everything here is synchronous and pure except the
//! [`TextDetector`] seam, which the service layer implements.

pub mod denylist;
pub mod error;
pub mod matcher;
pub mod normalizer;
pub mod scan;
pub mod traits;
pub mod types;

pub use denylist::Denylist;
pub use error::PlateError;
pub use matcher::{PlateMatcher, TokenRange};
pub use normalizer::normalize;
pub use scan::scan_detections;
pub use traits::TextDetector;
pub use types::{
    DetectionKind, NormalizedLine, PlateMatch, PlateResult, PlateTier, RawDetection, MIN_LINE_LEN,
};
