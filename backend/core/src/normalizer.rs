//! Line normalizer: reduces raw OCR output to ordered plate candidates.

use crate::denylist::Denylist;
use crate::types::{DetectionKind, NormalizedLine, RawDetection};

/// Keep LINE detections whose text cleans into a [`NormalizedLine`] and is
/// not denylisted. Relative order is preserved; malformed entries are dropped.
pub fn normalize(detections: &[RawDetection], denylist: &Denylist) -> Vec<NormalizedLine> {
    detections
        .iter()
        .filter(|d| d.kind == DetectionKind::Line)
        .filter_map(|d| d.text.as_deref())
        .filter_map(NormalizedLine::parse)
        .filter(|line| !denylist.contains(line.as_str()))
        .collect()
}
