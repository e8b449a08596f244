use tracing::debug;

use crate::denylist::Denylist;
use crate::matcher::PlateMatcher;
use crate::normalizer::normalize;
use crate::types::{PlateResult, RawDetection};

/// Normalize one request's detections and run the matcher over them.
pub fn scan_detections(
    detections: &[RawDetection],
    denylist: &Denylist,
    matcher: &PlateMatcher,
) -> PlateResult {
    let lines = normalize(detections, denylist);
    debug!(
        detections = detections.len(),
        lines = ?lines.iter().map(|l| l.as_str()).collect::<Vec<_>>(),
        "Normalized detected lines"
    );
    matcher.find_plate(&lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TextDetector;
    use crate::types::PlateTier;
    use anyhow::Result;
    use async_trait::async_trait;

    struct FixedDetector(Vec<RawDetection>);

    #[async_trait]
    impl TextDetector for FixedDetector {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn detect_text(&self, _image: &[u8]) -> Result<Vec<RawDetection>> {
            Ok(self.0.clone())
        }
    }

    fn plate_of(raw: &[&str], denylist: &Denylist) -> Option<String> {
        let detections: Vec<_> = raw.iter().map(|s| RawDetection::line(*s)).collect();
        scan_detections(&detections, denylist, &PlateMatcher::default()).map(|m| m.plate)
    }

    #[test]
    fn example_single_line() {
        assert_eq!(plate_of(&["ABC 123"], &Denylist::new()), Some("ABC 123".into()));
    }

    #[test]
    fn example_two_line() {
        assert_eq!(plate_of(&["ABC", "123"], &Denylist::new()), Some("ABC 123".into()));
    }

    #[test]
    fn example_denylisted_banner_skipped() {
        let denylist: Denylist = ["WINNIPEG"].into_iter().collect();
        assert_eq!(
            plate_of(&["WINNIPEG", "AB12345"], &denylist),
            Some("AB12345".into())
        );
        // Without the denylist the banner wins the fallback tier.
        assert_eq!(
            plate_of(&["WINNIPEG", "AB12345"], &Denylist::new()),
            Some("WINNIPEG".into())
        );
    }

    #[test]
    fn example_numeric_only_rejected() {
        assert_eq!(plate_of(&["12345678"], &Denylist::new()), None);
    }

    #[test]
    fn example_empty_detections() {
        assert_eq!(plate_of(&[], &Denylist::new()), None);
    }

    #[test]
    fn denylisted_plate_shape_is_never_returned() {
        let denylist: Denylist = ["GO JETS"].into_iter().collect();
        assert_eq!(plate_of(&["GO JETS", "XYZ 789"], &denylist), Some("XYZ 789".into()));
        let denylist: Denylist = ["ABC 123"].into_iter().collect();
        assert_eq!(plate_of(&["ABC 123"], &denylist), None);
    }

    #[test]
    fn word_fragments_do_not_form_plates() {
        let detections = vec![
            RawDetection::word("ABC"),
            RawDetection::word("123"),
            RawDetection::line("ABC123X").with_confidence(42.0),
        ];
        let result = scan_detections(&detections, &Denylist::new(), &PlateMatcher::default())
            .unwrap();
        assert_eq!(result.plate, "ABC123X");
        assert_eq!(result.tier, PlateTier::Fallback);
    }

    #[tokio::test]
    async fn works_with_an_injected_detector() {
        let detector = FixedDetector(vec![
            RawDetection::line("manitoba"),
            RawDetection::line("abc"),
            RawDetection::line("123"),
        ]);
        let detections = detector.detect_text(b"not really an image").await.unwrap();
        let result = scan_detections(&detections, &Denylist::new(), &PlateMatcher::default());
        assert_eq!(result.map(|m| m.plate), Some("ABC 123".into()));
    }
}
