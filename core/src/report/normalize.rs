use crate::report::model::AnalysisResult;
use crate::report::series::{
    build_breakdown_bars, build_breakdown_series, build_hybrid_series, build_local_series,
    BarRow, BreakdownEntry, HybridEntry, SeriesEntry,
};
use crate::report::summary::{AiSplit, Summary, Verdict};
use serde::Serialize;

/// Render-ready view of one analysis response.
///
/// Built once per response and never patched afterwards; a new submission
/// produces a new report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedReport {
    pub verdict: Verdict,
    pub ai_split: AiSplit,
    pub local_series: Vec<SeriesEntry>,
    pub breakdown_series: Vec<BreakdownEntry>,
    pub breakdown_bars: Vec<BarRow>,
    pub hybrid_series: Vec<HybridEntry>,
    pub summary: Summary,
}

impl NormalizedReport {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            verdict: Verdict::from_hybrid(&result.hybrid),
            ai_split: AiSplit::from_fraction(result.sightengine.kind.ai_generated),
            local_series: build_local_series(&result.local),
            breakdown_series: build_breakdown_series(&result.breakdown),
            breakdown_bars: build_breakdown_bars(&result.breakdown),
            hybrid_series: build_hybrid_series(&result.hybrid),
            summary: Summary::from_result(result),
        }
    }

    /// Normalizes a raw JSON document straight from the service.
    pub fn from_value(value: &serde_json::Value) -> Self {
        Self::from_result(&AnalysisResult::from_value(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_payload_normalizes_to_placeholders() {
        let report = NormalizedReport::from_value(&json!({}));
        assert_eq!(report.verdict, Verdict::LikelyHumanMade);
        assert!(report.local_series.is_empty());
        assert!(report.breakdown_series.is_empty());
        assert!(report.breakdown_bars.is_empty());
        assert!(report.hybrid_series.is_empty());
        assert_eq!(report.summary.image_size_label, "-×-");
        assert_eq!(report.ai_split, AiSplit { ai: 0, human: 100 });
    }

    #[test]
    fn local_scores_end_to_end() {
        let report = NormalizedReport::from_value(&json!({
            "local": { "frequency": 0.5, "noise": 0, "compression": 0.8, "color_corr": 0 }
        }));
        let entries: Vec<(&str, u8)> = report
            .local_series
            .iter()
            .map(|e| (e.label.as_str(), e.percent))
            .collect();
        assert_eq!(entries, vec![("Frequency", 50), ("Compression", 80)]);
    }

    #[test]
    fn breakdown_end_to_end() {
        let report = NormalizedReport::from_value(&json!({
            "breakdown": { "metrics": ["Color", "Sharpness"], "scores": [40, 0] }
        }));
        assert_eq!(report.breakdown_series.len(), 1);
        assert_eq!(report.breakdown_series[0].label, "Color correction");
        assert_eq!(report.breakdown_series[0].percent, 40);
        assert_eq!(report.breakdown_bars.len(), 2);
    }

    #[test]
    fn full_payload() {
        let report = NormalizedReport::from_value(&json!({
            "local": {
                "frequency": 0.31, "noise": 0.12, "compression": 0.66, "color_corr": 0.2,
                "width": 1920, "height": 1080, "forensic_score": 0.4412
            },
            "breakdown": {
                "metrics": ["Frequency", "Noise", "Color"],
                "scores": [31, 12, 20]
            },
            "hybrid": {
                "api_ai_score": 0.97, "forensic_ai_pct": 44.1,
                "metadata_adjustment": 5, "final_ai_score": 84.3
            },
            "sightengine": { "type": { "ai_generated": 0.97 }, "request": { "operations": 1 } },
            "metadata": { "exif_present": false }
        }));

        assert!(report.verdict.is_ai());
        assert_eq!(report.ai_split, AiSplit { ai: 97, human: 3 });
        assert_eq!(report.local_series.len(), 4);
        assert_eq!(report.breakdown_series[2].label, "Color correction");
        let hybrid: Vec<u8> = report.hybrid_series.iter().map(|e| e.percent).collect();
        assert_eq!(hybrid, vec![97, 44, 5, 84]);
        assert_eq!(report.summary.image_size_label, "1920×1080");
        assert_eq!(report.summary.operations_count, 1);
        assert_eq!(report.summary.final_ai_score_text, "84.30");
    }

    #[test]
    fn hostile_values_stay_bounded() {
        let report = NormalizedReport::from_value(&json!({
            "local": { "frequency": -4, "noise": 1e300, "compression": "0.3" },
            "breakdown": { "metrics": ["x", "y"], "scores": [-50, 1e12] },
            "hybrid": { "api_ai_score": -0.5, "final_ai_score": 1e9, "forensic_ai_pct": 300 }
        }));
        for entry in &report.local_series {
            assert!(entry.percent <= 100);
        }
        assert_eq!(report.local_series.len(), 2);
        assert_eq!(report.breakdown_series.len(), 1);
        assert_eq!(report.breakdown_series[0].percent, 100);
        assert!(report.hybrid_series.iter().all(|e| e.percent > 0 && e.percent <= 100));
        assert!(report.verdict.is_ai());
    }
}
