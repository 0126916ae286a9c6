use crate::math::PercentHelper;
use crate::prelude::Percent;
use crate::report::model::{AnalysisResult, HybridScores};
use serde::Serialize;

/// Final AI score at or above which an image is reported as AI-generated.
pub const VERDICT_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    LikelyAiGenerated,
    LikelyHumanMade,
}

impl Verdict {
    /// Compares the raw `final_ai_score` against the threshold; missing reads as 0.
    pub fn from_hybrid(hybrid: &HybridScores) -> Self {
        if hybrid.final_ai_score.unwrap_or(0.0) >= VERDICT_THRESHOLD {
            Verdict::LikelyAiGenerated
        } else {
            Verdict::LikelyHumanMade
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::LikelyAiGenerated => "Likely AI-generated",
            Verdict::LikelyHumanMade => "Likely human-made",
        }
    }

    pub fn is_ai(&self) -> bool {
        matches!(self, Verdict::LikelyAiGenerated)
    }
}

/// AI vs. human split of the external model's estimate, always summing to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AiSplit {
    pub ai: Percent,
    pub human: Percent,
}

impl AiSplit {
    pub fn from_fraction(ai_generated: Option<f64>) -> Self {
        let ai = PercentHelper::from_unit_interval(ai_generated);
        Self { ai, human: 100 - ai }
    }
}

/// Scalar values shown on the summary cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub image_size_label: String,
    pub exif_present: bool,
    pub operations_count: u64,
    pub ai_generated_percent: Percent,
    pub final_ai_percent: Percent,
    pub forensic_ai_percent: Percent,
    pub metadata_adjustment_percent: Percent,
    pub final_ai_score_text: String,
    pub forensic_score_text: String,
}

impl Summary {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let hybrid = &result.hybrid;
        Self {
            image_size_label: image_size_label(result.local.width, result.local.height),
            exif_present: result.metadata.exif_present.unwrap_or(false),
            operations_count: result.sightengine.request.operations.unwrap_or(0),
            ai_generated_percent: PercentHelper::from_ambiguous_scale(
                result.sightengine.kind.ai_generated,
            ),
            final_ai_percent: PercentHelper::from_ambiguous_scale(hybrid.final_ai_score),
            forensic_ai_percent: PercentHelper::from_ambiguous_scale(hybrid.forensic_ai_pct),
            metadata_adjustment_percent: PercentHelper::from_ambiguous_scale(
                hybrid.metadata_adjustment,
            ),
            final_ai_score_text: format!("{:.2}", hybrid.final_ai_score.unwrap_or(0.0)),
            forensic_score_text: format!("{:.3}", result.local.forensic_score.unwrap_or(0.0)),
        }
    }
}

fn image_size_label(width: Option<u64>, height: Option<u64>) -> String {
    let side = |value: Option<u64>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
    format!("{}×{}", side(width), side(height))
}
