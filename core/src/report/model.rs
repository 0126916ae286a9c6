//! Typed view of the analysis service response.
//!
//! The service omits fields freely and is not strict about types, so every
//! field here is optional and the record is built from raw JSON in a single
//! defaulting pass: anything absent or of an unexpected type reads as `None`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub local: LocalForensics,
    pub breakdown: Breakdown,
    pub hybrid: HybridScores,
    pub sightengine: SightengineReport,
    pub metadata: ImageMetadata,
}

/// Locally computed signal-analysis scores, each a fraction in `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalForensics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_corr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forensic_score: Option<f64>,
}

/// Named sub-scores, aligned by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakdown {
    pub metrics: Vec<String>,
    pub scores: Vec<Option<f64>>,
}

impl Breakdown {
    /// Score paired with the metric at `index`, if the service sent one.
    pub fn score_at(&self, index: usize) -> Option<f64> {
        self.scores.get(index).copied().flatten()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HybridScores {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_ai_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forensic_ai_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_adjustment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_ai_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SightengineReport {
    #[serde(rename = "type")]
    pub kind: SightengineType,
    pub request: SightengineRequest,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SightengineType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_generated: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SightengineRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operations: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exif_present: Option<bool>,
}

impl AnalysisResult {
    /// Builds the typed record from an arbitrary JSON document. Never fails.
    pub fn from_value(root: &Value) -> Self {
        let read = Reader(root);
        Self {
            local: LocalForensics {
                frequency: read.number("/local/frequency"),
                noise: read.number("/local/noise"),
                compression: read.number("/local/compression"),
                color_corr: read.number("/local/color_corr"),
                width: read.count("/local/width"),
                height: read.count("/local/height"),
                forensic_score: read.number("/local/forensic_score"),
            },
            breakdown: Breakdown {
                metrics: read
                    .list("/breakdown/metrics")
                    .iter()
                    .map(label_of)
                    .collect(),
                scores: read
                    .list("/breakdown/scores")
                    .iter()
                    .map(number_of)
                    .collect(),
            },
            hybrid: HybridScores {
                api_ai_score: read.number("/hybrid/api_ai_score"),
                forensic_ai_pct: read.number("/hybrid/forensic_ai_pct"),
                metadata_adjustment: read.number("/hybrid/metadata_adjustment"),
                final_ai_score: read.number("/hybrid/final_ai_score"),
            },
            sightengine: SightengineReport {
                kind: SightengineType {
                    ai_generated: read.number("/sightengine/type/ai_generated"),
                },
                request: SightengineRequest {
                    operations: read.count("/sightengine/request/operations"),
                },
            },
            metadata: ImageMetadata {
                exif_present: read.flag("/metadata/exif_present"),
            },
        }
    }
}

/// Total accessor over a JSON document: every read names its path and yields
/// `None` instead of failing.
struct Reader<'a>(&'a Value);

impl<'a> Reader<'a> {
    fn number(&self, pointer: &str) -> Option<f64> {
        self.0.pointer(pointer).and_then(number_of)
    }

    fn count(&self, pointer: &str) -> Option<u64> {
        let value = self.0.pointer(pointer)?;
        value.as_u64().or_else(|| {
            number_of(value)
                .filter(|n| n.is_finite() && *n >= 0.0)
                .map(|n| n.round() as u64)
        })
    }

    fn flag(&self, pointer: &str) -> Option<bool> {
        self.0.pointer(pointer).and_then(Value::as_bool)
    }

    fn list(&self, pointer: &str) -> &'a [Value] {
        self.0
            .pointer(pointer)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn label_of(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
