use pulsecore::report::model::{
    AnalysisResult, Breakdown, HybridScores, ImageMetadata, LocalForensics, SightengineReport,
    SightengineRequest, SightengineType,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const SIZES: [(u64, u64); 5] = [(640, 480), (1024, 1024), (1280, 720), (1920, 1080), (4032, 3024)];

/// How the mock analysis service answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MockProfile {
    pub seed: u64,
    /// Answer every analysis request with this status instead of a result.
    pub fail_status: Option<u16>,
    pub fail_body: String,
    /// Send the result as `text/plain` instead of JSON.
    pub plain_text: bool,
}

impl Default for MockProfile {
    fn default() -> Self {
        Self {
            seed: 0,
            fail_status: None,
            fail_body: String::new(),
            plain_text: false,
        }
    }
}

/// FNV-1a over the upload so the same image always gets the same verdict.
fn fingerprint(upload: &[u8]) -> u64 {
    upload.iter().fold(0xcbf2_9ce4_8422_2325, |hash, &byte| {
        (hash ^ byte as u64).wrapping_mul(0x0100_0000_01b3)
    })
}

fn fraction(rng: &mut StdRng) -> f64 {
    (rng.gen_range(0.0..1.0_f64) * 1000.0).round() / 1000.0
}

/// Builds a plausible analysis record for `upload`.
pub fn synthesize(profile: &MockProfile, upload: &[u8]) -> AnalysisResult {
    let mut rng = StdRng::seed_from_u64(profile.seed ^ fingerprint(upload));

    let local = [fraction(&mut rng), fraction(&mut rng), fraction(&mut rng), fraction(&mut rng)];
    let (width, height) = SIZES[rng.gen_range(0..SIZES.len())];
    let forensic_score = local.iter().sum::<f64>() / local.len() as f64;
    let exif_present = rng.gen_bool(0.5);

    let api_ai_score = fraction(&mut rng);
    let forensic_ai_pct = (forensic_score * 1000.0).round() / 10.0;
    let metadata_adjustment = if exif_present { 0.0 } else { 5.0 };
    let final_ai_score = (api_ai_score * 100.0 * 0.6 + forensic_ai_pct * 0.4 + metadata_adjustment)
        .clamp(0.0, 100.0);

    AnalysisResult {
        local: LocalForensics {
            frequency: Some(local[0]),
            noise: Some(local[1]),
            compression: Some(local[2]),
            color_corr: Some(local[3]),
            width: Some(width),
            height: Some(height),
            forensic_score: Some(forensic_score),
        },
        breakdown: Breakdown {
            metrics: vec![
                "Frequency".into(),
                "Noise".into(),
                "Compression".into(),
                "Color".into(),
            ],
            scores: local.iter().map(|v| Some((v * 100.0).round())).collect(),
        },
        hybrid: HybridScores {
            api_ai_score: Some(api_ai_score),
            forensic_ai_pct: Some(forensic_ai_pct),
            metadata_adjustment: Some(metadata_adjustment),
            final_ai_score: Some((final_ai_score * 100.0).round() / 100.0),
        },
        sightengine: SightengineReport {
            kind: SightengineType {
                ai_generated: Some(api_ai_score),
            },
            request: SightengineRequest {
                operations: Some(1),
            },
        },
        metadata: ImageMetadata {
            exif_present: Some(exif_present),
        },
    }
}
