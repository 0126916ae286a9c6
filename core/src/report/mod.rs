pub mod model;
pub mod normalize;
pub mod series;
pub mod summary;

pub use model::{AnalysisResult, Breakdown, HybridScores, ImageMetadata, LocalForensics, SightengineReport};
pub use normalize::NormalizedReport;
pub use series::{BarRow, BreakdownEntry, ColorTag, HybridEntry, SeriesEntry};
pub use summary::{AiSplit, Summary, Verdict};
