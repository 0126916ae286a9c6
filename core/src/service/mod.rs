pub mod client;
pub mod config;
pub mod payload;

pub use client::ServiceClient;
pub use config::ServiceConfig;
pub use payload::{AnalysisResponse, FeedbackRequest, ImagePayload};
