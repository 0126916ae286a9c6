//! Core of the ProofPulse image-forensics report client.
//!
//! The analysis service answers with a loosely-typed record; `report` turns it
//! into bounded, chart-ready series once per response. `scan` drives the
//! simulated progress indicator shown while a request is in flight, and
//! `service` talks to the remote analysis and feedback endpoints.

pub mod math;
pub mod prelude;
pub mod report;
pub mod scan;
pub mod service;

pub use prelude::{Percent, ServiceError, ServiceResult};
pub use report::{AnalysisResult, NormalizedReport};
pub use scan::{ScanAnimator, ScanState, SubmissionController};
