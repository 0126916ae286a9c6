pub mod animator;
pub mod controller;

pub use animator::{ScanAnimator, ScanHandle, ScanState, ScanStatus, PHASE_LABELS};
pub use controller::{RequestId, Resolution, SubmissionController};
