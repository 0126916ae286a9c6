use crate::prelude::ServiceResult;
use crate::report::NormalizedReport;
use crate::scan::animator::{ScanAnimator, ScanHandle, ScanState};
use crate::service::AnalysisResponse;
use log::{info, warn};

/// Identifies one analysis request issued through the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// What the last resolved request left on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Report,
    Text,
    Failed,
    Stale,
}

/// Holds the in-flight request, its scan animation and the latest results.
///
/// The animator and the normalizer never see each other; this is the only
/// place that knows whether a request is pending.
#[derive(Debug, Default)]
pub struct SubmissionController {
    animator: ScanAnimator,
    in_flight: Option<(RequestId, ScanHandle)>,
    report: Option<NormalizedReport>,
    raw_body: Option<String>,
    error: Option<String>,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a scan for a new request, or refuses while one is pending.
    pub fn try_begin(&mut self) -> Option<RequestId> {
        if self.in_flight.is_some() {
            return None;
        }
        let handle = self.animator.start();
        let id = RequestId(handle.generation());
        self.in_flight = Some((id, handle));
        self.error = None;
        info!("analysis request {} submitted", id.0);
        Some(id)
    }

    /// Advances the scan by one frame. Returns `false` when nothing is pending.
    pub fn on_frame(&mut self) -> bool {
        match &self.in_flight {
            Some((_, handle)) => self.animator.tick(handle),
            None => false,
        }
    }

    /// Finishes request `id` with the service outcome.
    pub fn resolve(
        &mut self,
        id: RequestId,
        outcome: ServiceResult<AnalysisResponse>,
    ) -> Resolution {
        let handle = match self.in_flight.take() {
            Some((pending, handle)) if pending == id => handle,
            other => {
                self.in_flight = other;
                warn!("ignoring response for superseded request {}", id.0);
                return Resolution::Stale;
            }
        };
        self.animator.complete(handle);

        match outcome {
            Ok(AnalysisResponse::Json(document)) => {
                let report = NormalizedReport::from_value(&document);
                info!(
                    "analysis request {} resolved: {}",
                    id.0,
                    report.verdict.label()
                );
                self.raw_body = Some(
                    serde_json::to_string_pretty(&document).unwrap_or_else(|_| document.to_string()),
                );
                self.report = Some(report);
                Resolution::Report
            }
            Ok(AnalysisResponse::Text(text)) => {
                info!("analysis request {} resolved with a text body", id.0);
                self.report = None;
                self.raw_body = Some(text);
                Resolution::Text
            }
            Err(err) => {
                warn!("analysis request {} failed: {}", id.0, err);
                self.error = Some(err.to_string());
                Resolution::Failed
            }
        }
    }

    /// Drops the pending request's scan, e.g. when the view is closed.
    pub fn abandon(&mut self) {
        if let Some((id, handle)) = self.in_flight.take() {
            info!("analysis request {} abandoned", id.0);
            self.animator.cancel(handle);
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn scan_state(&self) -> ScanState {
        self.animator.state()
    }

    pub fn report(&self) -> Option<&NormalizedReport> {
        self.report.as_ref()
    }

    pub fn raw_body(&self) -> Option<&str> {
        self.raw_body.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::ServiceError;
    use crate::scan::ScanStatus;
    use serde_json::json;

    fn ai_document() -> AnalysisResponse {
        AnalysisResponse::Json(json!({ "hybrid": { "final_ai_score": 88 } }))
    }

    #[test]
    fn refuses_second_submission_while_pending() {
        let mut controller = SubmissionController::new();
        let id = controller.try_begin().unwrap();
        assert!(controller.try_begin().is_none());
        controller.resolve(id, Ok(ai_document()));
        assert!(controller.try_begin().is_some());
    }

    #[test]
    fn frames_only_advance_while_pending() {
        let mut controller = SubmissionController::new();
        assert!(!controller.on_frame());
        let id = controller.try_begin().unwrap();
        assert!(controller.on_frame());
        assert!(controller.scan_state().progress > 0.0);
        controller.resolve(id, Ok(ai_document()));
        assert!(!controller.on_frame());
        assert_eq!(controller.scan_state().progress, 100.0);
    }

    #[test]
    fn success_replaces_report() {
        let mut controller = SubmissionController::new();
        let id = controller.try_begin().unwrap();
        assert_eq!(controller.resolve(id, Ok(ai_document())), Resolution::Report);
        let report = controller.report().unwrap();
        assert!(report.verdict.is_ai());
        assert!(controller.raw_body().unwrap().contains("final_ai_score"));
        assert_eq!(controller.scan_state().status, ScanStatus::Complete);
    }

    #[test]
    fn failure_keeps_previous_report_and_completes_scan() {
        let mut controller = SubmissionController::new();
        let first = controller.try_begin().unwrap();
        controller.resolve(first, Ok(ai_document()));

        let second = controller.try_begin().unwrap();
        for _ in 0..5 {
            controller.on_frame();
        }
        let outcome = controller.resolve(
            second,
            Err(ServiceError::Status {
                status: 502,
                body: String::new(),
            }),
        );
        assert_eq!(outcome, Resolution::Failed);
        assert_eq!(controller.error(), Some("HTTP 502"));
        assert!(controller.report().unwrap().verdict.is_ai());
        assert_eq!(controller.scan_state().progress, 100.0);
        assert!(!controller.is_in_flight());
    }

    #[test]
    fn new_submission_clears_error() {
        let mut controller = SubmissionController::new();
        let id = controller.try_begin().unwrap();
        controller.resolve(id, Err(ServiceError::Transport("connection refused".into())));
        assert!(controller.error().is_some());
        controller.try_begin().unwrap();
        assert!(controller.error().is_none());
    }

    #[test]
    fn text_body_replaces_report() {
        let mut controller = SubmissionController::new();
        let id = controller.try_begin().unwrap();
        controller.resolve(id, Ok(ai_document()));
        let id = controller.try_begin().unwrap();
        let outcome = controller.resolve(id, Ok(AnalysisResponse::Text("queued".into())));
        assert_eq!(outcome, Resolution::Text);
        assert!(controller.report().is_none());
        assert_eq!(controller.raw_body(), Some("queued"));
    }

    #[test]
    fn stale_response_is_ignored() {
        let mut controller = SubmissionController::new();
        let first = controller.try_begin().unwrap();
        controller.abandon();
        let second = controller.try_begin().unwrap();
        assert_eq!(controller.resolve(first, Ok(ai_document())), Resolution::Stale);
        assert!(controller.is_in_flight());
        assert!(controller.report().is_none());
        assert_eq!(controller.resolve(second, Ok(ai_document())), Resolution::Report);
    }

    #[test]
    fn abandon_returns_scan_to_idle() {
        let mut controller = SubmissionController::new();
        controller.try_begin().unwrap();
        controller.on_frame();
        controller.abandon();
        assert!(!controller.is_in_flight());
        assert_eq!(controller.scan_state().status, ScanStatus::Idle);
    }
}
