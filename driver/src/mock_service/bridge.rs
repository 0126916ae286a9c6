use crate::mock_service::profile::{synthesize, MockProfile};
use anyhow::Context;
use log::{info, warn};
use pulsecore::service::FeedbackRequest;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
};
use warp::{
    filters::BoxedFilter,
    http::StatusCode,
    hyper::body::Bytes,
    reply::{self, Response},
    Filter, Reply,
};

/// Local stand-in for the analysis and feedback services.
#[derive(Clone)]
pub struct MockService {
    profile: Arc<MockProfile>,
    feedback: Arc<RwLock<Vec<FeedbackRequest>>>,
}

impl MockService {
    pub fn new(profile: MockProfile) -> Self {
        Self {
            profile: Arc::new(profile),
            feedback: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn routes(&self) -> BoxedFilter<(Response,)> {
        let profile = self.profile.clone();
        let profile_filter = warp::any().map(move || profile.clone());
        let feedback = self.feedback.clone();
        let feedback_filter = warp::any().map(move || feedback.clone());

        let analyze_route = warp::path!("api" / "analyze")
            .and(warp::post())
            .and(warp::body::bytes())
            .and(profile_filter)
            .map(|upload: Bytes, profile: Arc<MockProfile>| analyze_reply(&profile, &upload));

        let feedback_route = warp::path!("api" / "feedback")
            .and(warp::post())
            .and(warp::body::json())
            .and(feedback_filter)
            .map(
                |request: FeedbackRequest, store: Arc<RwLock<Vec<FeedbackRequest>>>| {
                    if request.message.trim().is_empty() {
                        warn!("[mock] rejecting empty feedback from {:?}", request.name);
                        return reply::with_status(String::new(), StatusCode::UNPROCESSABLE_ENTITY)
                            .into_response();
                    }
                    info!("[mock] feedback from {:?} for {}", request.name, request.to);
                    if let Ok(mut guard) = store.write() {
                        guard.push(request);
                    }
                    reply::json(&json!({ "status": "ok" })).into_response()
                },
            );

        analyze_route.or(feedback_route).unify().boxed()
    }

    /// Binds `addr` and serves until the returned future is dropped.
    pub fn bind(
        &self,
        addr: SocketAddr,
    ) -> anyhow::Result<(SocketAddr, impl std::future::Future<Output = ()> + 'static)> {
        warp::serve(self.routes())
            .try_bind_ephemeral(addr)
            .with_context(|| format!("binding mock service to {}", addr))
    }

    #[cfg(test)]
    pub fn feedback_received(&self) -> Vec<FeedbackRequest> {
        self.feedback
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

fn analyze_reply(profile: &MockProfile, upload: &[u8]) -> Response {
    if let Some(code) = profile.fail_status {
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        warn!("[mock] failing analysis with {}", status);
        return reply::with_status(profile.fail_body.clone(), status).into_response();
    }

    let result = synthesize(profile, upload);
    info!(
        "[mock] analyzed {} bytes -> final score {:?}",
        upload.len(),
        result.hybrid.final_ai_score
    );
    if profile.plain_text {
        let body = serde_json::to_string_pretty(&result).unwrap_or_default();
        reply::with_status(body, StatusCode::OK).into_response()
    } else {
        reply::json(&result).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback(message: &str) -> FeedbackRequest {
        FeedbackRequest {
            to: "team@example.com".into(),
            name: "Ada".into(),
            message: message.into(),
        }
    }

    #[tokio::test]
    async fn analyze_returns_json_result() {
        let service = MockService::new(MockProfile::default());
        let response = warp::test::request()
            .method("POST")
            .path("/api/analyze")
            .body("fake image")
            .reply(&service.routes())
            .await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()["content-type"].to_str().unwrap(),
            "application/json"
        );
        let value: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert!(value["hybrid"]["final_ai_score"].is_number());
    }

    #[tokio::test]
    async fn analyze_can_fail_on_demand() {
        let service = MockService::new(MockProfile {
            fail_status: Some(503),
            fail_body: "model warming up".into(),
            ..Default::default()
        });
        let response = warp::test::request()
            .method("POST")
            .path("/api/analyze")
            .body("x")
            .reply(&service.routes())
            .await;
        assert_eq!(response.status(), 503);
        assert_eq!(response.body().as_ref(), b"model warming up");
    }

    #[tokio::test]
    async fn feedback_is_recorded() {
        let service = MockService::new(MockProfile::default());
        let response = warp::test::request()
            .method("POST")
            .path("/api/feedback")
            .json(&feedback("Great tool"))
            .reply(&service.routes())
            .await;
        assert_eq!(response.status(), 200);
        assert_eq!(service.feedback_received(), vec![feedback("Great tool")]);
    }

    #[tokio::test]
    async fn empty_feedback_is_rejected() {
        let service = MockService::new(MockProfile::default());
        let response = warp::test::request()
            .method("POST")
            .path("/api/feedback")
            .json(&feedback("   "))
            .reply(&service.routes())
            .await;
        assert_eq!(response.status(), 422);
        assert!(response.body().is_empty());
        assert!(service.feedback_received().is_empty());
    }
}
