//! HTTP client for the analysis and feedback services.

use crate::prelude::{ServiceError, ServiceResult};
use crate::service::config::ServiceConfig;
use crate::service::payload::{AnalysisResponse, FeedbackRequest, ImagePayload};
use log::{info, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};

/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: Client,
    config: ServiceConfig,
}

impl ServiceClient {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Uploads `image` as the multipart field `file`.
    ///
    /// A JSON body becomes [`AnalysisResponse::Json`]; anything else is kept
    /// as text. No timeout is applied.
    pub async fn analyze(&self, image: ImagePayload) -> ServiceResult<AnalysisResponse> {
        let url = self.config.analyze_url();
        info!(
            "submitting {} ({} bytes) to {}",
            image.file_name,
            image.bytes.len(),
            url
        );

        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(image.mime)
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;
        let response = ensure_success(response).await?;

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("application/json"))
            .unwrap_or(false);

        if is_json {
            let document = response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| ServiceError::Decode(e.to_string()))?;
            Ok(AnalysisResponse::Json(document))
        } else {
            let text = response.text().await.map_err(transport_error)?;
            Ok(AnalysisResponse::Text(text))
        }
    }

    /// Sends a feedback message addressed to the configured recipient.
    pub async fn send_feedback(&self, name: &str, message: &str) -> ServiceResult<()> {
        let url = self.config.feedback_url();
        let body = FeedbackRequest {
            to: self.config.feedback_recipient.clone(),
            name: name.to_string(),
            message: message.to_string(),
        };
        info!("sending feedback from {:?} to {}", body.name, url);

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        ensure_success(response).await?;
        Ok(())
    }
}

fn transport_error(err: reqwest::Error) -> ServiceError {
    warn!("transport failure: {}", err);
    ServiceError::Transport(err.to_string())
}

async fn ensure_success(response: Response) -> ServiceResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!("service answered {}: {}", status, body);
    Err(ServiceError::Status {
        status: status.as_u16(),
        body,
    })
}
