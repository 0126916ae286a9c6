/// Integer percentage in `[0, 100]`, the unit every chart series is built from.
pub type Percent = u8;

/// Common error type for calls to the analysis and feedback services.
///
/// `Display` is the message shown inline to the user.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{}", status_message(*status, body))]
    Status { status: u16, body: String },
    #[error("{0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("could not read image {path}: {reason}")]
    ImageRead { path: String, reason: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

fn status_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        body.to_string()
    }
}
