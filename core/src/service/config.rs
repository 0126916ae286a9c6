use serde::{Deserialize, Serialize};

/// Environment variable that overrides [`ServiceConfig::api_base`].
pub const API_URL_ENV: &str = "PROOFPULSE_API_URL";

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
pub const DEFAULT_FEEDBACK_RECIPIENT: &str = "feedback@proofpulse.example.com";

/// Where the analysis and feedback services live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub api_base: String,
    pub feedback_recipient: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            feedback_recipient: DEFAULT_FEEDBACK_RECIPIENT.into(),
        }
    }
}

impl ServiceConfig {
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Applies `PROOFPULSE_API_URL` when it is set and non-empty.
    pub fn with_env_override(self) -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(value) if !value.trim().is_empty() => self.with_api_base(value.trim()),
            _ => self,
        }
    }

    pub fn analyze_url(&self) -> String {
        self.endpoint("analyze")
    }

    pub fn feedback_url(&self) -> String {
        self.endpoint("feedback")
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/api/{}", self.api_base.trim_end_matches('/'), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_base() {
        let config = ServiceConfig::default().with_api_base("https://scan.example.com/");
        assert_eq!(config.analyze_url(), "https://scan.example.com/api/analyze");
        assert_eq!(config.feedback_url(), "https://scan.example.com/api/feedback");
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config: ServiceConfig =
            serde_json::from_str(r#"{"api_base":"http://10.0.0.2:9000"}"#).unwrap();
        assert_eq!(config.analyze_url(), "http://10.0.0.2:9000/api/analyze");
        assert_eq!(config.feedback_recipient, DEFAULT_FEEDBACK_RECIPIENT);
    }

    #[test]
    fn env_variable_overrides_base_when_set() {
        std::env::set_var(API_URL_ENV, " http://env.example:1 ");
        let overridden = ServiceConfig::default().with_env_override();
        std::env::set_var(API_URL_ENV, "   ");
        let blank = ServiceConfig::default().with_env_override();
        std::env::remove_var(API_URL_ENV);
        let unset = ServiceConfig::default().with_env_override();

        assert_eq!(overridden.analyze_url(), "http://env.example:1/api/analyze");
        assert_eq!(blank.api_base, DEFAULT_API_BASE);
        assert_eq!(unset.api_base, DEFAULT_API_BASE);
    }
}
