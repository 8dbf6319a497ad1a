/// Environment variable holding the upstream gateway credential.
pub const API_KEY_ENV: &str = "AI_GATEWAY_API_KEY";

pub const DEFAULT_UPSTREAM_URL: &str = "https://ai.gateway.lovable.dev";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingRequired { field: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Base URL of the upstream gateway; the chat completions path is
    /// appended to it.
    pub upstream_url: String,
    /// Bearer credential for the upstream gateway, read from the
    /// environment once at startup. While unset, generation requests fail
    /// with a configuration error and no upstream call is made.
    pub api_key: Option<String>,
    pub model: String,
    pub request_timeout_secs: u64,
    pub max_payload_size: usize,
}

impl GatewayConfig {
    pub fn api_key_from_env() -> Option<String> {
        std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.upstream_url.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "upstream_url".to_string(),
            });
        }
        if !self.upstream_url.starts_with("http://") && !self.upstream_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "upstream_url".to_string(),
                value: self.upstream_url.clone(),
                reason: "must start with http:// or https://".to_string(),
            });
        }
        if self.model.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "model".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs".to_string(),
                value: self.request_timeout_secs.to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.max_payload_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_payload_size".to_string(),
                value: self.max_payload_size.to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            request_timeout_secs: 600,
            max_payload_size: 2 * 1024 * 1024,
        }
    }
}
