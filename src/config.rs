use config as config_rs;
use thiserror::Error;

/// Connection settings for the S3 store, layered from the standard AWS
/// environment variables.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
    /// Endpoint override for localstack/minio style deployments; requests
    /// switch to path-style addressing when set.
    pub endpoint: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Config(#[from] config_rs::ConfigError),
}

pub fn load_s3_config() -> Result<S3Config, ConfigError> {
    let mut builder = config_rs::Config::builder().set_default("region", "us-east-1")?;

    if let Ok(region) = std::env::var("AWS_DEFAULT_REGION") {
        builder = builder.set_override("region", region)?;
    }
    if let Ok(region) = std::env::var("AWS_REGION") {
        builder = builder.set_override("region", region)?;
    }
    if let Ok(key_id) = std::env::var("AWS_ACCESS_KEY_ID") {
        builder = builder.set_override("access_key_id", key_id)?;
    }
    if let Ok(secret) = std::env::var("AWS_SECRET_ACCESS_KEY") {
        builder = builder.set_override("secret_access_key", secret)?;
    }
    if let Ok(token) = std::env::var("AWS_SESSION_TOKEN") {
        builder = builder.set_override("session_token", token)?;
    }
    if let Ok(endpoint) = std::env::var("AWS_ENDPOINT_URL") {
        builder = builder.set_override("endpoint", endpoint)?;
    }

    let cfg = builder.build()?;

    Ok(S3Config {
        region: cfg.get::<String>("region")?,
        access_key_id: cfg.get::<String>("access_key_id").ok(),
        secret_access_key: cfg.get::<String>("secret_access_key").ok(),
        session_token: cfg.get::<String>("session_token").ok(),
        endpoint: cfg.get::<String>("endpoint").ok(),
    })
}

impl S3Config {
    /// Minimal config for a known region, no credentials (anonymous access).
    pub fn anonymous(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            endpoint: None,
        }
    }
}
