use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVICE_NAME: &str = "Dapr Gateway Service";
pub const DEFAULT_PUBSUB_NAME: &str = "pubsub";
pub const DEFAULT_PUBLISH_TOPIC: &str = "sample-topic";
pub const DEFAULT_OUTPUT_BINDING: &str = "output-binding";
pub const DEFAULT_DAPR_HOST: &str = "127.0.0.1";
pub const DEFAULT_DAPR_HTTP_PORT: u16 = 3500;
pub const DEFAULT_DAPR_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Runtime settings, read from the process environment.
///
/// Every field maps to the upper-cased environment variable of the same name
/// (`port` ← `PORT`, `dapr_http_port` ← `DAPR_HTTP_PORT`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub service_name: String,
    pub pubsub_name: String,
    pub publish_topic: String,
    pub output_binding: String,
    pub dapr_http_endpoint: Option<String>,
    pub dapr_runtime_host: String,
    pub dapr_http_port: u16,
    pub dapr_api_token: Option<String>,
    pub dapr_http_timeout_secs: u64,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            pubsub_name: DEFAULT_PUBSUB_NAME.to_string(),
            publish_topic: DEFAULT_PUBLISH_TOPIC.to_string(),
            output_binding: DEFAULT_OUTPUT_BINDING.to_string(),
            dapr_http_endpoint: None,
            dapr_runtime_host: DEFAULT_DAPR_HOST.to_string(),
            dapr_http_port: DEFAULT_DAPR_HTTP_PORT,
            dapr_api_token: None,
            dapr_http_timeout_secs: DEFAULT_DAPR_TIMEOUT_SECS,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load settings from `.env` (if present) and the environment.
    ///
    /// Values are kept as strings and only converted for numeric fields, so
    /// a topic such as `007` stays `007`. Invalid values such as a
    /// non-numeric `PORT` are reported as errors.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();

        config::Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("service_name", DEFAULT_SERVICE_NAME)?
            .set_default("pubsub_name", DEFAULT_PUBSUB_NAME)?
            .set_default("publish_topic", DEFAULT_PUBLISH_TOPIC)?
            .set_default("output_binding", DEFAULT_OUTPUT_BINDING)?
            .set_default("dapr_runtime_host", DEFAULT_DAPR_HOST)?
            .set_default("dapr_http_port", i64::from(DEFAULT_DAPR_HTTP_PORT))?
            .set_default("dapr_http_timeout_secs", DEFAULT_DAPR_TIMEOUT_SECS as i64)?
            .set_default("log_format", "pretty")?
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize()
    }

    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid HOST value {:?}: {}", self.host, e))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Base URL of the sidecar's local HTTP API.
    ///
    /// `DAPR_HTTP_ENDPOINT` wins over `DAPR_RUNTIME_HOST`/`DAPR_HTTP_PORT`.
    pub fn dapr_base_url(&self) -> String {
        match self.dapr_http_endpoint.as_deref().map(str::trim) {
            Some(endpoint) if !endpoint.is_empty() => endpoint.trim_end_matches('/').to_string(),
            _ => format!("http://{}:{}", self.dapr_runtime_host, self.dapr_http_port),
        }
    }

    pub fn api_token(&self) -> Option<&str> {
        self.dapr_api_token.as_deref().filter(|token| !token.is_empty())
    }
}
