//! Per-client configuration: instance credentials and the service endpoint.
//!
//! # Design
//! `ClientConfig` is built once and never changes afterwards. The builder
//! methods consume `self`, so a config is fully formed before any client
//! sees it. Invalid options fail construction with a `ConfigError`; there is
//! no partially built config.

use serde_json::Value;

use crate::error::ConfigError;

/// Domain under which every instance gets its default endpoint.
pub const DEFAULT_ENDPOINT_DOMAIN: &str = "pushnotifications.pusher.com";

pub const ENV_INSTANCE_ID: &str = "PUSH_NOTIFICATIONS_INSTANCE_ID";
pub const ENV_SECRET_KEY: &str = "PUSH_NOTIFICATIONS_SECRET_KEY";
pub const ENV_ENDPOINT: &str = "PUSH_NOTIFICATIONS_ENDPOINT";
pub const ENV_PORT: &str = "PUSH_NOTIFICATIONS_PORT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Https,
    Http,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Https => "https",
            Scheme::Http => "http",
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    instance_id: String,
    secret_key: String,
    endpoint: String,
    scheme: Scheme,
    port: Option<u16>,
}

impl ClientConfig {
    /// Config for `instance_id` using the default TLS endpoint.
    pub fn new(instance_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        let instance_id = instance_id.into();
        Self {
            endpoint: format!("{instance_id}.{DEFAULT_ENDPOINT_DOMAIN}"),
            instance_id,
            secret_key: secret_key.into(),
            scheme: Scheme::Https,
            port: None,
        }
    }

    /// Override the endpoint host. An `http://` prefix selects plain HTTP;
    /// `https://` or no prefix keeps TLS.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        let (scheme, host) = if let Some(host) = endpoint.strip_prefix("http://") {
            (Scheme::Http, host)
        } else if let Some(host) = endpoint.strip_prefix("https://") {
            (Scheme::Https, host)
        } else {
            (Scheme::Https, endpoint)
        };
        self.scheme = scheme;
        self.endpoint = host.trim_end_matches('/').to_string();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Build from a JSON option bag:
    /// `{ "instanceId": .., "secretKey": .., "endpoint"?: .., "port"?: .. }`.
    pub fn from_options(options: &Value) -> Result<Self, ConfigError> {
        let options = options.as_object().ok_or(ConfigError::OptionsRequired)?;

        let instance_id = match options.get("instanceId") {
            None => return Err(ConfigError::InstanceIdRequired),
            Some(value) => value.as_str().ok_or(ConfigError::InstanceIdNotString)?,
        };
        let secret_key = match options.get("secretKey") {
            None => return Err(ConfigError::SecretKeyRequired),
            Some(value) => value.as_str().ok_or(ConfigError::SecretKeyNotString)?,
        };

        let mut config = Self::new(instance_id, secret_key);
        if let Some(endpoint) = options.get("endpoint") {
            let endpoint = endpoint.as_str().ok_or(ConfigError::EndpointNotString)?;
            config = config.with_endpoint(endpoint);
        }
        if let Some(port) = options.get("port") {
            let port = port
                .as_u64()
                .and_then(|p| u16::try_from(p).ok())
                .filter(|p| *p != 0)
                .ok_or_else(|| ConfigError::InvalidPort(port.to_string()))?;
            config = config.with_port(port);
        }
        Ok(config)
    }

    /// Build from `PUSH_NOTIFICATIONS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let instance_id = lookup(ENV_INSTANCE_ID).ok_or(ConfigError::MissingEnv(ENV_INSTANCE_ID))?;
        let secret_key = lookup(ENV_SECRET_KEY).ok_or(ConfigError::MissingEnv(ENV_SECRET_KEY))?;

        let mut config = Self::new(instance_id, secret_key);
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            config = config.with_endpoint(&endpoint);
        }
        if let Some(port) = lookup(ENV_PORT) {
            let parsed = port
                .parse::<u16>()
                .ok()
                .filter(|p| *p != 0)
                .ok_or(ConfigError::InvalidPort(port))?;
            config = config.with_port(parsed);
        }
        Ok(config)
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// `scheme://endpoint[:port]`, without a trailing slash.
    pub fn base_url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{port}", self.scheme.as_str(), self.endpoint),
            None => format!("{}://{}", self.scheme.as_str(), self.endpoint),
        }
    }

    /// Issuer claim for tokens minted for this instance.
    pub fn token_issuer(&self) -> String {
        format!("https://{}.{DEFAULT_ENDPOINT_DOMAIN}", self.instance_id)
    }
}

// Keep the secret key out of debug output.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("instance_id", &self.instance_id)
            .field("secret_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("scheme", &self.scheme)
            .field("port", &self.port)
            .finish()
    }
}
