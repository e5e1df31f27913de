use super::error::{RemoteError, RemoteResult};

/// Runtime configuration describing how to reach the document endpoint.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Full URL of the document, e.g. `https://api.npoint.io/<bin-id>`.
    pub url: String,
    /// Optional basic-auth username.
    pub username: Option<String>,
    /// Optional basic-auth password.
    pub password: Option<String>,
}

impl EndpointConfig {
    /// Construct a configuration from an explicit document URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
        }
    }

    /// Attach basic-auth credentials to the configuration.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Build a configuration by reading the expected environment variables.
    pub fn from_env() -> RemoteResult<Self> {
        let url = std::env::var("BOLAO_STORE_URL").map_err(|_| RemoteError::MissingEnvVar {
            var: "BOLAO_STORE_URL",
        })?;

        let mut config = Self::new(url);

        if let (Some(username), Some(password)) = (
            std::env::var("BOLAO_STORE_USERNAME").ok(),
            std::env::var("BOLAO_STORE_PASSWORD").ok(),
        ) {
            config = config.with_credentials(username, password);
        }

        Ok(config)
    }
}
