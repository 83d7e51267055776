use std::{env, sync::Arc, time::Duration};

use aifn_core::{
    config::{AiConfig, ProviderKind},
    error::{AiError, Result},
    generic::Message,
    provider::{HttpRequestParts, ProviderAdapter},
    retry::RetryPolicy,
};
use reqwest::{Client as HttpClient, Url};

use crate::{error::HttpError, pending::PendingCall, provider::Provider, transport::Transport};

/// Entry point for every AI call.
///
/// Owns the [`AiConfig`] it was built from, the [`Provider`] selected from
/// that config, a pooled HTTP [`Transport`] and the [`RetryPolicy`]. Cloning
/// is cheap, so one client is typically built at startup and handed to every
/// call site.
///
/// ```rust,no_run
/// use aifn_core::{config::ProviderKind, generic::Message};
/// use aifn_providers::AiClientBuilder;
///
/// # async fn demo() -> aifn_core::error::Result<()> {
/// let client = AiClientBuilder::new_from_env(ProviderKind::ChatGpt).build()?;
/// let call = client.call(&[Message::user("Reply with {\"ok\":true}")]);
/// let value = call.await.into_result()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AiClient {
    config: Arc<AiConfig>,
    provider: Provider,
    transport: Transport,
    retry: RetryPolicy,
}

impl AiClient {
    /// Build a client with the default HTTP client and retry policy.
    pub fn new(config: AiConfig) -> Result<Self> {
        AiClientBuilder::new().with_config(config).build()
    }

    pub fn builder() -> AiClientBuilder {
        AiClientBuilder::new()
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// A client sharing this one's connection pool and retry policy but
    /// using `config` (and the provider it names).
    ///
    /// # Errors
    ///
    /// [`AiError::Invalid`] if the override URL does not parse, as in
    /// [`AiClientBuilder::build`].
    pub fn with_config(&self, config: AiConfig) -> Result<Self> {
        validate_url(&config)?;
        Ok(Self {
            provider: config.provider.into(),
            config: Arc::new(config),
            transport: self.transport.clone(),
            retry: self.retry,
        })
    }

    /// The exact request [`Self::call`] would send.
    pub fn request_parts(&self, messages: &[Message]) -> Result<HttpRequestParts> {
        self.provider.build_request(messages, &self.config)
    }

    /// Send `messages` and parse the reply as JSON, re-asking while the reply
    /// does not parse. The returned call can be cancelled at any point.
    pub fn call(&self, messages: &[Message]) -> PendingCall {
        let parts = match self.request_parts(messages) {
            Ok(parts) => parts,
            Err(err) => return PendingCall::failed(err),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            provider = %self.provider.kind(),
            messages = messages.len(),
            "dispatching AI call"
        );

        let transport = self.transport.clone();
        let provider = self.provider;
        let retry = self.retry;

        PendingCall::new(async move {
            let transport = &transport;
            let parts = &parts;
            retry
                .run(move |attempt| fetch_text(transport, provider, parts, attempt))
                .await
        })
    }
}

fn validate_url(config: &AiConfig) -> Result<()> {
    if let Some(url) = &config.url {
        Url::parse(url).map_err(|err| AiError::Invalid(format!("url `{url}`: {err}")))?;
    }
    Ok(())
}

async fn fetch_text(
    transport: &Transport,
    provider: Provider,
    parts: &HttpRequestParts,
    attempt: u32,
) -> Result<String> {
    let envelope = transport.post(parts, attempt).await?;
    provider.extract_text(&envelope)
}

/// Builder for [`AiClient`].
///
/// ```rust
/// use aifn_core::{config::{AiConfig, ProviderKind}, retry::RetryPolicy};
/// use aifn_providers::AiClientBuilder;
///
/// let client = AiClientBuilder::new()
///     .with_config(AiConfig::new(ProviderKind::Gemini).with_key("k"))
///     .with_retry_policy(RetryPolicy::new(5))
///     .build()
///     .unwrap();
/// assert_eq!(client.retry_policy().max_attempts(), 5);
/// ```
#[derive(Debug, Default)]
pub struct AiClientBuilder {
    config: AiConfig,
    http: Option<HttpClient>,
    retry: Option<RetryPolicy>,
}

impl AiClientBuilder {
    /// Environment variable holding the chatgpt-style key.
    pub const OPENAI_KEY_VAR: &'static str = "OPENAI_API_KEY";
    /// Environment variable holding the gemini-style key.
    pub const GEMINI_KEY_VAR: &'static str = "GEMINI_API_KEY";

    pub fn new() -> Self {
        Self::default()
    }

    /// Start from `provider` and take the key from `OPENAI_API_KEY` or
    /// `GEMINI_API_KEY`. A missing variable simply leaves the key unset.
    pub fn new_from_env(provider: ProviderKind) -> Self {
        let var = match provider {
            ProviderKind::ChatGpt => Self::OPENAI_KEY_VAR,
            ProviderKind::Gemini => Self::GEMINI_KEY_VAR,
        };
        let mut config = AiConfig::new(provider);
        config.key = env::var(var).ok().filter(|key| !key.is_empty());

        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_config(mut self, config: AiConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.config.key = Some(key.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.config.url = Some(url.into());
        self
    }

    /// Use a caller-provided `reqwest::Client` (proxy, TLS, timeouts, …).
    pub fn with_http(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// # Errors
    ///
    /// * [`AiError::Invalid`] – if the override URL does not parse.
    /// * [`AiError::Backend`] – if the default HTTP client cannot be built.
    pub fn build(self) -> Result<AiClient> {
        validate_url(&self.config)?;

        let http = match self.http {
            Some(http) => http,
            None => HttpClient::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .map_err(HttpError::from)?,
        };

        Ok(AiClient {
            provider: self.config.provider.into(),
            config: Arc::new(self.config),
            transport: Transport::new(http),
            retry: self.retry.unwrap_or_default(),
        })
    }
}
