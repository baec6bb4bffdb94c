use crate::endpoints::uploads::UploadFile;
use crate::error::{ApiError, Failure, TransportCode, normalize};
use crate::request::{ApiRequest, Method, RequestData};
use crate::session::{RequestContext, SessionHandle};
use reqwest::RequestBuilder;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3011/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_RETRIES: u32 = 0;
const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Extra attempts for GET requests that fail on network errors or
    /// timeouts. Off by default; other methods are never retried.
    pub retries: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
        }
    }
}

/// Per-call knobs.
#[derive(Default, Debug, Clone)]
pub struct CallOptions {
    cancel: Option<CancellationToken>,
    timeout: Option<Duration>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort the call as soon as `token` is cancelled.
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_config(ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(APP_USER_AGENT)
            .build()
            .map_err(normalize)?;

        Ok(Self { http, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Calls an endpoint that needs no credential.
    pub async fn public_call<R>(
        &self,
        request: R,
        options: CallOptions,
    ) -> Result<R::Response, ApiError>
    where
        R: ApiRequest,
    {
        self.execute(&request, None, &options)
            .await
            .map_err(|failure| settle(failure, None))
    }

    /// Calls an endpoint with the context's bearer token.
    ///
    /// Without a token this fails with the unauthenticated error and never
    /// touches the network. A 401 or 403 from the server marks the context's
    /// session as expired.
    pub async fn authenticated_call<R>(
        &self,
        context: &RequestContext,
        request: R,
        options: CallOptions,
    ) -> Result<R::Response, ApiError>
    where
        R: ApiRequest,
    {
        let Some(token) = context.token() else {
            tracing::debug!(endpoint = %request.endpoint(), "No token for authenticated call");
            return Err(ApiError::unauthenticated());
        };

        self.execute(&request, Some(token.expose_secret()), &options)
            .await
            .map_err(|failure| settle(failure, Some(context.session())))
    }

    /// Submits a file as a multipart form with the context's bearer token.
    pub async fn upload<T>(
        &self,
        context: &RequestContext,
        path: &str,
        file: UploadFile,
        options: CallOptions,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let Some(token) = context.token() else {
            tracing::debug!(path, "No token for upload");
            return Err(ApiError::unauthenticated());
        };

        self.send_upload(path, token.expose_secret(), file, &options)
            .await
            .map_err(|failure| settle(failure, Some(context.session())))
    }

    async fn execute<R>(
        &self,
        request: &R,
        token: Option<&str>,
        options: &CallOptions,
    ) -> Result<R::Response, Failure>
    where
        R: ApiRequest,
    {
        let method = R::METHOD;
        let url = self.url(&request.endpoint());
        let attempts = if method == Method::GET {
            self.config.retries + 1
        } else {
            1
        };

        let mut attempt = 0;
        loop {
            attempt += 1;
            tracing::debug!(
                %method,
                %url,
                attempt,
                authenticated = token.is_some(),
                "Sending request"
            );

            let builder = self.build(method.clone(), &url, request.data(), token, options);
            match dispatch(builder, options).await {
                Err(Failure::Transport {
                    code: TransportCode::Network | TransportCode::Timeout,
                    detail,
                }) if attempt < attempts => {
                    tracing::debug!(%url, attempt, %detail, "Retrying request");
                }
                result => return result.and_then(|body| decode(&body)),
            }
        }
    }

    async fn send_upload<T>(
        &self,
        path: &str,
        token: &str,
        file: UploadFile,
        options: &CallOptions,
    ) -> Result<T, Failure>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(%url, file_name = file.file_name(), "Uploading file");

        let mut builder = self
            .http
            .post(&url)
            .bearer_auth(token)
            .multipart(file.into_form()?);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let body = dispatch(builder, options).await?;
        decode(&body)
    }

    fn build<D>(
        &self,
        method: Method,
        url: &str,
        data: RequestData<&D>,
        token: Option<&str>,
        options: &CallOptions,
    ) -> RequestBuilder
    where
        D: Serialize,
    {
        let mut builder = self.http.request(method, url);
        builder = match data {
            RequestData::Empty => builder,
            RequestData::Query(query) => builder.query(query),
            RequestData::Json(body) => builder.json(body),
        };
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        builder
    }

    fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

/// Normalizes a failure and, for authenticated calls, reacts to rejected
/// credentials.
fn settle(failure: Failure, session: Option<&SessionHandle>) -> ApiError {
    let status = failure.status();
    let error = normalize(failure);

    if let (Some(session), Some(401 | 403)) = (session, status) {
        session.mark_expired(&error);
    }

    tracing::warn!(code = error.code(), "Request failed: {}", error.message());
    error
}

async fn dispatch(builder: RequestBuilder, options: &CallOptions) -> Result<Vec<u8>, Failure> {
    match &options.cancel {
        Some(cancel) => {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    Err(Failure::transport(TransportCode::Canceled, "cancelled by caller"))
                }
                result = send(builder) => result,
            }
        }
        None => send(builder).await,
    }
}

async fn send(builder: RequestBuilder) -> Result<Vec<u8>, Failure> {
    let response = builder.send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    if status.is_success() {
        Ok(body.to_vec())
    } else {
        Err(Failure::Response {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}

fn decode<T>(body: &[u8]) -> Result<T, Failure>
where
    T: DeserializeOwned,
{
    // No content decodes as JSON null so `EmptyResponse` and `Option` work.
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        body
    };
    serde_json::from_slice(body).map_err(Failure::from)
}
