// src/auditor/transport.rs
use std::error::Error as StdError;
use std::time::Duration;
use futures::future::BoxFuture;
use reqwest::redirect::Policy;
use reqwest::Url;
use thiserror::Error;

/// What the classifier needs from a login response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    /// Status of the final response after redirects
    pub status: u16,
    /// URL of the final response after redirects
    pub final_url: String,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{}", describe_reqwest_error(.0))]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Connection(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

impl TransportError {
    fn from_request(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::Connection(describe_reqwest_error(&err))
        } else {
            Self::Http(err)
        }
    }
}

// reqwest hides the useful part (DNS, refused, TLS) in the source chain
fn describe_reqwest_error(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = StdError::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Submits one login form. Implementations must not share cookies between calls.
pub trait LoginTransport: Send + Sync {
    fn submit<'a>(
        &'a self,
        url: &'a Url,
        form: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<LoginResponse, TransportError>>;
}

/// Form POST over a shared reqwest client without a cookie store.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(max_redirects: usize, request_timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .redirect(Policy::limited(max_redirects));

        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl LoginTransport for HttpTransport {
    fn submit<'a>(
        &'a self,
        url: &'a Url,
        form: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<LoginResponse, TransportError>> {
        Box::pin(async move {
            let response = self.client
                .post(url.clone())
                .form(&form)
                .send()
                .await
                .map_err(TransportError::from_request)?;

            Ok(LoginResponse {
                status: response.status().as_u16(),
                final_url: response.url().to_string(),
            })
        })
    }
}
