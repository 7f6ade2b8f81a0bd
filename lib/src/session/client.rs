use std::{
    thread,
    time::Duration,
};

use reqwest::{
    blocking::{
        Client,
        Response,
    },
    header::{
        HeaderMap,
        HeaderValue,
        COOKIE,
    },
    StatusCode,
    Url,
};
use serde_json::{
    json,
    Value,
};

use super::{
    ApiError,
    Session,
};

pub const DEFAULT_BASE_URL: &str = "https://www.notion.so/api/v3/";

#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Every endpoint is resolved relative to this url.
    pub base_url: String,

    pub timeout: Duration,

    /// How often a request is repeated after a transport failure or a
    /// gateway error before giving up.
    pub max_retries: u32,

    /// Delay before the first retry. Doubles with every further attempt.
    pub backoff: Duration,

    /// Space returned by [`Session::current_space_id`] without asking the remote side.
    pub default_space_id: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            backoff: Duration::from_millis(300),
            default_space_id: None,
        }
    }
}

/// Blocking client authenticated through the `token_v2` session cookie.
pub struct NotionClient {
    http: Client,
    base_url: Url,
    max_retries: u32,
    backoff: Duration,
    default_space_id: Option<String>,
}

impl NotionClient {
    pub fn new(token: &str) -> Result<Self, ApiError> {
        Self::with_options(token, ClientOptions::default())
    }

    pub fn with_options(token: &str, options: ClientOptions) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(&options.base_url)
            .map_err(|error| ApiError::InvalidBaseUrl(format!("{}: {}", options.base_url, error)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(options.base_url));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut cookie = HeaderValue::from_str(&format!("token_v2={}", token.trim()))
            .map_err(|_| ApiError::InvalidToken)?;
        cookie.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, cookie);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(options.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url,
            max_retries: options.max_retries,
            backoff: options.backoff,
            default_space_id: options.default_space_id,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn endpoint_url(&self, endpoint: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(endpoint)
            .map_err(|error| ApiError::InvalidBaseUrl(format!("{}: {}", endpoint, error)))
    }

    fn retry_delay(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(1 << attempt.min(16))
    }
}

impl Session for NotionClient {
    fn post(&self, endpoint: &str, payload: &Value) -> Result<Value, ApiError> {
        let url = self.endpoint_url(endpoint)?;
        log::trace!("POST {} payload {}", url, payload);

        let mut attempt = 0;
        loop {
            let result = self.http.post(url.clone()).json(payload).send();
            let retryable = match &result {
                Ok(response) => is_retryable_status(response.status()),
                Err(error) => error.is_timeout() || error.is_connect(),
            };

            if retryable && attempt < self.max_retries {
                let delay = self.retry_delay(attempt);
                match &result {
                    Ok(response) => log::warn!(
                        "POST {} returned {}, retrying in {:?}",
                        url,
                        response.status(),
                        delay
                    ),
                    Err(error) => {
                        log::warn!("POST {} failed: {:#}, retrying in {:?}", url, error, delay)
                    }
                }

                thread::sleep(delay);
                attempt += 1;
                continue;
            }

            let response = result?;
            log::debug!("POST {} -> {}", url, response.status());
            return handle_response(response);
        }
    }

    fn current_space_id(&self) -> Result<String, ApiError> {
        if let Some(space_id) = &self.default_space_id {
            return Ok(space_id.clone());
        }

        let response = self.post("getSpaces", &json!({}))?;
        first_space_id(&response).ok_or(ApiError::NoDefaultSpace)
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT
    )
}

fn handle_response(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    if status.is_success() {
        let body = response.text()?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        return Ok(serde_json::from_str(&body)?);
    }

    let text = response.text().unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message: error_message(&text),
    })
}

/// Error bodies look like `{"errorId": "...", "name": "...", "message": "..."}`.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

/// `getSpaces` maps every user id to its record map, the first space listed wins.
fn first_space_id(response: &Value) -> Option<String> {
    response
        .as_object()?
        .values()
        .filter_map(|user| user.get("space")?.as_object())
        .flat_map(|spaces| spaces.keys())
        .next()
        .cloned()
}
