use crate::calendar::{EventSource, YearMonth};
use crate::error::{client_error, config_error, AgendaResult, Error, ErrorBody};
use crate::models::{CreateEventRequest, DeleteResponse, Event};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use tracing::debug;
use url::Url;

/// HTTP client for the event API
#[derive(Debug, Clone)]
pub struct EventsClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl EventsClient {
    /// Create a client for the API rooted at `base_url`, authenticating with
    /// `token` when one is given.
    pub fn new(base_url: &str, token: Option<String>) -> AgendaResult<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| config_error(&format!("Invalid API base URL {}: {}", base_url, e)))?;
        // Joining relative paths keeps the last segment only with a trailing slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn events_url(&self) -> AgendaResult<Url> {
        self.base_url
            .join("api/events")
            .map_err(|e| client_error(&format!("Invalid events URL: {}", e)))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Events dated within `month`, sorted by date
    pub async fn list_month(&self, month: YearMonth) -> AgendaResult<Vec<Event>> {
        let mut url = self.events_url()?;
        url.query_pairs_mut()
            .append_pair("month", &month.month().to_string())
            .append_pair("year", &month.year().to_string());

        debug!("GET {}", url);
        let response = check(self.request(Method::GET, url).send().await?).await?;
        Ok(response.json().await?)
    }

    /// Create an event, returning it with its assigned id
    pub async fn create(&self, event: &CreateEventRequest) -> AgendaResult<Event> {
        let url = self.events_url()?;

        debug!("POST {}", url);
        let response = check(self.request(Method::POST, url).json(event).send().await?).await?;
        Ok(response.json().await?)
    }

    /// Delete an event by id
    pub async fn delete(&self, id: &str) -> AgendaResult<DeleteResponse> {
        let mut url = self.events_url()?;
        url.path_segments_mut()
            .map_err(|_| client_error("API base URL cannot hold a path"))?
            .push(id);

        debug!("DELETE {}", url);
        let response = check(self.request(Method::DELETE, url).send().await?).await?;
        Ok(response.json().await?)
    }
}

/// Turn a non-2xx response into the matching error, keeping the server's message
async fn check(response: Response) -> AgendaResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or(body);
    let reason = if message.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("HTTP {}: {}", status.as_u16(), message)
    };

    Err(match status {
        StatusCode::BAD_REQUEST => Error::Validation(reason),
        StatusCode::FORBIDDEN => Error::Auth(reason),
        StatusCode::NOT_FOUND => Error::NotFound(reason),
        _ => Error::Client(reason),
    })
}

#[async_trait]
impl EventSource for EventsClient {
    async fn list_month(&self, month: YearMonth) -> AgendaResult<Vec<Event>> {
        EventsClient::list_month(self, month).await
    }
}
