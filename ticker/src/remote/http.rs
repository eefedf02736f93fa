use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use time::OffsetDateTime;
use tracing::warn;

use super::dto::{DeleteTimerRequest, StartTimerRequest, StopTimerRequest};
use super::{RemoteError, TimerRemote};
use crate::domain::{Timer, TimerId, TimerPatch};

// Relative, so a path prefix in the base URL is kept.
const TIMERS_PATH: &str = "api/timers";
const START_PATH: &str = "api/timers/start";
const STOP_PATH: &str = "api/timers/stop";

/// JSON-over-HTTP client for the timer API.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: Client,
    base_url: Url,
}

impl HttpRemote {
    pub fn new(base_url: &str) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .build()
            .map_err(|e| RemoteError::Unavailable(format!("Failed to build HTTP client: {e}")))?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, RemoteError> {
        let mut url = Url::parse(base_url)
            .map_err(|e| RemoteError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self {
            client,
            base_url: url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
        self.base_url
            .join(path)
            .map_err(|e| RemoteError::InvalidUrl(format!("{path}: {e}")))
    }

    async fn send(&self, request: RequestBuilder, call: &'static str) -> Result<Response, RemoteError> {
        let response = request
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| RemoteError::Request { call, source })?;

        let status = response.status();
        if !status.is_success() {
            warn!(call, %status, "Remote call failed");
            return Err(RemoteError::Status { call, status });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call: &'static str,
    ) -> Result<T, RemoteError> {
        self.send(request, call)
            .await?
            .json::<T>()
            .await
            .map_err(|source| RemoteError::Decode { call, source })
    }

    async fn send_without_body(
        &self,
        request: RequestBuilder,
        call: &'static str,
    ) -> Result<(), RemoteError> {
        let response = self.send(request, call).await?;
        let _ = response.bytes().await;
        Ok(())
    }
}

#[async_trait]
impl TimerRemote for HttpRemote {
    async fn list(&self) -> Result<Vec<Timer>, RemoteError> {
        self.get_json(
            self.client.get(self.endpoint(TIMERS_PATH)?),
            "GET /api/timers",
        )
        .await
    }

    async fn create(&self, timer: &Timer) -> Result<(), RemoteError> {
        self.send_without_body(
            self.client.post(self.endpoint(TIMERS_PATH)?).json(timer),
            "POST /api/timers",
        )
        .await
    }

    async fn update(&self, patch: &TimerPatch) -> Result<(), RemoteError> {
        self.send_without_body(
            self.client.put(self.endpoint(TIMERS_PATH)?).json(patch),
            "PUT /api/timers",
        )
        .await
    }

    async fn delete(&self, id: &TimerId) -> Result<(), RemoteError> {
        self.send_without_body(
            self.client
                .delete(self.endpoint(TIMERS_PATH)?)
                .json(&DeleteTimerRequest { id: id.clone() }),
            "DELETE /api/timers",
        )
        .await
    }

    async fn start(&self, id: &TimerId, start: OffsetDateTime) -> Result<(), RemoteError> {
        self.send_without_body(
            self.client.post(self.endpoint(START_PATH)?).json(&StartTimerRequest {
                id: id.clone(),
                start,
            }),
            "POST /api/timers/start",
        )
        .await
    }

    async fn stop(&self, id: &TimerId, stop: OffsetDateTime) -> Result<(), RemoteError> {
        self.send_without_body(
            self.client.post(self.endpoint(STOP_PATH)?).json(&StopTimerRequest {
                id: id.clone(),
                stop,
            }),
            "POST /api/timers/stop",
        )
        .await
    }
}
