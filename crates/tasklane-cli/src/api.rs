use std::time::Duration;

use anyhow::Context;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tasklane_core::endpoint::{self, COMPLETE_SEGMENT, ListQuery, STATISTICS_PATH, TASKS_PATH};
use tasklane_core::{ApiError, TaskApi};
use tasklane_shared::{Statistics, TaskDto, TaskForm, TaskId};
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the backend. Runs on the current-thread runtime built in `run`.
#[derive(Debug, Clone)]
pub struct ReqwestTaskApi {
    client: Client,
    base_url: String,
}

impl ReqwestTaskApi {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Url::parse(base_url).with_context(|| format!("invalid api.base_url: {base_url}"))?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed building HTTP client for the task backend")?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Url::parse(&endpoint::join(&self.base_url, path))
            .map_err(|err| ApiError::Transport(err.to_string()))
    }

    /// `/api/tasks/{id}` plus an optional action segment; `push` percent-encodes the id.
    fn task_url(&self, id: &TaskId, action: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self.url(TASKS_PATH)?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Transport(format!("base url cannot hold a path: {}", self.base_url)))?
            .pop_if_empty()
            .push(id.as_str())
            .extend(action);
        Ok(url)
    }

    fn with_form(&self, request: RequestBuilder, form: &TaskForm) -> Result<RequestBuilder, ApiError> {
        let body = serde_json::to_string(form)
            .map_err(|err| ApiError::Transport(format!("failed to encode task form: {err}")))?;
        Ok(request.header(CONTENT_TYPE, "application/json").body(body))
    }

    async fn send_raw(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        if let Err(err) = ApiError::from_status(status.as_u16()) {
            warn!(status = status.as_u16(), body = %body, "backend rejected request");
            return Err(err);
        }
        debug!(status = status.as_u16(), bytes = body.len(), "backend responded");
        Ok(body)
    }

    async fn send<T>(&self, request: RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let body = self.send_raw(request).await?;
        serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

impl TaskApi for ReqwestTaskApi {
    async fn list_tasks(&self, query: &ListQuery) -> Result<Vec<TaskDto>, ApiError> {
        let mut url = self.url(TASKS_PATH)?;
        url.query_pairs_mut().extend_pairs(query.pairs());
        self.send(self.client.get(url)).await
    }

    async fn get_task(&self, id: &TaskId) -> Result<TaskDto, ApiError> {
        let url = self.task_url(id, None)?;
        self.send(self.client.get(url)).await
    }

    async fn create_task(&self, form: &TaskForm) -> Result<TaskDto, ApiError> {
        let url = self.url(TASKS_PATH)?;
        let request = self.with_form(self.client.post(url), form)?;
        self.send(request).await
    }

    async fn update_task(&self, id: &TaskId, form: &TaskForm) -> Result<TaskDto, ApiError> {
        let url = self.task_url(id, None)?;
        let request = self.with_form(self.client.put(url), form)?;
        self.send(request).await
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), ApiError> {
        let url = self.task_url(id, None)?;
        self.send_raw(self.client.delete(url)).await.map(|_| ())
    }

    async fn complete_task(&self, id: &TaskId) -> Result<TaskDto, ApiError> {
        let url = self.task_url(id, Some(COMPLETE_SEGMENT))?;
        self.send(self.client.put(url)).await
    }

    async fn fetch_statistics(&self) -> Result<Statistics, ApiError> {
        let url = self.url(STATISTICS_PATH)?;
        self.send(self.client.get(url)).await
    }
}
