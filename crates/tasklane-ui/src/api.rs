use gloo::net::http::{
  Request,
  Response
};
use serde::de::DeserializeOwned;
use tasklane_core::endpoint::{
  self,
  ListQuery,
  STATISTICS_PATH,
  TASKS_PATH
};
use tasklane_core::{
  ApiError,
  TaskApi
};
use tasklane_shared::{
  Statistics,
  TaskDto,
  TaskForm,
  TaskId
};

/// Talks to the task backend with the
/// browser's `fetch`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpTaskApi {
  base_url: String
}

impl HttpTaskApi {
  pub fn new(
    base_url: impl Into<String>
  ) -> Self {
    Self {
      base_url: base_url.into()
    }
  }

  fn url(&self, path: &str) -> String {
    endpoint::join(&self.base_url, path)
  }
}

fn transport(
  err: gloo::net::Error
) -> ApiError {
  ApiError::Transport(err.to_string())
}

async fn decode<T>(
  resp: Response
) -> Result<T, ApiError>
where
  T: DeserializeOwned
{
  ApiError::from_status(resp.status())?;
  resp.json::<T>().await.map_err(|err| {
    ApiError::Decode(err.to_string())
  })
}

impl TaskApi for HttpTaskApi {
  async fn list_tasks(
    &self,
    query: &ListQuery
  ) -> Result<Vec<TaskDto>, ApiError> {
    let pairs = query.pairs();
    let resp =
      Request::get(&self.url(TASKS_PATH))
        .query(pairs.iter().map(
          |(key, value)| {
            (*key, value.as_str())
          }
        ))
        .send()
        .await
        .map_err(transport)?;
    decode(resp).await
  }

  async fn get_task(
    &self,
    id: &TaskId
  ) -> Result<TaskDto, ApiError> {
    let resp = Request::get(
      &self.url(&endpoint::task_path(id))
    )
    .send()
    .await
    .map_err(transport)?;
    decode(resp).await
  }

  async fn create_task(
    &self,
    form: &TaskForm
  ) -> Result<TaskDto, ApiError> {
    let resp =
      Request::post(&self.url(TASKS_PATH))
        .json(form)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    decode(resp).await
  }

  async fn update_task(
    &self,
    id: &TaskId,
    form: &TaskForm
  ) -> Result<TaskDto, ApiError> {
    let resp = Request::put(
      &self.url(&endpoint::task_path(id))
    )
    .json(form)
    .map_err(transport)?
    .send()
    .await
    .map_err(transport)?;
    decode(resp).await
  }

  async fn delete_task(
    &self,
    id: &TaskId
  ) -> Result<(), ApiError> {
    let resp = Request::delete(
      &self.url(&endpoint::task_path(id))
    )
    .send()
    .await
    .map_err(transport)?;
    ApiError::from_status(resp.status())
  }

  async fn complete_task(
    &self,
    id: &TaskId
  ) -> Result<TaskDto, ApiError> {
    let resp = Request::put(&self.url(
      &endpoint::complete_path(id)
    ))
    .send()
    .await
    .map_err(transport)?;
    decode(resp).await
  }

  async fn fetch_statistics(
    &self
  ) -> Result<Statistics, ApiError> {
    let resp = Request::get(
      &self.url(STATISTICS_PATH)
    )
    .send()
    .await
    .map_err(transport)?;
    decode(resp).await
  }
}
