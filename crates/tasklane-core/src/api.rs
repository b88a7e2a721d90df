use tasklane_shared::{
  Statistics,
  TaskDto,
  TaskForm,
  TaskId
};
use thiserror::Error;

use crate::endpoint::ListQuery;

/// Every way a backend call can fail.
/// The UI treats all of them the same;
/// the variants only feed diagnostics.
#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum ApiError {
  #[error("transport error: {0}")]
  Transport(String),
  #[error(
    "server responded with status \
     {status}"
  )]
  Status { status: u16 },
  #[error(
    "failed to decode response: {0}"
  )]
  Decode(String)
}

impl ApiError {
  pub fn from_status(
    status: u16
  ) -> Result<(), Self> {
    if (200..300).contains(&status) {
      Ok(())
    } else {
      Err(Self::Status { status })
    }
  }
}

/// The backend REST contract.
///
/// Futures are not required to be
/// `Send`; the browser client runs on
/// the single wasm thread.
#[allow(async_fn_in_trait)]
pub trait TaskApi {
  async fn list_tasks(
    &self,
    query: &ListQuery
  ) -> Result<Vec<TaskDto>, ApiError>;

  async fn get_task(
    &self,
    id: &TaskId
  ) -> Result<TaskDto, ApiError>;

  async fn create_task(
    &self,
    form: &TaskForm
  ) -> Result<TaskDto, ApiError>;

  async fn update_task(
    &self,
    id: &TaskId,
    form: &TaskForm
  ) -> Result<TaskDto, ApiError>;

  async fn delete_task(
    &self,
    id: &TaskId
  ) -> Result<(), ApiError>;

  async fn complete_task(
    &self,
    id: &TaskId
  ) -> Result<TaskDto, ApiError>;

  async fn fetch_statistics(
    &self
  ) -> Result<Statistics, ApiError>;
}

impl<T> TaskApi for &T
where
  T: TaskApi
{
  async fn list_tasks(
    &self,
    query: &ListQuery
  ) -> Result<Vec<TaskDto>, ApiError> {
    (**self).list_tasks(query).await
  }

  async fn get_task(
    &self,
    id: &TaskId
  ) -> Result<TaskDto, ApiError> {
    (**self).get_task(id).await
  }

  async fn create_task(
    &self,
    form: &TaskForm
  ) -> Result<TaskDto, ApiError> {
    (**self).create_task(form).await
  }

  async fn update_task(
    &self,
    id: &TaskId,
    form: &TaskForm
  ) -> Result<TaskDto, ApiError> {
    (**self).update_task(id, form).await
  }

  async fn delete_task(
    &self,
    id: &TaskId
  ) -> Result<(), ApiError> {
    (**self).delete_task(id).await
  }

  async fn complete_task(
    &self,
    id: &TaskId
  ) -> Result<TaskDto, ApiError> {
    (**self).complete_task(id).await
  }

  async fn fetch_statistics(
    &self
  ) -> Result<Statistics, ApiError> {
    (**self).fetch_statistics().await
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum SaveTarget {
  Create,
  Update(TaskId)
}

/// A backend call the board wants made.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum ApiRequest {
  ListTasks {
    seq:   u64,
    query: ListQuery
  },
  GetTask(TaskId),
  SaveTask {
    target: SaveTarget,
    form:   TaskForm
  },
  DeleteTask(TaskId),
  CompleteTask(TaskId),
  FetchStatistics
}

impl ApiRequest {
  pub fn name(&self) -> &'static str {
    match self {
      | Self::ListTasks { .. } => {
        "list_tasks"
      }
      | Self::GetTask(_) => "get_task",
      | Self::SaveTask {
        target: SaveTarget::Create,
        ..
      } => "create_task",
      | Self::SaveTask { .. } => {
        "update_task"
      }
      | Self::DeleteTask(_) => {
        "delete_task"
      }
      | Self::CompleteTask(_) => {
        "complete_task"
      }
      | Self::FetchStatistics => {
        "fetch_statistics"
      }
    }
  }
}
