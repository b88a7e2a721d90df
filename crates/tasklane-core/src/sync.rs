use tracing::debug;

use crate::api::{
  ApiRequest,
  SaveTarget,
  TaskApi
};
use crate::board::Msg;

/// Runs one backend call and wraps the
/// outcome in the message the board
/// expects back.
#[tracing::instrument(skip(api), fields(request = request.name()))]
pub async fn execute<A>(
  api: &A,
  request: ApiRequest
) -> Msg
where
  A: TaskApi
{
  debug!("issuing request");
  match request {
    | ApiRequest::ListTasks {
      seq,
      query
    } => Msg::TasksLoaded {
      seq,
      result: api
        .list_tasks(&query)
        .await
    },
    | ApiRequest::GetTask(id) => {
      let result =
        api.get_task(&id).await;
      Msg::TaskFetched {
        id,
        result
      }
    }
    | ApiRequest::SaveTask {
      target,
      form
    } => {
      let result = match &target {
        | SaveTarget::Create => {
          api.create_task(&form).await
        }
        | SaveTarget::Update(id) => {
          api
            .update_task(id, &form)
            .await
        }
      };
      Msg::TaskSaved {
        target,
        result
      }
    }
    | ApiRequest::DeleteTask(id) => {
      let result =
        api.delete_task(&id).await;
      Msg::TaskDeleted {
        id,
        result
      }
    }
    | ApiRequest::CompleteTask(id) => {
      let result =
        api.complete_task(&id).await;
      Msg::TaskCompleted {
        id,
        result
      }
    }
    | ApiRequest::FetchStatistics => {
      Msg::StatisticsLoaded(
        api.fetch_statistics().await
      )
    }
  }
}
