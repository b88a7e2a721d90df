//! URL building for the backend REST
//! contract. Both HTTP clients go
//! through here so the browser and the
//! terminal hit identical endpoints.

use tasklane_shared::{
  TaskId,
  TaskStatus
};

use crate::view_state::SortOrder;

pub const TASKS_PATH: &str =
  "/api/tasks";
pub const STATISTICS_PATH: &str =
  "/api/statistics";

/// Query for `GET /api/tasks`. `None`
/// fields are left out of the URL.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct ListQuery {
  pub status: Option<TaskStatus>,
  pub search: Option<String>,
  pub sort:   SortOrder
}

impl ListQuery {
  pub fn pairs(
    &self
  ) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::with_capacity(3);
    if let Some(status) = self.status {
      pairs.push((
        "status",
        status.as_key().to_string()
      ));
    }
    if let Some(search) = &self.search {
      pairs.push(("search", search.clone()));
    }
    pairs.push((
      "sort",
      self.sort.as_key().to_string()
    ));
    pairs
  }
}

/// Trailing segment of the completion
/// endpoint.
pub const COMPLETE_SEGMENT: &str =
  "complete";

pub fn task_path(id: &TaskId) -> String {
  format!(
    "{TASKS_PATH}/{}",
    encode_segment(id.as_str())
  )
}

pub fn complete_path(
  id: &TaskId
) -> String {
  format!(
    "{}/{COMPLETE_SEGMENT}",
    task_path(id)
  )
}

/// Joins a configured base URL with an
/// API path. An empty base keeps the
/// path origin-relative.
pub fn join(
  base_url: &str,
  path: &str
) -> String {
  let base = base_url.trim();
  let base = base.trim_end_matches('/');
  format!("{base}{path}")
}

fn encode_segment(raw: &str) -> String {
  let mut out =
    String::with_capacity(raw.len());
  for byte in raw.bytes() {
    match byte {
      | b'A'..=b'Z'
      | b'a'..=b'z'
      | b'0'..=b'9'
      | b'-'
      | b'.'
      | b'_'
      | b'~' => out.push(byte as char),
      | other => {
        out.push_str(&format!(
          "%{other:02X}"
        ))
      }
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn list_query_skips_defaults_but_keeps_sort()
   {
    let query = ListQuery {
      status: None,
      search: None,
      sort:   SortOrder::DateDesc
    };
    assert_eq!(
      query.pairs(),
      vec![(
        "sort",
        "date-desc".to_string()
      )]
    );
  }

  #[test]
  fn list_query_with_every_parameter() {
    let query = ListQuery {
      status: Some(TaskStatus::Completed),
      search: Some("rent".to_string()),
      sort:   SortOrder::DueDate
    };
    let keys: Vec<_> = query
      .pairs()
      .into_iter()
      .map(|(key, _)| key)
      .collect();
    assert_eq!(
      keys,
      vec!["status", "search", "sort"]
    );
  }

  #[test]
  fn task_paths() {
    let id = TaskId::from("20261019");
    assert_eq!(
      task_path(&id),
      "/api/tasks/20261019"
    );
    assert_eq!(
      complete_path(&id),
      "/api/tasks/20261019/complete"
    );
    assert_eq!(
      task_path(&TaskId::from("a/b c")),
      "/api/tasks/a%2Fb%20c"
    );
  }

  #[test]
  fn join_handles_trailing_slash() {
    assert_eq!(
      join(
        "http://localhost:5000/",
        STATISTICS_PATH
      ),
      "http://localhost:5000/api/statistics"
    );
    assert_eq!(
      join("", TASKS_PATH),
      "/api/tasks"
    );
  }
}
