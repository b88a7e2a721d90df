use std::fmt;

use serde::{
  Deserialize,
  Serialize
};

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
  pub fn new(
    id: impl Into<String>
  ) -> Self {
    Self(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for TaskId {
  fn from(value: &str) -> Self {
    Self(value.to_string())
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub enum TaskStatus {
  Pending,
  Completed
}

impl TaskStatus {
  pub fn as_key(self) -> &'static str {
    match self {
      | Self::Pending => "Pending",
      | Self::Completed => "Completed"
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Default,
)]
pub enum TaskPriority {
  Low,
  #[default]
  Medium,
  High
}

impl TaskPriority {
  pub const ALL: [TaskPriority; 3] = [
    TaskPriority::Low,
    TaskPriority::Medium,
    TaskPriority::High
  ];

  pub fn as_key(self) -> &'static str {
    match self {
      | Self::Low => "Low",
      | Self::Medium => "Medium",
      | Self::High => "High"
    }
  }

  /// Accepts the wire name in any
  /// case.
  pub fn parse(
    text: &str
  ) -> Option<Self> {
    let text = text.trim();
    Self::ALL.into_iter().find(|p| {
      p.as_key()
        .eq_ignore_ascii_case(text)
    })
  }
}

/// A task as returned by the backend.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct TaskDto {
  pub id:              TaskId,
  #[serde(default)]
  pub title:           String,
  #[serde(default)]
  pub description:     String,
  #[serde(default)]
  pub creation_date:   String,
  #[serde(default)]
  pub due_date:        String,
  pub priority:        TaskPriority,
  pub status:          TaskStatus,
  #[serde(default)]
  pub tags:            Vec<String>,
  #[serde(default)]
  pub completion_date: Option<String>
}

impl TaskDto {
  pub fn is_pending(&self) -> bool {
    self.status == TaskStatus::Pending
  }
}

/// Body of `POST /api/tasks` and
/// `PUT /api/tasks/{id}`. Tags travel
/// as one comma-separated string; the
/// backend splits them again.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub struct TaskForm {
  pub title:       String,
  pub description: String,
  pub due_date:    String,
  pub priority:    TaskPriority,
  pub tags:        String
}

impl TaskForm {
  pub fn from_task(
    task: &TaskDto
  ) -> Self {
    Self {
      title:       task.title.clone(),
      description: task
        .description
        .clone(),
      due_date:    task.due_date.clone(),
      priority:    task.priority,
      tags:        join_tags(&task.tags)
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Default,
)]
pub struct Statistics {
  pub active_tasks:    u64,
  pub completed_tasks: u64,
  pub total_tasks:     u64,
  pub completion_rate: f64
}

/// Edit-form rendering of a tag list.
pub fn join_tags(
  tags: &[String]
) -> String {
  tags.join(", ")
}

/// Same splitting rule the backend
/// applies to the submitted text.
pub fn split_tags(
  text: &str
) -> Vec<String> {
  text
    .split(',')
    .map(str::trim)
    .filter(|tag| !tag.is_empty())
    .map(ToString::to_string)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tags_survive_split_then_join() {
    let tags = split_tags("a, b, c");
    assert_eq!(tags, vec!["a", "b", "c"]);
    assert_eq!(join_tags(&tags), "a, b, c");
  }

  #[test]
  fn split_drops_blank_entries() {
    assert_eq!(
      split_tags(" urgent ,, home ,"),
      vec!["urgent", "home"]
    );
    assert!(split_tags("  ").is_empty());
  }

  #[test]
  fn decodes_backend_task() {
    let raw = r#"{
      "id": "20261019120000",
      "title": "Pay rent",
      "description": "",
      "creation_date": "2026-10-19T09:00:00+00:00",
      "due_date": "2026-10-20T12:00",
      "priority": "High",
      "status": "Pending",
      "tags": ["home"],
      "completion_date": null
    }"#;
    let task: TaskDto =
      serde_json::from_str(raw)
        .expect("decode task");
    assert_eq!(
      task.id,
      TaskId::from("20261019120000")
    );
    assert_eq!(
      task.priority,
      TaskPriority::High
    );
    assert!(task.is_pending());
    assert!(
      task.completion_date.is_none()
    );
  }

  #[test]
  fn form_body_carries_tags_as_text() {
    let form = TaskForm {
      title:       "t".to_string(),
      description: "d".to_string(),
      due_date:    "2026-10-20"
        .to_string(),
      priority:    TaskPriority::Low,
      tags:        "a, b".to_string()
    };
    let value =
      serde_json::to_value(&form)
        .expect("encode form");
    assert_eq!(value["tags"], "a, b");
    assert_eq!(value["priority"], "Low");
  }

  #[test]
  fn priority_parse_ignores_case() {
    assert_eq!(
      TaskPriority::parse("high"),
      Some(TaskPriority::High)
    );
    assert_eq!(
      TaskPriority::parse("urgent"),
      None
    );
  }
}
