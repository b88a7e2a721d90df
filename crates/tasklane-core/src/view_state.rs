use tasklane_shared::{
  TaskId,
  TaskStatus
};

use crate::endpoint::ListQuery;
use crate::locale::Labels;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum StatusFilter {
  #[default]
  All,
  Pending,
  Completed
}

impl StatusFilter {
  pub const ALL: [StatusFilter; 3] = [
    StatusFilter::All,
    StatusFilter::Pending,
    StatusFilter::Completed
  ];

  pub fn as_key(self) -> &'static str {
    match self {
      | Self::All => "all",
      | Self::Pending => "Pending",
      | Self::Completed => "Completed"
    }
  }

  pub fn parse(
    text: &str
  ) -> Option<Self> {
    let text = text.trim();
    Self::ALL.into_iter().find(|f| {
      f.as_key()
        .eq_ignore_ascii_case(text)
    })
  }

  pub fn status(
    self
  ) -> Option<TaskStatus> {
    match self {
      | Self::All => None,
      | Self::Pending => {
        Some(TaskStatus::Pending)
      }
      | Self::Completed => {
        Some(TaskStatus::Completed)
      }
    }
  }

  pub fn label(
    self,
    labels: &Labels
  ) -> &'static str {
    match self {
      | Self::All => labels.filter_all,
      | Self::Pending => {
        labels.filter_pending
      }
      | Self::Completed => {
        labels.filter_completed
      }
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum SortOrder {
  #[default]
  DateDesc,
  DateAsc,
  PriorityDesc,
  PriorityAsc,
  DueDate
}

impl SortOrder {
  pub const ALL: [SortOrder; 5] = [
    SortOrder::DateDesc,
    SortOrder::DateAsc,
    SortOrder::PriorityDesc,
    SortOrder::PriorityAsc,
    SortOrder::DueDate
  ];

  pub fn as_key(self) -> &'static str {
    match self {
      | Self::DateDesc => "date-desc",
      | Self::DateAsc => "date-asc",
      | Self::PriorityDesc => {
        "priority-desc"
      }
      | Self::PriorityAsc => {
        "priority-asc"
      }
      | Self::DueDate => "due-date"
    }
  }

  pub fn parse(
    text: &str
  ) -> Option<Self> {
    let text = text.trim();
    Self::ALL
      .into_iter()
      .find(|s| s.as_key() == text)
  }

  pub fn label(
    self,
    labels: &Labels
  ) -> &'static str {
    match self {
      | Self::DateDesc => {
        labels.sort_date_desc
      }
      | Self::DateAsc => {
        labels.sort_date_asc
      }
      | Self::PriorityDesc => {
        labels.sort_priority_desc
      }
      | Self::PriorityAsc => {
        labels.sort_priority_asc
      }
      | Self::DueDate => {
        labels.sort_due_date
      }
    }
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ConfirmKind {
  Delete
}

/// A destructive action parked until
/// the user answers the confirmation
/// dialog.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct ConfirmRequest {
  pub kind:   ConfirmKind,
  pub target: TaskId
}

impl ConfirmRequest {
  pub fn delete(target: TaskId) -> Self {
    Self {
      kind: ConfirmKind::Delete,
      target
    }
  }

  pub fn message(
    &self,
    labels: &Labels
  ) -> &'static str {
    match self.kind {
      | ConfirmKind::Delete => {
        labels.confirm_delete
      }
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Default,
)]
pub struct ViewState {
  pub filter:  StatusFilter,
  pub sort:    SortOrder,
  pub search:  String,
  pub pending: Option<ConfirmRequest>
}

impl ViewState {
  pub fn list_query(&self) -> ListQuery {
    let search = self.search.trim();
    ListQuery {
      status: self.filter.status(),
      search: if search.is_empty() {
        None
      } else {
        Some(self.search.clone())
      },
      sort:   self.sort
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_view_omits_status_and_search()
   {
    let query =
      ViewState::default().list_query();
    assert_eq!(query.status, None);
    assert_eq!(query.search, None);
    assert_eq!(
      query.sort,
      SortOrder::DateDesc
    );
  }

  #[test]
  fn blank_search_counts_as_empty() {
    let view = ViewState {
      search: "   ".to_string(),
      ..ViewState::default()
    };
    assert_eq!(
      view.list_query().search,
      None
    );
  }

  #[test]
  fn keys_parse_back() {
    for sort in SortOrder::ALL {
      assert_eq!(
        SortOrder::parse(sort.as_key()),
        Some(sort)
      );
    }
    assert_eq!(
      StatusFilter::parse("pending"),
      Some(StatusFilter::Pending)
    );
  }
}
