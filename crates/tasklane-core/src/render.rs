//! Turns tasks into a view model that
//! the browser and the terminal both
//! draw from.

use std::collections::BTreeMap;

use chrono::{
  DateTime,
  TimeZone,
  Utc
};
use tasklane_shared::{
  Statistics,
  TaskDto,
  TaskId,
  TaskPriority
};

use crate::locale::{
  Labels,
  Locale,
  format_timestamp,
  parse_timestamp
};
use crate::view_state::{
  SortOrder,
  StatusFilter,
  ViewState
};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum CardPhase {
  /// Drawn invisible and offset; the
  /// next paints move it to `Visible`.
  Entering,
  #[default]
  Visible,
  Removing,
  Completing
}

impl CardPhase {
  pub fn class(self) -> &'static str {
    match self {
      | Self::Entering => "entering",
      | Self::Visible => "",
      | Self::Removing => "removing",
      | Self::Completing => "completing"
    }
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum CardActions {
  /// Edit, complete and delete.
  Pending,
  /// Completed badge and delete.
  Completed
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum DateKind {
  Created,
  Due,
  Completed
}

impl DateKind {
  pub fn icon(self) -> &'static str {
    match self {
      | Self::Created => {
        "fa-calendar-plus"
      }
      | Self::Due => "fa-calendar-alt",
      | Self::Completed => {
        "fa-calendar-check"
      }
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct DateLine {
  pub kind:  DateKind,
  pub label: &'static str,
  pub text:  String
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct TaskCard {
  pub id:             TaskId,
  pub title:          String,
  pub description:    String,
  pub priority:       TaskPriority,
  pub priority_label: &'static str,
  pub tags:           Vec<String>,
  pub overdue:        bool,
  pub dates:          Vec<DateLine>,
  pub actions:        CardActions,
  pub phase:          CardPhase
}

impl TaskCard {
  pub fn class(&self) -> String {
    match self.phase.class() {
      | "" => "task-card".to_string(),
      | phase => {
        format!("task-card {phase}")
      }
    }
  }

  pub fn priority_class(
    &self
  ) -> &'static str {
    match self.priority {
      | TaskPriority::Low => {
        "priority-low"
      }
      | TaskPriority::Medium => {
        "priority-medium"
      }
      | TaskPriority::High => {
        "priority-high"
      }
    }
  }

  pub fn has_completion_line(
    &self
  ) -> bool {
    self.dates.iter().any(|line| {
      line.kind == DateKind::Completed
    })
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum TaskListView {
  Placeholder(&'static str),
  Cards(Vec<TaskCard>)
}

impl TaskListView {
  pub fn cards(&self) -> &[TaskCard] {
    match self {
      | Self::Placeholder(_) => &[],
      | Self::Cards(cards) => cards
    }
  }

  pub fn card(
    &self,
    id: &TaskId
  ) -> Option<&TaskCard> {
    self
      .cards()
      .iter()
      .find(|card| &card.id == id)
  }
}

/// Pending and due strictly before
/// `now`. Unparseable due dates never
/// count.
pub fn is_overdue<Tz>(
  task: &TaskDto,
  now: DateTime<Utc>,
  zone: Tz
) -> bool
where
  Tz: TimeZone
{
  task.is_pending()
    && parse_timestamp(
      &task.due_date,
      zone
    )
    .is_some_and(|due| {
      due.with_timezone(&Utc) < now
    })
}

/// `zone` is the viewer's time zone;
/// backend dates without an offset are
/// read as wall-clock times there.
pub fn render_task_list<Tz>(
  tasks: &[TaskDto],
  phases: &BTreeMap<TaskId, CardPhase>,
  now: DateTime<Utc>,
  zone: Tz,
  locale: Locale
) -> TaskListView
where
  Tz: TimeZone + Copy
{
  if tasks.is_empty() {
    return TaskListView::Placeholder(
      locale.labels().no_tasks
    );
  }

  TaskListView::Cards(
    tasks
      .iter()
      .map(|task| {
        let phase = phases
          .get(&task.id)
          .copied()
          .unwrap_or_default();
        render_card(
          task, phase, now, zone, locale
        )
      })
      .collect()
  )
}

pub fn render_card<Tz>(
  task: &TaskDto,
  phase: CardPhase,
  now: DateTime<Utc>,
  zone: Tz,
  locale: Locale
) -> TaskCard
where
  Tz: TimeZone + Copy
{
  let labels = locale.labels();

  let mut dates = vec![
    DateLine {
      kind:  DateKind::Created,
      label: labels.created_on,
      text:  format_timestamp(
        &task.creation_date,
        zone,
        locale
      )
    },
    DateLine {
      kind:  DateKind::Due,
      label: labels.due_on,
      text:  format_timestamp(
        &task.due_date,
        zone,
        locale
      )
    },
  ];
  if let Some(completed) = task
    .completion_date
    .as_deref()
    .filter(|value| {
      !value.trim().is_empty()
    })
  {
    dates.push(DateLine {
      kind:  DateKind::Completed,
      label: labels.completed_on,
      text:  format_timestamp(
        completed, zone, locale
      )
    });
  }

  TaskCard {
    id: task.id.clone(),
    title: task.title.clone(),
    description: task
      .description
      .clone(),
    priority: task.priority,
    priority_label: labels
      .priority(task.priority),
    tags: task.tags.clone(),
    overdue: is_overdue(
      task, now, zone
    ),
    dates,
    actions: if task.is_pending() {
      CardActions::Pending
    } else {
      CardActions::Completed
    },
    phase
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct StatsView {
  pub active:     String,
  pub completed:  String,
  pub total:      String,
  pub rate_text:  String,
  /// CSS width of the progress bar.
  pub rate_width: String
}

pub fn render_statistics(
  stats: Option<&Statistics>
) -> StatsView {
  let Some(stats) = stats else {
    return StatsView {
      active:     "-".to_string(),
      completed:  "-".to_string(),
      total:      "-".to_string(),
      rate_text:  "0%".to_string(),
      rate_width: "0%".to_string()
    };
  };

  let rate =
    stats.completion_rate.clamp(0.0, 100.0);
  let rate_text = format!("{rate}%");
  StatsView {
    active: stats
      .active_tasks
      .to_string(),
    completed: stats
      .completed_tasks
      .to_string(),
    total: stats.total_tasks.to_string(),
    rate_width: rate_text.clone(),
    rate_text
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct FilterButton {
  pub filter: StatusFilter,
  pub label:  &'static str,
  pub active: bool
}

pub fn filter_buttons(
  view: &ViewState,
  labels: &Labels
) -> Vec<FilterButton> {
  StatusFilter::ALL
    .into_iter()
    .map(|filter| FilterButton {
      filter,
      label: filter.label(labels),
      active: filter == view.filter
    })
    .collect()
}

pub fn sort_options(
  labels: &Labels
) -> Vec<(SortOrder, &'static str)> {
  SortOrder::ALL
    .into_iter()
    .map(|sort| {
      (sort, sort.label(labels))
    })
    .collect()
}
