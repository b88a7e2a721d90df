//! The task board controller.
//!
//! `Board` owns every piece of client
//! state and reacts to one [`Msg`] at a
//! time. It never performs I/O itself:
//! [`Board::update`] returns the
//! [`Effect`]s a runner must carry out,
//! and the runner feeds results back in
//! as further messages.

use std::collections::BTreeMap;

use chrono::{
  DateTime,
  TimeZone,
  Utc
};
use tasklane_shared::{
  Statistics,
  TaskDto,
  TaskForm,
  TaskId,
  TaskPriority
};
use tracing::{
  debug,
  error,
  info,
  warn
};

use crate::api::{
  ApiError,
  ApiRequest,
  SaveTarget
};
use crate::config::ClientConfig;
use crate::debounce::Debouncer;
use crate::locale::{
  Labels,
  Locale
};
use crate::render::{
  CardPhase,
  TaskListView,
  render_task_list
};
use crate::view_state::{
  ConfirmKind,
  ConfirmRequest,
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
  PartialOrd,
  Ord,
  Hash,
)]
pub enum TimerSlot {
  Search
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
  Api(ApiRequest),
  /// Deliver `msg` once `delay_ms` has
  /// passed.
  After {
    delay_ms: u64,
    msg:      Msg
  },
  /// Like `After`, but replaces any
  /// timer still waiting in `slot`.
  Restart {
    slot:     TimerSlot,
    delay_ms: u64,
    msg:      Msg
  },
  /// Deliver `msg` after the current
  /// frame and the one after it have
  /// painted.
  AfterPaint(Msg)
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
  Title(String),
  Description(String),
  DueDate(String),
  Priority(TaskPriority),
  Tags(String)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
  Start,
  OpenAdd,
  OpenEdit(TaskId),
  CloseEditor,
  EditField(FormField),
  ResetForm,
  SubmitForm,
  SelectFilter(StatusFilter),
  SelectSort(SortOrder),
  SearchInput(String),
  SearchSettled {
    generation: u64
  },
  RequestDelete(TaskId),
  Confirm,
  CancelConfirm,
  Complete(TaskId),
  RevealCards {
    render: u64
  },
  DismissToast(u64),
  DeleteAnimationDone(TaskId),
  CompleteAnimationDone(TaskDto),
  TasksLoaded {
    seq:    u64,
    result: Result<Vec<TaskDto>, ApiError>
  },
  TaskFetched {
    id:     TaskId,
    result: Result<TaskDto, ApiError>
  },
  TaskSaved {
    target: SaveTarget,
    result: Result<TaskDto, ApiError>
  },
  TaskDeleted {
    id:     TaskId,
    result: Result<(), ApiError>
  },
  TaskCompleted {
    id:     TaskId,
    result: Result<TaskDto, ApiError>
  },
  StatisticsLoaded(
    Result<Statistics, ApiError>
  )
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ToastKind {
  Success,
  Error
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct Toast {
  pub id:      u64,
  pub kind:    ToastKind,
  pub message: String
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum EditorMode {
  Add,
  Edit(TaskId)
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct EditorState {
  pub mode:    EditorMode,
  pub form:    TaskForm,
  /// Waiting for `get_task` to fill the
  /// form.
  pub loading: bool,
  /// A save request is in flight.
  pub saving:  bool
}

impl EditorState {
  pub fn target(&self) -> SaveTarget {
    match &self.mode {
      | EditorMode::Add => {
        SaveTarget::Create
      }
      | EditorMode::Edit(id) => {
        SaveTarget::Update(id.clone())
      }
    }
  }

  pub fn title<'a>(
    &self,
    labels: &'a Labels
  ) -> &'a str {
    match self.mode {
      | EditorMode::Add => {
        labels.modal_add_title
      }
      | EditorMode::Edit(_) => {
        labels.modal_edit_title
      }
    }
  }
}

#[derive(Debug, Clone)]
pub struct Board {
  locale:                Locale,
  delete_animation_ms:   u64,
  complete_animation_ms: u64,
  toast_duration_ms:     u64,
  max_toasts:            usize,
  view:                  ViewState,
  search_input:          String,
  search:                Debouncer<String>,
  tasks:                 Option<Vec<TaskDto>>,
  phases:
    BTreeMap<TaskId, CardPhase>,
  statistics:            Option<Statistics>,
  editor:                Option<EditorState>,
  toasts:                Vec<Toast>,
  next_toast_id:         u64,
  list_seq:              u64,
  render_seq:            u64,
  loading:               bool
}

impl Board {
  pub fn new(config: &ClientConfig) -> Self {
    Self::with_view(
      config,
      ViewState::default()
    )
  }

  pub fn with_view(
    config: &ClientConfig,
    view: ViewState
  ) -> Self {
    Self {
      locale: config.display.locale,
      delete_animation_ms: config
        .timing
        .delete_animation_ms,
      complete_animation_ms: config
        .timing
        .complete_animation_ms,
      toast_duration_ms: config
        .timing
        .toast_duration_ms,
      max_toasts: config
        .display
        .max_toasts
        .max(1),
      search_input: view.search.clone(),
      view,
      search: Debouncer::new(
        config.timing.search_debounce_ms
      ),
      tasks: None,
      phases: BTreeMap::new(),
      statistics: None,
      editor: None,
      toasts: Vec::new(),
      next_toast_id: 0,
      list_seq: 0,
      render_seq: 0,
      loading: false
    }
  }

  pub fn locale(&self) -> Locale {
    self.locale
  }

  pub fn labels(&self) -> &'static Labels {
    self.locale.labels()
  }

  pub fn view(&self) -> &ViewState {
    &self.view
  }

  pub fn search_input(&self) -> &str {
    &self.search_input
  }

  pub fn tasks(&self) -> &[TaskDto] {
    self.tasks.as_deref().unwrap_or(&[])
  }

  pub fn has_loaded(&self) -> bool {
    self.tasks.is_some()
  }

  pub fn is_loading(&self) -> bool {
    self.loading
  }

  pub fn phase(
    &self,
    id: &TaskId
  ) -> CardPhase {
    self
      .phases
      .get(id)
      .copied()
      .unwrap_or_default()
  }

  pub fn statistics(
    &self
  ) -> Option<&Statistics> {
    self.statistics.as_ref()
  }

  pub fn editor(
    &self
  ) -> Option<&EditorState> {
    self.editor.as_ref()
  }

  pub fn pending_confirm(
    &self
  ) -> Option<&ConfirmRequest> {
    self.view.pending.as_ref()
  }

  pub fn toasts(&self) -> &[Toast] {
    &self.toasts
  }

  pub fn task_list_view<Tz>(
    &self,
    now: DateTime<Utc>,
    zone: Tz
  ) -> TaskListView
  where
    Tz: TimeZone + Copy
  {
    render_task_list(
      self.tasks(),
      &self.phases,
      now,
      zone,
      self.locale
    )
  }

  pub fn update(
    &mut self,
    msg: Msg
  ) -> Vec<Effect> {
    match msg {
      | Msg::Start => {
        info!("starting task board");
        vec![
          self.reload(),
          Effect::Api(
            ApiRequest::FetchStatistics
          ),
        ]
      }
      | Msg::OpenAdd => {
        self.editor = Some(EditorState {
          mode:    EditorMode::Add,
          form:    TaskForm::default(),
          loading: false,
          saving:  false
        });
        vec![]
      }
      | Msg::OpenEdit(id) => {
        debug!(task_id = %id, "opening editor");
        self.editor = Some(EditorState {
          mode:    EditorMode::Edit(
            id.clone()
          ),
          form:    TaskForm::default(),
          loading: true,
          saving:  false
        });
        vec![Effect::Api(
          ApiRequest::GetTask(id)
        )]
      }
      | Msg::CloseEditor => {
        self.editor = None;
        vec![]
      }
      | Msg::EditField(field) => {
        if let Some(editor) =
          self.editor.as_mut()
          && !editor.loading
        {
          apply_field(
            &mut editor.form,
            field
          );
        }
        vec![]
      }
      | Msg::ResetForm => {
        if let Some(editor) =
          self.editor.as_mut()
          && !editor.loading
        {
          editor.form = TaskForm::default();
        }
        vec![]
      }
      | Msg::SubmitForm => self.submit(),
      | Msg::SelectFilter(filter) => {
        if filter == self.view.filter {
          debug!(
            filter = filter.as_key(),
            "filter already active"
          );
          return vec![];
        }
        self.view.filter = filter;
        vec![self.reload()]
      }
      | Msg::SelectSort(sort) => {
        if sort == self.view.sort {
          return vec![];
        }
        self.view.sort = sort;
        vec![self.reload()]
      }
      | Msg::SearchInput(value) => {
        self.search_input = value.clone();
        let generation =
          self.search.push(value);
        vec![Effect::Restart {
          slot:     TimerSlot::Search,
          delay_ms: self.search.window_ms(),
          msg:      Msg::SearchSettled {
            generation
          }
        }]
      }
      | Msg::SearchSettled {
        generation
      } => {
        match self.search.settle(generation)
        {
          | Some(query) => {
            debug!(query = %query, "search settled");
            self.view.search = query;
            vec![self.reload()]
          }
          | None => vec![]
        }
      }
      | Msg::RequestDelete(id) => {
        let request =
          ConfirmRequest::delete(id);
        if let Some(previous) = self
          .view
          .pending
          .replace(request)
        {
          debug!(
            replaced = %previous.target,
            "confirmation overwritten"
          );
        }
        vec![]
      }
      | Msg::Confirm => {
        let Some(request) =
          self.view.pending.take()
        else {
          return vec![];
        };
        match request.kind {
          | ConfirmKind::Delete => {
            self.start_delete(
              request.target
            )
          }
        }
      }
      | Msg::CancelConfirm => {
        self.view.pending = None;
        vec![]
      }
      | Msg::Complete(id) => {
        let Some(task) = self
          .tasks()
          .iter()
          .find(|task| task.id == id)
        else {
          debug!(task_id = %id, "complete ignored; task not shown");
          return vec![];
        };
        if !task.is_pending() {
          debug!(task_id = %id, "complete ignored; task already completed");
          return vec![];
        }
        vec![Effect::Api(
          ApiRequest::CompleteTask(id)
        )]
      }
      | Msg::RevealCards {
        render
      } => {
        if render == self.render_seq {
          self.phases.retain(|_, phase| {
            *phase != CardPhase::Entering
          });
        }
        vec![]
      }
      | Msg::DismissToast(id) => {
        self
          .toasts
          .retain(|toast| toast.id != id);
        vec![]
      }
      | Msg::DeleteAnimationDone(id) => {
        if let Some(tasks) =
          self.tasks.as_mut()
        {
          tasks.retain(|task| task.id != id);
        }
        self.phases.remove(&id);
        vec![Effect::Api(
          ApiRequest::FetchStatistics
        )]
      }
      | Msg::CompleteAnimationDone(task) => {
        let id = task.id.clone();
        if let Some(slot) = self
          .tasks
          .as_mut()
          .and_then(|tasks| {
            tasks
              .iter_mut()
              .find(|t| t.id == id)
          })
        {
          *slot = task;
        }
        self.phases.remove(&id);
        vec![Effect::Api(
          ApiRequest::FetchStatistics
        )]
      }
      | Msg::TasksLoaded {
        seq,
        result
      } => self.tasks_loaded(seq, result),
      | Msg::TaskFetched {
        id,
        result
      } => self.task_fetched(id, result),
      | Msg::TaskSaved {
        target,
        result
      } => self.task_saved(target, result),
      | Msg::TaskDeleted {
        id,
        result
      } => self.task_deleted(id, result),
      | Msg::TaskCompleted {
        id,
        result
      } => {
        self.task_completed(id, result)
      }
      | Msg::StatisticsLoaded(result) => {
        match result {
          | Ok(stats) => {
            self.statistics = Some(stats);
          }
          | Err(err) => {
            warn!(error = %err, "statistics refresh failed");
          }
        }
        vec![]
      }
    }
  }

  fn reload(&mut self) -> Effect {
    self.list_seq += 1;
    self.loading = true;
    let query = self.view.list_query();
    debug!(
      seq = self.list_seq,
      ?query,
      "requesting task list"
    );
    Effect::Api(ApiRequest::ListTasks {
      seq: self.list_seq,
      query
    })
  }

  fn is_rendered(
    &self,
    id: &TaskId
  ) -> bool {
    self
      .tasks()
      .iter()
      .any(|task| &task.id == id)
  }

  fn push_toast(
    &mut self,
    kind: ToastKind,
    message: &str
  ) -> Effect {
    self.next_toast_id += 1;
    let id = self.next_toast_id;
    self.toasts.push(Toast {
      id,
      kind,
      message: message.to_string()
    });
    if self.toasts.len() > self.max_toasts
    {
      let drain =
        self.toasts.len() - self.max_toasts;
      self.toasts.drain(0..drain);
    }
    Effect::After {
      delay_ms: self.toast_duration_ms,
      msg:      Msg::DismissToast(id)
    }
  }

  fn submit(&mut self) -> Vec<Effect> {
    let Some(editor) = self.editor.as_mut()
    else {
      return vec![];
    };
    if editor.loading || editor.saving {
      debug!("submit ignored; editor busy");
      return vec![];
    }
    editor.saving = true;
    vec![Effect::Api(
      ApiRequest::SaveTask {
        target: editor.target(),
        form:   editor.form.clone()
      }
    )]
  }

  fn start_delete(
    &mut self,
    id: TaskId
  ) -> Vec<Effect> {
    if !self.is_rendered(&id) {
      debug!(task_id = %id, "delete ignored; task not shown");
      return vec![];
    }
    self
      .phases
      .insert(id.clone(), CardPhase::Removing);
    vec![Effect::Api(
      ApiRequest::DeleteTask(id)
    )]
  }

  fn tasks_loaded(
    &mut self,
    seq: u64,
    result: Result<Vec<TaskDto>, ApiError>
  ) -> Vec<Effect> {
    if seq != self.list_seq {
      debug!(
        seq,
        latest = self.list_seq,
        "discarding stale task list"
      );
      return vec![];
    }
    self.loading = false;

    match result {
      | Ok(tasks) => {
        info!(
          seq,
          count = tasks.len(),
          "task list loaded"
        );
        self.render_seq += 1;
        self.phases = tasks
          .iter()
          .map(|task| {
            (
              task.id.clone(),
              CardPhase::Entering
            )
          })
          .collect();
        self.tasks = Some(tasks);
        vec![
          Effect::AfterPaint(
            Msg::RevealCards {
              render: self.render_seq
            }
          ),
          Effect::Api(
            ApiRequest::FetchStatistics
          ),
        ]
      }
      | Err(err) => {
        error!(seq, error = %err, "loading tasks failed");
        let message =
          self.labels().msg_list_failed;
        vec![self.push_toast(
          ToastKind::Error,
          message
        )]
      }
    }
  }

  fn task_fetched(
    &mut self,
    id: TaskId,
    result: Result<TaskDto, ApiError>
  ) -> Vec<Effect> {
    let waiting = self
      .editor
      .as_ref()
      .is_some_and(|editor| {
        editor.loading
          && editor.mode
            == EditorMode::Edit(id.clone())
      });
    if !waiting {
      debug!(task_id = %id, "task fetch no longer wanted");
      return vec![];
    }

    match result {
      | Ok(task) => {
        if let Some(editor) =
          self.editor.as_mut()
        {
          editor.form =
            TaskForm::from_task(&task);
          editor.loading = false;
        }
        vec![]
      }
      | Err(err) => {
        error!(task_id = %id, error = %err, "loading task for edit failed");
        self.editor = None;
        let message =
          self.labels().msg_task_failed;
        vec![self.push_toast(
          ToastKind::Error,
          message
        )]
      }
    }
  }

  fn task_saved(
    &mut self,
    target: SaveTarget,
    result: Result<TaskDto, ApiError>
  ) -> Vec<Effect> {
    let editing_target = self
      .editor
      .as_ref()
      .is_some_and(|editor| {
        editor.target() == target
      });

    match result {
      | Ok(task) => {
        info!(task_id = %task.id, ?target, "task saved");
        if editing_target {
          self.editor = None;
        }
        let message = match target {
          | SaveTarget::Create => {
            self.labels().msg_created
          }
          | SaveTarget::Update(_) => {
            self.labels().msg_updated
          }
        };
        vec![
          self.reload(),
          self.push_toast(
            ToastKind::Success,
            message
          ),
        ]
      }
      | Err(err) => {
        error!(?target, error = %err, "saving task failed");
        if editing_target
          && let Some(editor) =
            self.editor.as_mut()
        {
          editor.saving = false;
        }
        let message =
          self.labels().msg_save_failed;
        vec![self.push_toast(
          ToastKind::Error,
          message
        )]
      }
    }
  }

  fn task_deleted(
    &mut self,
    id: TaskId,
    result: Result<(), ApiError>
  ) -> Vec<Effect> {
    match result {
      | Ok(()) => {
        info!(task_id = %id, "task deleted");
        let message =
          self.labels().msg_deleted;
        vec![
          self.push_toast(
            ToastKind::Success,
            message
          ),
          Effect::After {
            delay_ms: self
              .delete_animation_ms,
            msg:      Msg::DeleteAnimationDone(
              id
            )
          },
        ]
      }
      | Err(err) => {
        error!(task_id = %id, error = %err, "deleting task failed");
        if self.phases.get(&id)
          == Some(&CardPhase::Removing)
        {
          self.phases.remove(&id);
        }
        let message =
          self.labels().msg_delete_failed;
        vec![self.push_toast(
          ToastKind::Error,
          message
        )]
      }
    }
  }

  fn task_completed(
    &mut self,
    id: TaskId,
    result: Result<TaskDto, ApiError>
  ) -> Vec<Effect> {
    match result {
      | Ok(task) => {
        info!(task_id = %id, "task completed");
        if self.is_rendered(&id) {
          self.phases.insert(
            id,
            CardPhase::Completing
          );
        }
        let message =
          self.labels().msg_completed;
        vec![
          self.push_toast(
            ToastKind::Success,
            message
          ),
          Effect::After {
            delay_ms: self
              .complete_animation_ms,
            msg: Msg::CompleteAnimationDone(
              task
            )
          },
        ]
      }
      | Err(err) => {
        error!(task_id = %id, error = %err, "completing task failed");
        let message =
          self.labels().msg_complete_failed;
        vec![self.push_toast(
          ToastKind::Error,
          message
        )]
      }
    }
  }
}

fn apply_field(
  form: &mut TaskForm,
  field: FormField
) {
  match field {
    | FormField::Title(value) => {
      form.title = value
    }
    | FormField::Description(value) => {
      form.description = value
    }
    | FormField::DueDate(value) => {
      form.due_date = value
    }
    | FormField::Priority(value) => {
      form.priority = value
    }
    | FormField::Tags(value) => {
      form.tags = value
    }
  }
}
