#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use tasklane_core::endpoint::ListQuery;
use tasklane_core::{ApiError, Board, ClientConfig, Locale, TaskApi};
use tasklane_core::runtime::Headless;
use tasklane_shared::{
    Statistics, TaskDto, TaskForm, TaskId, TaskPriority, TaskStatus, split_tags,
};

pub const CREATED_AT: &str = "2026-10-19T08:00:00+00:00";
pub const COMPLETED_AT: &str = "2026-10-19T12:30:00+00:00";

/// In-memory stand-in for the REST backend, with the same filtering rules.
#[derive(Default)]
pub struct FakeApi {
    tasks: RefCell<Vec<TaskDto>>,
    calls: RefCell<Vec<&'static str>>,
    queries: RefCell<Vec<ListQuery>>,
    failing: RefCell<BTreeSet<&'static str>>,
    next_id: Cell<u64>,
}

impl FakeApi {
    pub fn with_tasks(tasks: Vec<TaskDto>) -> Self {
        Self {
            tasks: RefCell::new(tasks),
            ..Self::default()
        }
    }

    pub fn fail(&self, op: &'static str) {
        self.failing.borrow_mut().insert(op);
    }

    pub fn recover(&self, op: &'static str) {
        self.failing.borrow_mut().remove(op);
    }

    pub fn calls(&self, op: &str) -> usize {
        self.calls.borrow().iter().filter(|name| **name == op).count()
    }

    pub fn list_queries(&self) -> Vec<ListQuery> {
        self.queries.borrow().clone()
    }

    pub fn stored(&self) -> Vec<TaskDto> {
        self.tasks.borrow().clone()
    }

    fn enter(&self, op: &'static str) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(op);
        if self.failing.borrow().contains(op) {
            return Err(ApiError::Status { status: 500 });
        }
        Ok(())
    }

    fn find(&self, id: &TaskId) -> Result<TaskDto, ApiError> {
        self.tasks
            .borrow()
            .iter()
            .find(|task| &task.id == id)
            .cloned()
            .ok_or(ApiError::Status { status: 404 })
    }
}

impl TaskApi for FakeApi {
    async fn list_tasks(&self, query: &ListQuery) -> Result<Vec<TaskDto>, ApiError> {
        self.enter("list_tasks")?;
        self.queries.borrow_mut().push(query.clone());
        let needle = query.search.as_deref().map(str::to_lowercase);
        Ok(self
            .tasks
            .borrow()
            .iter()
            .filter(|task| query.status.is_none_or(|status| task.status == status))
            .filter(|task| match &needle {
                Some(needle) => {
                    task.title.to_lowercase().contains(needle)
                        || task.description.to_lowercase().contains(needle)
                        || task.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
                }
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn get_task(&self, id: &TaskId) -> Result<TaskDto, ApiError> {
        self.enter("get_task")?;
        self.find(id)
    }

    async fn create_task(&self, form: &TaskForm) -> Result<TaskDto, ApiError> {
        self.enter("create_task")?;
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        let task = TaskDto {
            id: TaskId::new(format!("N{n}")),
            title: form.title.clone(),
            description: form.description.clone(),
            creation_date: CREATED_AT.to_string(),
            due_date: form.due_date.clone(),
            priority: form.priority,
            status: TaskStatus::Pending,
            tags: split_tags(&form.tags),
            completion_date: None,
        };
        self.tasks.borrow_mut().push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: &TaskId, form: &TaskForm) -> Result<TaskDto, ApiError> {
        self.enter("update_task")?;
        let mut tasks = self.tasks.borrow_mut();
        let task = tasks
            .iter_mut()
            .find(|task| &task.id == id)
            .ok_or(ApiError::Status { status: 404 })?;
        task.title = form.title.clone();
        task.description = form.description.clone();
        task.due_date = form.due_date.clone();
        task.priority = form.priority;
        task.tags = split_tags(&form.tags);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), ApiError> {
        self.enter("delete_task")?;
        let mut tasks = self.tasks.borrow_mut();
        let before = tasks.len();
        tasks.retain(|task| &task.id != id);
        if tasks.len() == before {
            return Err(ApiError::Status { status: 404 });
        }
        Ok(())
    }

    async fn complete_task(&self, id: &TaskId) -> Result<TaskDto, ApiError> {
        self.enter("complete_task")?;
        let mut tasks = self.tasks.borrow_mut();
        let task = tasks
            .iter_mut()
            .find(|task| &task.id == id)
            .ok_or(ApiError::Status { status: 404 })?;
        task.status = TaskStatus::Completed;
        task.completion_date = Some(COMPLETED_AT.to_string());
        Ok(task.clone())
    }

    async fn fetch_statistics(&self) -> Result<Statistics, ApiError> {
        self.enter("fetch_statistics")?;
        let tasks = self.tasks.borrow();
        let total = tasks.len() as u64;
        let completed = tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Completed)
            .count() as u64;
        let rate = if total == 0 {
            0.0
        } else {
            (completed as f64 / total as f64 * 1000.0).round() / 10.0
        };
        Ok(Statistics {
            active_tasks: total - completed,
            completed_tasks: completed,
            total_tasks: total,
            completion_rate: rate,
        })
    }
}

pub fn task(id: &str, due: &str, status: TaskStatus) -> TaskDto {
    TaskDto {
        id: TaskId::from(id),
        title: format!("Task {id}"),
        description: String::new(),
        creation_date: CREATED_AT.to_string(),
        due_date: due.to_string(),
        priority: TaskPriority::Medium,
        status,
        tags: vec![],
        completion_date: match status {
            TaskStatus::Completed => Some(COMPLETED_AT.to_string()),
            TaskStatus::Pending => None,
        },
    }
}

pub fn english_config() -> ClientConfig {
    let mut cfg = ClientConfig::default();
    cfg.display.locale = Locale::EnUs;
    cfg
}

pub fn headless(tasks: Vec<TaskDto>) -> Headless<FakeApi> {
    Headless::new(Board::new(&english_config()), FakeApi::with_tasks(tasks))
}

/// Starts the board and lets every entrance animation finish.
pub async fn started(tasks: Vec<TaskDto>) -> Headless<FakeApi> {
    let mut runtime = headless(tasks);
    runtime.send(tasklane_core::Msg::Start).await;
    runtime.settle().await;
    runtime
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0)
        .single()
        .expect("valid now")
}

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).expect("utc offset")
}
