mod support;

use support::{now, started, task, utc};
use tasklane_core::render::{CardActions, CardPhase, TaskListView, filter_buttons};
use tasklane_core::{EditorMode, FormField, Msg, SortOrder, StatusFilter, ToastKind};
use tasklane_shared::{TaskDto, TaskForm, TaskId, TaskStatus};

fn two_pending() -> Vec<TaskDto> {
    vec![
        task("T1", "2026-10-25T09:00", TaskStatus::Pending),
        task("T2", "2026-10-26T09:00", TaskStatus::Pending),
    ]
}

#[tokio::test]
async fn start_loads_list_then_reveals_cards_after_paint() {
    let mut runtime = support::headless(two_pending());
    runtime.send(Msg::Start).await;

    assert_eq!(runtime.api().calls("list_tasks"), 1);
    assert_eq!(runtime.board().phase(&TaskId::from("T1")), CardPhase::Entering);

    runtime.paint().await;
    assert_eq!(runtime.board().phase(&TaskId::from("T1")), CardPhase::Visible);
    assert_eq!(
        runtime.board().statistics().map(|stats| stats.total_tasks),
        Some(2)
    );
}

#[tokio::test]
async fn empty_backend_renders_only_the_placeholder() {
    let runtime = started(vec![]).await;
    assert_eq!(
        runtime.board().task_list_view(now(), utc()),
        TaskListView::Placeholder("No tasks")
    );
}

#[tokio::test]
async fn selecting_the_same_filter_twice_reloads_once() {
    let mut runtime = started(two_pending()).await;
    let before = runtime.api().calls("list_tasks");

    runtime.send(Msg::SelectFilter(StatusFilter::Pending)).await;
    runtime.send(Msg::SelectFilter(StatusFilter::Pending)).await;

    assert_eq!(runtime.api().calls("list_tasks"), before + 1);
    let last = runtime.api().list_queries().pop().expect("a list query");
    assert_eq!(last.status, Some(TaskStatus::Pending));

    let board = runtime.board();
    let active: Vec<_> = filter_buttons(board.view(), board.labels())
        .into_iter()
        .filter(|button| button.active)
        .map(|button| button.filter)
        .collect();
    assert_eq!(active, vec![StatusFilter::Pending]);
}

#[tokio::test]
async fn search_burst_issues_one_request_with_the_last_value() {
    let mut runtime = started(two_pending()).await;
    let before = runtime.api().calls("list_tasks");

    for value in ["r", "re", "ren", "rent"] {
        runtime.send(Msg::SearchInput(value.to_string())).await;
        runtime.advance(100).await;
    }
    assert_eq!(runtime.api().calls("list_tasks"), before);
    assert_eq!(runtime.pending_timers(), 1);

    runtime.advance(199).await;
    assert_eq!(runtime.api().calls("list_tasks"), before);

    runtime.advance(1).await;
    assert_eq!(runtime.api().calls("list_tasks"), before + 1);
    let last = runtime.api().list_queries().pop().expect("a list query");
    assert_eq!(last.search.as_deref(), Some("rent"));
    assert_eq!(runtime.board().search_input(), "rent");
}

#[tokio::test]
async fn sort_change_is_sent_with_the_query() {
    let mut runtime = started(two_pending()).await;
    runtime.send(Msg::SelectSort(SortOrder::DueDate)).await;
    let last = runtime.api().list_queries().pop().expect("a list query");
    assert_eq!(last.sort, SortOrder::DueDate);
}

#[tokio::test]
async fn tags_survive_create_then_edit() {
    let mut runtime = started(vec![]).await;

    runtime.send(Msg::OpenAdd).await;
    runtime
        .send(Msg::EditField(FormField::Title("Pay rent".to_string())))
        .await;
    runtime
        .send(Msg::EditField(FormField::Tags(" a, b ,, c ".to_string())))
        .await;
    runtime.send(Msg::SubmitForm).await;

    assert!(runtime.board().editor().is_none());
    let toast = runtime.toast_log().last().expect("a toast");
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.message, "Task added");

    let created = runtime.board().tasks()[0].id.clone();
    assert_eq!(runtime.board().tasks()[0].tags, vec!["a", "b", "c"]);

    runtime.send(Msg::OpenEdit(created.clone())).await;
    let editor = runtime.board().editor().expect("editor open");
    assert_eq!(editor.mode, EditorMode::Edit(created));
    assert!(!editor.loading);
    assert_eq!(editor.form.title, "Pay rent");
    assert_eq!(editor.form.tags, "a, b, c");
}

#[tokio::test]
async fn update_closes_editor_and_reloads() {
    let mut runtime = started(two_pending()).await;
    let before = runtime.api().calls("list_tasks");

    runtime.send(Msg::OpenEdit(TaskId::from("T2"))).await;
    runtime
        .send(Msg::EditField(FormField::Title("Renamed".to_string())))
        .await;
    runtime.send(Msg::SubmitForm).await;

    assert!(runtime.board().editor().is_none());
    assert_eq!(runtime.api().calls("update_task"), 1);
    assert_eq!(runtime.api().calls("list_tasks"), before + 1);
    assert_eq!(runtime.board().tasks()[1].title, "Renamed");
    assert_eq!(
        runtime.toast_log().last().map(|toast| toast.message.as_str()),
        Some("Task updated")
    );
}

#[tokio::test]
async fn failed_delete_rolls_the_card_back() {
    let mut runtime = started(two_pending()).await;
    let t1 = TaskId::from("T1");
    runtime.api().fail("delete_task");

    runtime.send(Msg::RequestDelete(t1.clone())).await;
    assert!(runtime.board().pending_confirm().is_some());

    runtime.hold_requests(true);
    runtime.send(Msg::Confirm).await;
    assert!(runtime.board().pending_confirm().is_none());
    let view = runtime.board().task_list_view(now(), utc());
    assert_eq!(
        view.card(&t1).map(|card| card.class()),
        Some("task-card removing".to_string())
    );

    runtime.release_all().await;
    runtime.settle().await;

    let view = runtime.board().task_list_view(now(), utc());
    assert_eq!(view.cards().len(), 2);
    assert_eq!(view.card(&t1).map(|card| card.phase), Some(CardPhase::Visible));
    let toast = runtime.toast_log().last().expect("an error toast");
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "Could not delete the task");
}

#[tokio::test]
async fn delete_removes_the_card_after_the_animation() {
    let mut runtime = started(two_pending()).await;
    let t1 = TaskId::from("T1");
    let stats_before = runtime.api().calls("fetch_statistics");

    runtime.send(Msg::RequestDelete(t1.clone())).await;
    runtime.send(Msg::Confirm).await;
    assert_eq!(runtime.board().phase(&t1), CardPhase::Removing);
    assert_eq!(runtime.board().tasks().len(), 2);

    runtime.advance(499).await;
    assert_eq!(runtime.board().tasks().len(), 2);

    runtime.advance(1).await;
    assert_eq!(runtime.board().tasks().len(), 1);
    assert_eq!(runtime.api().calls("fetch_statistics"), stats_before + 1);
    assert_eq!(
        runtime.board().statistics().map(|stats| stats.total_tasks),
        Some(1)
    );
}

#[tokio::test]
async fn completing_swaps_actions_and_refreshes_statistics_once() {
    let mut runtime = started(two_pending()).await;
    let t1 = TaskId::from("T1");
    let stats_before = runtime.api().calls("fetch_statistics");

    runtime.send(Msg::Complete(t1.clone())).await;
    assert_eq!(runtime.board().phase(&t1), CardPhase::Completing);
    assert_eq!(
        runtime.toast_log().last().map(|toast| toast.message.as_str()),
        Some("Task completed")
    );

    runtime.settle().await;

    let view = runtime.board().task_list_view(now(), utc());
    let card = view.card(&t1).expect("T1 still listed");
    assert_eq!(card.actions, CardActions::Completed);
    assert!(card.has_completion_line());
    assert_eq!(card.phase, CardPhase::Visible);
    assert_eq!(
        view.card(&TaskId::from("T2")).map(|card| card.actions),
        Some(CardActions::Pending)
    );
    assert_eq!(runtime.api().calls("fetch_statistics"), stats_before + 1);
    assert_eq!(
        runtime.board().statistics().map(|stats| stats.completed_tasks),
        Some(1)
    );
}

#[tokio::test]
async fn failed_complete_keeps_the_card_pending() {
    let mut runtime = started(two_pending()).await;
    let stats_before = runtime.api().calls("fetch_statistics");
    runtime.api().fail("complete_task");

    runtime.send(Msg::Complete(TaskId::from("T1"))).await;
    runtime.settle().await;

    let view = runtime.board().task_list_view(now(), utc());
    assert_eq!(
        view.card(&TaskId::from("T1")).map(|card| card.actions),
        Some(CardActions::Pending)
    );
    assert_eq!(runtime.api().calls("fetch_statistics"), stats_before);
    assert_eq!(
        runtime.toast_log().last().map(|toast| toast.kind),
        Some(ToastKind::Error)
    );
}

#[tokio::test]
async fn actions_on_unlisted_tasks_are_ignored() {
    let mut runtime = started(two_pending()).await;
    runtime.send(Msg::Complete(TaskId::from("ghost"))).await;
    runtime.send(Msg::RequestDelete(TaskId::from("ghost"))).await;
    runtime.send(Msg::Confirm).await;

    assert_eq!(runtime.api().calls("complete_task"), 0);
    assert_eq!(runtime.api().calls("delete_task"), 0);
}

#[tokio::test]
async fn completed_tasks_cannot_be_completed_again() {
    let mut runtime = started(vec![task("T2", "2026-10-01T09:00", TaskStatus::Completed)]).await;
    let before = runtime.api().stored();
    runtime.take_toast_log();

    runtime.send(Msg::Complete(TaskId::from("T2"))).await;
    runtime.settle().await;

    assert_eq!(runtime.api().calls("complete_task"), 0);
    assert!(runtime.toast_log().is_empty());
    assert_eq!(runtime.api().stored(), before);
}

#[tokio::test]
async fn stale_list_responses_are_discarded() {
    let mut runtime = started(vec![
        task("T1", "2026-10-25T09:00", TaskStatus::Pending),
        task("T2", "2026-10-01T09:00", TaskStatus::Completed),
    ])
    .await;

    runtime.hold_requests(true);
    runtime.send(Msg::SelectFilter(StatusFilter::Pending)).await;
    runtime.send(Msg::SelectFilter(StatusFilter::Completed)).await;
    assert_eq!(runtime.held_requests().len(), 2);
    runtime.hold_requests(false);

    runtime.release(1).await;
    runtime.release(0).await;
    runtime.settle().await;

    let ids: Vec<_> = runtime
        .board()
        .tasks()
        .iter()
        .map(|task| task.id.as_str().to_string())
        .collect();
    assert_eq!(ids, vec!["T2"]);
    assert!(!runtime.board().is_loading());
}

#[tokio::test]
async fn a_new_confirmation_replaces_the_old_one() {
    let mut runtime = started(two_pending()).await;

    runtime.send(Msg::RequestDelete(TaskId::from("T1"))).await;
    runtime.send(Msg::RequestDelete(TaskId::from("T2"))).await;
    assert_eq!(
        runtime.board().pending_confirm().map(|req| req.target.clone()),
        Some(TaskId::from("T2"))
    );

    runtime.send(Msg::CancelConfirm).await;
    assert!(runtime.board().pending_confirm().is_none());
    runtime.send(Msg::Confirm).await;
    assert_eq!(runtime.api().calls("delete_task"), 0);
    assert_eq!(runtime.board().tasks().len(), 2);
}

#[tokio::test]
async fn editor_closes_when_the_task_cannot_be_fetched() {
    let mut runtime = started(two_pending()).await;
    runtime.api().fail("get_task");

    runtime.send(Msg::OpenEdit(TaskId::from("T1"))).await;

    assert!(runtime.board().editor().is_none());
    assert_eq!(
        runtime.toast_log().last().map(|toast| toast.message.as_str()),
        Some("Could not load the task")
    );
}

#[tokio::test]
async fn failed_save_keeps_the_form_open() {
    let mut runtime = started(vec![]).await;
    runtime.api().fail("create_task");

    runtime.send(Msg::OpenAdd).await;
    runtime
        .send(Msg::EditField(FormField::Title("Draft".to_string())))
        .await;
    runtime.send(Msg::SubmitForm).await;

    let editor = runtime.board().editor().expect("editor still open");
    assert!(!editor.saving);
    assert_eq!(editor.form.title, "Draft");
    assert_eq!(
        runtime.toast_log().last().map(|toast| toast.kind),
        Some(ToastKind::Error)
    );

    runtime.api().recover("create_task");
    runtime.send(Msg::SubmitForm).await;
    assert!(runtime.board().editor().is_none());
    assert_eq!(runtime.api().stored().len(), 1);
}

#[tokio::test]
async fn submit_is_ignored_while_a_save_is_in_flight() {
    let mut runtime = started(vec![]).await;
    runtime.send(Msg::OpenAdd).await;
    runtime.hold_requests(true);
    runtime.send(Msg::SubmitForm).await;
    runtime.send(Msg::SubmitForm).await;
    assert_eq!(runtime.held_requests().len(), 1);
}

#[tokio::test]
async fn reset_clears_the_form() {
    let mut runtime = started(vec![]).await;
    runtime.send(Msg::OpenAdd).await;
    runtime
        .send(Msg::EditField(FormField::Description("notes".to_string())))
        .await;
    runtime.send(Msg::ResetForm).await;
    let editor = runtime.board().editor().expect("editor open");
    assert_eq!(editor.form, TaskForm::default());
}

#[tokio::test]
async fn list_failure_keeps_the_previous_list() {
    let mut runtime = started(two_pending()).await;
    runtime.api().fail("list_tasks");

    runtime.send(Msg::SelectSort(SortOrder::PriorityDesc)).await;

    assert_eq!(runtime.board().tasks().len(), 2);
    assert!(!runtime.board().is_loading());
    assert_eq!(
        runtime.toast_log().last().map(|toast| toast.message.as_str()),
        Some("Could not load tasks")
    );
}

#[tokio::test]
async fn statistics_failures_stay_silent() {
    let mut runtime = support::headless(two_pending());
    runtime.api().fail("fetch_statistics");
    runtime.send(Msg::Start).await;
    runtime.settle().await;

    assert!(runtime.board().statistics().is_none());
    assert!(runtime.toast_log().is_empty());
    assert_eq!(runtime.board().tasks().len(), 2);
}

#[tokio::test]
async fn toasts_expire_and_are_capped() {
    let mut runtime = started(vec![]).await;
    runtime.api().fail("get_task");

    for n in 0..6 {
        runtime.send(Msg::OpenEdit(TaskId::new(format!("x{n}")))).await;
    }
    assert_eq!(runtime.board().toasts().len(), 4);
    assert_eq!(runtime.toast_log().len(), 6);

    runtime.advance(2_999).await;
    assert_eq!(runtime.board().toasts().len(), 4);
    runtime.advance(1).await;
    assert!(runtime.board().toasts().is_empty());
}
