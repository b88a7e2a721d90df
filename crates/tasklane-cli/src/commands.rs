use std::io::{self, BufRead, Write};

use anyhow::{Context, bail};
use chrono::{DateTime, Local, Utc};
use tasklane_core::render::{CardPhase, render_card, render_statistics};
use tasklane_core::runtime::Headless;
use tasklane_core::{
    Board, ClientConfig, FormField, Msg, SortOrder, StatusFilter, TaskApi, ToastKind, ViewState,
};
use tasklane_shared::{TaskDto, TaskId};
use tracing::{debug, info};

use crate::cli::{AddArgs, Command, EditArgs};
use crate::print::Printer;

#[tracing::instrument(skip_all, fields(command = command.name()))]
pub async fn dispatch<A: TaskApi>(
    api: A,
    cfg: &ClientConfig,
    printer: &Printer,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::List {
            status,
            search,
            sort,
        } => list(api, cfg, printer, status, search.unwrap_or_default(), sort).await,
        Command::Show { id } => show(api, cfg, printer, TaskId::from(id.as_str())).await,
        Command::Add(args) => add(api, cfg, printer, args).await,
        Command::Edit { id, fields } => edit(api, cfg, printer, TaskId::from(id.as_str()), fields).await,
        Command::Complete { id } => complete(api, cfg, printer, TaskId::from(id.as_str())).await,
        Command::Delete { id, yes } => {
            let stdin = io::stdin();
            delete(
                api,
                cfg,
                printer,
                TaskId::from(id.as_str()),
                yes,
                stdin.lock(),
                io::stderr(),
            )
            .await
        }
        Command::Stats => stats(api, cfg, printer).await,
    }
}

fn clock() -> (DateTime<Utc>, Local) {
    (Utc::now(), Local)
}

/// Board with the first list and statistics already loaded.
async fn started<A: TaskApi>(api: A, cfg: &ClientConfig, view: ViewState) -> Headless<A> {
    let mut board = Headless::new(Board::with_view(cfg, view), api);
    board.send(Msg::Start).await;
    board.settle().await;
    board
}

/// Prints success toasts; the first error toast becomes the command's error.
fn drain_toasts<A: TaskApi>(board: &mut Headless<A>, printer: &Printer) -> anyhow::Result<()> {
    for toast in board.take_toast_log() {
        match toast.kind {
            ToastKind::Success => printer.print_notice(&toast.message)?,
            ToastKind::Error => bail!("{}", toast.message),
        }
    }
    Ok(())
}

fn ensure_listed<A: TaskApi>(board: &Headless<A>, id: &TaskId) -> anyhow::Result<()> {
    if board.board().tasks().iter().any(|task| &task.id == id) {
        Ok(())
    } else {
        bail!("no task with id {id}")
    }
}

fn find_task<'a, A: TaskApi>(board: &'a Headless<A>, id: &TaskId) -> Option<&'a TaskDto> {
    board.board().tasks().iter().find(|task| &task.id == id)
}

/// Completion is final; completed tasks only allow delete.
fn ensure_pending<A: TaskApi>(board: &Headless<A>, id: &TaskId) -> anyhow::Result<()> {
    match find_task(board, id) {
        Some(task) if task.is_pending() => Ok(()),
        Some(_) => bail!("task {id} is already completed"),
        None => bail!("no task with id {id}"),
    }
}

async fn list<A: TaskApi>(
    api: A,
    cfg: &ClientConfig,
    printer: &Printer,
    filter: StatusFilter,
    search: String,
    sort: SortOrder,
) -> anyhow::Result<()> {
    let view = ViewState {
        filter,
        sort,
        search,
        pending: None,
    };
    let mut board = started(api, cfg, view).await;
    drain_toasts(&mut board, printer)?;

    let (now, zone) = clock();
    let state = board.board();
    info!(tasks = state.tasks().len(), "listing tasks");
    printer.print_task_list(&state.task_list_view(now, zone), state.labels())?;
    printer.print_statistics(&render_statistics(state.statistics()), state.labels())?;
    Ok(())
}

async fn show<A: TaskApi>(
    api: A,
    cfg: &ClientConfig,
    printer: &Printer,
    id: TaskId,
) -> anyhow::Result<()> {
    let task = api
        .get_task(&id)
        .await
        .with_context(|| format!("failed to load task {id}"))?;
    let (now, zone) = clock();
    let locale = cfg.display.locale;
    let card = render_card(&task, CardPhase::Visible, now, zone, locale);
    printer.print_task_card(&card, locale.labels())
}

async fn add<A: TaskApi>(
    api: A,
    cfg: &ClientConfig,
    printer: &Printer,
    args: AddArgs,
) -> anyhow::Result<()> {
    let mut board = Headless::new(Board::new(cfg), api);
    board.send(Msg::OpenAdd).await;
    for field in [
        FormField::Title(args.title),
        FormField::Description(args.description),
        FormField::DueDate(args.due),
        FormField::Priority(args.priority),
        FormField::Tags(args.tags),
    ] {
        board.send(Msg::EditField(field)).await;
    }
    board.send(Msg::SubmitForm).await;
    board.settle().await;
    drain_toasts(&mut board, printer)
}

fn edit_fields(fields: EditArgs) -> Vec<FormField> {
    let EditArgs {
        title,
        description,
        due,
        priority,
        tags,
    } = fields;
    let mut out = Vec::new();
    out.extend(title.map(FormField::Title));
    out.extend(description.map(FormField::Description));
    out.extend(due.map(FormField::DueDate));
    out.extend(priority.map(FormField::Priority));
    out.extend(tags.map(FormField::Tags));
    out
}

async fn edit<A: TaskApi>(
    api: A,
    cfg: &ClientConfig,
    printer: &Printer,
    id: TaskId,
    fields: EditArgs,
) -> anyhow::Result<()> {
    let changes = edit_fields(fields);
    if changes.is_empty() {
        bail!("nothing to change; pass at least one of --title, --description, --due, --priority, --tags");
    }

    let mut board = started(api, cfg, ViewState::default()).await;
    drain_toasts(&mut board, printer)?;
    ensure_pending(&board, &id)?;

    board.send(Msg::OpenEdit(id.clone())).await;
    board.settle().await;
    if board.board().editor().is_none() {
        drain_toasts(&mut board, printer)?;
        bail!("task {id} could not be opened for editing");
    }

    for field in changes {
        board.send(Msg::EditField(field)).await;
    }
    board.send(Msg::SubmitForm).await;
    board.settle().await;
    drain_toasts(&mut board, printer)
}

async fn complete<A: TaskApi>(
    api: A,
    cfg: &ClientConfig,
    printer: &Printer,
    id: TaskId,
) -> anyhow::Result<()> {
    let mut board = started(api, cfg, ViewState::default()).await;
    drain_toasts(&mut board, printer)?;
    ensure_pending(&board, &id)?;

    board.send(Msg::Complete(id.clone())).await;
    board.settle().await;
    drain_toasts(&mut board, printer)?;

    if let Some(task) = find_task(&board, &id) {
        let (now, zone) = clock();
        let locale = board.board().locale();
        let card = render_card(task, CardPhase::Visible, now, zone, locale);
        printer.print_task_card(&card, locale.labels())?;
    }
    Ok(())
}

async fn delete<A, R, W>(
    api: A,
    cfg: &ClientConfig,
    printer: &Printer,
    id: TaskId,
    assume_yes: bool,
    input: R,
    prompt: W,
) -> anyhow::Result<()>
where
    A: TaskApi,
    R: BufRead,
    W: Write,
{
    let mut board = started(api, cfg, ViewState::default()).await;
    drain_toasts(&mut board, printer)?;
    ensure_listed(&board, &id)?;

    board.send(Msg::RequestDelete(id.clone())).await;
    let accepted = assume_yes || {
        let labels = board.board().labels();
        let message = board
            .board()
            .pending_confirm()
            .map(|request| request.message(labels))
            .unwrap_or(labels.confirm_delete);
        confirm(input, prompt, message)?
    };

    if !accepted {
        debug!(task_id = %id, "delete declined");
        board.send(Msg::CancelConfirm).await;
        return Ok(());
    }

    board.send(Msg::Confirm).await;
    board.settle().await;
    drain_toasts(&mut board, printer)
}

/// Asks `message` and reads one answer line. Only an explicit yes counts.
pub fn confirm<R: BufRead, W: Write>(mut input: R, mut prompt: W, message: &str) -> anyhow::Result<bool> {
    write!(prompt, "{message} [y/N] ")?;
    prompt.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("failed reading confirmation from stdin")?;
    let answer = answer.trim().to_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes" | "نعم"))
}

async fn stats<A: TaskApi>(api: A, cfg: &ClientConfig, printer: &Printer) -> anyhow::Result<()> {
    let statistics = api
        .fetch_statistics()
        .await
        .context("failed to load statistics")?;
    let labels = cfg.display.locale.labels();
    printer.print_statistics(&render_statistics(Some(&statistics)), labels)
}
