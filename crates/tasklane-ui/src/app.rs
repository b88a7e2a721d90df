use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use chrono::{
  DateTime,
  Local,
  TimeZone,
  Utc
};
use gloo::console::log;
use gloo::timers::callback::Timeout;
use tasklane_core::render::{
  filter_buttons,
  render_statistics,
  sort_options
};
use tasklane_core::sync::execute;
use tasklane_core::{
  Board,
  ClientConfig,
  Effect,
  Msg,
  TimerSlot
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::functional::UseForceUpdateHandle;
use yew::{
  Callback,
  Html,
  MouseEvent,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_memo,
  use_mut_ref
};

use crate::api::HttpTaskApi;
use crate::components::{
  ConfirmModal,
  FilterBar,
  StatsPanel,
  TaskList,
  TaskModal,
  ToastStack
};

const CLIENT_CONFIG_TOML: &str =
  include_str!("../assets/client.toml");

/// Carries out board effects with the
/// browser's fetch, timers and paint
/// frames, then redraws.
#[derive(Clone)]
struct Dispatcher {
  board:  Rc<RefCell<Board>>,
  api:    Rc<HttpTaskApi>,
  slots:
    Rc<RefCell<BTreeMap<TimerSlot, Timeout>>>,
  redraw: UseForceUpdateHandle
}

impl Dispatcher {
  fn send(&self, msg: Msg) {
    let effects =
      self.board.borrow_mut().update(msg);
    self.redraw.force_update();
    for effect in effects {
      self.run(effect);
    }
  }

  fn run(&self, effect: Effect) {
    match effect {
      | Effect::Api(request) => {
        let this = self.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            let msg = execute(
              this.api.as_ref(),
              request
            )
            .await;
            this.send(msg);
          }
        );
      }
      | Effect::After {
        delay_ms,
        msg
      } => {
        let this = self.clone();
        Timeout::new(
          millis(delay_ms),
          move || this.send(msg)
        )
        .forget();
      }
      | Effect::Restart {
        slot,
        delay_ms,
        msg
      } => {
        let this = self.clone();
        let handle = Timeout::new(
          millis(delay_ms),
          move || this.send(msg)
        );
        // Dropping the old handle clears
        // its timeout.
        self
          .slots
          .borrow_mut()
          .insert(slot, handle);
      }
      | Effect::AfterPaint(msg) => {
        let this = self.clone();
        after_two_frames(move || {
          this.send(msg)
        });
      }
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let config =
    use_memo((), |_| load_client_config());
  let board = {
    let config = config.clone();
    use_mut_ref(move || Board::new(&config))
  };
  let api = {
    let config = config.clone();
    use_memo((), move |_| {
      HttpTaskApi::new(
        config.api.base_url.clone()
      )
    })
  };
  let slots = use_mut_ref(
    BTreeMap::<TimerSlot, Timeout>::new
  );
  let dispatcher = Dispatcher {
    board: board.clone(),
    api,
    slots,
    redraw: use_force_update()
  };

  {
    let dispatcher = dispatcher.clone();
    use_effect_with((), move |_| {
      ui_debug(
        "app.mounted",
        "requesting first task list"
      );
      dispatcher.send(Msg::Start);
      || ()
    });
  }

  let send = {
    let dispatcher = dispatcher.clone();
    Callback::from(move |msg: Msg| {
      dispatcher.send(msg)
    })
  };

  let state = board.borrow();
  let labels = state.labels();
  let list = state
    .task_list_view(browser_now(), Local);
  let stats =
    render_statistics(state.statistics());
  let buttons =
    filter_buttons(state.view(), labels);

  let editor = match state.editor() {
    | Some(editor) => html! {
        <TaskModal
            editor={editor.clone()}
            labels={labels}
            on_field={send.reform(Msg::EditField)}
            on_submit={send.reform(|_: ()| Msg::SubmitForm)}
            on_reset={send.reform(|_: ()| Msg::ResetForm)}
            on_close={send.reform(|_: ()| Msg::CloseEditor)}
        />
    },
    | None => html! {}
  };

  let confirm =
    match state.pending_confirm() {
      | Some(request) => html! {
          <ConfirmModal
              message={request.message(labels)}
              labels={labels}
              on_confirm={send.reform(|_: ()| Msg::Confirm)}
              on_cancel={send.reform(|_: ()| Msg::CancelConfirm)}
          />
      },
      | None => html! {}
    };

  html! {
      <div class="container" dir={labels.dir} lang={state.locale().tag()}>
          <header class="app-header">
              <h1>{ labels.app_title }</h1>
              <button
                  class="add-task-btn"
                  onclick={send.reform(|_: MouseEvent| Msg::OpenAdd)}
              >
                  <i class="fas fa-plus"></i>
                  { format!(" {}", labels.add_task) }
              </button>
          </header>
          <StatsPanel stats={stats} labels={labels} />
          <FilterBar
              buttons={buttons}
              sort={state.view().sort}
              sort_options={sort_options(labels)}
              search={state.search_input().to_string()}
              placeholder={labels.search_placeholder}
              on_filter={send.reform(Msg::SelectFilter)}
              on_sort={send.reform(Msg::SelectSort)}
              on_search={send.reform(Msg::SearchInput)}
          />
          <TaskList
              view={list}
              loading={state.is_loading() && !state.has_loaded()}
              labels={labels}
              on_edit={send.reform(Msg::OpenEdit)}
              on_complete={send.reform(Msg::Complete)}
              on_delete={send.reform(Msg::RequestDelete)}
          />
          { editor }
          { confirm }
          <ToastStack
              toasts={state.toasts().to_vec()}
              on_dismiss={send.reform(Msg::DismissToast)}
          />
      </div>
  }
}

fn load_client_config() -> ClientConfig {
  match ClientConfig::from_toml_str(
    CLIENT_CONFIG_TOML
  ) {
    | Ok(cfg) => {
      tracing::info!(
        locale = cfg.display.locale.tag(),
        base_url = %cfg.api.base_url,
        "loaded client config"
      );
      cfg
    }
    | Err(error) => {
      tracing::error!(?error, "failed to parse client config; using defaults");
      ClientConfig::default()
    }
  }
}

/// `Local` resolves through the
/// browser's `Date`, so each date gets
/// the offset in force on that day.
fn browser_now() -> DateTime<Utc> {
  Utc
    .timestamp_millis_opt(
      js_sys::Date::now() as i64
    )
    .single()
    .unwrap_or_else(Utc::now)
}

fn millis(delay_ms: u64) -> u32 {
  u32::try_from(delay_ms)
    .unwrap_or(u32::MAX)
}

/// Runs `callback` once the current
/// frame and the following one have
/// painted.
fn after_two_frames<F>(callback: F)
where
  F: FnOnce() + 'static
{
  let Some(window) = web_sys::window()
  else {
    callback();
    return;
  };

  let second = Closure::once(callback);
  let first = {
    let window = window.clone();
    Closure::once(move || {
      if let Err(err) = window
        .request_animation_frame(
          second.as_ref().unchecked_ref()
        )
      {
        tracing::warn!(?err, "second animation frame request failed");
      }
      second.forget();
    })
  };
  if let Err(err) = window
    .request_animation_frame(
      first.as_ref().unchecked_ref()
    )
  {
    tracing::warn!(?err, "animation frame request failed");
  }
  first.forget();
}

fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
