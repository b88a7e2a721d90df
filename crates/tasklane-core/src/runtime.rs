//! Effect runner for hosts without a
//! browser event loop: the terminal
//! client and the test suite.
//!
//! Time is virtual. Timers fire only
//! when the clock is advanced, and
//! animation frames only when
//! [`Headless::paint`] is called, so a
//! caller can observe every
//! intermediate state.

use std::collections::VecDeque;

use tracing::{
  trace,
  warn
};

use crate::api::{
  ApiRequest,
  TaskApi
};
use crate::board::{
  Board,
  Effect,
  Msg,
  TimerSlot,
  Toast
};
use crate::sync::execute;

const SETTLE_LIMIT: usize = 10_000;

#[derive(Debug, Clone)]
struct PendingTimer {
  due_ms: u64,
  order:  u64,
  slot:   Option<TimerSlot>,
  msg:    Msg
}

pub struct Headless<A> {
  board:       Board,
  api:         A,
  clock_ms:    u64,
  timers:      Vec<PendingTimer>,
  next_order:  u64,
  frames:      Vec<Msg>,
  hold:        bool,
  held:        Vec<ApiRequest>,
  toast_log:   Vec<Toast>,
  last_toast:  u64
}

impl<A> Headless<A>
where
  A: TaskApi
{
  pub fn new(board: Board, api: A) -> Self {
    Self {
      board,
      api,
      clock_ms: 0,
      timers: Vec::new(),
      next_order: 0,
      frames: Vec::new(),
      hold: false,
      held: Vec::new(),
      toast_log: Vec::new(),
      last_toast: 0
    }
  }

  pub fn board(&self) -> &Board {
    &self.board
  }

  pub fn api(&self) -> &A {
    &self.api
  }

  /// While holding, backend calls are
  /// parked instead of executed; see
  /// [`Self::release`].
  pub fn hold_requests(
    &mut self,
    hold: bool
  ) {
    self.hold = hold;
  }

  pub fn held_requests(
    &self
  ) -> &[ApiRequest] {
    &self.held
  }

  pub fn pending_timers(&self) -> usize {
    self.timers.len()
  }

  /// Every toast raised so far, oldest
  /// first, including ones already
  /// dismissed.
  pub fn toast_log(&self) -> &[Toast] {
    &self.toast_log
  }

  pub fn take_toast_log(
    &mut self
  ) -> Vec<Toast> {
    std::mem::take(&mut self.toast_log)
  }

  pub async fn send(&mut self, msg: Msg) {
    let mut queue = VecDeque::from([msg]);
    while let Some(msg) = queue.pop_front()
    {
      trace!(?msg, "dispatching");
      let effects = self.board.update(msg);
      self.record_toasts();
      for effect in effects {
        match effect {
          | Effect::Api(request) => {
            if self.hold {
              self.held.push(request);
            } else {
              queue.push_back(
                execute(&self.api, request)
                  .await
              );
            }
          }
          | Effect::After {
            delay_ms,
            msg
          } => {
            self.schedule(None, delay_ms, msg)
          }
          | Effect::Restart {
            slot,
            delay_ms,
            msg
          } => {
            self.timers.retain(|timer| {
              timer.slot != Some(slot)
            });
            self.schedule(
              Some(slot),
              delay_ms,
              msg
            );
          }
          | Effect::AfterPaint(msg) => {
            self.frames.push(msg)
          }
        }
      }
    }
  }

  /// Runs the held request at `index`
  /// and delivers its result.
  pub async fn release(
    &mut self,
    index: usize
  ) {
    if index >= self.held.len() {
      warn!(
        index,
        held = self.held.len(),
        "no held request at index"
      );
      return;
    }
    let request = self.held.remove(index);
    let msg =
      execute(&self.api, request).await;
    self.send(msg).await;
  }

  pub async fn release_all(&mut self) {
    while !self.held.is_empty() {
      self.release(0).await;
    }
  }

  /// Delivers everything waiting on an
  /// animation frame.
  pub async fn paint(&mut self) {
    let frames =
      std::mem::take(&mut self.frames);
    for msg in frames {
      self.send(msg).await;
    }
  }

  /// Moves the clock forward, firing due
  /// timers in order.
  pub async fn advance(&mut self, ms: u64) {
    let target =
      self.clock_ms.saturating_add(ms);
    while let Some(index) =
      self.next_timer_index(target)
    {
      let timer = self.timers.remove(index);
      self.clock_ms = timer.due_ms;
      self.send(timer.msg).await;
    }
    self.clock_ms = target;
  }

  /// Paints and fires timers until
  /// nothing is left to run. Held
  /// requests stay held.
  pub async fn settle(&mut self) {
    for _ in 0..SETTLE_LIMIT {
      if !self.frames.is_empty() {
        self.paint().await;
        continue;
      }
      let Some(next_due) = self
        .timers
        .iter()
        .map(|timer| timer.due_ms)
        .min()
      else {
        return;
      };
      let wait =
        next_due.saturating_sub(self.clock_ms);
      self.advance(wait).await;
    }
    warn!(
      limit = SETTLE_LIMIT,
      "board did not settle"
    );
  }

  fn schedule(
    &mut self,
    slot: Option<TimerSlot>,
    delay_ms: u64,
    msg: Msg
  ) {
    self.next_order += 1;
    self.timers.push(PendingTimer {
      due_ms: self
        .clock_ms
        .saturating_add(delay_ms),
      order: self.next_order,
      slot,
      msg
    });
  }

  fn next_timer_index(
    &self,
    target: u64
  ) -> Option<usize> {
    self
      .timers
      .iter()
      .enumerate()
      .filter(|(_, timer)| {
        timer.due_ms <= target
      })
      .min_by_key(|(_, timer)| {
        (timer.due_ms, timer.order)
      })
      .map(|(index, _)| index)
  }

  fn record_toasts(&mut self) {
    for toast in self.board.toasts() {
      if toast.id > self.last_toast {
        self.last_toast = toast.id;
        self.toast_log.push(toast.clone());
      }
    }
  }
}
