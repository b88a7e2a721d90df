/// Coalesces bursts of calls inside a
/// quiet window into one, keeping only
/// the latest value.
///
/// The debouncer does not own a timer.
/// Each [`push`](Self::push) hands back a
/// generation; whoever runs timers
/// restarts its single timer with that
/// generation and calls
/// [`settle`](Self::settle) when it
/// fires. Only the newest generation
/// yields a value, so a timer that was
/// not cancelled in time is harmless.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
  window_ms:  u64,
  generation: u64,
  pending:    Option<T>
}

impl<T> Debouncer<T> {
  pub fn new(window_ms: u64) -> Self {
    Self {
      window_ms,
      generation: 0,
      pending: None
    }
  }

  pub fn window_ms(&self) -> u64 {
    self.window_ms
  }

  pub fn push(
    &mut self,
    value: T
  ) -> u64 {
    self.generation =
      self.generation.wrapping_add(1);
    self.pending = Some(value);
    self.generation
  }

  pub fn settle(
    &mut self,
    generation: u64
  ) -> Option<T> {
    if generation != self.generation {
      return None;
    }
    self.pending.take()
  }
}
