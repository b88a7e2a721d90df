pub mod api;
pub mod board;
pub mod config;
pub mod debounce;
pub mod endpoint;
pub mod locale;
pub mod render;
pub mod runtime;
pub mod sync;
pub mod view_state;

pub use api::{
  ApiError,
  ApiRequest,
  SaveTarget,
  TaskApi
};
pub use board::{
  Board,
  Effect,
  EditorMode,
  EditorState,
  FormField,
  Msg,
  TimerSlot,
  Toast,
  ToastKind
};
pub use config::ClientConfig;
pub use locale::{
  Labels,
  Locale
};
pub use view_state::{
  ConfirmKind,
  ConfirmRequest,
  SortOrder,
  StatusFilter,
  ViewState
};
