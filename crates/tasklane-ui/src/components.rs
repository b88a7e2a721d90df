mod confirm_modal;
mod filter_bar;
mod stats_panel;
mod task_card;
mod task_list;
mod task_modal;
mod toast_stack;

pub use confirm_modal::ConfirmModal;
pub use filter_bar::FilterBar;
pub use stats_panel::StatsPanel;
pub use task_card::TaskCardItem;
pub use task_list::TaskList;
pub use task_modal::TaskModal;
pub use toast_stack::ToastStack;
