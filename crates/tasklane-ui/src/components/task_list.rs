use tasklane_core::Labels;
use tasklane_core::render::TaskListView;
use tasklane_shared::TaskId;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskCardItem;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub view:        TaskListView,
  /// First load still in flight.
  pub loading:     bool,
  pub labels:      &'static Labels,
  pub on_edit:     Callback<TaskId>,
  pub on_complete: Callback<TaskId>,
  pub on_delete:   Callback<TaskId>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  if props.loading {
    return html! {
        <div id="tasks-container" class="tasks">
            <div class="loading">{ props.labels.loading }</div>
        </div>
    };
  }

  match &props.view {
    | TaskListView::Placeholder(text) => {
      html! {
          <div id="tasks-container" class="tasks">
              <div class="no-tasks">{ *text }</div>
          </div>
      }
    }
    | TaskListView::Cards(cards) => html! {
        <div id="tasks-container" class="tasks">
            {
                for cards.iter().cloned().map(|card| html! {
                    <TaskCardItem
                        key={card.id.as_str().to_string()}
                        card={card.clone()}
                        labels={props.labels}
                        on_edit={props.on_edit.clone()}
                        on_complete={props.on_complete.clone()}
                        on_delete={props.on_delete.clone()}
                    />
                })
            }
        </div>
    }
  }
}
