use tasklane_core::Labels;
use tasklane_core::render::{
  CardActions,
  TaskCard
};
use tasklane_shared::TaskId;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskCardItemProps {
  pub card:        TaskCard,
  pub labels:      &'static Labels,
  pub on_edit:     Callback<TaskId>,
  pub on_complete: Callback<TaskId>,
  pub on_delete:   Callback<TaskId>
}

#[function_component(TaskCardItem)]
pub fn task_card_item(
  props: &TaskCardItemProps
) -> Html {
  let card = &props.card;
  let labels = props.labels;

  let delete_button = {
    let on_delete =
      props.on_delete.clone();
    let id = card.id.clone();
    html! {
        <button class="delete-btn" onclick={move |_| on_delete.emit(id.clone())}>
            <i class="fas fa-trash"></i>
            { format!(" {}", labels.delete) }
        </button>
    }
  };

  let actions = match card.actions {
    | CardActions::Pending => {
      let on_edit = props.on_edit.clone();
      let on_complete =
        props.on_complete.clone();
      let edit_id = card.id.clone();
      let complete_id = card.id.clone();
      html! {
          <>
              <button class="edit-btn" onclick={move |_| on_edit.emit(edit_id.clone())}>
                  <i class="fas fa-edit"></i>
                  { format!(" {}", labels.edit) }
              </button>
              <button class="complete-btn" onclick={move |_| on_complete.emit(complete_id.clone())}>
                  <i class="fas fa-check"></i>
                  { format!(" {}", labels.complete) }
              </button>
              { delete_button }
          </>
      }
    }
    | CardActions::Completed => html! {
        <>
            <span class="completed-badge">
                <i class="fas fa-check-circle"></i>
                { format!(" {}", labels.completed_badge) }
            </span>
            { delete_button }
        </>
    }
  };

  html! {
      <div
          class={card.class()}
          data-id={card.id.as_str().to_string()}
          data-priority={card.priority.as_key()}
      >
          <div class="task-header">
              <h3 class="task-title">{ &card.title }</h3>
              <span class={classes!("task-priority", card.priority_class())}>
                  <i class="fas fa-flag"></i>
                  { format!(" {}", card.priority_label) }
              </span>
          </div>
          {
              if card.description.trim().is_empty() {
                  html! {}
              } else {
                  html! { <p class="task-description">{ &card.description }</p> }
              }
          }
          <div class="task-meta">
              <div class="task-tags">
                  {
                      for card.tags.iter().map(|tag| html! {
                          <span class="task-tag">
                              <i class="fas fa-tag"></i>
                              { format!(" {tag}") }
                          </span>
                      })
                  }
              </div>
              {
                  if card.overdue {
                      html! {
                          <span class="overdue-badge">
                              <i class="fas fa-exclamation-circle"></i>
                              { format!(" {}", labels.overdue) }
                          </span>
                      }
                  } else {
                      html! {}
                  }
              }
          </div>
          <div class="task-dates">
              {
                  for card.dates.iter().map(|line| html! {
                      <div>
                          <i class={classes!("fas", line.kind.icon())}></i>
                          { format!(" {}: {}", line.label, line.text) }
                      </div>
                  })
              }
          </div>
          <div class="task-actions">{ actions }</div>
      </div>
  }
}
