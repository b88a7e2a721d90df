use tasklane_core::{
  EditorState,
  FormField,
  Labels
};
use tasklane_shared::TaskPriority;
use web_sys::{
  Event,
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement,
  InputEvent,
  SubmitEvent
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskModalProps {
  pub editor:    EditorState,
  pub labels:    &'static Labels,
  pub on_field:  Callback<FormField>,
  pub on_submit: Callback<()>,
  pub on_reset:  Callback<()>,
  pub on_close:  Callback<()>
}

#[function_component(TaskModal)]
pub fn task_modal(
  props: &TaskModalProps
) -> Html {
  let labels = props.labels;
  let editor = &props.editor;
  let form = &editor.form;
  let busy = editor.loading || editor.saving;

  let text_input =
    |wrap: fn(String) -> FormField| {
      let on_field =
        props.on_field.clone();
      Callback::from(
        move |e: InputEvent| {
          let input: HtmlInputElement =
            e.target_unchecked_into();
          on_field.emit(wrap(input.value()));
        }
      )
    };

  let on_description = {
    let on_field = props.on_field.clone();
    Callback::from(move |e: InputEvent| {
      let area: HtmlTextAreaElement =
        e.target_unchecked_into();
      on_field.emit(
        FormField::Description(area.value())
      );
    })
  };

  let on_priority = {
    let on_field = props.on_field.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      let value = select.value();
      match TaskPriority::parse(&value) {
        | Some(priority) => on_field.emit(
          FormField::Priority(priority)
        ),
        | None => {
          tracing::warn!(value = %value, "unknown priority option")
        }
      }
    })
  };

  let onsubmit = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      on_submit.emit(());
    })
  };

  let on_reset = {
    let on_reset = props.on_reset.clone();
    Callback::from(move |_: MouseEvent| {
      on_reset.emit(())
    })
  };

  let on_close = {
    let on_close = props.on_close.clone();
    Callback::from(move |_: MouseEvent| {
      on_close.emit(())
    })
  };

  html! {
      <div class="modal active" onclick={on_close.clone()}>
          <div class="modal-content" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
              <div class="modal-header">
                  <h2 id="modal-title">{ editor.title(labels) }</h2>
                  <button class="close-modal" title={labels.close} onclick={on_close}>
                      <i class="fas fa-times"></i>
                  </button>
              </div>
              {
                  if editor.loading {
                      html! { <div class="loading">{ labels.loading }</div> }
                  } else {
                      html! {}
                  }
              }
              <form id="task-form" {onsubmit}>
                  <div class="form-group">
                      <label for="title">{ labels.field_title }</label>
                      <input
                          id="title"
                          type="text"
                          required=true
                          disabled={editor.loading}
                          value={form.title.clone()}
                          oninput={text_input(FormField::Title)}
                      />
                  </div>
                  <div class="form-group">
                      <label for="description">{ labels.field_description }</label>
                      <textarea
                          id="description"
                          disabled={editor.loading}
                          value={form.description.clone()}
                          oninput={on_description}
                      />
                  </div>
                  <div class="form-group">
                      <label for="due_date">{ labels.field_due_date }</label>
                      <input
                          id="due_date"
                          type="datetime-local"
                          required=true
                          disabled={editor.loading}
                          value={form.due_date.clone()}
                          oninput={text_input(FormField::DueDate)}
                      />
                  </div>
                  <div class="form-group">
                      <label for="priority">{ labels.field_priority }</label>
                      <select id="priority" disabled={editor.loading} onchange={on_priority}>
                          {
                              for TaskPriority::ALL.into_iter().map(|priority| html! {
                                  <option
                                      value={priority.as_key()}
                                      selected={priority == form.priority}
                                  >
                                      { labels.priority(priority) }
                                  </option>
                              })
                          }
                      </select>
                  </div>
                  <div class="form-group">
                      <label for="tags">{ labels.field_tags }</label>
                      <input
                          id="tags"
                          type="text"
                          disabled={editor.loading}
                          value={form.tags.clone()}
                          oninput={text_input(FormField::Tags)}
                      />
                  </div>
                  <div class="form-actions">
                      <button type="submit" class="save-btn" disabled={busy}>
                          { labels.save }
                      </button>
                      <button type="button" class="reset-btn" disabled={busy} onclick={on_reset}>
                          { labels.reset }
                      </button>
                  </div>
              </form>
          </div>
      </div>
  }
}
