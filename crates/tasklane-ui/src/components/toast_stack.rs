use tasklane_core::{
  Toast,
  ToastKind
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
  pub toasts:     Vec<Toast>,
  pub on_dismiss: Callback<u64>
}

#[function_component(ToastStack)]
pub fn toast_stack(
  props: &ToastStackProps
) -> Html {
  html! {
      <div class="toast-stack">
          {
              for props.toasts.iter().map(|toast| {
                  let (kind, icon) = match toast.kind {
                      | ToastKind::Success => ("success", "fa-check-circle"),
                      | ToastKind::Error => ("error", "fa-exclamation-circle")
                  };
                  let on_dismiss = props.on_dismiss.clone();
                  let id = toast.id;
                  html! {
                      <div
                          key={id.to_string()}
                          class={classes!("toast", kind)}
                          onclick={move |_| on_dismiss.emit(id)}
                      >
                          <i class={classes!("fas", icon)}></i>
                          <span>{ &toast.message }</span>
                      </div>
                  }
              })
          }
      </div>
  }
}
