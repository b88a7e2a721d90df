use tasklane_core::Labels;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ConfirmModalProps {
  pub message:    &'static str,
  pub labels:     &'static Labels,
  pub on_confirm: Callback<()>,
  pub on_cancel:  Callback<()>
}

/// Clicking outside the dialog counts as
/// cancel.
#[function_component(ConfirmModal)]
pub fn confirm_modal(
  props: &ConfirmModalProps
) -> Html {
  let on_backdrop = {
    let on_cancel =
      props.on_cancel.clone();
    Callback::from(move |_: MouseEvent| {
      on_cancel.emit(())
    })
  };
  let on_yes = {
    let on_confirm =
      props.on_confirm.clone();
    Callback::from(move |_: MouseEvent| {
      on_confirm.emit(())
    })
  };
  let on_no = on_backdrop.clone();

  html! {
      <div class="modal confirm-modal active" onclick={on_backdrop}>
          <div class="modal-content" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
              <p class="confirm-message">{ props.message }</p>
              <div class="modal-actions">
                  <button class="confirm-yes" onclick={on_yes}>{ props.labels.confirm_yes }</button>
                  <button class="confirm-no" onclick={on_no}>{ props.labels.confirm_no }</button>
              </div>
          </div>
      </div>
  }
}
