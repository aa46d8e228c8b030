use web_sys::{
  HtmlInputElement,
  InputEvent,
  KeyboardEvent,
  MouseEvent,
  SubmitEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TextPromptProps {
  pub heading:   String,
  pub label:     String,
  pub value:     String,
  pub on_input:  Callback<String>,
  pub on_cancel: Callback<()>,
  pub on_submit: Callback<()>
}

/// Single-line text dialog. Enter
/// confirms, Escape or the backdrop
/// cancels.
#[function_component(TextPrompt)]
pub fn text_prompt(
  props: &TextPromptProps
) -> Html {
  let on_input = {
    let on_input =
      props.on_input.clone();
    Callback::from(
      move |e: InputEvent| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        on_input.emit(input.value());
      }
    )
  };
  let on_submit = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: SubmitEvent| {
        e.prevent_default();
        on_submit.emit(());
      }
    )
  };
  let on_keydown = {
    let on_cancel =
      props.on_cancel.clone();
    Callback::from(
      move |e: KeyboardEvent| {
        if e.key() == "Escape" {
          on_cancel.emit(());
        }
      }
    )
  };
  let on_backdrop = {
    let on_cancel =
      props.on_cancel.clone();
    Callback::from(
      move |_: MouseEvent| {
        on_cancel.emit(())
      }
    )
  };
  let on_cancel_click = {
    let on_cancel =
      props.on_cancel.clone();
    Callback::from(
      move |_: MouseEvent| {
        on_cancel.emit(())
      }
    )
  };

  html! {
      <div class="modal-backdrop" onclick={on_backdrop}>
          <form
              class="modal"
              onsubmit={on_submit}
              onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
          >
              <div class="header">{ &props.heading }</div>
              <div class="field">
                  <label>{ &props.label }</label>
                  <input
                      value={props.value.clone()}
                      oninput={on_input}
                      onkeydown={on_keydown}
                      autofocus=true
                  />
              </div>
              <div class="footer">
                  <button type="button" class="btn" onclick={on_cancel_click}>{ "Cancel" }</button>
                  <button type="submit" class="btn">{ "OK" }</button>
              </div>
          </form>
      </div>
  }
}
