use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct StartupErrorProps {
  pub message: String
}

#[function_component(StartupError)]
pub fn startup_error(
  props: &StartupErrorProps
) -> Html {
  html! {
      <div class="startup-error">
          <h2>{ "Your tasks could not be opened" }</h2>
          <p>{ &props.message }</p>
          <p>
              { "The task file was left untouched. Fix or move it, then restart Daylist." }
          </p>
      </div>
  }
}
