use daylist_gui_shared::TaskDto;
use uuid::Uuid;
use web_sys::{
  Event,
  HtmlInputElement,
  MouseEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub task:         TaskDto,
  pub on_completed: Callback<(Uuid, bool)>,
  pub on_edit:      Callback<Uuid>,
  pub on_delete:    Callback<Uuid>
}

/// One task: checkbox, title, edit and
/// delete. Handlers are bound to the
/// task id when the row is built.
#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let id = props.task.id;
  let stored = props.task.completed;

  // The box only shows what the backend
  // stored; the next snapshot redraws it.
  let on_change = {
    let on_completed =
      props.on_completed.clone();
    Callback::from(move |e: Event| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      let wanted = input.checked();
      input.set_checked(stored);
      on_completed.emit((id, wanted));
    })
  };
  let on_edit = {
    let on_edit = props.on_edit.clone();
    Callback::from(
      move |_: MouseEvent| {
        on_edit.emit(id)
      }
    )
  };
  let on_delete = {
    let on_delete =
      props.on_delete.clone();
    Callback::from(
      move |_: MouseEvent| {
        on_delete.emit(id)
      }
    )
  };

  html! {
      <div class={classes!("row", props.task.completed.then_some("done"))}>
          <input
              type="checkbox"
              checked={props.task.completed}
              onchange={on_change}
          />
          <span class="title">{ &props.task.title }</span>
          <button class="btn" onclick={on_edit}>{ "Edit" }</button>
          <button class="btn" onclick={on_delete}>{ "Delete" }</button>
      </div>
  }
}
