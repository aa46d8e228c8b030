use daylist_gui_shared::TaskDto;
use uuid::Uuid;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::task_list_row::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub heading:      String,
  pub tasks:        Vec<TaskDto>,
  pub notice:       Option<String>,
  pub on_completed: Callback<(Uuid, bool)>,
  pub on_edit:      Callback<Uuid>,
  pub on_delete:    Callback<Uuid>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  html! {
      <div class="panel list">
          <div class="header">{ &props.heading }</div>
          {
              if let Some(notice) = props.notice.as_ref() {
                  html! { <div class="notice">{ notice }</div> }
              } else {
                  html! {}
              }
          }
          {
              if props.tasks.is_empty() {
                  html! { <div class="empty">{ "No tasks for this day." }</div> }
              } else {
                  html! {
                      <>
                      { for props.tasks.iter().cloned().map(|task| { let key = task.id.to_string(); html! {
                          <TaskListRow
                              key={key}
                              task={task}
                              on_completed={props.on_completed.clone()}
                              on_edit={props.on_edit.clone()}
                              on_delete={props.on_delete.clone()}
                          />
                      } }) }
                      </>
                  }
              }
          }
      </div>
  }
}
