use daylist_gui_shared::{
  AgendaDto,
  TaskCompletedArgs,
  TaskCreate,
  TaskEditArgs,
  TaskIdArg
};
use tauri::State;
use tracing::{
  error,
  info,
  instrument
};

use super::common::err_to_string;
use crate::state::AppState;

#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id, title_len = args.title.len()))]
pub async fn task_add(
  state: State<'_, AppState>,
  args: TaskCreate,
  request_id: Option<String>
) -> Result<AgendaDto, String> {
  info!(
    request_id = ?request_id,
    title_len = args.title.len(),
    "task_add command invoked"
  );
  let result = state.add(&args.title);
  if let Err(err) = result.as_ref() {
    error!(request_id = ?request_id, error = %err, "task_add command failed");
  }
  result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id, id = %args.id))]
pub async fn task_edit(
  state: State<'_, AppState>,
  args: TaskEditArgs,
  request_id: Option<String>
) -> Result<AgendaDto, String> {
  info!(request_id = ?request_id, id = %args.id, "task_edit command invoked");
  let result =
    state.edit(args.id, &args.title);
  if let Err(err) = result.as_ref() {
    error!(request_id = ?request_id, error = %err, "task_edit command failed");
  }
  result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id, id = %args.id, completed = args.completed))]
pub async fn task_set_completed(
  state: State<'_, AppState>,
  args: TaskCompletedArgs,
  request_id: Option<String>
) -> Result<AgendaDto, String> {
  info!(
    request_id = ?request_id,
    id = %args.id,
    completed = args.completed,
    "task_set_completed command invoked"
  );
  let result = state
    .set_completed(args.id, args.completed);
  if let Err(err) = result.as_ref() {
    error!(request_id = ?request_id, error = %err, "task_set_completed command failed");
  }
  result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id, id = %args.id))]
pub async fn task_delete(
  state: State<'_, AppState>,
  args: TaskIdArg,
  request_id: Option<String>
) -> Result<AgendaDto, String> {
  info!(request_id = ?request_id, id = %args.id, "task_delete command invoked");
  let result = state.delete(args.id);
  if let Err(err) = result.as_ref() {
    error!(request_id = ?request_id, error = %err, "task_delete command failed");
  }
  result.map_err(err_to_string)
}
