use daylist_gui_shared::{
  AgendaDto,
  DateArg
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
#[instrument(skip(state), fields(request_id = ?request_id))]
pub async fn agenda_snapshot(
  state: State<'_, AppState>,
  request_id: Option<String>
) -> Result<AgendaDto, String> {
  info!(request_id = ?request_id, "agenda_snapshot command invoked");
  let result = state.snapshot();
  if let Err(err) = result.as_ref() {
    error!(request_id = ?request_id, error = %err, "agenda_snapshot command failed");
  }
  result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id, date = %args.date))]
pub async fn date_select(
  state: State<'_, AppState>,
  args: DateArg,
  request_id: Option<String>
) -> Result<AgendaDto, String> {
  info!(request_id = ?request_id, date = %args.date, "date_select command invoked");
  let result = state.select_date(&args.date);
  if let Err(err) = result.as_ref() {
    error!(request_id = ?request_id, error = %err, "date_select command failed");
  }
  result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id))]
pub async fn calendar_toggle(
  state: State<'_, AppState>,
  request_id: Option<String>
) -> Result<AgendaDto, String> {
  info!(request_id = ?request_id, "calendar_toggle command invoked");
  let result = state.toggle_calendar();
  if let Err(err) = result.as_ref() {
    error!(request_id = ?request_id, error = %err, "calendar_toggle command failed");
  }
  result.map_err(err_to_string)
}
