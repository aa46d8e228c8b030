use daylist_gui_shared::UiLogArg;
use tracing::{
  info,
  instrument
};

pub(super) fn err_to_string(
  err: anyhow::Error
) -> String {
  format!("{err:#}")
}

#[tauri::command]
#[instrument(fields(request_id = ?request_id, event = %args.event))]
pub async fn ui_log(
  args: UiLogArg,
  request_id: Option<String>
) -> Result<(), String> {
  info!(request_id = ?request_id, event = %args.event, detail = %args.detail, "ui interaction");
  Ok(())
}
