use daylist_gui_shared::ipc::InvokeRequest;
use serde::{Serialize, de::DeserializeOwned};
use tauri_wasm::{args, invoke};

/// Calls a backend command. `args` becomes the command's `args` parameter;
/// every call also carries a fresh request id for log correlation.
pub async fn invoke_tauri<R, A>(cmd: &str, args_payload: Option<&A>) -> Result<R, String>
where
    R: DeserializeOwned,
    A: Serialize,
{
    let request = InvokeRequest::new(args_payload);
    let payload = args(&request).map_err(|e| format!("failed to encode args: {e}"))?;
    let value = invoke(cmd)
        .with_args(payload)
        .await
        .map_err(|e| format!("invoke error: {e:?}"))?;

    serde_wasm_bindgen::from_value(value).map_err(|e| format!("decode error: {e}"))
}
