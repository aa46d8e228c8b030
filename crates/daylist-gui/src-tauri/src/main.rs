mod commands;
mod state;

use std::path::PathBuf;

use daylist_core::config::Config;
use tracing::{
  error,
  info,
  warn
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{
  EnvFilter,
  fmt
};

const LOG_FILE_PREFIX: &str =
  "daylist.log";

fn init_tracing() -> Option<WorkerGuard>
{
  let filter =
    EnvFilter::try_from_default_env()
      .or_else(|_| {
        EnvFilter::try_new(
          "info,daylist_gui_tauri=debug,\
           daylist_core=debug"
        )
      })
      .unwrap_or_else(|_| {
        EnvFilter::new("info")
      });

  let (file_layer, guard) =
    match log_dir() {
      | Some(dir) => {
        let appender =
          tracing_appender::rolling::daily(
            dir,
            LOG_FILE_PREFIX
          );
        let (writer, guard) =
          tracing_appender::non_blocking(
            appender
          );
        (
          Some(
            fmt::layer()
              .with_ansi(false)
              .with_target(true)
              .with_writer(writer)
          ),
          Some(guard)
        )
      }
      | None => (None, None)
    };

  let _ =
    tracing_subscriber::registry()
      .with(filter)
      .with(
        fmt::layer()
          .with_target(true)
          .with_line_number(true)
      )
      .with(file_layer)
      .try_init();

  guard
}

fn log_dir() -> Option<PathBuf> {
  let dir = dirs::data_local_dir()?
    .join("daylist")
    .join("logs");
  std::fs::create_dir_all(&dir)
    .ok()?;
  Some(dir)
}

fn main() {
  let _log_guard = init_tracing();

  info!("starting Daylist");

  let state = match Config::load() {
    | Ok(config) => {
      state::AppState::new(config)
    }
    | Err(err) => {
      state::AppState::failed(
        Config::default(),
        err
      )
    }
  };

  let result = tauri::Builder::default()
    .setup(|app| {
      install_signal_handlers(
        app.handle().clone()
      );
      Ok(())
    })
    .manage(state)
    .invoke_handler(
      tauri::generate_handler![
        commands::agenda::agenda_snapshot,
        commands::agenda::date_select,
        commands::agenda::calendar_toggle,
        commands::tasks::task_add,
        commands::tasks::task_edit,
        commands::tasks::task_set_completed,
        commands::tasks::task_delete,
        commands::common::ui_log,
      ]
    )
    .run(tauri::generate_context!());

  if let Err(err) = result {
    error!(error = %err, "Daylist exited with an error");
    std::process::exit(1);
  }
  info!("window closed; exiting");
}

fn install_signal_handlers(
  app_handle: tauri::AppHandle
) {
  tauri::async_runtime::spawn(
    async move {
      wait_for_shutdown_signal().await;
      warn!(
        "received shutdown signal; \
         exiting application"
      );
      app_handle.exit(0);
    }
  );
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() {
  use tokio::signal::unix::{
    SignalKind,
    signal
  };

  let mut sigint = match signal(
    SignalKind::interrupt()
  ) {
    | Ok(stream) => stream,
    | Err(error) => {
      error!(
        %error,
        "failed to register SIGINT \
         handler; falling back to \
         ctrl_c"
      );
      let _ =
        tokio::signal::ctrl_c().await;
      return;
    }
  };

  let mut sigterm = match signal(
    SignalKind::terminate()
  ) {
    | Ok(stream) => stream,
    | Err(error) => {
      error!(
        %error,
        "failed to register SIGTERM \
         handler; falling back to \
         ctrl_c"
      );
      let _ =
        tokio::signal::ctrl_c().await;
      return;
    }
  };

  tokio::select! {
    _ = sigint.recv() => {}
    _ = sigterm.recv() => {}
  }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() {
  if let Err(error) =
    tokio::signal::ctrl_c().await
  {
    error!(
      %error,
      "failed waiting for ctrl_c \
       signal"
    );
  }
}
