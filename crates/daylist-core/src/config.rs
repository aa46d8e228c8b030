use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use chrono::Weekday;
use chrono_tz::Tz;
use tracing::{
  debug,
  info,
  trace,
  warn
};

pub const CONFIG_DIR_NAME: &str =
  "daylist";
pub const CONFIG_FILE_NAME: &str =
  "daylistrc";

/// Settings read from `daylistrc`.
///
/// The file is a list of `key = value`
/// lines; `#` starts a comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  pub data_location:    Option<PathBuf>,
  pub week_start:       Weekday,
  pub calendar_visible: bool,
  pub timezone:         Option<Tz>,
  pub loaded_files:     Vec<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    Self {
      data_location:    None,
      week_start:       Weekday::Mon,
      calendar_visible: true,
      timezone:         None,
      loaded_files:     vec![]
    }
  }
}

impl Config {
  /// Loads the user config file if
  /// one exists, otherwise defaults.
  #[tracing::instrument]
  pub fn load() -> anyhow::Result<Self>
  {
    match default_config_path() {
      | Some(path) if path.exists() => {
        info!(config = %path.display(), "loading config");
        Self::load_from(&path)
      }
      | _ => {
        info!(
          "no config file found; using \
           defaults"
        );
        Ok(Self::default())
      }
    }
  }

  #[tracing::instrument]
  pub fn load_from(
    path: &Path
  ) -> anyhow::Result<Self> {
    let text =
      fs::read_to_string(path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;

    let mut cfg = Self::parse(&text)
      .with_context(|| {
        format!(
          "invalid config file {}",
          path.display()
        )
      })?;
    cfg
      .loaded_files
      .push(path.to_path_buf());
    Ok(cfg)
  }

  pub fn parse(
    text: &str
  ) -> anyhow::Result<Self> {
    let mut cfg = Self::default();

    for (line_num, raw_line) in
      text.lines().enumerate()
    {
      let mut line = raw_line.trim();
      if let Some((before, _)) =
        line.split_once('#')
      {
        line = before.trim();
      }
      if line.is_empty() {
        continue;
      }

      let (k, v) = line
        .split_once('=')
        .ok_or_else(|| {
          anyhow!(
            "line {}: expected \
             key = value, got {:?}",
            line_num + 1,
            raw_line
          )
        })?;

      let key = k.trim();
      let value = v.trim();
      trace!(key, value, "loaded config key");
      cfg.apply(key, value).with_context(
        || {
          format!(
            "line {}",
            line_num + 1
          )
        }
      )?;
    }

    Ok(cfg)
  }

  fn apply(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    match key {
      | "data.location" => {
        self.data_location =
          if value.is_empty() {
            None
          } else {
            Some(expand_tilde(
              Path::new(value)
            ))
          };
      }
      | "calendar.week_start" => {
        self.week_start =
          parse_week_start(value)?;
      }
      | "calendar.visible" => {
        self.calendar_visible =
          parse_bool(value)?;
      }
      | "timezone" => {
        self.timezone = if value
          .is_empty()
        {
          None
        } else {
          Some(
            value
              .parse::<Tz>()
              .map_err(|err| {
                anyhow!(
                  "unknown timezone \
                   {value:?}: {err}"
                )
              })?
          )
        };
      }
      | other => {
        warn!(
          key = other,
          "ignoring unknown config key"
        );
      }
    }
    Ok(())
  }
}

/// Directory holding `tasks.json`.
///
/// Falls back to the working directory
/// when `data.location` is unset.
#[tracing::instrument(skip(cfg))]
pub fn resolve_data_dir(
  cfg: &Config
) -> anyhow::Result<PathBuf> {
  let dir = match cfg
    .data_location
    .as_ref()
  {
    | Some(path) => path.clone(),
    | None => {
      std::env::current_dir().context(
        "cannot determine working \
         directory"
      )?
    }
  };

  if !dir.exists() {
    info!(dir = %dir.display(), "creating data directory");
    fs::create_dir_all(&dir)
      .with_context(|| {
        format!(
          "failed to create {}",
          dir.display()
        )
      })?;
  }

  debug!(dir = %dir.display(), "resolved data directory");
  Ok(dir)
}

pub fn default_config_path()
-> Option<PathBuf> {
  dirs::config_dir().map(|dir| {
    dir
      .join(CONFIG_DIR_NAME)
      .join(CONFIG_FILE_NAME)
  })
}

fn parse_week_start(
  value: &str
) -> anyhow::Result<Weekday> {
  match value
    .trim()
    .to_ascii_lowercase()
    .as_str()
  {
    | "monday" | "mon" => {
      Ok(Weekday::Mon)
    }
    | "sunday" | "sun" => {
      Ok(Weekday::Sun)
    }
    | other => {
      Err(anyhow!(
        "calendar.week_start must be \
         monday or sunday, got \
         {other:?}"
      ))
    }
  }
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

fn parse_bool(
  s: &str
) -> anyhow::Result<bool> {
  match s
    .trim()
    .to_ascii_lowercase()
    .as_str()
  {
    | "1" | "y" | "yes" | "on"
    | "true" => Ok(true),
    | "0" | "n" | "no" | "off"
    | "false" => Ok(false),
    | other => {
      Err(anyhow!(
        "expected on/off, got {other:?}"
      ))
    }
  }
}
