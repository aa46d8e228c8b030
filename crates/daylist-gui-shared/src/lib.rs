pub mod calendar;
pub mod ipc;

use serde::{
  Deserialize,
  Serialize
};
use uuid::Uuid;

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskDto {
  pub id:        Uuid,
  pub title:     String,
  pub date:      String,
  #[serde(default)]
  pub completed: bool
}

/// Full window state returned by every
/// backend command.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct AgendaDto {
  pub selected_date:     String,
  pub tasks:             Vec<TaskDto>,
  #[serde(default)]
  pub highlighted_dates: Vec<String>,
  pub calendar_visible:  bool,
  #[serde(default)]
  pub today:             String,
  #[serde(
    default = "default_week_start"
  )]
  pub week_start:        String,
  #[serde(default)]
  pub notice:            Option<String>
}

fn default_week_start() -> String {
  "monday".to_string()
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct DateArg {
  pub date: String
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct TaskCreate {
  pub title: String
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct TaskEditArgs {
  pub id:    Uuid,
  pub title: String
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct TaskIdArg {
  pub id: Uuid
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct TaskCompletedArgs {
  pub id:        Uuid,
  pub completed: bool
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct UiLogArg {
  pub event:  String,
  pub detail: String
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn agenda_dto_tolerates_missing_optional_fields()
  {
    let raw = r#"{
      "selected_date": "2024-06-01",
      "tasks": [
        {
          "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
          "title": "Buy milk",
          "date": "2024-06-01"
        }
      ],
      "calendar_visible": true
    }"#;

    let dto: AgendaDto =
      serde_json::from_str(raw)
        .expect("agenda parses");
    assert_eq!(dto.tasks.len(), 1);
    assert!(!dto.tasks[0].completed);
    assert!(
      dto.highlighted_dates.is_empty()
    );
    assert_eq!(dto.notice, None);
    assert_eq!(dto.week_start, "monday");
  }

  #[test]
  fn completed_args_use_snake_case_keys()
  {
    let value = serde_json::to_value(
      TaskCompletedArgs {
        id:        Uuid::nil(),
        completed: true
      }
    )
    .expect("serialize");
    assert_eq!(
      value["completed"],
      serde_json::Value::Bool(true)
    );
    assert!(value["id"].is_string());
  }
}
