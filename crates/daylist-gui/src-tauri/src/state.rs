use anyhow::anyhow;
use chrono::Weekday;
use daylist_core::config::Config;
use daylist_core::datetime::{format_date, parse_date, today};
use daylist_core::{Agenda, AgendaView, Change, Task, TaskId};
use daylist_gui_shared::{AgendaDto, TaskDto};
use parking_lot::Mutex;
use tracing::{error, info, instrument};
use uuid::Uuid;

const EMPTY_TITLE_NOTICE: &str = "Task name cannot be empty.";
const NOT_FOUND_NOTICE: &str = "That task no longer exists.";

pub struct AppState {
    config: Config,
    agenda: Result<Mutex<Agenda>, String>,
}

impl AppState {
    /// Opens the agenda. A failure is kept and reported to the window
    /// instead of aborting the process, and the task file is left as is.
    pub fn new(config: Config) -> Self {
        let agenda = match Agenda::open(&config) {
            Ok(agenda) => Ok(Mutex::new(agenda)),
            Err(err) => {
                error!(error = %format!("{err:#}"), "failed to load tasks");
                Err(format!("Could not load your tasks: {err:#}"))
            }
        };
        Self { config, agenda }
    }

    pub fn failed(config: Config, err: anyhow::Error) -> Self {
        error!(error = %format!("{err:#}"), "startup failed");
        Self {
            config,
            agenda: Err(format!("Daylist could not start: {err:#}")),
        }
    }

    #[instrument(skip(self))]
    pub fn snapshot(&self) -> anyhow::Result<AgendaDto> {
        self.with_agenda(|_| Ok(Change::Applied))
    }

    #[instrument(skip(self))]
    pub fn select_date(&self, raw: &str) -> anyhow::Result<AgendaDto> {
        let date = parse_date(raw)?;
        self.with_agenda(|agenda| {
            agenda.select_date(date);
            Ok(Change::Applied)
        })
    }

    #[instrument(skip(self, title))]
    pub fn add(&self, title: &str) -> anyhow::Result<AgendaDto> {
        self.with_agenda(|agenda| Ok(agenda.add_task(title)?))
    }

    #[instrument(skip(self, title))]
    pub fn edit(&self, id: Uuid, title: &str) -> anyhow::Result<AgendaDto> {
        self.with_agenda(|agenda| Ok(agenda.edit_task(TaskId::from_uuid(id), title)?))
    }

    #[instrument(skip(self))]
    pub fn set_completed(&self, id: Uuid, completed: bool) -> anyhow::Result<AgendaDto> {
        self.with_agenda(|agenda| Ok(agenda.set_completed(TaskId::from_uuid(id), completed)?))
    }

    #[instrument(skip(self))]
    pub fn delete(&self, id: Uuid) -> anyhow::Result<AgendaDto> {
        self.with_agenda(|agenda| Ok(agenda.delete_task(TaskId::from_uuid(id))?))
    }

    #[instrument(skip(self))]
    pub fn toggle_calendar(&self) -> anyhow::Result<AgendaDto> {
        self.with_agenda(|agenda| {
            let visible = agenda.toggle_calendar();
            info!(visible, "calendar visibility changed");
            Ok(Change::Applied)
        })
    }

    fn with_agenda<F>(&self, action: F) -> anyhow::Result<AgendaDto>
    where
        F: FnOnce(&mut Agenda) -> anyhow::Result<Change>,
    {
        let agenda = self.agenda.as_ref().map_err(|message| anyhow!("{message}"))?;
        let mut agenda = agenda.lock();
        let change = action(&mut *agenda)?;
        Ok(view_to_dto(agenda.view(), change, &self.config))
    }
}

fn notice_for(change: Change) -> Option<String> {
    match change {
        Change::Applied => None,
        Change::EmptyTitle => Some(EMPTY_TITLE_NOTICE.to_string()),
        Change::NotFound => Some(NOT_FOUND_NOTICE.to_string()),
    }
}

fn week_start_key(week_start: Weekday) -> &'static str {
    match week_start {
        Weekday::Sun => "sunday",
        _ => "monday",
    }
}

fn task_to_dto(task: Task) -> TaskDto {
    TaskDto {
        id: task.id.as_uuid(),
        title: task.title,
        date: format_date(task.date),
        completed: task.completed,
    }
}

fn view_to_dto(view: AgendaView, change: Change, config: &Config) -> AgendaDto {
    AgendaDto {
        selected_date: format_date(view.selected_date),
        tasks: view.tasks.into_iter().map(task_to_dto).collect(),
        highlighted_dates: view.highlighted.into_iter().map(format_date).collect(),
        calendar_visible: view.calendar_visible,
        today: format_date(today(config.timezone)),
        week_start: week_start_key(config.week_start).to_string(),
        notice: notice_for(change),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::{TempDir, tempdir};

    use super::*;

    fn state_in(temp: &TempDir) -> AppState {
        AppState::new(Config {
            data_location: Some(temp.path().to_path_buf()),
            ..Config::default()
        })
    }

    #[test]
    fn mutations_return_fresh_snapshots() {
        let temp = tempdir().expect("tempdir");
        let state = state_in(&temp);

        let snap = state.select_date("2024-06-01").expect("select");
        assert!(snap.tasks.is_empty());
        assert_eq!(snap.selected_date, "2024-06-01");

        let snap = state.add("Buy milk").expect("add");
        assert_eq!(snap.tasks.len(), 1);
        assert_eq!(snap.highlighted_dates, vec!["2024-06-01".to_string()]);
        assert_eq!(snap.notice, None);

        let id = snap.tasks[0].id;
        let snap = state.set_completed(id, true).expect("complete");
        assert!(snap.tasks[0].completed);

        let snap = state.edit(id, "Buy oat milk").expect("edit");
        assert_eq!(snap.tasks[0].title, "Buy oat milk");

        let snap = state.delete(id).expect("delete");
        assert!(snap.tasks.is_empty());
        assert!(snap.highlighted_dates.is_empty());
    }

    #[test]
    fn skipped_actions_carry_a_notice() {
        let temp = tempdir().expect("tempdir");
        let state = state_in(&temp);

        let snap = state.add("   ").expect("add");
        assert_eq!(snap.notice.as_deref(), Some(EMPTY_TITLE_NOTICE));

        let snap = state.delete(Uuid::new_v4()).expect("delete");
        assert_eq!(snap.notice.as_deref(), Some(NOT_FOUND_NOTICE));
    }

    #[test]
    fn bad_dates_are_rejected() {
        let temp = tempdir().expect("tempdir");
        let state = state_in(&temp);
        assert!(state.select_date("June 1st").is_err());
    }

    #[test]
    fn corrupt_file_fails_every_command_and_is_kept() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("tasks.json");
        fs::write(&path, "{ broken").expect("write");

        let state = state_in(&temp);
        let err = state.snapshot().expect_err("startup failure");
        assert!(err.to_string().contains("Could not load your tasks"));
        assert!(state.add("anything").is_err());
        assert_eq!(fs::read_to_string(&path).expect("read"), "{ broken");
    }

    #[test]
    fn failed_completion_reports_the_stored_flag() {
        let temp = tempdir().expect("tempdir");
        let state = state_in(&temp);
        let id = state.add("Water plants").expect("add").tasks[0].id;

        fs::remove_dir_all(temp.path()).expect("remove data dir");

        assert!(state.set_completed(id, true).is_err());
        let snap = state.snapshot().expect("snapshot");
        assert!(!snap.tasks[0].completed);
    }

    #[test]
    fn calendar_toggle_round_trips() {
        let temp = tempdir().expect("tempdir");
        let state = state_in(&temp);

        assert!(state.snapshot().expect("snapshot").calendar_visible);
        assert!(!state.toggle_calendar().expect("toggle").calendar_visible);
        assert!(state.toggle_calendar().expect("toggle").calendar_visible);
    }
}
