use std::collections::BTreeSet;

use anyhow::Context;
use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

use crate::config::{self, Config};
use crate::datetime;
use crate::repository::TaskRepository;
use crate::store::{StoreError, TaskStore};
use crate::task::{Task, TaskId, clean_title};

/// Outcome of a user action that may be skipped without being an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Applied,
    EmptyTitle,
    NotFound,
}

impl Change {
    pub fn applied(self) -> bool {
        self == Self::Applied
    }

    fn from_found(found: bool) -> Self {
        if found { Self::Applied } else { Self::NotFound }
    }
}

/// Everything the window needs to draw itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaView {
    pub selected_date: NaiveDate,
    pub tasks: Vec<Task>,
    pub highlighted: BTreeSet<NaiveDate>,
    pub calendar_visible: bool,
}

/// Application state behind the window: the task repository, the day the
/// calendar points at, and whether the calendar is expanded.
#[derive(Debug)]
pub struct Agenda {
    repo: TaskRepository,
    selected_date: NaiveDate,
    calendar_visible: bool,
}

impl Agenda {
    pub fn new(repo: TaskRepository, selected_date: NaiveDate, calendar_visible: bool) -> Self {
        Self {
            repo,
            selected_date,
            calendar_visible,
        }
    }

    /// Opens the task file named by `cfg` and selects today.
    #[instrument(skip(cfg))]
    pub fn open(cfg: &Config) -> anyhow::Result<Self> {
        let data_dir = config::resolve_data_dir(cfg).context("failed to resolve data directory")?;
        let store = TaskStore::open(&data_dir)
            .with_context(|| format!("failed to open task store at {}", data_dir.display()))?;
        let repo = TaskRepository::open(store)?;
        let today = datetime::today(cfg.timezone);

        info!(today = %today, tasks = repo.len(), "agenda opened");
        Ok(Self::new(repo, today, cfg.calendar_visible))
    }

    pub fn repository(&self) -> &TaskRepository {
        &self.repo
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn calendar_visible(&self) -> bool {
        self.calendar_visible
    }

    #[instrument(skip(self))]
    pub fn select_date(&mut self, date: NaiveDate) {
        debug!(from = %self.selected_date, to = %date, "date selected");
        self.selected_date = date;
    }

    /// Adds a task on the selected date.
    #[instrument(skip(self, title), fields(date = %self.selected_date))]
    pub fn add_task(&mut self, title: &str) -> Result<Change, StoreError> {
        match self.repo.add(title, self.selected_date)? {
            Some(_) => Ok(Change::Applied),
            None => {
                info!("add skipped: empty title");
                Ok(Change::EmptyTitle)
            }
        }
    }

    #[instrument(skip(self, title))]
    pub fn edit_task(&mut self, id: TaskId, title: &str) -> Result<Change, StoreError> {
        if clean_title(title).is_none() {
            info!("edit skipped: empty title");
            return Ok(Change::EmptyTitle);
        }
        let change = Change::from_found(self.repo.edit(id, title)?);
        log_not_found(change, id);
        Ok(change)
    }

    #[instrument(skip(self))]
    pub fn delete_task(&mut self, id: TaskId) -> Result<Change, StoreError> {
        let change = Change::from_found(self.repo.delete(id)?);
        log_not_found(change, id);
        Ok(change)
    }

    #[instrument(skip(self))]
    pub fn set_completed(&mut self, id: TaskId, completed: bool) -> Result<Change, StoreError> {
        let change = Change::from_found(self.repo.set_completed(id, completed)?);
        log_not_found(change, id);
        Ok(change)
    }

    /// Flips calendar visibility and returns the new state.
    pub fn toggle_calendar(&mut self) -> bool {
        self.calendar_visible = !self.calendar_visible;
        debug!(visible = self.calendar_visible, "calendar toggled");
        self.calendar_visible
    }

    pub fn view(&self) -> AgendaView {
        AgendaView {
            selected_date: self.selected_date,
            tasks: self
                .repo
                .tasks_on(self.selected_date)
                .into_iter()
                .cloned()
                .collect(),
            highlighted: self.repo.dates_with_tasks(),
            calendar_visible: self.calendar_visible,
        }
    }
}

fn log_not_found(change: Change, id: TaskId) {
    if change == Change::NotFound {
        warn!(id = %id, "task no longer exists; nothing changed");
    }
}

#[cfg(test)]
mod tests {
    use tempfile::{TempDir, tempdir};

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).expect("valid date")
    }

    fn agenda() -> (TempDir, Agenda) {
        let temp = tempdir().expect("tempdir");
        let store = TaskStore::open(temp.path()).expect("open store");
        let repo = TaskRepository::open(store).expect("open repository");
        (temp, Agenda::new(repo, day(1), true))
    }

    #[test]
    fn adds_land_on_the_selected_date() {
        let (_temp, mut agenda) = agenda();
        assert_eq!(agenda.add_task("Buy milk").expect("add"), Change::Applied);

        agenda.select_date(day(2));
        assert_eq!(agenda.add_task("Walk dog").expect("add"), Change::Applied);
        assert_eq!(agenda.add_task("  ").expect("add"), Change::EmptyTitle);

        let view = agenda.view();
        assert_eq!(view.selected_date, day(2));
        assert_eq!(view.tasks.len(), 1);
        assert_eq!(view.tasks[0].title, "Walk dog");
        assert_eq!(view.highlighted, BTreeSet::from([day(1), day(2)]));
    }

    #[test]
    fn selecting_a_date_only_changes_the_listing() {
        let (_temp, mut agenda) = agenda();
        agenda.add_task("a").expect("add");

        agenda.select_date(day(20));
        let view = agenda.view();
        assert!(view.tasks.is_empty());
        assert_eq!(view.highlighted, BTreeSet::from([day(1)]));
        assert_eq!(agenda.repository().len(), 1);
    }

    #[test]
    fn mutations_report_skips() {
        let (_temp, mut agenda) = agenda();
        agenda.add_task("a").expect("add");
        let id = agenda.view().tasks[0].id;

        assert_eq!(agenda.edit_task(id, "").expect("edit"), Change::EmptyTitle);
        assert_eq!(agenda.set_completed(id, true).expect("complete"), Change::Applied);
        assert_eq!(agenda.delete_task(id).expect("delete"), Change::Applied);
        assert_eq!(agenda.delete_task(id).expect("delete again"), Change::NotFound);
        assert_eq!(agenda.edit_task(id, "b").expect("edit gone"), Change::NotFound);
        assert!(agenda.view().highlighted.is_empty());
    }

    #[test]
    fn calendar_toggle_flips_visibility() {
        let (_temp, mut agenda) = agenda();
        assert!(agenda.calendar_visible());
        assert!(!agenda.toggle_calendar());
        assert!(!agenda.view().calendar_visible);
        assert!(agenda.toggle_calendar());
    }

    #[test]
    fn open_uses_configured_location() {
        let temp = tempdir().expect("tempdir");
        let cfg = Config {
            data_location: Some(temp.path().join("data")),
            calendar_visible: false,
            ..Config::default()
        };

        let mut agenda = Agenda::open(&cfg).expect("open");
        assert!(!agenda.calendar_visible());
        agenda.add_task("persisted").expect("add");
        assert!(temp.path().join("data").join("tasks.json").is_file());
    }
}
