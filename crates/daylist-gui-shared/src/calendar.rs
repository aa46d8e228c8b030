//! Month grid model for the calendar
//! panel. Pure date arithmetic so both
//! the wasm frontend and native tests
//! can use it.

use std::collections::BTreeSet;

use chrono::{
  Datelike,
  Duration,
  NaiveDate,
  Weekday
};

pub const GRID_WEEKS: usize = 6;
pub const GRID_DAYS: usize =
  GRID_WEEKS * 7;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct CalendarDay {
  pub date:        NaiveDate,
  pub in_month:    bool,
  pub highlighted: bool,
  pub selected:    bool,
  pub today:       bool
}

/// A month laid out as six full weeks
/// starting on `week_start`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct MonthGrid {
  focus:      NaiveDate,
  week_start: Weekday
}

impl MonthGrid {
  pub fn new(
    focus: NaiveDate,
    week_start: Weekday
  ) -> Self {
    Self {
      focus: first_day_of_month(
        focus.year(),
        focus.month()
      ),
      week_start
    }
  }

  pub fn focus(&self) -> NaiveDate {
    self.focus
  }

  pub fn week_start(&self) -> Weekday {
    self.week_start
  }

  pub fn title(&self) -> String {
    self.focus.format("%B %Y").to_string()
  }

  #[must_use]
  pub fn prev_month(&self) -> Self {
    Self::new(
      shift_months(self.focus, -1),
      self.week_start
    )
  }

  #[must_use]
  pub fn next_month(&self) -> Self {
    Self::new(
      shift_months(self.focus, 1),
      self.week_start
    )
  }

  pub fn contains(
    &self,
    date: NaiveDate
  ) -> bool {
    date.year() == self.focus.year()
      && date.month()
        == self.focus.month()
  }

  pub fn weekday_labels(
    &self
  ) -> Vec<&'static str> {
    weekday_labels(self.week_start)
  }

  /// All cells of the grid, row by row.
  pub fn days(
    &self,
    highlighted: &BTreeSet<NaiveDate>,
    selected: NaiveDate,
    today: NaiveDate
  ) -> Vec<CalendarDay> {
    let grid_start = start_of_week(
      self.focus,
      self.week_start
    );
    (0..GRID_DAYS as i64)
      .map(|offset| {
        let date =
          add_days(grid_start, offset);
        CalendarDay {
          date,
          in_month: self.contains(date),
          highlighted: highlighted
            .contains(&date),
          selected: date == selected,
          today: date == today
        }
      })
      .collect()
  }
}

/// Label of the calendar collapse
/// button. It names what the next click
/// will do.
pub fn toggle_label(
  visible: bool
) -> &'static str {
  if visible {
    "Hide calendar"
  } else {
    "Expand calendar"
  }
}

pub fn weekday_labels(
  week_start: Weekday
) -> Vec<&'static str> {
  match week_start {
    | Weekday::Sun => {
      vec![
        "Sun", "Mon", "Tue", "Wed",
        "Thu", "Fri", "Sat",
      ]
    }
    | _ => {
      vec![
        "Mon", "Tue", "Wed", "Thu",
        "Fri", "Sat", "Sun",
      ]
    }
  }
}

pub fn parse_iso_date(
  raw: &str
) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(
    raw.trim(),
    "%Y-%m-%d"
  )
  .ok()
}

pub fn format_iso_date(
  date: NaiveDate
) -> String {
  date.format("%Y-%m-%d").to_string()
}

pub fn shift_months(
  date: NaiveDate,
  months: i32
) -> NaiveDate {
  let mut year = date.year();
  let mut month =
    date.month() as i32 + months;

  while month < 1 {
    month += 12;
    year = year.saturating_sub(1);
  }
  while month > 12 {
    month -= 12;
    year = year.saturating_add(1);
  }

  let month = month as u32;
  let day = date
    .day()
    .min(days_in_month(year, month));
  NaiveDate::from_ymd_opt(
    year, month, day
  )
  .unwrap_or(date)
}

fn first_day_of_month(
  year: i32,
  month: u32
) -> NaiveDate {
  NaiveDate::from_ymd_opt(
    year, month, 1
  )
  .unwrap_or(NaiveDate::MIN)
}

fn last_day_of_month(
  year: i32,
  month: u32
) -> NaiveDate {
  let (next_year, next_month) =
    if month >= 12 {
      (year.saturating_add(1), 1_u32)
    } else {
      (year, month + 1)
    };
  add_days(
    first_day_of_month(
      next_year, next_month
    ),
    -1
  )
}

fn days_in_month(
  year: i32,
  month: u32
) -> u32 {
  last_day_of_month(year, month).day()
}

fn add_days(
  date: NaiveDate,
  days: i64
) -> NaiveDate {
  date
    .checked_add_signed(Duration::days(
      days
    ))
    .unwrap_or(date)
}

fn start_of_week(
  day: NaiveDate,
  week_start: Weekday
) -> NaiveDate {
  let day_idx = day
    .weekday()
    .num_days_from_monday()
    as i64;
  let start_idx = week_start
    .num_days_from_monday()
    as i64;
  let diff =
    (7 + day_idx - start_idx) % 7;
  add_days(day, -diff)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  #[test]
  fn grid_starts_on_the_week_start() {
    // June 2024 begins on a Saturday.
    let focus = date(2024, 6, 18);

    let monday =
      MonthGrid::new(focus, Weekday::Mon)
        .days(
          &BTreeSet::new(),
          focus,
          focus
        );
    assert_eq!(monday.len(), GRID_DAYS);
    assert_eq!(
      monday[0].date,
      date(2024, 5, 27)
    );
    assert!(!monday[0].in_month);
    assert_eq!(
      monday[5].date,
      date(2024, 6, 1)
    );

    let sunday =
      MonthGrid::new(focus, Weekday::Sun)
        .days(
          &BTreeSet::new(),
          focus,
          focus
        );
    assert_eq!(
      sunday[0].date,
      date(2024, 5, 26)
    );
    assert_eq!(
      sunday[6].date,
      date(2024, 6, 1)
    );
  }

  #[test]
  fn days_carry_highlight_and_selection()
  {
    let grid = MonthGrid::new(
      date(2024, 6, 1),
      Weekday::Mon
    );
    let highlighted = BTreeSet::from([
      date(2024, 6, 3),
      date(2024, 7, 1),
      date(2025, 1, 1)
    ]);
    let days = grid.days(
      &highlighted,
      date(2024, 6, 10),
      date(2024, 6, 12)
    );

    let lit: Vec<NaiveDate> = days
      .iter()
      .filter(|day| day.highlighted)
      .map(|day| day.date)
      .collect();
    // 1 July is in the trailing week.
    assert_eq!(
      lit,
      vec![
        date(2024, 6, 3),
        date(2024, 7, 1)
      ]
    );

    let selected: Vec<_> = days
      .iter()
      .filter(|day| day.selected)
      .collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(
      selected[0].date,
      date(2024, 6, 10)
    );
    assert!(
      days
        .iter()
        .any(|day| day.today
          && day.date
            == date(2024, 6, 12))
    );
  }

  #[test]
  fn month_navigation_wraps_years() {
    let grid = MonthGrid::new(
      date(2024, 1, 31),
      Weekday::Mon
    );
    assert_eq!(
      grid.focus(),
      date(2024, 1, 1)
    );
    assert_eq!(
      grid.prev_month().focus(),
      date(2023, 12, 1)
    );
    assert_eq!(
      grid
        .next_month()
        .next_month()
        .focus(),
      date(2024, 3, 1)
    );
    assert_eq!(
      grid.title(),
      "January 2024"
    );
  }

  #[test]
  fn shift_months_clamps_day() {
    assert_eq!(
      shift_months(
        date(2024, 1, 31),
        1
      ),
      date(2024, 2, 29)
    );
    assert_eq!(
      shift_months(
        date(2024, 3, 31),
        -13
      ),
      date(2023, 2, 28)
    );
  }

  #[test]
  fn toggle_label_names_the_next_action()
  {
    assert_eq!(
      toggle_label(true),
      "Hide calendar"
    );
    assert_eq!(
      toggle_label(false),
      "Expand calendar"
    );
  }

  #[test]
  fn iso_dates_round_trip() {
    let d = date(2024, 6, 1);
    assert_eq!(
      parse_iso_date(&format_iso_date(
        d
      )),
      Some(d)
    );
    assert_eq!(
      parse_iso_date("06/01/2024"),
      None
    );
  }
}
