use anyhow::{
  Context,
  anyhow
};
use chrono::{
  Local,
  NaiveDate,
  Utc
};
use chrono_tz::Tz;

pub const DATE_FORMAT: &str =
  "%Y-%m-%d";

/// The current calendar day, in `tz`
/// when given and the system zone
/// otherwise.
#[must_use]
pub fn today(
  tz: Option<Tz>
) -> NaiveDate {
  match tz {
    | Some(tz) => {
      Utc::now()
        .with_timezone(&tz)
        .date_naive()
    }
    | None => Local::now().date_naive()
  }
}

#[must_use]
pub fn format_date(
  date: NaiveDate
) -> String {
  date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(
  raw: &str
) -> anyhow::Result<NaiveDate> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Err(anyhow!(
      "date cannot be empty"
    ));
  }

  NaiveDate::parse_from_str(
    trimmed,
    DATE_FORMAT
  )
  .with_context(|| {
    format!(
      "expected a YYYY-MM-DD date, \
       got {trimmed:?}"
    )
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_and_formats_iso_dates() {
    let date = parse_date(" 2024-06-01 ")
      .expect("parse");
    assert_eq!(
      date,
      NaiveDate::from_ymd_opt(
        2024, 6, 1
      )
      .expect("valid date")
    );
    assert_eq!(
      format_date(date),
      "2024-06-01"
    );
  }

  #[test]
  fn rejects_other_shapes() {
    assert!(parse_date("").is_err());
    assert!(
      parse_date("2024/06/01").is_err()
    );
    assert!(
      parse_date("2024-02-30").is_err()
    );
  }

  #[test]
  fn today_in_zone_is_near_utc_today() {
    let utc_today =
      Utc::now().date_naive();
    let tokyo = today(Some(
      chrono_tz::Asia::Tokyo
    ));
    let diff = (tokyo - utc_today)
      .num_days()
      .abs();
    assert!(diff <= 1);
  }
}
