use std::collections::BTreeSet;

use chrono::{
  Datelike,
  NaiveDate
};
use daylist_gui_shared::calendar::{
  MonthGrid,
  toggle_label
};
use web_sys::MouseEvent;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct CalendarPanelProps {
  pub grid:        MonthGrid,
  pub highlighted: BTreeSet<NaiveDate>,
  pub selected:    NaiveDate,
  pub today:       NaiveDate,
  pub visible:     bool,
  pub on_toggle:   Callback<MouseEvent>,
  pub on_select:   Callback<NaiveDate>,
  pub on_prev:     Callback<MouseEvent>,
  pub on_today:    Callback<MouseEvent>,
  pub on_next:     Callback<MouseEvent>
}

#[function_component(CalendarPanel)]
pub fn calendar_panel(
  props: &CalendarPanelProps
) -> Html {
  html! {
      <div class="calendar-panel">
          <button class="btn btn-wide" onclick={props.on_toggle.clone()}>
              { toggle_label(props.visible) }
          </button>
          {
              if props.visible {
                  render_month(props)
              } else {
                  html! {}
              }
          }
      </div>
  }
}

fn render_month(
  props: &CalendarPanelProps
) -> Html {
  let days = props.grid.days(
    &props.highlighted,
    props.selected,
    props.today
  );

  html! {
      <div class="panel calendar">
          <div class="calendar-header">
              <button class="btn" onclick={props.on_prev.clone()}>{ "Prev" }</button>
              <div class="calendar-title">{ props.grid.title() }</div>
              <div>
                  <button class="btn" onclick={props.on_today.clone()}>{ "Today" }</button>
                  <button class="btn" onclick={props.on_next.clone()}>{ "Next" }</button>
              </div>
          </div>
          <div class="calendar-weekday-row">
              {
                  for props.grid.weekday_labels().into_iter().map(|label| html! {
                      <div class="calendar-weekday">{ label }</div>
                  })
              }
          </div>
          <div class="calendar-month-grid">
              {
                  for days.into_iter().map(|day| {
                      let on_select = props.on_select.clone();
                      let date = day.date;
                      html! {
                          <button
                              type="button"
                              class={classes!(
                                  "calendar-day-cell",
                                  (!day.in_month).then_some("outside"),
                                  day.highlighted.then_some("has-tasks"),
                                  day.selected.then_some("selected"),
                                  day.today.then_some("today"),
                              )}
                              onclick={Callback::from(move |_| on_select.emit(date))}
                          >
                              { day.date.day() }
                          </button>
                      }
                  })
              }
          </div>
      </div>
  }
}
