use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use chrono::{
  Local,
  NaiveDate,
  Weekday
};
use daylist_gui_shared::calendar::{
  MonthGrid,
  format_iso_date,
  parse_iso_date
};
use daylist_gui_shared::ipc::RequestSequence;
use daylist_gui_shared::{
  AgendaDto,
  DateArg,
  TaskCompletedArgs,
  TaskCreate,
  TaskEditArgs,
  TaskIdArg,
  UiLogArg
};
use gloo::console::log;
use serde::Serialize;
use uuid::Uuid;
use web_sys::MouseEvent;
use yew::{
  Callback,
  Html,
  UseStateHandle,
  function_component,
  html,
  use_effect_with,
  use_mut_ref,
  use_state
};

use crate::api::invoke_tauri;
use crate::components::{
  CalendarPanel,
  StartupError,
  TaskList,
  TextPrompt
};

#[derive(Clone, PartialEq)]
struct PromptState {
  mode:  PromptMode,
  draft: String
}

#[derive(Clone, Copy, PartialEq)]
enum PromptMode {
  Add,
  Edit(Uuid)
}

impl PromptMode {
  fn heading(self) -> &'static str {
    match self {
      | Self::Add => "Add task",
      | Self::Edit(_) => "Edit task"
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let agenda =
    use_state(|| None::<AgendaDto>);
  let startup_error =
    use_state(|| None::<String>);
  let command_error =
    use_state(|| None::<String>);
  let focus =
    use_state(|| None::<NaiveDate>);
  let prompt =
    use_state(|| None::<PromptState>);
  let sequence = use_mut_ref(
    RequestSequence::default
  );
  let snapshots = Snapshots {
    agenda:        agenda.clone(),
    command_error: command_error.clone(),
    sequence
  };

  {
    let agenda = agenda.clone();
    let startup_error =
      startup_error.clone();
    use_effect_with((), move |_| {
      wasm_bindgen_futures::spawn_local(
        async move {
          match invoke_tauri::<
            AgendaDto,
            ()
          >(
            "agenda_snapshot", None
          )
          .await
          {
            | Ok(snapshot) => {
              tracing::info!(
                selected = %snapshot.selected_date,
                tasks = snapshot.tasks.len(),
                "loaded agenda"
              );
              agenda.set(Some(snapshot));
            }
            | Err(err) => {
              tracing::error!(error = %err, "agenda_snapshot failed");
              startup_error.set(Some(err));
            }
          }
        }
      );
      || ()
    });
  }

  if let Some(message) =
    (*startup_error).clone()
  {
    return html! {
        <StartupError message={message} />
    };
  }

  let Some(snapshot) = (*agenda).clone()
  else {
    return html! {
        <div class="shell">{ "Loading…" }</div>
    };
  };

  let today =
    parse_iso_date(&snapshot.today)
      .unwrap_or_else(|| {
        Local::now().date_naive()
      });
  let selected = parse_iso_date(
    &snapshot.selected_date
  )
  .unwrap_or(today);
  let highlighted: BTreeSet<NaiveDate> =
    snapshot
      .highlighted_dates
      .iter()
      .filter_map(|raw| {
        parse_iso_date(raw)
      })
      .collect();
  let week_start =
    match snapshot.week_start.as_str() {
      | "sunday" => Weekday::Sun,
      | _ => Weekday::Mon
    };
  let grid = MonthGrid::new(
    (*focus).unwrap_or(selected),
    week_start
  );

  let on_select = {
    let snapshots = snapshots.clone();
    let focus = focus.clone();
    Callback::from(
      move |date: NaiveDate| {
        focus.set(Some(date));
        snapshots.run(
          "date_select",
          Some(DateArg {
            date: format_iso_date(date)
          })
        );
      }
    )
  };

  let on_toggle_calendar = {
    let snapshots = snapshots.clone();
    Callback::from(
      move |_: MouseEvent| {
        ui_log(
          "calendar.toggle",
          "toggle button clicked"
        );
        snapshots.run::<()>(
          "calendar_toggle",
          None
        );
      }
    )
  };

  let on_prev = {
    let focus = focus.clone();
    Callback::from(
      move |_: MouseEvent| {
        focus.set(Some(
          grid.prev_month().focus()
        ))
      }
    )
  };
  let on_next = {
    let focus = focus.clone();
    Callback::from(
      move |_: MouseEvent| {
        focus.set(Some(
          grid.next_month().focus()
        ))
      }
    )
  };
  let on_today = {
    let on_select = on_select.clone();
    Callback::from(
      move |_: MouseEvent| {
        on_select.emit(today)
      }
    )
  };

  let on_completed = {
    let snapshots = snapshots.clone();
    Callback::from(
      move |(id, completed): (
        Uuid,
        bool
      )| {
        snapshots.run(
          "task_set_completed",
          Some(TaskCompletedArgs {
            id,
            completed
          })
        );
      }
    )
  };

  let on_delete = {
    let snapshots = snapshots.clone();
    Callback::from(move |id: Uuid| {
      snapshots.run(
        "task_delete",
        Some(TaskIdArg { id })
      );
    })
  };

  let on_edit = {
    let prompt = prompt.clone();
    let tasks = snapshot.tasks.clone();
    Callback::from(move |id: Uuid| {
      let Some(task) = tasks
        .iter()
        .find(|task| task.id == id)
      else {
        return;
      };
      ui_log(
        "prompt.edit",
        &id.to_string()
      );
      prompt.set(Some(PromptState {
        mode:  PromptMode::Edit(id),
        draft: task.title.clone()
      }));
    })
  };

  let on_add = {
    let prompt = prompt.clone();
    Callback::from(
      move |_: MouseEvent| {
        ui_log(
          "prompt.add",
          "add button clicked"
        );
        prompt.set(Some(PromptState {
          mode:  PromptMode::Add,
          draft: String::new()
        }));
      }
    )
  };

  let prompt_view = match (*prompt)
    .clone()
  {
    | Some(state) => {
      let on_input = {
        let prompt = prompt.clone();
        let state = state.clone();
        Callback::from(
          move |draft: String| {
            prompt.set(Some(
              PromptState {
                draft,
                ..state.clone()
              }
            ));
          }
        )
      };
      let on_cancel = {
        let prompt = prompt.clone();
        Callback::from(move |()| {
          prompt.set(None)
        })
      };
      let on_submit = {
        let prompt = prompt.clone();
        let snapshots = snapshots.clone();
        let state = state.clone();
        Callback::from(move |()| {
          prompt.set(None);
          submit_prompt(
            &state, &snapshots
          );
        })
      };
      html! {
          <TextPrompt
              heading={state.mode.heading()}
              label={"Task name:"}
              value={state.draft.clone()}
              on_input={on_input}
              on_cancel={on_cancel}
              on_submit={on_submit}
          />
      }
    }
    | None => html! {}
  };

  let notice = (*command_error)
    .clone()
    .or_else(|| snapshot.notice.clone());
  let heading = format!(
    "Tasks for {}",
    selected.format("%A, %B %-d, %Y")
  );

  html! {
      <div class="shell">
          <CalendarPanel
              grid={grid}
              highlighted={highlighted}
              selected={selected}
              today={today}
              visible={snapshot.calendar_visible}
              on_toggle={on_toggle_calendar}
              on_select={on_select}
              on_prev={on_prev}
              on_today={on_today}
              on_next={on_next}
          />
          <TaskList
              heading={heading}
              tasks={snapshot.tasks.clone()}
              notice={notice}
              on_completed={on_completed}
              on_edit={on_edit}
              on_delete={on_delete}
          />
          <button class="btn btn-wide" onclick={on_add}>{ "Add task" }</button>
          { prompt_view }
      </div>
  }
}

/// Sends the prompt's text to the
/// backend. Blank text still goes
/// through so the backend can answer
/// with its notice; nothing is stored.
fn submit_prompt(
  state: &PromptState,
  snapshots: &Snapshots
) {
  match state.mode {
    | PromptMode::Add => {
      snapshots.run(
        "task_add",
        Some(TaskCreate {
          title: state.draft.clone()
        })
      );
    }
    | PromptMode::Edit(id) => {
      snapshots.run(
        "task_edit",
        Some(TaskEditArgs {
          id,
          title: state.draft.clone()
        })
      );
    }
  }
}

/// Where command replies land. Replies
/// are applied only if no newer command
/// was sent in the meantime.
#[derive(Clone)]
struct Snapshots {
  agenda:        UseStateHandle<
    Option<AgendaDto>
  >,
  command_error: UseStateHandle<
    Option<String>
  >,
  sequence:      Rc<
    RefCell<RequestSequence>
  >
}

impl Snapshots {
  /// Invokes a command that answers
  /// with a fresh snapshot and swaps it
  /// in, so the list and highlights are
  /// rebuilt.
  fn run<A>(
    &self,
    command: &'static str,
    args: Option<A>
  ) where
    A: Serialize + 'static
  {
    let ticket =
      self.sequence.borrow_mut().issue();
    let this = self.clone();
    wasm_bindgen_futures::spawn_local(
      async move {
        let reply =
          invoke_tauri::<AgendaDto, A>(
            command,
            args.as_ref()
          )
          .await;

        if !this
          .sequence
          .borrow()
          .is_latest(ticket)
        {
          tracing::debug!(
            command,
            ticket,
            "dropping stale reply"
          );
          return;
        }

        match reply {
          | Ok(snapshot) => {
            tracing::debug!(
              command,
              tasks = snapshot.tasks.len(),
              "command applied"
            );
            this.command_error.set(None);
            this
              .agenda
              .set(Some(snapshot));
          }
          | Err(err) => {
            tracing::error!(command, error = %err, "command failed");
            this.command_error.set(Some(
              format!(
                "{command} failed: {err}"
              )
            ));
          }
        }
      }
    );
  }
}

fn ui_log(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));

  let arg = UiLogArg {
    event:  event.to_string(),
    detail: detail.to_string()
  };
  wasm_bindgen_futures::spawn_local(
    async move {
      if let Err(err) =
        invoke_tauri::<(), UiLogArg>(
          "ui_log",
          Some(&arg)
        )
        .await
      {
        tracing::warn!(error = %err, "ui_log failed");
      }
    }
  );
}
