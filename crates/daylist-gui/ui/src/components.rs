mod calendar_panel;
mod startup_error;
mod task_list;
mod task_list_row;
mod text_prompt;

pub use calendar_panel::CalendarPanel;
pub use startup_error::StartupError;
pub use task_list::TaskList;
pub use text_prompt::TextPrompt;
