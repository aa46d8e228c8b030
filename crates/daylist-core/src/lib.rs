pub mod agenda;
pub mod config;
pub mod datetime;
pub mod repository;
pub mod store;
pub mod task;

pub use agenda::{
  Agenda,
  AgendaView,
  Change
};
pub use store::{
  StoreError,
  TaskStore
};
pub use task::{
  Task,
  TaskId
};
