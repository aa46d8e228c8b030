pub mod agenda;
pub mod common;
pub mod tasks;
