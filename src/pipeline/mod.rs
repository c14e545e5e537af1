pub mod processing;
pub mod tasks;
