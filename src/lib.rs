pub mod error;
pub mod logging;
pub mod types;

pub mod app;
pub mod infra;
pub mod observability;
pub mod pipeline;
