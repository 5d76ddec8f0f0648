pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod types;

pub mod extract;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod registry;
pub mod sites;

// Port traits and their infrastructure adapters
pub mod app;
pub mod infra;
