#![forbid(unsafe_code)]

pub mod agents;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod install;
pub mod models;
pub mod opencode_config;
pub mod plugins;
pub mod prompt;
pub mod providers;
pub mod template;
pub mod update_check;
pub mod utils;
pub mod validate;
pub mod version;
