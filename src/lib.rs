#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]

pub mod app;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod event;
pub mod follow;
pub mod help;
pub mod input;
pub mod logging;
pub mod search;
pub mod status;
pub mod ui;
mod utils;
pub mod viewport;
mod watcher;
pub mod window;
