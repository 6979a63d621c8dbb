//! Core taskdeck library (config, session, API client, task model).

pub mod api;
pub mod config;
pub mod session;
pub mod tasks;
