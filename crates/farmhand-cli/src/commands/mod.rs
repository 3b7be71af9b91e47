pub mod attendance;
pub mod auth_cmd;
pub mod calendar;
pub mod common;
pub mod completions;
pub mod config;
pub mod contacts;
pub mod expenses;
pub mod medicines;
pub mod seeds;
pub mod weather;
