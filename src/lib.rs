//! Userdesk - a terminal front-end for a REST user directory
//!
//! This library provides the list, detail and form logic behind the
//! userdesk CLI.

pub mod app;
pub mod cli;
pub mod config;
pub mod context_factory;
pub mod controller;
pub mod detail;
pub mod display;
pub mod forms;
pub mod model;
pub mod notify;
pub mod routes;
pub mod service;
pub mod transcript;

#[cfg(test)]
pub mod test_utils;

// Re-export Args for the binary
pub use cli::Args;
