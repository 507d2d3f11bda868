//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Coordinates config, trigger sources (saves and console
//! commands), and the dashboard panel.

mod console;
mod core;
mod dashboard;
mod editor;
mod event_handler;
mod init;
mod panel_host;
mod polling;
mod save_watcher;
mod shutdown;
mod types;

pub use core::AbcodeApp;
