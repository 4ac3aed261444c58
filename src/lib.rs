// src/lib.rs
pub mod app;
pub mod cli;
pub mod color;
pub mod dataset;
pub mod eras;
pub mod errors;
pub mod event;
pub mod filter;
pub mod filter_state;
pub mod logging;
pub mod position;
pub mod terminal_ui;
pub mod timeline;
pub mod timeline_event;

pub mod widgets;
