pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod ports;
pub mod ui;
