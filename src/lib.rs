pub mod api;
pub mod common;
pub mod config;
pub mod logging;
pub mod models;
pub mod services;
pub mod types;
pub mod web;
