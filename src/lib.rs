pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod observability;
pub mod terminal;

// Pure event logic: status, filtering, catalog
pub mod domain;

// Layered boundaries for application and infrastructure
pub mod app;
pub mod infra;

// HTML front end
pub mod web;
