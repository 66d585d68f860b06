//! Dashboard core for a browser-automation QA agent.
//!
//! The rendering layer hands this crate a backend base URL and gets back
//! display-ready view-models: flow/run/project tables, flattened element
//! rows, interaction timelines, derived steps, and merged run headers.
//! Nothing here retains state between requests — every page render fetches
//! fresh and builds its view-model from scratch.

pub mod api;
pub mod capture;
pub mod config;
pub mod error;
pub mod logging;
pub mod validation;
pub mod views;

pub use api::ApiClient;
pub use config::DashboardConfig;
pub use error::AppError;
