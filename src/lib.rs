//! Search a company's employees on LinkedIn, score them by how reachable
//! they are through your network and present the ranked list.

pub mod auth;
pub mod cli;
pub mod config;
pub mod linkedin;
pub mod web;

pub use config::{ConfigManager, ScraperSettings};
pub use web::start_web_server;
