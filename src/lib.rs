pub mod cli;
pub mod config;
pub mod error;
pub mod hub;
pub mod installer;
pub mod models;

pub use error::{FetchError, HubError, Result};
