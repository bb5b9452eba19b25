pub mod classify;
pub mod cli;
pub mod client;
pub mod error;
pub mod models;
pub mod render;
pub mod utils;

pub use error::{MetarError, Result};
