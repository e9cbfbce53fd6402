pub mod models;
pub mod error;
pub mod config;
pub mod numeric;

pub use error::{Error, Result};
