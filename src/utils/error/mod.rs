//! Error handling module

mod error;

pub use error::{AppError, Result};
