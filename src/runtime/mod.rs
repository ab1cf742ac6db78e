//! This module contains code relevant to the embedding process's runtime,
//! most notably [`Config`].

mod config;
pub use config::{Config, InitializeConfigError};
