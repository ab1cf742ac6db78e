#![doc = include_str!("../README.md")]

pub mod runtime;
pub mod database;
pub mod notifications;

pub(crate) mod macros;

pub mod services;
