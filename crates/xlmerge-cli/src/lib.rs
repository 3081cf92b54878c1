//! Command-line shell for the xlmerge pipeline.

pub mod config;
pub mod logging;
pub mod notice;
pub mod pipeline;
pub mod session;
pub mod text;
