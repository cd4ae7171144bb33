//! # Common Components
//!
//! Shared utilities used by both the CLI and the web server.
//!
//! ## Modules
//!
//! - [`config`]: Configuration parsing utilities
//! - [`logging`]: Logger initialisation

pub mod config;
pub mod logging;
