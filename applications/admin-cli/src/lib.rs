//! ModuLock admin CLI
//!
//! Terminal front end for the admin page controller: configuration, a
//! terminal implementation of the page's view, and the commands the
//! `modulock` binary dispatches to.

pub mod commands;
pub mod config;
pub mod error;
pub mod terminal;
