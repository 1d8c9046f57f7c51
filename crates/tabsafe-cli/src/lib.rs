//! Library components for the tabsafe CLI.

pub mod logging;
pub mod render;
