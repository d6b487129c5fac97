//! Terminal UI for Momentos.
//!
//! A ratatui interface with three tabs (roulette of moments, heart die and
//! score counters), a music transport header, and a help popup.

pub mod app;
pub mod audio;
pub mod logging;
pub mod shared;
pub mod tabs;
pub mod terminal;
