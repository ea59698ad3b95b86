//! Terminal dice tray for Dicetower.
//!
//! A single ratatui screen: die selector, the tray showing the rolling die,
//! and the roll history. The application state in [`app`] is plain data
//! driven by key events and frame ticks, so it can be exercised without a
//! terminal.

pub mod app;
pub mod shared;
pub mod terminal;
pub mod view;
