//! Terminal infrastructure console
//!
//! A ratatui front end over an in-memory inventory of machines, controllers,
//! devices, KVM hosts, networks, tags, zones and domains. Every section can
//! open forms in one shared side panel, and a first-run onboarding flow gates
//! the console until the install and the signed-in user are set up.

pub mod actions;
mod app;
pub mod components;
pub mod data;
pub mod event;
pub mod keybindings;
mod logging;
pub mod router;
pub mod screens;
pub mod state;
pub mod util;
pub mod worker;

pub use app::{App, LaunchOptions};
pub use logging::init_logging;

#[cfg(test)]
mod tests;
