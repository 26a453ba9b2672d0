//! Terminal UI shell hosting the two movement entry views.

pub mod app;
pub mod audio;
pub mod events;
pub mod services;
pub mod theme;
pub mod views;
pub mod widgets;
