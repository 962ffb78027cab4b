//! GTK 4 host for the `arcmenu` radial menu: a cairo canvas, the widget tree as the
//! menu's document, frame-clock scheduling and file-watched configuration.

pub mod config;
pub mod events;
pub mod gui;
pub mod sys;
