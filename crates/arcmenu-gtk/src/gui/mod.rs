pub mod app;
pub mod canvas;
pub mod document;
pub mod icons;
pub mod theme;
