pub mod app;
pub mod legend;
pub mod surface;
pub mod theme;
pub mod view;
