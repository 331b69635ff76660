pub mod bodies;
pub mod camera;
pub mod input;
pub mod labels;
pub mod menu;
pub mod render;
pub mod scene;
pub mod time;
pub mod ui;
