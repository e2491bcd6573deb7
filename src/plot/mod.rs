pub mod render;
pub mod spec;
