pub mod engine;
pub mod extract;
pub mod io;
pub mod model;
pub mod parser;
pub mod registry;
