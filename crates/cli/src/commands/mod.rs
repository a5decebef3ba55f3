pub mod catalog;
pub mod process;
pub mod render;
pub mod validate;
pub mod vars;
