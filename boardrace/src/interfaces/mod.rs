pub mod commands;
pub mod view_interface;
