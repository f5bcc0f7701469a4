pub mod config;
pub mod ticket;
pub mod tool;
