pub mod config;
pub mod feedback;
pub mod shell;
