pub mod config;
pub mod generator;
pub mod log;
pub mod verify;
