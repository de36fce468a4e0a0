pub mod config;
pub mod error;
pub mod keys;
pub mod messages;
pub mod publisher;
pub mod runtime;
pub mod teleop;
