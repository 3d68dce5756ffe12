pub mod config;
pub mod engine;
pub mod form;
pub mod session;
