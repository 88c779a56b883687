// Shared constants for the engine, configuration and CLI
pub mod constants;
