// Destiny Dice shared type definitions
// Each submodule defines types used across the application.

pub mod destiny;
pub mod errors;
pub mod settings;
