// Destiny Dice services
// Services provide supporting functionality around the core managers.

pub mod settings_engine;
