// Destiny Dice platform paths for Linux
// Config: ~/.config/destiny-dice
// Data:   ~/.local/share/destiny-dice

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "destiny-dice";

/// `$XDG_CONFIG_HOME/destiny-dice`, falling back to `~/.config/destiny-dice`.
pub fn get_config_dir() -> PathBuf {
    resolve(env::var("XDG_CONFIG_HOME").ok(), &[".config"])
}

/// `$XDG_DATA_HOME/destiny-dice`, falling back to `~/.local/share/destiny-dice`.
pub fn get_data_dir() -> PathBuf {
    resolve(env::var("XDG_DATA_HOME").ok(), &[".local", "share"])
}

fn resolve(xdg: Option<String>, fallback: &[&str]) -> PathBuf {
    match xdg.filter(|x| !x.is_empty()) {
        Some(base) => PathBuf::from(base).join(APP_DIR),
        None => {
            let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
            fallback
                .iter()
                .fold(PathBuf::from(home), |p, part| p.join(part))
                .join(APP_DIR)
        }
    }
}
