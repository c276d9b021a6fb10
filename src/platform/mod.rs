// Destiny Dice platform abstraction
// Resolves where settings and the key-value database live on each OS.
//
// Uses `cfg(target_os)` to select the platform-specific implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific configuration directory.
///
/// - **Linux**: `~/.config/destiny-dice` (or `$XDG_CONFIG_HOME/destiny-dice`)
/// - **macOS**: `~/Library/Application Support/DestinyDice`
/// - **Windows**: `%APPDATA%/DestinyDice`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the platform-specific data directory holding the database.
///
/// - **Linux**: `~/.local/share/destiny-dice` (or `$XDG_DATA_HOME/destiny-dice`)
/// - **macOS**: `~/Library/Application Support/DestinyDice`
/// - **Windows**: `%APPDATA%/DestinyDice`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}
