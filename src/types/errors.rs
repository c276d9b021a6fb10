use std::fmt;

// === DestinyError ===

/// Validation errors raised by destiny and history operations.
///
/// These are surfaced to the user directly; the operation that raised one
/// leaves all state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinyError {
    /// The text was empty after trimming.
    EmptyText,
    /// A destiny with the same text (ignoring case) already exists.
    Duplicate(String),
    /// Destiny with the given ID was not found.
    NotFound(String),
    /// Selection was attempted on an empty destiny list.
    NoDestinies,
    /// The requested history size is not one of the allowed options.
    InvalidHistorySize(u32),
}

impl fmt::Display for DestinyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinyError::EmptyText => write!(f, "Destiny text cannot be empty"),
            DestinyError::Duplicate(text) => write!(f, "This destiny already exists: {}", text),
            DestinyError::NotFound(id) => write!(f, "Destiny not found: {}", id),
            DestinyError::NoDestinies => write!(f, "Please add some destinies first"),
            DestinyError::InvalidHistorySize(size) => {
                write!(f, "Invalid history size: {}", size)
            }
        }
    }
}

impl std::error::Error for DestinyError {}

// === StorageError ===

/// Errors raised by key-value stores and record (de)serialization.
///
/// The store adapter logs and swallows these; they never reach the user.
#[derive(Debug)]
pub enum StorageError {
    /// Database operation failed.
    DatabaseError(String),
    /// Failed to serialize or deserialize a stored record.
    SerializationError(String),
    /// The store cannot be read from or written to right now.
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::DatabaseError(msg) => write!(f, "Storage database error: {}", msg),
            StorageError::SerializationError(msg) => {
                write!(f, "Storage serialization error: {}", msg)
            }
            StorageError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::DatabaseError(e.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::SerializationError(e.to_string())
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
