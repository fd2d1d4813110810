use rusqlite::types::Value;
use serde::{Serialize, Serializer};

/// Decoded TCC authorization value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthState {
    Denied,
    Allowed,
    Prompt,
    /// A code with no known meaning, kept verbatim.
    Other(i64),
}

impl AuthState {
    /// Map a raw `auth_value` to its state. Never fails.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Denied,
            1 => Self::Allowed,
            2 => Self::Prompt,
            other => Self::Other(other),
        }
    }

    /// The raw code this state was decoded from.
    pub fn code(&self) -> i64 {
        match self {
            Self::Denied => 0,
            Self::Allowed => 1,
            Self::Prompt => 2,
            Self::Other(code) => *code,
        }
    }
}

impl std::fmt::Display for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Denied => f.write_str("Denied"),
            Self::Allowed => f.write_str("Allowed"),
            Self::Prompt => f.write_str("Prompt"),
            Self::Other(code) => write!(f, "Other({code})"),
        }
    }
}

impl Serialize for AuthState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A row exactly as it came out of the `access` table.
///
/// Cells keep whatever storage class SQLite returned; the classifier decides
/// how to read them.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub service: Value,
    pub client: Value,
    pub auth_value: Value,
    pub prompt_count: Value,
    pub last_modified: Value,
    pub sandbox_id: Value,
}

impl Default for RawRow {
    fn default() -> Self {
        Self {
            service: Value::Null,
            client: Value::Null,
            auth_value: Value::Null,
            prompt_count: Value::Null,
            last_modified: Value::Null,
            sandbox_id: Value::Null,
        }
    }
}

/// One normalized permission record, ready for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionRecord {
    pub service: String,
    pub client: String,
    pub auth_state: AuthState,
    pub prompt_count: u32,
    /// Seconds since the Unix epoch.
    pub last_modified: i64,
    /// Empty when the store had no qualifier.
    pub sandbox_id: String,
}
