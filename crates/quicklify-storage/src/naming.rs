//! Unique file name generation.
//!
//! Name format: `<prefix>_<time-hex><random-hex>.<ext>`, where the time part is the
//! current UTC time in microseconds (13 hex digits) and the random part is 64 bits
//! from the thread-local CSPRNG. No lock or counter is shared between requests.

use chrono::Utc;

/// Generate a fresh stored filename.
pub fn generate_filename(prefix: &str, extension: &str) -> String {
    format!("{}_{}.{}", prefix, generate_token(), extension)
}

/// Collision-resistant token combining a microsecond timestamp and 64 random bits.
pub fn generate_token() -> String {
    let micros = Utc::now().timestamp_micros().max(0) as u64;
    let random: u64 = rand::random();
    format!("{:013x}{:016x}", micros, random)
}

/// Whether `name` is a plain file name that cannot escape the storage directory.
pub fn is_valid_filename(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 255
        && !name.starts_with('.')
        && !name.contains("..")
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
}
