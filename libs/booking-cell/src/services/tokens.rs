use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

pub const CANCEL_TOKEN_LENGTH: usize = 32;
pub const CONFIRMATION_PREFIX: &str = "QS";

/// 32 characters drawn uniformly from `[A-Za-z0-9]`.
pub fn generate_cancel_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CANCEL_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// `("2024-03-15", 7)` -> `"QS-2024-0315-007"`.
pub fn confirmation_number(date: &str, sequence: u32) -> String {
    let digits: Vec<char> = date.chars().filter(|c| *c != '-').take(8).collect();
    let year: String = digits.iter().take(4).collect();
    let month_day: String = digits.iter().skip(4).collect();
    format!("{}-{}-{}-{:03}", CONFIRMATION_PREFIX, year, month_day, sequence)
}

/// Compares a presented token with the stored one over their SHA-256 digests,
/// so timing does not depend on how long a common prefix is.
pub fn tokens_match(presented: &str, stored: &str) -> bool {
    let presented = Sha256::digest(presented.as_bytes());
    let stored = Sha256::digest(stored.as_bytes());
    presented
        .iter()
        .zip(stored.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
