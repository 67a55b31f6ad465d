use crate::error::AppError;
use bcrypt::hash;

// bcrypt cost factor; 12 keeps hashing around a tenth of a second on current hardware.
const BCRYPT_COST: u32 = 12;

/// Hashes a plaintext password with a per-hash random salt.
///
/// The plaintext is never stored or logged anywhere.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, BCRYPT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Checks a plaintext password against a stored bcrypt hash.
///
/// bcrypt's comparison is constant-time. A missing or malformed stored hash
/// counts as a failed check rather than an error, so verification never
/// throws into the caller's control flow.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    bcrypt::verify(password, stored_hash).unwrap_or(false)
}
