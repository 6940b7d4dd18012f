use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;

/// PBKDF2-HMAC-SHA512 rounds.
pub const PBKDF2_ITERATIONS: u32 = 10_000;
/// Derived key length in bytes (4096 bits). Hex encoding doubles it.
pub const HASH_LEN: usize = 512;

/// Derives the stored password hash from the plaintext and the configured salt.
///
/// Deterministic: the same pair always yields the same hex string, which is what
/// lets `verify_password` work without a per-record salt column.
pub fn hash_password(plain: &str, salt: &str) -> String {
    let mut out = vec![0u8; HASH_LEN];
    pbkdf2_hmac::<Sha512>(plain.as_bytes(), salt.as_bytes(), PBKDF2_ITERATIONS, &mut out);
    hex::encode(out)
}

pub fn verify_password(plain: &str, salt: &str, expected_hash: &str) -> bool {
    let candidate = hash_password(plain, salt);
    constant_time_eq(candidate.as_bytes(), expected_hash.as_bytes())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
