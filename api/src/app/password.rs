//! Password hashing
//!
//! The domain treats the hash as opaque; the user handlers are the only
//! callers that know its shape: `hex(salt)$hex(hmac_sha256(salt, password))`.

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SALT_LEN: usize = 16;

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> String {
    let mut rng = rand::thread_rng();
    let salt: Vec<u8> = (0..SALT_LEN).map(|_| rng.gen()).collect();

    let mut mac = keyed(&salt);
    mac.update(password.as_bytes());
    format!(
        "{}${}",
        hex::encode(&salt),
        hex::encode(mac.finalize().into_bytes())
    )
}

/// Check a password against a hash produced by [`hash_password`].
///
/// The digest comparison runs in constant time.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Some((salt_hex, expected_hex)) = hash.split_once('$') else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(expected_hex)) else {
        tracing::warn!("Stored password hash is not hex encoded");
        return false;
    };

    let mut mac = keyed(&salt);
    mac.update(password.as_bytes());
    mac.verify_slice(&expected).is_ok()
}

fn keyed(salt: &[u8]) -> HmacSha256 {
    HmacSha256::new_from_slice(salt).expect("HMAC accepts keys of any length")
}
