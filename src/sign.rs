//! Request signing for the token endpoint.

use md5::{Digest, Md5};


/// Computes the token-request signature.
///
/// The signature is the MD5 digest of `cp`, the decimal `ctime` and `seckey`
/// concatenated without separators, rendered as 32 lowercase hex characters.
///
/// # Arguments
/// * `cp` - Vendor-assigned client identifier.
/// * `ctime` - Request time in seconds since the Unix epoch.
/// * `seckey` - Shared secret key.
#[must_use]
pub fn sign(cp: &str, ctime: i64, seckey: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(cp.as_bytes());
    hasher.update(ctime.to_string().as_bytes());
    hasher.update(seckey.as_bytes());
    hex::encode(hasher.finalize())
}
