use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a check result.
///
/// Identity fields:
/// - check_id
/// - subject (package, user, path, service or command)
/// - role
pub fn fingerprint_for_check(check_id: &str, subject: &str, role: &str) -> String {
    let canonical = [check_id, subject, role].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
