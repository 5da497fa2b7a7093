use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a rule finding.
///
/// Identity fields (ASCII-lowercased, `|`-joined):
/// - rule_id
/// - spoke network id
pub fn fingerprint_for_rule(rule_id: &str, spoke_network_id: &str) -> String {
    let canonical = [rule_id, spoke_network_id.trim()]
        .join("|")
        .to_ascii_lowercase();

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
