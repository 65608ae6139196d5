use sha2::{Digest, Sha256};

/// Stable match identity: SHA-256 (hex) over the sorted participant ids
/// concatenated, followed by the match seed in decimal.
pub fn compute_match_id<S: AsRef<str>>(participant_ids: &[S], seed: u32) -> String {
    let mut ids: Vec<&str> = participant_ids.iter().map(AsRef::as_ref).collect();
    ids.sort_unstable();

    let mut hasher = Sha256::new();
    for id in ids {
        hasher.update(id.as_bytes());
    }
    hasher.update(seed.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_under_roster_order() {
        let a = compute_match_id(&["2-Hero-1-30", "1-Hero-1-10", "AI-1"], 42);
        let b = compute_match_id(&["AI-1", "2-Hero-1-30", "1-Hero-1-10"], 42);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn seed_changes_identity() {
        let ids = ["1-Hero-1-10", "1-Hero-1-11"];
        assert_ne!(compute_match_id(&ids, 1), compute_match_id(&ids, 2));
    }

    #[test]
    fn matches_plain_concatenation_hash() {
        let expected = {
            let mut h = Sha256::new();
            h.update(b"ab7");
            hex::encode(h.finalize())
        };
        assert_eq!(compute_match_id(&["b", "a"], 7), expected);
    }
}
