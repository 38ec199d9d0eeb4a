//! Hash computation for namespace derivation

use sha2::{Digest, Sha256};

/// Number of hex characters kept from a full hash.
pub const SHORT_HASH_LEN: usize = 20;

/// Hash an ordered list of fields.
///
/// Every field is length-prefixed, so `["ab", "c"]` and `["a", "bc"]` hash differently.
pub fn hash_fields(fields: &[&str]) -> String {
  let mut hasher = Sha256::new();
  for field in fields {
    hasher.update((field.len() as u64).to_le_bytes());
    hasher.update(field.as_bytes());
  }
  hex::encode(hasher.finalize())
}

/// Compute a short hash (first [`SHORT_HASH_LEN`] characters) for use in keys
pub fn short_hash(full_hash: &str) -> &str {
  &full_hash[..SHORT_HASH_LEN.min(full_hash.len())]
}
