//! Identifier generation for tasks, subtasks, tags and attachments.
//!
//! Ids are a base-36 millisecond timestamp, a base-36 sequence number and a
//! random suffix. The sequence comes from a process-wide counter, so two calls
//! in the same process never return the same id even within one millisecond.
//! Nothing is guaranteed across processes or clock resets.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

const RANDOM_LEN: usize = 10;

/// Returns a fresh id, safe to use as a stable object key.
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let random = Uuid::new_v4().simple().to_string();
    format!(
        "{}{}{}",
        to_base36(millis),
        to_base36(seq),
        &random[..RANDOM_LEN]
    )
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1295), "zz");
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<String> = (0..5_000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 5_000);
    }

    #[test]
    fn test_ids_are_key_safe() {
        let id = generate_id();
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(id.len() > RANDOM_LEN);
    }
}
