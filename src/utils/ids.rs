//! Identifier generation for documents, accounts and action codes.

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Random alphanumeric identifier of `len` characters.
pub fn random_id(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Display identifier shown in the roster: `UNIPOD` + a number in 100..=9099.
pub fn display_uid() -> String {
    format!("UNIPOD{}", rand::thread_rng().gen_range(100..=9099))
}
