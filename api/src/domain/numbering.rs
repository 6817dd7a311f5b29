//! Human-facing record numbers (`CIS-2026-123456`, `CLAIM-2026-654321`).
//!
//! The suffix is random with no store lookup, so two records created in the
//! same year may draw the same number. The unique index on the number column
//! catches that and the create use cases retry with a fresh draw.

use chrono::Datelike;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

pub const POLICY_PREFIX: &str = "CIS";
pub const CLAIM_PREFIX: &str = "CLAIM";

/// Attempts made by the create use cases before giving up on a colliding number.
pub const MAX_NUMBER_ATTEMPTS: usize = 5;

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(CIS|CLAIM)-(\d{4})-(\d{6})$").expect("valid record number regex"));

pub fn generate(prefix: &str) -> String {
    let year = chrono::Utc::now().year();
    let suffix: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
    format!("{}-{}-{}", prefix, year, suffix)
}

pub fn policy_number() -> String {
    generate(POLICY_PREFIX)
}

pub fn claim_number() -> String {
    generate(CLAIM_PREFIX)
}

pub fn is_well_formed(prefix: &str, value: &str) -> bool {
    NUMBER_RE
        .captures(value)
        .map(|c| &c[1] == prefix)
        .unwrap_or(false)
}
