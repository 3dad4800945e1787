//! Persistence of extraction artifacts (JSONL + run summary).

pub mod jsonl;
pub mod save_all;
