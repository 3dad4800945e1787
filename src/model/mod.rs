//! Data model: syntax tree handles, repair carriers, feature taxonomies,
//! and the revision-pairing record.

pub mod feature;
pub mod repair;
pub mod revision;
pub mod tree;
