//! The feature composition engine: context windows, atomic aggregation,
//! value classification, and joint feature composition.

pub mod aggregate;
pub mod compose;
pub mod value;
pub mod visitor;
pub mod window;
