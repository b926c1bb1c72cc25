//! Fingerprint Engine - endpoint classification
//!
//! Maps the set of open protocols found on an address to a single device
//! category using an ordered, first-match-wins rule chain.

mod classifier;

pub use classifier::{classify, ClassificationRule, CLASSIFICATION_RULES};
