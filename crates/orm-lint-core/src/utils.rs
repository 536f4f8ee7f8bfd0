//! Utility functions for rule implementations.

pub mod attributes;
pub mod names;

// Re-export commonly used utilities for rule implementations
#[doc(inline)]
pub use attributes::{extract, has_any_attr, has_attr, AttributeMetadata};
#[doc(inline)]
pub use names::short_name;
