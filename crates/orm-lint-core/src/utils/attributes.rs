//! Attribute metadata extraction for rule implementations.

use crate::model::{ArgValue, Argument, AttributeGroup};

/// Flattened view of one attribute instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeMetadata<'a> {
    /// Fully qualified attribute name.
    pub name: &'a str,
    /// Arguments in source order.
    pub arguments: &'a [Argument],
}

impl<'a> AttributeMetadata<'a> {
    /// Returns `true` if this attribute has the given qualified name.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Iterates over named arguments as `(name, value)` pairs.
    pub fn named_args(&self) -> impl Iterator<Item = (&'a str, &'a ArgValue)> + 'a {
        self.arguments
            .iter()
            .filter_map(|arg| arg.name.as_deref().map(|name| (name, &arg.value)))
    }

    /// Values of named arguments whose name matches exactly.
    pub fn named(&self, name: &'a str) -> impl Iterator<Item = &'a ArgValue> + 'a {
        self.named_args()
            .filter(move |(arg_name, _)| *arg_name == name)
            .map(|(_, value)| value)
    }

    /// Values of named arguments whose name matches ignoring ASCII case.
    pub fn named_ignore_case(&self, name: &'a str) -> impl Iterator<Item = &'a ArgValue> + 'a {
        self.named_args()
            .filter(move |(arg_name, _)| arg_name.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Returns `true` if a named argument with exactly this name was written.
    #[must_use]
    pub fn has_named(&self, name: &str) -> bool {
        self.named_args().any(|(arg_name, _)| arg_name == name)
    }
}

/// Flattens attribute groups into attribute instances, in declaration order.
///
/// Repeated attributes are all yielded.
pub fn extract(groups: &[AttributeGroup]) -> impl Iterator<Item = AttributeMetadata<'_>> {
    groups.iter().flat_map(|group| {
        group.attributes.iter().map(|attr| AttributeMetadata {
            name: attr.name.as_str(),
            arguments: attr.arguments.as_slice(),
        })
    })
}

/// Checks if any attribute in the groups has the given qualified name.
#[must_use]
pub fn has_attr(groups: &[AttributeGroup], name: &str) -> bool {
    extract(groups).any(|attr| attr.is(name))
}

/// Checks if any attribute in the groups has one of the given names.
#[must_use]
pub fn has_any_attr(groups: &[AttributeGroup], names: &[&str]) -> bool {
    extract(groups).any(|attr| names.contains(&attr.name))
}
