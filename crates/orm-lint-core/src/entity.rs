//! Doctrine mapping marker names and entity classification.

use crate::model::ClassDeclaration;
use crate::utils::attributes::has_attr;

/// `#[ORM\Entity]`
pub const ENTITY: &str = "Doctrine\\ORM\\Mapping\\Entity";
/// `#[ORM\Column]`
pub const COLUMN: &str = "Doctrine\\ORM\\Mapping\\Column";
/// `#[ORM\JoinColumn]`
pub const JOIN_COLUMN: &str = "Doctrine\\ORM\\Mapping\\JoinColumn";
/// `#[ORM\Id]`
pub const ID: &str = "Doctrine\\ORM\\Mapping\\Id";
/// `#[ORM\GeneratedValue]`
pub const GENERATED_VALUE: &str = "Doctrine\\ORM\\Mapping\\GeneratedValue";

/// Returns `true` if the class carries the entity marker attribute.
///
/// Only attributes written directly on the class are considered; base
/// classes, interfaces and attribute arguments are never inspected.
#[must_use]
pub fn is_entity(class: &ClassDeclaration) -> bool {
    has_attr(&class.attribute_groups, ENTITY)
}
