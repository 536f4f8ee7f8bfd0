//! Built-in rule set and lookup by name or code.

use crate::{
    forbidden_call, nullable_column, preferred_column_type, primary_key_strategy,
    setter_return_type, ForbiddenCall, NullableColumn, PreferredColumnType, PrimaryKeyStrategy,
    SetterReturnType,
};
use orm_lint_core::{Config, RuleBox};

/// Names of every built-in rule, in code order.
pub const RULE_NAMES: &[&str] = &[
    nullable_column::NAME,
    primary_key_strategy::NAME,
    setter_return_type::NAME,
    preferred_column_type::NAME,
    forbidden_call::NAME,
];

/// Returns every built-in rule with default options.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    rules_from_config(&Config::default())
}

/// Returns every built-in rule, options taken from `config`.
///
/// Disabled rules are still returned; the analyzer filters them.
#[must_use]
pub fn rules_from_config(config: &Config) -> Vec<RuleBox> {
    RULE_NAMES
        .iter()
        .filter_map(|name| rule_by_name(name, config))
        .collect()
}

/// Looks up a built-in rule by name (`nullable-column`) or code (`ORM001`).
///
/// Codes match case-insensitively.
#[must_use]
pub fn rule_by_name(name_or_code: &str, config: &Config) -> Option<RuleBox> {
    let key = name_or_code.trim();
    let hit = |name: &str, code: &str| key == name || key.eq_ignore_ascii_case(code);

    if hit(nullable_column::NAME, nullable_column::CODE) {
        Some(Box::new(NullableColumn::new()))
    } else if hit(primary_key_strategy::NAME, primary_key_strategy::CODE) {
        Some(Box::new(PrimaryKeyStrategy::new()))
    } else if hit(setter_return_type::NAME, setter_return_type::CODE) {
        Some(Box::new(SetterReturnType::new()))
    } else if hit(preferred_column_type::NAME, preferred_column_type::CODE) {
        Some(Box::new(PreferredColumnType::new()))
    } else if hit(forbidden_call::NAME, forbidden_call::CODE) {
        Some(Box::new(ForbiddenCall::from_config(
            config.rule(forbidden_call::NAME),
        )))
    } else {
        None
    }
}
