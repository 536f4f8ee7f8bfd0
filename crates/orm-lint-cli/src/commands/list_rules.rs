//! List rules command implementation.

use orm_lint_rules::{all_rules, DEFAULT_FUNCTIONS};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<25} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<25} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!(
        "\nDefault forbidden functions: {}",
        DEFAULT_FUNCTIONS.join(", ")
    );

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  orm-lint check --rules nullable-column,forbidden-call");
    println!("  orm-lint check --rules ORM001,ORM005");
}
