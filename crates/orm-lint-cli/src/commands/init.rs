//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "orm-lint.toml";

const DEFAULT_CONFIG: &str = r#"# orm-lint configuration

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis, relative to the root
exclude = [
    "**/vendor/**",
    "**/var/**",
]

# Respect .gitignore files
respect_gitignore = true

# Rule configurations
# Every rule is enabled unless `enabled = false`

[rules.nullable-column]
enabled = true

[rules.primary-key-strategy]
enabled = true

[rules.setter-return-type]
enabled = true

[rules.preferred-column-type]
enabled = true

[rules.forbidden-call]
enabled = true
functions = [
    "dump",
    "dd",
    "var_dump",
    "print_r",
    "var_export",
    "debug_zval_dump",
    "debug_print_backtrace",
]
"#;

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    let config_path = write_config(Path::new("."), force)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE_NAME} to configure rules");
    println!("  2. Run: orm-lint check");

    Ok(())
}

/// Writes the template into `dir`, returning the written path.
fn write_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(config_path)
}
