use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use lumos_config::{Config, Registry};

use super::UnwrapOrExit;
use crate::ops;

#[derive(Args)]
pub struct CheckCommand {
    /// Path to lumos.toml (defaults to ./lumos.toml)
    #[arg(short, long, default_value = "lumos.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let config = Config::open(&self.config).unwrap_or_exit();
        let registry_path = config.root.join(&config.registry.path);
        let registry = Registry::open(&registry_path).unwrap_or_exit();

        let report = ops::check(&self.config, &registry);

        println!("✓ {} is valid", report.config_path.display());
        println!("✓ {} is valid\n", registry_path.display());

        println!(
            "  {} facade{} ({} method{})",
            report.facades,
            plural(report.facades),
            report.methods,
            plural(report.methods),
        );
        println!(
            "  {} model{} ({} column{})",
            report.models,
            plural(report.models),
            report.columns,
            plural(report.columns),
        );

        Ok(())
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
