use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use lumos_codegen::Generator;
use lumos_config::{Config, Format, Registry};
use lumos_core::{OsFilesystem, TerminalReporter};

use super::UnwrapOrExit;
use crate::ops::{self, GenerateOptions};

#[derive(Args)]
pub struct GenerateCommand {
    /// Output filename (overrides the configured filename)
    pub filename: Option<String>,

    /// The format for the helper file
    #[arg(short = 'F', long)]
    pub format: Option<Format>,

    /// Write @mixin annotations to model sources after a successful write
    #[arg(short = 'W', long, num_args = 0..=1, default_missing_value = "true")]
    pub write_mixins: Option<bool>,

    /// Include the configured helper files
    #[arg(short = 'H', long)]
    pub helpers: bool,

    /// Use an in-memory sqlite connection for the generation context
    #[arg(short = 'M', long)]
    pub memory: bool,

    /// Path to lumos.toml (defaults to ./lumos.toml)
    #[arg(short, long, default_value = "lumos.toml")]
    pub config: PathBuf,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let config = Config::open(&self.config).unwrap_or_exit();
        let registry = Registry::open(config.root.join(&config.registry.path)).unwrap_or_exit();

        let opts = GenerateOptions {
            filename: self.filename.clone(),
            format: self.format,
            write_mixins: self.write_mixins,
            helpers: self.helpers,
            memory: self.memory,
        };

        ops::generate(
            &config,
            &registry,
            &opts,
            &OsFilesystem,
            &mut TerminalReporter::new(),
            |context, helpers| Generator::new(&registry, context, helpers),
        )?;

        Ok(())
    }
}
