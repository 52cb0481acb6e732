//! Generate operation - the stub generation pipeline.
//!
//! Sequences the pre-flight guard, option resolution, helper aggregation,
//! generator delegation, the output write, and the optional mixin pass.

use std::path::PathBuf;

use eyre::Result;
use lumos_codegen::{GenerateContext, MixinWriter, StubGenerator};
use lumos_config::{Config, Format, Registry};
use lumos_core::{Filesystem, Reporter, strip_php_tags};

/// Compiled class map artifacts, relative to the application root.
///
/// A stale compiled map shadows the live class definitions the registry was
/// captured from, so generation is blocked until it is cleared.
const COMPILED_CLASSMAPS: [&str; 3] = [
    "vendor/compiled.php",
    "bootstrap/cache/compiled.php",
    "storage/framework/compiled.php",
];

/// Options parsed from the command line; unset values fall back to the
/// configuration.
#[derive(Debug, Default, Clone)]
pub struct GenerateOptions {
    pub filename: Option<String>,
    pub format: Option<Format>,
    pub write_mixins: Option<bool>,
    pub helpers: bool,
    pub memory: bool,
}

/// Terminal state of a generate run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The pre-flight guard tripped; nothing was generated or written.
    Blocked,
    /// The stub file was written.
    Written(PathBuf),
    /// Generation succeeded but persisting the stub file failed.
    Failed(PathBuf),
}

/// Execute the generate operation.
///
/// `make_generator` receives the rendering context and the aggregated
/// helper text, so tests can substitute a recording fake for the real
/// generator. Blocked and write-failure outcomes are reported states, not
/// errors: the run returns `Ok` after reporting them.
pub fn generate<F, G, M>(
    config: &Config,
    registry: &Registry,
    opts: &GenerateOptions,
    fs: &F,
    reporter: &mut dyn Reporter,
    make_generator: M,
) -> Result<GenerateOutcome>
where
    F: Filesystem,
    G: StubGenerator,
    M: FnOnce(GenerateContext, String) -> G,
{
    if !config.output.directory.as_os_str().is_empty() {
        fs.ensure_directory_exists(&config.output.directory)?;
    }

    for artifact in COMPILED_CLASSMAPS {
        if fs.exists(&config.root.join(artifact)) {
            reporter.error(
                "cannot generate the helper file: a compiled class map exists; clear the compiled cache first",
            );
            return Ok(GenerateOutcome::Blocked);
        }
    }

    let filename = opts
        .filename
        .clone()
        .unwrap_or_else(|| config.output.filename.clone());
    let path = config.output.directory.join(filename);

    let database = if opts.memory {
        config.database.with_memory_driver()
    } else {
        config.database.clone()
    };

    let helpers = aggregate_helpers(config, opts, fs)?;

    let generator = make_generator(GenerateContext { database }, helpers);
    let format = opts.format.unwrap_or(config.output.format);
    let content = generator.generate(format)?;

    match fs.put(&path, &content) {
        Ok(_) => {
            reporter.info(&format!(
                "A new helper file was written to {}",
                path.display()
            ));
            if opts.write_mixins.unwrap_or(config.output.write_mixins) {
                MixinWriter::new(registry, &config.root).write_mixins(reporter, fs);
            }
            Ok(GenerateOutcome::Written(path))
        }
        Err(_) => {
            reporter.error(&format!(
                "The helper file could not be written to {}",
                path.display()
            ));
            Ok(GenerateOutcome::Failed(path))
        }
    }
}

/// Concatenate the configured helper files with delimiters stripped.
///
/// Missing files are silently skipped; helper inclusion is best-effort.
fn aggregate_helpers<F: Filesystem>(
    config: &Config,
    opts: &GenerateOptions,
    fs: &F,
) -> Result<String> {
    if !(opts.helpers || config.helpers.include) {
        return Ok(String::new());
    }

    let mut blob = String::new();
    for file in &config.helpers.files {
        let path = config.root.join(file);
        if fs.exists(&path) {
            blob.push_str(&strip_php_tags(&fs.get(&path)?));
        }
    }
    Ok(blob)
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        path::Path,
        rc::Rc,
    };

    use lumos_core::testing::{MemoryFilesystem, MemoryReporter};

    use super::*;

    struct FakeGenerator {
        content: &'static str,
        calls: Rc<Cell<usize>>,
    }

    impl StubGenerator for FakeGenerator {
        fn generate(&self, _format: Format) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.content.to_string())
        }
    }

    struct Run {
        outcome: GenerateOutcome,
        reporter: MemoryReporter,
        calls: Rc<Cell<usize>>,
        context: Option<GenerateContext>,
        helpers: Option<String>,
    }

    fn run(
        config: &Config,
        registry: &Registry,
        opts: &GenerateOptions,
        fs: &MemoryFilesystem,
    ) -> Run {
        let mut reporter = MemoryReporter::new();
        let calls = Rc::new(Cell::new(0));
        let seen: RefCell<Option<(GenerateContext, String)>> = RefCell::new(None);

        let outcome = generate(config, registry, opts, fs, &mut reporter, |context, helpers| {
            seen.replace(Some((context, helpers)));
            FakeGenerator {
                content: "stub content",
                calls: Rc::clone(&calls),
            }
        })
        .unwrap();

        let (context, helpers) = match seen.into_inner() {
            Some((context, helpers)) => (Some(context), Some(helpers)),
            None => (None, None),
        };

        Run {
            outcome,
            reporter,
            calls,
            context,
            helpers,
        }
    }

    fn test_config() -> Config {
        let mut config = Config::default();
        config.root = "/app".into();
        config.output.directory = "/app/_ide".into();
        config
    }

    fn config_with_mysql() -> Config {
        let mut config = test_config();
        config.database = Config::from_str_with_filename(
            r#"
            [database]
            default = "mysql"

            [database.connections.mysql]
            driver = "mysql"
            database = "app"
            "#,
            "lumos.toml",
        )
        .unwrap()
        .database;
        config
    }

    fn user_model_registry() -> Registry {
        Registry::from_str_with_filename(
            r#"
            [[model]]
            class = "App\\Models\\User"
            source = "app/Models/User.php"
            "#,
            "registry.toml",
        )
        .unwrap()
    }

    #[test]
    fn test_each_compiled_classmap_blocks_generation() {
        for artifact in COMPILED_CLASSMAPS {
            let config = test_config();
            let fs = MemoryFilesystem::new().with_file(format!("/app/{}", artifact), "<?php");

            let run = run(&config, &Registry::default(), &GenerateOptions::default(), &fs);

            assert_eq!(run.outcome, GenerateOutcome::Blocked);
            assert_eq!(run.calls.get(), 0);
            assert!(fs.writes().is_empty());
            assert_eq!(run.reporter.errors.len(), 1);
            assert!(run.reporter.infos.is_empty());
        }
    }

    #[test]
    fn test_clean_preflight_generates_and_writes_exactly_once() {
        let config = test_config();
        let fs = MemoryFilesystem::new();

        let run = run(&config, &Registry::default(), &GenerateOptions::default(), &fs);

        let path = Path::new("/app/_ide/_ide_helper.php");
        assert_eq!(run.outcome, GenerateOutcome::Written(path.to_path_buf()));
        assert_eq!(run.calls.get(), 1);
        assert_eq!(fs.writes().len(), 1);
        assert_eq!(fs.file(path).unwrap(), "stub content");
        assert_eq!(run.reporter.infos.len(), 1);
        assert!(run.reporter.infos[0].contains("/app/_ide/_ide_helper.php"));
    }

    #[test]
    fn test_output_directory_is_ensured_when_configured() {
        let config = test_config();
        let fs = MemoryFilesystem::new();

        run(&config, &Registry::default(), &GenerateOptions::default(), &fs);

        assert_eq!(fs.ensured_dirs(), vec![PathBuf::from("/app/_ide")]);
    }

    #[test]
    fn test_empty_output_directory_is_not_ensured() {
        let mut config = test_config();
        config.output.directory = PathBuf::new();
        let fs = MemoryFilesystem::new();

        let run = run(&config, &Registry::default(), &GenerateOptions::default(), &fs);

        assert!(fs.ensured_dirs().is_empty());
        assert_eq!(
            run.outcome,
            GenerateOutcome::Written(PathBuf::from("_ide_helper.php"))
        );
    }

    #[test]
    fn test_memory_flag_overrides_database_context() {
        let config = config_with_mysql();
        let opts = GenerateOptions {
            memory: true,
            ..Default::default()
        };

        let run = run(&config, &Registry::default(), &opts, &MemoryFilesystem::new());

        let database = run.context.unwrap().database;
        assert_eq!(database.default.as_deref(), Some("sqlite"));
        let sqlite = database.connections.get("sqlite").unwrap();
        assert_eq!(sqlite.driver, "sqlite");
        assert_eq!(sqlite.database, ":memory:");
        // the parsed configuration itself is untouched
        assert_eq!(config.database.default.as_deref(), Some("mysql"));
        assert!(!config.database.connections.contains_key("sqlite"));
    }

    #[test]
    fn test_database_context_passes_through_without_memory_flag() {
        let config = config_with_mysql();

        let run = run(
            &config,
            &Registry::default(),
            &GenerateOptions::default(),
            &MemoryFilesystem::new(),
        );

        assert_eq!(run.context.unwrap().database, config.database);
    }

    #[test]
    fn test_helper_aggregation_strips_tags_and_skips_missing() {
        let mut config = test_config();
        config.helpers.files = vec!["helpers/a.php".into(), "helpers/b.php".into()];
        let opts = GenerateOptions {
            helpers: true,
            ..Default::default()
        };
        let fs = MemoryFilesystem::new().with_file("/app/helpers/a.php", "<?php echo 1; ?>");

        let run = run(&config, &Registry::default(), &opts, &fs);

        assert_eq!(run.helpers.unwrap(), " echo 1; ");
    }

    #[test]
    fn test_config_default_enables_helper_inclusion() {
        let mut config = test_config();
        config.helpers.include = true;
        config.helpers.files = vec!["helpers/a.php".into()];
        let fs = MemoryFilesystem::new().with_file("/app/helpers/a.php", "<?php echo 2; ?>");

        let run = run(&config, &Registry::default(), &GenerateOptions::default(), &fs);

        assert_eq!(run.helpers.unwrap(), " echo 2; ");
    }

    #[test]
    fn test_helpers_off_reads_nothing() {
        let mut config = test_config();
        config.helpers.files = vec!["helpers/a.php".into()];
        let fs = MemoryFilesystem::new().with_file("/app/helpers/a.php", "<?php echo 1; ?>");

        let run = run(&config, &Registry::default(), &GenerateOptions::default(), &fs);

        assert_eq!(run.helpers.unwrap(), "");
        assert!(fs.reads().is_empty());
    }

    #[test]
    fn test_positional_filename_overrides_configured_filename() {
        let config = test_config();
        let opts = GenerateOptions {
            filename: Some("custom.php".to_string()),
            ..Default::default()
        };

        let run = run(&config, &Registry::default(), &opts, &MemoryFilesystem::new());

        assert_eq!(
            run.outcome,
            GenerateOutcome::Written(PathBuf::from("/app/_ide/custom.php"))
        );
    }

    #[test]
    fn test_write_failure_reports_error_and_skips_mixins() {
        let config = test_config();
        let registry = user_model_registry();
        let opts = GenerateOptions {
            write_mixins: Some(true),
            ..Default::default()
        };
        let model_source = "<?php\nclass User\n{\n}\n";
        let fs = MemoryFilesystem::new()
            .with_file("/app/app/Models/User.php", model_source)
            .fail_writes();

        let run = run(&config, &registry, &opts, &fs);

        assert_eq!(
            run.outcome,
            GenerateOutcome::Failed(PathBuf::from("/app/_ide/_ide_helper.php"))
        );
        assert_eq!(run.reporter.errors.len(), 1);
        assert!(run.reporter.errors[0].contains("/app/_ide/_ide_helper.php"));
        assert!(run.reporter.infos.is_empty());
        // only the stub write was attempted, never the model source
        assert_eq!(fs.writes(), vec![PathBuf::from("/app/_ide/_ide_helper.php")]);
        assert_eq!(fs.file("/app/app/Models/User.php").unwrap(), model_source);
    }

    #[test]
    fn test_mixins_written_after_successful_write() {
        let config = test_config();
        let registry = user_model_registry();
        let opts = GenerateOptions {
            write_mixins: Some(true),
            ..Default::default()
        };
        let fs = MemoryFilesystem::new().with_file("/app/app/Models/User.php", "<?php\nclass User\n{\n}\n");

        let run = run(&config, &registry, &opts, &fs);

        assert!(matches!(run.outcome, GenerateOutcome::Written(_)));
        assert!(
            fs.file("/app/app/Models/User.php")
                .unwrap()
                .contains("@mixin \\Lumos\\Stubs\\User")
        );
        // one info for the stub, one for the annotated model
        assert_eq!(run.reporter.infos.len(), 2);
    }

    #[test]
    fn test_mixins_skipped_by_default() {
        let config = test_config();
        let registry = user_model_registry();
        let model_source = "<?php\nclass User\n{\n}\n";
        let fs = MemoryFilesystem::new().with_file("/app/app/Models/User.php", model_source);

        let run = run(&config, &registry, &GenerateOptions::default(), &fs);

        assert!(matches!(run.outcome, GenerateOutcome::Written(_)));
        assert_eq!(fs.file("/app/app/Models/User.php").unwrap(), model_source);
    }

    #[test]
    fn test_config_default_enables_mixins() {
        let mut config = test_config();
        config.output.write_mixins = true;
        let registry = user_model_registry();
        let fs = MemoryFilesystem::new().with_file("/app/app/Models/User.php", "<?php\nclass User\n{\n}\n");

        run(&config, &registry, &GenerateOptions::default(), &fs);

        assert!(
            fs.file("/app/app/Models/User.php")
                .unwrap()
                .contains("@mixin \\Lumos\\Stubs\\User")
        );
    }

    #[test]
    fn test_explicit_false_overrides_config_mixin_default() {
        let mut config = test_config();
        config.output.write_mixins = true;
        let registry = user_model_registry();
        let opts = GenerateOptions {
            write_mixins: Some(false),
            ..Default::default()
        };
        let model_source = "<?php\nclass User\n{\n}\n";
        let fs = MemoryFilesystem::new().with_file("/app/app/Models/User.php", model_source);

        run(&config, &registry, &opts, &fs);

        assert_eq!(fs.file("/app/app/Models/User.php").unwrap(), model_source);
    }

    #[test]
    fn test_empty_generated_content_is_still_a_successful_write() {
        let config = test_config();
        let fs = MemoryFilesystem::new();
        let mut reporter = MemoryReporter::new();

        let outcome = generate(
            &config,
            &Registry::default(),
            &GenerateOptions::default(),
            &fs,
            &mut reporter,
            |_, _| FakeGenerator {
                content: "",
                calls: Rc::new(Cell::new(0)),
            },
        )
        .unwrap();

        assert!(matches!(outcome, GenerateOutcome::Written(_)));
        assert_eq!(fs.file("/app/_ide/_ide_helper.php").unwrap(), "");
        assert_eq!(reporter.infos.len(), 1);
        assert!(reporter.errors.is_empty());
    }
}
