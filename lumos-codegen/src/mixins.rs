//! Mixin annotation pass for model source files.
//!
//! After a successful stub write, every registry model with a known source
//! file gets a `@mixin \Lumos\Stubs\<Class>` docblock annotation, telling the
//! IDE to merge the generated property stubs into the real class.

use std::path::Path;

use lumos_config::Registry;
use lumos_core::{Filesystem, Reporter, split_fqn};

pub struct MixinWriter<'a> {
    registry: &'a Registry,
    root: &'a Path,
}

impl<'a> MixinWriter<'a> {
    /// Create a writer over the registry; model sources are resolved
    /// relative to the application root.
    pub fn new(registry: &'a Registry, root: &'a Path) -> Self {
        Self { registry, root }
    }

    /// Annotate every model source that needs it.
    ///
    /// Models without a source, with a missing file, or already annotated
    /// are skipped. Read/write failures are reported per file and do not
    /// stop the pass.
    pub fn write_mixins(&self, reporter: &mut dyn Reporter, fs: &dyn Filesystem) {
        for model in &self.registry.models {
            let Some(source) = &model.source else {
                continue;
            };
            let path = self.root.join(source);
            if !fs.exists(&path) {
                continue;
            }

            let content = match fs.get(&path) {
                Ok(content) => content,
                Err(e) => {
                    reporter.error(&format!("could not read '{}': {}", path.display(), e));
                    continue;
                }
            };

            let (_, class) = split_fqn(&model.class);
            let mixin = format!("@mixin \\Lumos\\Stubs\\{}", class);
            if content.contains(&mixin) {
                continue;
            }

            let Some(updated) = annotate(&content, class, &mixin) else {
                reporter.error(&format!(
                    "no class declaration for '{}' found in '{}'",
                    class,
                    path.display()
                ));
                continue;
            };

            match fs.put(&path, &updated) {
                Ok(_) => reporter.info(&format!("Wrote {} to {}", mixin, path.display())),
                Err(e) => {
                    reporter.error(&format!("could not write '{}': {}", path.display(), e));
                }
            }
        }
    }
}

/// Check whether a line declares exactly `class`. The name must end at a
/// boundary (end of line, whitespace, or `{`) so `User` never matches
/// `UserScope`.
fn is_class_decl(line: &str, class: &str) -> bool {
    let decl = line.trim_start();
    let Some(rest) = ["class ", "final class ", "abstract class "]
        .iter()
        .find_map(|prefix| decl.strip_prefix(prefix))
    else {
        return false;
    };
    let Some(after) = rest.strip_prefix(class) else {
        return false;
    };
    match after.chars().next() {
        None => true,
        Some(c) => c.is_whitespace() || c == '{',
    }
}

/// Insert the mixin line into the docblock directly above the class
/// declaration, creating a docblock when the class has none.
fn annotate(content: &str, class: &str, mixin: &str) -> Option<String> {
    let lines: Vec<&str> = content.lines().collect();

    let class_idx = lines.iter().position(|line| is_class_decl(line, class))?;

    let indent: String = lines[class_idx]
        .chars()
        .take_while(|c| c.is_whitespace())
        .collect();

    let mut out: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
    if class_idx > 0 && lines[class_idx - 1].trim() == "*/" {
        // extend the existing docblock
        out.insert(class_idx - 1, format!("{} * {}", indent, mixin));
    } else {
        out.insert(class_idx, format!("{} */", indent));
        out.insert(class_idx, format!("{} * {}", indent, mixin));
        out.insert(class_idx, format!("{}/**", indent));
    }

    let mut result = out.join("\n");
    if content.ends_with('\n') {
        result.push('\n');
    }
    Some(result)
}
