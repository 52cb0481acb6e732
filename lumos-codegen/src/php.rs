//! PHP stub rendering.
//!
//! Emits a declarations-only PHP file: one namespace block per facade
//! namespace, a `Lumos\Stubs` namespace with `@property`-annotated model
//! stubs, and a trailing global namespace holding the helper text verbatim.

use indexmap::IndexMap;
use lumos_config::{Facade, Registry};
use lumos_core::split_fqn;

use crate::{GenerateContext, builder::CodeBuilder, php_types::php_property_type};

pub(crate) fn render(registry: &Registry, context: &GenerateContext, helpers: &str) -> String {
    let mut b = CodeBuilder::php();

    b.push_line("<?php");
    b.push_line("// @formatter:off");
    b.push_blank();
    b.push_doc(&[
        "A helper file for your framework, to provide autocomplete".to_string(),
        "information to your IDE. This file is not meant to be included".to_string(),
        "anywhere; it is consumed by editor tooling only.".to_string(),
        String::new(),
        format!(
            "Generated by lumos (connection: {}).",
            context.database.default.as_deref().unwrap_or("none")
        ),
    ]);

    // facades grouped by namespace, declaration order preserved
    let mut groups: IndexMap<&str, Vec<&Facade>> = IndexMap::new();
    for facade in &registry.facades {
        groups
            .entry(facade.namespace.as_str())
            .or_default()
            .push(facade);
    }

    for (namespace, facades) in &groups {
        b.push_blank();
        b.push_line(&format!("namespace {} {{", namespace));
        b.push_indent();
        for (i, facade) in facades.iter().enumerate() {
            if i > 0 {
                b.push_blank();
            }
            render_facade(&mut b, facade);
        }
        b.push_dedent();
        b.push_line("}");
    }

    if !registry.models.is_empty() {
        b.push_blank();
        b.push_line("namespace Lumos\\Stubs {");
        b.push_indent();
        for (i, model) in registry.models.iter().enumerate() {
            if i > 0 {
                b.push_blank();
            }
            let (_, class) = split_fqn(&model.class);
            let mut doc = vec![format!("Column stub for \\{}.", model.class)];
            if let Some(table) = &model.table {
                doc.push(format!("Table: {}.", table));
            }
            if !model.columns.is_empty() {
                doc.push(String::new());
                for column in &model.columns {
                    doc.push(format!(
                        "@property {} ${}",
                        php_property_type(column),
                        column.name
                    ));
                }
            }
            b.push_doc(&doc);
            b.push_line(&format!("class {}", class));
            b.push_line("{");
            b.push_line("}");
        }
        b.push_dedent();
        b.push_line("}");
    }

    if !helpers.is_empty() {
        b.push_blank();
        b.push_line("namespace {");
        b.push_raw(helpers);
        if !helpers.ends_with('\n') {
            b.push_raw("\n");
        }
        b.push_line("}");
    }

    b.build()
}

fn render_facade(b: &mut CodeBuilder, facade: &Facade) {
    if let Some(root) = &facade.root {
        b.push_doc(&[format!("@see \\{}", root)]);
    }
    b.push_line(&format!("class {}", facade.alias));
    b.push_line("{");
    b.push_indent();
    for (i, method) in facade.methods.iter().enumerate() {
        if i > 0 {
            b.push_blank();
        }
        b.push_doc(&["@static".to_string()]);
        b.push_line(&format!("public static function {}", method.signature()));
        b.push_line("{");
        b.push_line("}");
    }
    b.push_dedent();
    b.push_line("}");
}
