//! JSON completion export.
//!
//! A machine-readable listing of the same declarations the PHP stub carries,
//! for editor plugins that consume completions directly. Keys are emitted in
//! sorted order so the output is deterministic.

use eyre::Result;
use lumos_config::Registry;
use serde_json::{Map, Value, json};

use crate::{GenerateContext, php_types::php_property_type};

pub(crate) fn render(registry: &Registry, context: &GenerateContext) -> Result<String> {
    let mut facades = Map::new();
    for facade in &registry.facades {
        facades.insert(
            facade.alias.clone(),
            json!({
                "class": format!("{}\\{}", facade.namespace, facade.alias),
                "root": facade.root,
                "methods": facade.methods.iter().map(|m| m.signature()).collect::<Vec<_>>(),
            }),
        );
    }

    let mut models = Map::new();
    for model in &registry.models {
        let mut properties = Map::new();
        for column in &model.columns {
            properties.insert(column.name.clone(), Value::String(php_property_type(column)));
        }
        models.insert(model.class.clone(), Value::Object(properties));
    }

    let export = json!({
        "connection": context.database.default,
        "facades": facades,
        "models": models,
    });

    let mut output = serde_json::to_string_pretty(&export)?;
    output.push('\n');
    Ok(output)
}
