//! Loading metadata models from JSON documents.
//!
//! The document mirrors the descriptor records: an assembly holds types, a
//! type holds member lists. Lists may be omitted and visibility defaults to
//! public. Documents are validated while they are converted through the
//! builders, so a loaded model is indistinguishable from a hand-built one.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use super::builder::{Accessors, TypeBuilder};
use super::descriptor::{AssemblyInfo, ConstructorInfo, FieldInfo, MethodInfo, TypeInfo, Visibility};
use crate::error::ModelError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AssemblyDoc {
    name: String,
    #[serde(default)]
    types: Vec<TypeDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TypeDoc {
    name: String,
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    visibility: Visibility,
    #[serde(default)]
    fields: Vec<FieldDoc>,
    #[serde(default)]
    constructors: Vec<ConstructorDoc>,
    #[serde(default)]
    properties: Vec<PropertyDoc>,
    #[serde(default)]
    methods: Vec<MethodDoc>,
    #[serde(default)]
    events: Vec<EventDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDoc {
    name: String,
    #[serde(rename = "type")]
    field_type: String,
    #[serde(default)]
    visibility: Visibility,
    #[serde(default, rename = "static")]
    is_static: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParameterDoc {
    name: String,
    #[serde(rename = "type")]
    parameter_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LocalDoc {
    #[serde(rename = "type")]
    local_type: String,
    #[serde(default)]
    pinned: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConstructorDoc {
    #[serde(default)]
    visibility: Visibility,
    #[serde(default, rename = "static")]
    is_static: bool,
    #[serde(default)]
    parameters: Vec<ParameterDoc>,
    #[serde(default)]
    locals: Vec<LocalDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MethodDoc {
    name: String,
    #[serde(default = "void_type")]
    return_type: String,
    #[serde(default)]
    visibility: Visibility,
    #[serde(default, rename = "static")]
    is_static: bool,
    #[serde(default)]
    parameters: Vec<ParameterDoc>,
    #[serde(default)]
    locals: Vec<LocalDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PropertyDoc {
    name: String,
    #[serde(rename = "type")]
    property_type: String,
    #[serde(default)]
    getter: Option<Visibility>,
    #[serde(default)]
    setter: Option<Visibility>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EventDoc {
    name: String,
    handler_type: String,
    #[serde(default)]
    visibility: Visibility,
}

fn void_type() -> String {
    "void".to_string()
}

/// Reads and validates a metadata model from a JSON file.
pub fn load_assembly(path: impl AsRef<Path>) -> Result<Arc<AssemblyInfo>, ModelError> {
    let path = path.as_ref();
    debug!("Reading metadata model from {}", path.display());
    let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_assembly(&text)
}

/// Parses and validates a metadata model from JSON text.
pub fn parse_assembly(text: &str) -> Result<Arc<AssemblyInfo>, ModelError> {
    let doc: AssemblyDoc = serde_json::from_str(text)?;
    let assembly = build_assembly(doc)?;
    info!(
        "Loaded assembly '{}' with {} types",
        assembly.name(),
        assembly.types().len()
    );
    Ok(assembly)
}

fn build_assembly(doc: AssemblyDoc) -> Result<Arc<AssemblyInfo>, ModelError> {
    require_name("assembly", &doc.name)?;

    let mut seen = HashSet::new();
    let mut builder = AssemblyInfo::builder(doc.name);
    for type_doc in doc.types {
        let type_info = build_type(type_doc)?;
        if !seen.insert(type_info.full_name()) {
            return Err(ModelError::invalid(format!(
                "type '{}' is declared more than once",
                type_info.full_name()
            )));
        }
        builder = builder.add_type(type_info);
    }
    Ok(builder.build())
}

fn build_type(doc: TypeDoc) -> Result<Arc<TypeInfo>, ModelError> {
    require_name("type", &doc.name)?;
    let type_name = doc.name.clone();

    let mut builder = TypeBuilder::new(doc.name).visibility(doc.visibility);
    if let Some(namespace) = doc.namespace {
        builder = builder.namespace(namespace);
    }

    for field in doc.fields {
        require_name("field", &field.name)?;
        builder = builder.field(
            FieldInfo::new(field.name, field.field_type)
                .with_visibility(field.visibility)
                .with_static(field.is_static),
        );
    }

    for ctor in doc.constructors {
        let mut constructor = ConstructorInfo::new()
            .with_visibility(ctor.visibility)
            .with_static(ctor.is_static);
        for p in ctor.parameters {
            require_name("parameter", &p.name)?;
            constructor = constructor.parameter(p.name, p.parameter_type);
        }
        for l in ctor.locals {
            constructor = constructor.local(l.local_type);
        }
        builder = builder.constructor(constructor);
    }

    // Properties go first so their accessors precede explicitly listed methods.
    for property in doc.properties {
        require_name("property", &property.name)?;
        let accessors = Accessors::new(property.getter, property.setter);
        if accessors.is_empty() {
            return Err(ModelError::invalid(format!(
                "property '{}.{}' declares no accessors",
                type_name, property.name
            )));
        }
        builder = builder.property(property.name, property.property_type, accessors);
    }

    for m in doc.methods {
        require_name("method", &m.name)?;
        let mut method = MethodInfo::new(m.name, m.return_type)
            .with_visibility(m.visibility)
            .with_static(m.is_static);
        for p in m.parameters {
            require_name("parameter", &p.name)?;
            method = method.parameter(p.name, p.parameter_type);
        }
        for l in m.locals {
            method = if l.pinned {
                method.pinned_local(l.local_type)
            } else {
                method.local(l.local_type)
            };
        }
        builder = builder.method(method);
    }

    for event in doc.events {
        require_name("event", &event.name)?;
        builder = builder.event_with_visibility(event.name, event.handler_type, event.visibility);
    }

    Ok(builder.build())
}

fn require_name(what: &str, name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::invalid(format!("{} name must not be empty", what)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_defaults_apply_to_omitted_keys() {
        let assembly = parse_assembly(indoc! {r#"
            {
              "name": "Minimal",
              "types": [
                { "name": "Empty" },
                { "name": "Worker", "methods": [{ "name": "Run" }] }
              ]
            }
        "#})
        .expect("valid model");

        assert_eq!(assembly.types().len(), 2);
        assert!(assembly.types()[0].fields().is_empty());
        let run = &assembly.types()[1].methods()[0];
        assert_eq!(run.return_type(), "void");
        assert!(run.visibility().is_public());
    }

    #[test]
    fn test_duplicate_type_is_rejected() {
        let err = parse_assembly(r#"{"name":"Dup","types":[{"name":"A"},{"name":"A"}]}"#)
            .expect_err("duplicate types");
        assert!(matches!(err, ModelError::Invalid { .. }));
    }

    #[test]
    fn test_same_name_in_different_namespaces_is_allowed() {
        let assembly = parse_assembly(indoc! {r#"
            {"name":"Ns","types":[
              {"name":"A","namespace":"One"},
              {"name":"A","namespace":"Two"}
            ]}
        "#})
        .expect("distinct full names");
        assert_eq!(assembly.types().len(), 2);
    }

    #[test]
    fn test_property_without_accessors_is_rejected() {
        let err = parse_assembly(
            r#"{"name":"P","types":[{"name":"T","properties":[{"name":"X","type":"int"}]}]}"#,
        )
        .expect_err("no accessors");
        assert!(err.to_string().contains("T.X"));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = parse_assembly(r#"{"name":"U","tpyes":[]}"#).expect_err("typo");
        assert!(matches!(err, ModelError::Json(_)));
    }
}
