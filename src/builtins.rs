//! Built-in library
//!
//! Scalars and directives every schema can import. Imports from this source
//! are not exported unless the declaration asks for it.

use std::sync::Arc;

use crate::artifact::{DefaultBuilder, Source};
use crate::definition::{Definition, FieldDefinition};
use crate::registry::{fold, Registry};

/// Name of the built-in source
pub const SOURCE_NAME: &str = "builtins";

const SCALARS: &[(&str, &str, &str)] = &[
    ("string", "String", "UTF-8 character sequence."),
    ("integer", "Int", "Signed 32-bit integer."),
    ("float", "Float", "Signed double-precision floating point value."),
    ("boolean", "Boolean", "`true` or `false`."),
    ("id", "ID", "Unique identifier, serialized as a string."),
];

/// Built-in definitions, scalars first
pub fn definitions() -> Vec<Definition> {
    let builder = DefaultBuilder::shared();

    let scalars = SCALARS.iter().map(|(identifier, name, description)| {
        Definition::build_type(*identifier, *name, builder.clone()).with_description(*description)
    });

    let directives = [
        Definition::build_directive("include", "include", builder.clone())
            .with_description(
                "Directs the executor to include this field or fragment only when the `if` \
                 argument is true.",
            )
            .with_field(FieldDefinition::new("if", "if")),
        Definition::build_directive("skip", "skip", builder.clone())
            .with_description(
                "Directs the executor to skip this field or fragment when the `if` \
                 argument is true.",
            )
            .with_field(FieldDefinition::new("if", "if")),
        Definition::build_directive("deprecated", "deprecated", builder.clone())
            .with_description("Marks an element of a schema as no longer supported.")
            .with_field(FieldDefinition::new("reason", "reason")),
    ];

    scalars.chain(directives).collect()
}

/// Assemble the built-in registry
pub fn registry() -> Registry {
    fold::fold(definitions(), Vec::new(), SOURCE_NAME)
}

/// Importable source backed by a fresh built-in registry
pub fn source() -> Source {
    source_named(SOURCE_NAME)
}

/// The built-in library registered under another source name
pub fn source_named(name: impl Into<String>) -> Source {
    Source::new(name, Arc::new(registry()))
}
