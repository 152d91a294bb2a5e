//! Definition types
//!
//! A [`Definition`] is one declared type or directive as handed over by the
//! declaration front end, before any validation or registration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::artifact::{ArtifactBuilder, Source};

/// Author-chosen symbolic key of a definition or field
pub type Identifier = String;

/// Open attribute bag for category-specific data
pub type Attrs = serde_json::Map<String, serde_json::Value>;

/// What a definition declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Type,
    Directive,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type => write!(f, "type"),
            Self::Directive => write!(f, "directive"),
        }
    }
}

/// Where a definition was declared
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Options supplied by the author alongside the declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationOpts {
    /// Explicit export override; `None` means the default export rule applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<bool>,
}

/// A subscription field's link to one or more mutation fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerDeclaration {
    /// Identifiers of the mutation fields that fire this trigger
    pub mutations: BTreeSet<Identifier>,
    /// Opaque payload handed to the subscription machinery
    #[serde(default)]
    pub config: serde_json::Value,
}

impl TriggerDeclaration {
    pub fn new<I, S>(mutations: I, config: serde_json::Value) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Identifier>,
    {
        Self {
            mutations: mutations.into_iter().map(Into::into).collect(),
            config,
        }
    }

    pub fn fires_on(&self, mutation_field: &str) -> bool {
        self.mutations.contains(mutation_field)
    }
}

/// A field declared on a type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub identifier: Identifier,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attrs: Attrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<TriggerDeclaration>,
}

impl FieldDefinition {
    pub fn new(identifier: impl Into<Identifier>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            description: None,
            attrs: Attrs::new(),
            triggers: Vec::new(),
        }
    }

    pub fn with_trigger(mut self, trigger: TriggerDeclaration) -> Self {
        self.triggers.push(trigger);
        self
    }
}

/// Request to pull the fields of another type into this one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldImport {
    /// Identifier of the type whose fields are imported
    pub from: Identifier,
    /// Field identifiers to leave out
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub except: Vec<Identifier>,
}

impl FieldImport {
    pub fn new(from: impl Into<Identifier>) -> Self {
        Self {
            from: from.into(),
            except: Vec::new(),
        }
    }
}

/// How the artifact for a definition is obtained
#[derive(Clone)]
pub enum Origin {
    /// Imported by identifier from another registry
    Import(Source),
    /// Constructed from the definition
    Build(Arc<dyn ArtifactBuilder>),
}

impl Origin {
    /// Name of the import source, if this definition is imported
    pub fn source_name(&self) -> Option<&str> {
        match self {
            Self::Import(source) => Some(source.name()),
            Self::Build(_) => None,
        }
    }
}

impl fmt::Debug for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Import(source) => f.debug_tuple("Import").field(&source.name()).finish(),
            Self::Build(_) => f.write_str("Build"),
        }
    }
}

/// One declared type or directive awaiting validation and registration
#[derive(Debug, Clone)]
pub struct Definition {
    pub category: Category,
    pub identifier: Identifier,
    /// Externally visible name
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldDefinition>,
    /// Identifiers of the interfaces this type declares
    pub interfaces: Vec<Identifier>,
    pub field_imports: Vec<FieldImport>,
    /// Category-specific data not covered above
    pub attrs: Attrs,
    pub origin: Origin,
    pub location: Location,
    pub opts: DeclarationOpts,
}

impl Definition {
    fn new(
        category: Category,
        identifier: impl Into<Identifier>,
        name: impl Into<String>,
        origin: Origin,
    ) -> Self {
        Self {
            category,
            identifier: identifier.into(),
            name: name.into(),
            description: None,
            fields: Vec::new(),
            interfaces: Vec::new(),
            field_imports: Vec::new(),
            attrs: Attrs::new(),
            origin,
            location: Location::default(),
            opts: DeclarationOpts::default(),
        }
    }

    /// A type definition built by `builder`
    pub fn build_type(
        identifier: impl Into<Identifier>,
        name: impl Into<String>,
        builder: Arc<dyn ArtifactBuilder>,
    ) -> Self {
        Self::new(Category::Type, identifier, name, Origin::Build(builder))
    }

    /// A directive definition built by `builder`
    pub fn build_directive(
        identifier: impl Into<Identifier>,
        name: impl Into<String>,
        builder: Arc<dyn ArtifactBuilder>,
    ) -> Self {
        Self::new(Category::Directive, identifier, name, Origin::Build(builder))
    }

    /// A definition whose artifact is imported from `source`
    pub fn import(
        category: Category,
        identifier: impl Into<Identifier>,
        name: impl Into<String>,
        source: Source,
    ) -> Self {
        Self::new(category, identifier, name, Origin::Import(source))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_interface(mut self, interface: impl Into<Identifier>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_field_import(mut self, import: FieldImport) -> Self {
        self.field_imports.push(import);
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn with_export(mut self, export: bool) -> Self {
        self.opts.export = Some(export);
        self
    }

    pub fn is_type(&self) -> bool {
        self.category == Category::Type
    }

    pub fn field(&self, identifier: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.identifier == identifier)
    }
}
