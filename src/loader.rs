//! Definition Documents
//!
//! Reads definition lists from JSON documents:
//!
//! ```json
//! {
//!   "descriptions": { "user": "A person" },
//!   "definitions": [
//!     { "category": "type", "identifier": "user", "name": "User", "interfaces": ["node"] },
//!     { "category": "type", "identifier": "string", "name": "String", "source": "builtins" }
//!   ]
//! }
//! ```
//!
//! Definitions naming a `source` are imported from it; everything else is
//! built with [`DefaultBuilder`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::artifact::{DefaultBuilder, Source};
use crate::builtins;
use crate::config::AssemblyConfig;
use crate::definition::{
    Attrs, Category, DeclarationOpts, Definition, FieldDefinition, FieldImport, Identifier,
    Location, Origin,
};
use crate::error::{AssemblyError, Result};
use crate::overlay::Descriptions;

/// On-disk form of a definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDefinition {
    pub category: Category,
    pub identifier: Identifier,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(default)]
    pub interfaces: Vec<Identifier>,
    #[serde(default)]
    pub field_imports: Vec<FieldImport>,
    #[serde(default)]
    pub attrs: Attrs,
    /// Name of the source to import from
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub export: Option<bool>,
}

/// On-disk document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefinitionDocument {
    #[serde(default)]
    pub descriptions: Descriptions,
    #[serde(default)]
    pub definitions: Vec<RawDefinition>,
}

/// Definitions and descriptions ready for assembly
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub definitions: Vec<Definition>,
    pub descriptions: Descriptions,
}

/// Named sources a document may import from
#[derive(Debug, Clone, Default)]
pub struct Sources {
    by_name: HashMap<String, Source>,
}

impl Sources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the built-in library, registered as `builtin_source`
    pub fn with_builtins(builtin_source: &str) -> Self {
        let mut sources = Self::new();
        sources.insert(builtins::source_named(builtin_source));
        sources
    }

    /// Sources named by `config`
    pub fn from_config(config: &AssemblyConfig) -> Self {
        Self::with_builtins(&config.schema.builtin_source)
    }

    pub fn insert(&mut self, source: Source) {
        self.by_name.insert(source.name().to_string(), source);
    }

    pub fn get(&self, name: &str) -> Option<&Source> {
        self.by_name.get(name)
    }
}

impl RawDefinition {
    fn into_definition(self, sources: &Sources, default_file: &str) -> Result<Definition> {
        let origin = match self.source {
            Some(name) => Origin::Import(
                sources
                    .get(&name)
                    .cloned()
                    .ok_or(AssemblyError::UnknownSource(name))?,
            ),
            None => Origin::Build(DefaultBuilder::shared()),
        };

        Ok(Definition {
            category: self.category,
            identifier: self.identifier,
            name: self.name,
            description: self.description,
            fields: self.fields,
            interfaces: self.interfaces,
            field_imports: self.field_imports,
            attrs: self.attrs,
            origin,
            location: Location::new(
                self.file.unwrap_or_else(|| default_file.to_string()),
                self.line,
            ),
            opts: DeclarationOpts { export: self.export },
        })
    }
}

impl DefinitionDocument {
    pub fn resolve(self, sources: &Sources, default_file: &str) -> Result<LoadedDocument> {
        let definitions = self
            .definitions
            .into_iter()
            .map(|raw| raw.into_definition(sources, default_file))
            .collect::<Result<Vec<_>>>()?;

        Ok(LoadedDocument {
            definitions,
            descriptions: self.descriptions,
        })
    }
}

/// Parse a document from JSON text
pub fn parse_document(content: &str, sources: &Sources) -> Result<LoadedDocument> {
    let document: DefinitionDocument = serde_json::from_str(content)?;
    document.resolve(sources, "<document>")
}

/// Load a document from a file
pub fn load_document(path: impl AsRef<Path>, sources: &Sources) -> Result<LoadedDocument> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let document: DefinitionDocument = serde_json::from_str(&content)
        .map_err(|e| AssemblyError::InvalidDocument(format!("{}: {}", path.display(), e)))?;
    document.resolve(sources, &path.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::Assembler;
    use serde_json::json;

    fn builtin_sources() -> Sources {
        Sources::with_builtins(builtins::SOURCE_NAME)
    }

    #[test]
    fn test_parse_document() {
        let content = json!({
            "descriptions": {"user": "A person"},
            "definitions": [
                {"category": "type", "identifier": "user", "name": "User", "line": 3,
                 "fields": [{"identifier": "email", "name": "email"}]},
                {"category": "type", "identifier": "string", "name": "String",
                 "source": "builtins"},
                {"category": "directive", "identifier": "skip", "name": "skip",
                 "source": "builtins", "export": true}
            ]
        })
        .to_string();

        let loaded = parse_document(&content, &builtin_sources()).unwrap();
        assert_eq!(loaded.definitions.len(), 3);
        assert_eq!(loaded.descriptions["user"], "A person");

        let user = &loaded.definitions[0];
        assert_eq!(user.location, Location::new("<document>", 3));
        assert!(user.field("email").is_some());
        assert!(user.origin.source_name().is_none());

        assert_eq!(loaded.definitions[1].origin.source_name(), Some("builtins"));
        assert_eq!(loaded.definitions[2].opts.export, Some(true));
    }

    #[test]
    fn test_unknown_source_fails() {
        let content = json!({
            "definitions": [
                {"category": "type", "identifier": "x", "name": "X", "source": "elsewhere"}
            ]
        })
        .to_string();

        match parse_document(&content, &builtin_sources()) {
            Err(AssemblyError::UnknownSource(name)) => assert_eq!(name, "elsewhere"),
            other => panic!(
                "Expected UnknownSource, got {:?}",
                other.map(|d| d.definitions.len())
            ),
        }
    }

    #[test]
    fn test_renamed_builtin_source_stays_unexported() {
        let mut config = AssemblyConfig::default();
        config.schema.builtin_source = "std".to_string();
        let sources = Sources::from_config(&config);

        let content = json!({
            "definitions": [
                {"category": "type", "identifier": "string", "name": "String", "source": "std"},
                {"category": "type", "identifier": "user", "name": "User"}
            ]
        })
        .to_string();
        let loaded = parse_document(&content, &sources).unwrap();
        let registry = Assembler::new(config).assemble(loaded.definitions, &loaded.descriptions);

        assert!(registry.lookup_type("string").is_some());
        assert!(!registry.is_exported("string"));
        assert!(registry.is_exported("user"));

        let old_name = json!({
            "definitions": [
                {"category": "type", "identifier": "string", "name": "String",
                 "source": "builtins"}
            ]
        })
        .to_string();
        assert!(matches!(
            parse_document(&old_name, &sources),
            Err(AssemblyError::UnknownSource(_))
        ));
    }

    #[test]
    fn test_load_document_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        let document = json!({
            "definitions": [{"category": "type", "identifier": "user", "name": "User"}]
        });
        fs::write(&path, document.to_string()).unwrap();

        let loaded = load_document(&path, &Sources::new()).unwrap();
        assert_eq!(loaded.definitions[0].location.file, path.to_string_lossy());
    }

    #[test]
    fn test_invalid_document_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_document(&path, &Sources::new()).unwrap_err();
        assert!(
            matches!(err, AssemblyError::InvalidDocument(ref msg) if msg.contains("broken.json"))
        );
    }
}
