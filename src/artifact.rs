//! Artifacts and the collaborators that produce them
//!
//! An [`Artifact`] is the built representation of a type or directive. It is
//! obtained either by asking an [`ArtifactBuilder`] to construct it from a
//! definition, or by importing it by identifier from an [`ArtifactSource`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::definition::{Attrs, Category, Definition, FieldDefinition, Identifier};

/// Built representation of a type or directive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub category: Category,
    pub identifier: Identifier,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<Identifier>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attrs: Attrs,
}

impl Artifact {
    pub fn field(&self, identifier: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.identifier == identifier)
    }
}

/// Strategy that constructs an artifact from a definition
pub trait ArtifactBuilder: Send + Sync {
    fn build(&self, definition: &Definition) -> Artifact;
}

impl<F> ArtifactBuilder for F
where
    F: Fn(&Definition) -> Artifact + Send + Sync,
{
    fn build(&self, definition: &Definition) -> Artifact {
        self(definition)
    }
}

/// Builder that carries the definition's attributes over unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBuilder;

impl DefaultBuilder {
    pub fn shared() -> Arc<dyn ArtifactBuilder> {
        Arc::new(Self)
    }
}

impl ArtifactBuilder for DefaultBuilder {
    fn build(&self, definition: &Definition) -> Artifact {
        Artifact {
            category: definition.category,
            identifier: definition.identifier.clone(),
            name: definition.name.clone(),
            description: definition.description.clone(),
            fields: definition.fields.clone(),
            interfaces: definition.interfaces.clone(),
            attrs: definition.attrs.clone(),
        }
    }
}

/// Something artifacts can be imported from by identifier
pub trait ArtifactSource: Send + Sync {
    fn lookup_type(&self, identifier: &str) -> Option<Arc<Artifact>>;

    fn lookup_directive(&self, identifier: &str) -> Option<Arc<Artifact>>;

    fn lookup(&self, category: Category, identifier: &str) -> Option<Arc<Artifact>> {
        match category {
            Category::Type => self.lookup_type(identifier),
            Category::Directive => self.lookup_directive(identifier),
        }
    }
}

/// Named reference to an artifact source
#[derive(Clone)]
pub struct Source {
    name: String,
    inner: Arc<dyn ArtifactSource>,
}

impl Source {
    pub fn new(name: impl Into<String>, inner: Arc<dyn ArtifactSource>) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lookup(&self, category: Category, identifier: &str) -> Option<Arc<Artifact>> {
        self.inner.lookup(category, identifier)
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_builder_copies_definition() {
        let mut definition = Definition::build_type("user", "User", DefaultBuilder::shared())
            .with_description("A person")
            .with_field(FieldDefinition::new("email", "email"))
            .with_interface("node");
        definition.attrs.insert("kind".to_string(), json!("object"));

        let artifact = DefaultBuilder.build(&definition);
        assert_eq!(artifact.identifier, "user");
        assert_eq!(artifact.name, "User");
        assert_eq!(artifact.description.as_deref(), Some("A person"));
        assert!(artifact.field("email").is_some());
        assert_eq!(artifact.interfaces, vec!["node".to_string()]);
        assert_eq!(artifact.attrs.get("kind"), Some(&json!("object")));
    }

    #[test]
    fn test_closure_builder() {
        let builder: Arc<dyn ArtifactBuilder> = Arc::new(|definition: &Definition| {
            let mut artifact = DefaultBuilder.build(definition);
            artifact.name = artifact.name.to_uppercase();
            artifact
        });
        let definition = Definition::build_directive("skip", "skip", builder.clone());
        assert_eq!(builder.build(&definition).name, "SKIP");
    }
}
