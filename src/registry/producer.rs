//! Deferred artifact construction
//!
//! Registration never builds anything. It records a [`Producer`] that says how
//! the artifact is obtained; the registry realizes it on first lookup.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::artifact::{Artifact, ArtifactBuilder, Source};
use crate::definition::{Category, Definition, Identifier, Origin};

/// How to obtain the artifact of one registered definition
#[derive(Clone)]
pub enum Producer {
    /// Ask `source` for its artifact with this identifier
    Import {
        source: Source,
        category: Category,
        identifier: Identifier,
    },
    /// Ask `builder` to construct the artifact from `definition`
    Build {
        builder: Arc<dyn ArtifactBuilder>,
        definition: Box<Definition>,
    },
}

impl Producer {
    pub fn for_definition(definition: Definition) -> Self {
        match definition.origin.clone() {
            Origin::Import(source) => Self::Import {
                source,
                category: definition.category,
                identifier: definition.identifier,
            },
            Origin::Build(builder) => Self::Build {
                builder,
                definition: Box::new(definition),
            },
        }
    }

    /// Run the import or the build
    pub fn realize(&self) -> Option<Arc<Artifact>> {
        match self {
            Self::Import {
                source,
                category,
                identifier,
            } => source.lookup(*category, identifier),
            Self::Build { builder, definition } => Some(Arc::new(builder.build(definition))),
        }
    }

    pub fn source_name(&self) -> Option<&str> {
        match self {
            Self::Import { source, .. } => Some(source.name()),
            Self::Build { .. } => None,
        }
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Import {
                source,
                category,
                identifier,
            } => f
                .debug_struct("Import")
                .field("source", &source.name())
                .field("category", category)
                .field("identifier", identifier)
                .finish(),
            Self::Build { definition, .. } => f
                .debug_struct("Build")
                .field("identifier", &definition.identifier)
                .finish(),
        }
    }
}

/// A registered definition and its realized artifact, once asked for
#[derive(Debug)]
pub(crate) struct Slot {
    pub identifier: Identifier,
    pub producer: Producer,
    artifact: OnceLock<Option<Arc<Artifact>>>,
}

impl Slot {
    pub fn new(identifier: Identifier, producer: Producer) -> Self {
        Self {
            identifier,
            producer,
            artifact: OnceLock::new(),
        }
    }

    pub fn artifact(&self) -> Option<Arc<Artifact>> {
        self.artifact.get_or_init(|| self.producer.realize()).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::DefaultBuilder;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_slot_realizes_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let builder: Arc<dyn ArtifactBuilder> = Arc::new(move |definition: &Definition| {
            counter.fetch_add(1, Ordering::SeqCst);
            DefaultBuilder.build(definition)
        });

        let definition = Definition::build_type("user", "User", builder);
        let slot = Slot::new("user".to_string(), Producer::for_definition(definition));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let first = slot.artifact().unwrap();
        let second = slot.artifact().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_import_producer_keeps_identifier() {
        let source = crate::builtins::source();
        let definition = Definition::import(Category::Type, "string", "String", source);
        let producer = Producer::for_definition(definition);

        assert_eq!(producer.source_name(), Some("builtins"));
        assert_eq!(producer.realize().unwrap().name, "String");
    }
}
