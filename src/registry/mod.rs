//! Schema Registry
//!
//! The validated, queryable result of an assembly pass. A registry is built
//! once and never mutated afterwards; artifacts are realized lazily on first
//! lookup and cached, so a registry can be shared across threads freely.

pub mod exports;
pub mod fold;
pub mod producer;
pub mod report;

pub use fold::{DIRECTIVE_IDENTIFIER, TYPE_IDENTIFIER, TYPE_NAME};
pub use producer::Producer;
pub use report::RegistryReport;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::artifact::{Artifact, ArtifactSource};
use crate::definition::{Category, Identifier};
use crate::diagnostics::ErrorRecord;
use crate::error::{AssemblyError, Result};
use fold::CategoryIndex;

/// Assembled schema registry
#[derive(Debug)]
pub struct Registry {
    types: CategoryIndex,
    directives: CategoryIndex,
    /// interface identifier -> identifiers of types declaring it
    implementors: BTreeMap<Identifier, BTreeSet<Identifier>>,
    exports: BTreeSet<Identifier>,
    errors: Vec<ErrorRecord>,
}

impl Registry {
    fn index(&self, category: Category) -> &CategoryIndex {
        match category {
            Category::Type => &self.types,
            Category::Directive => &self.directives,
        }
    }

    /// Look up a type by identifier or declared name
    pub fn lookup_type(&self, key: &str) -> Option<Arc<Artifact>> {
        self.types.resolve(key)?.artifact()
    }

    /// Look up a directive by identifier or declared name
    pub fn lookup_directive(&self, key: &str) -> Option<Arc<Artifact>> {
        self.directives.resolve(key)?.artifact()
    }

    /// Registered types, identifier -> declared name
    pub fn type_map(&self) -> &BTreeMap<Identifier, String> {
        &self.types.map
    }

    /// Registered directives, identifier -> declared name
    pub fn directive_map(&self) -> &BTreeMap<Identifier, String> {
        &self.directives.map
    }

    pub fn implementors(&self) -> &BTreeMap<Identifier, BTreeSet<Identifier>> {
        &self.implementors
    }

    /// Types declaring `interface`, including ones that failed registration
    pub fn implementors_of(&self, interface: &str) -> impl Iterator<Item = &Identifier> {
        self.implementors.get(interface).into_iter().flatten()
    }

    pub fn exports(&self) -> &BTreeSet<Identifier> {
        &self.exports
    }

    pub fn is_exported(&self, identifier: &str) -> bool {
        self.exports.contains(identifier)
    }

    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    /// True when the pass found no errors
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Type identifiers in registration order
    pub fn type_identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.types.slots.iter().map(|s| &s.identifier)
    }

    /// Directive identifiers in registration order
    pub fn directive_identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.directives.slots.iter().map(|s| &s.identifier)
    }

    /// Producers in registration order
    pub fn producers(&self, category: Category) -> impl Iterator<Item = (&Identifier, &Producer)> {
        self.index(category).slots.iter().map(|s| (&s.identifier, &s.producer))
    }

    /// Realize every registered artifact
    ///
    /// Fails on the first import whose source has no artifact for the
    /// identifier. Returns the number of artifacts realized.
    pub fn materialize(&self) -> Result<usize> {
        let mut count = 0;
        for category in [Category::Type, Category::Directive] {
            for slot in &self.index(category).slots {
                if slot.artifact().is_none() {
                    return Err(AssemblyError::MissingImport {
                        category,
                        identifier: slot.identifier.clone(),
                        source_name: slot.producer.source_name().unwrap_or_default().to_string(),
                    });
                }
                count += 1;
            }
        }
        tracing::debug!(artifacts = count, "registry materialized");
        Ok(count)
    }

    /// Serializable snapshot of the registry tables
    pub fn report(&self) -> RegistryReport {
        RegistryReport::from_registry(self)
    }
}

// Imports name artifacts by identifier; the declared-name alias is for callers only
impl ArtifactSource for Registry {
    fn lookup_type(&self, identifier: &str) -> Option<Arc<Artifact>> {
        self.types.get(identifier)?.artifact()
    }

    fn lookup_directive(&self, identifier: &str) -> Option<Arc<Artifact>> {
        self.directives.get(identifier)?.artifact()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{DefaultBuilder, Source};
    use crate::builtins;
    use crate::definition::Definition;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_registry_is_shareable() {
        assert_send_sync::<Registry>();
    }

    #[test]
    fn test_lookup_by_identifier_and_name() {
        let registry = fold::fold(
            vec![
                Definition::build_type("user", "User", DefaultBuilder::shared()),
                Definition::build_directive("feature", "featureFlag", DefaultBuilder::shared()),
            ],
            Vec::new(),
            "builtins",
        );

        let by_id = registry.lookup_type("user").unwrap();
        let by_name = registry.lookup_type("User").unwrap();
        assert!(Arc::ptr_eq(&by_id, &by_name));
        assert_eq!(registry.lookup_directive("featureFlag").unwrap().identifier, "feature");
        assert!(registry.lookup_type("feature").is_none());
    }

    #[test]
    fn test_materialize_reports_missing_import() {
        let empty = Arc::new(fold::fold(Vec::new(), Vec::new(), "builtins"));
        let registry = fold::fold(
            vec![
                Definition::build_type("user", "User", DefaultBuilder::shared()),
                Definition::import(Category::Type, "ghost", "Ghost", Source::new("empty", empty)),
            ],
            Vec::new(),
            "builtins",
        );

        match registry.materialize() {
            Err(AssemblyError::MissingImport {
                identifier,
                source_name,
                ..
            }) => {
                assert_eq!(identifier, "ghost");
                assert_eq!(source_name, "empty");
            }
            other => panic!("Expected MissingImport, got {:?}", other),
        }
    }

    #[test]
    fn test_producers_in_registration_order() {
        let registry = fold::fold(
            vec![
                Definition::build_type("b", "B", DefaultBuilder::shared()),
                Definition::build_type("a", "A", DefaultBuilder::shared()),
            ],
            Vec::new(),
            "builtins",
        );

        let ids: Vec<_> = registry
            .producers(Category::Type)
            .map(|(id, _)| id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
        let ordered: Vec<_> = registry.type_identifiers().map(String::as_str).collect();
        assert_eq!(ordered, ids);
        assert_eq!(registry.directive_identifiers().count(), 0);
        assert_eq!(registry.materialize().unwrap(), 2);
    }

    #[test]
    fn test_source_lookup_ignores_declared_names() {
        let registry = builtins::registry();

        assert_eq!(registry.lookup_type("Int").unwrap().identifier, "integer");
        assert!(ArtifactSource::lookup_type(&registry, "Int").is_none());
        assert!(ArtifactSource::lookup_type(&registry, "integer").is_some());
    }

    #[test]
    fn test_import_by_declared_name_is_missing() {
        let registry = fold::fold(
            vec![Definition::import(Category::Type, "Int", "Int", builtins::source())],
            Vec::new(),
            builtins::SOURCE_NAME,
        );

        assert!(registry.lookup_type("Int").is_none());
        match registry.materialize() {
            Err(AssemblyError::MissingImport { identifier, .. }) => assert_eq!(identifier, "Int"),
            other => panic!("Expected MissingImport, got {:?}", other),
        }
    }
}
