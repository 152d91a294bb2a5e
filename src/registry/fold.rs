//! Registry Fold
//!
//! Registers definitions one at a time, in list order. Conflicts are checked
//! against what earlier definitions registered, so the first occurrence wins
//! and every later duplicate is reported. Types and directives share one code
//! path and differ only in their conflict rules.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use super::exports::is_exported;
use super::producer::{Producer, Slot};
use super::Registry;
use crate::definition::{Category, Definition, Identifier};
use crate::diagnostics::{ErrorData, ErrorRecord, RuleKind};

pub const TYPE_IDENTIFIER: &str = "Type identifier";
pub const TYPE_NAME: &str = "Type name";
pub const DIRECTIVE_IDENTIFIER: &str = "Directive identifier";

// =============================================================================
// Conflict Rules
// =============================================================================

/// A uniqueness axis checked against earlier registrations
#[derive(Debug, Clone, Copy)]
enum Conflict {
    Identifier(&'static str),
    Name(&'static str),
}

const TYPE_CONFLICTS: &[Conflict] = &[
    Conflict::Identifier(TYPE_IDENTIFIER),
    Conflict::Name(TYPE_NAME),
];
const DIRECTIVE_CONFLICTS: &[Conflict] = &[Conflict::Identifier(DIRECTIVE_IDENTIFIER)];

impl Conflict {
    fn detect(self, index: &CategoryIndex, definition: &Definition) -> Option<ErrorData> {
        match self {
            Self::Identifier(artifact) => index
                .map
                .contains_key(&definition.identifier)
                .then(|| ErrorData::new(artifact, definition.identifier.clone())),
            Self::Name(artifact) => index
                .names
                .contains_key(&definition.name)
                .then(|| ErrorData::new(artifact, definition.name.clone())),
        }
    }
}

fn conflicts_for(category: Category) -> &'static [Conflict] {
    match category {
        Category::Type => TYPE_CONFLICTS,
        Category::Directive => DIRECTIVE_CONFLICTS,
    }
}

// =============================================================================
// Category Index
// =============================================================================

/// Registered definitions of one category
#[derive(Debug, Default)]
pub(crate) struct CategoryIndex {
    /// identifier -> declared name
    pub map: BTreeMap<Identifier, String>,
    /// declared name -> identifier of its first registration
    pub names: BTreeMap<String, Identifier>,
    pub slots: Vec<Slot>,
    positions: HashMap<Identifier, usize>,
}

impl CategoryIndex {
    fn insert(&mut self, definition: Definition) {
        let identifier = definition.identifier.clone();
        self.map.insert(identifier.clone(), definition.name.clone());
        self.names
            .entry(definition.name.clone())
            .or_insert_with(|| identifier.clone());
        self.positions.insert(identifier.clone(), self.slots.len());
        self.slots.push(Slot::new(identifier, Producer::for_definition(definition)));
    }

    /// Find a slot by identifier only
    pub fn get(&self, identifier: &str) -> Option<&Slot> {
        self.positions.get(identifier).map(|&i| &self.slots[i])
    }

    /// Find a slot by identifier, falling back to declared name
    pub fn resolve(&self, key: &str) -> Option<&Slot> {
        match self.get(key) {
            Some(slot) => Some(slot),
            None => self.get(self.names.get(key)?),
        }
    }
}

// =============================================================================
// Fold
// =============================================================================

/// Fold rule-checked definitions into a registry, keeping `errors` first
pub(crate) fn fold(
    definitions: Vec<Definition>,
    errors: Vec<ErrorRecord>,
    builtin_source: &str,
) -> Registry {
    let initial = Registry {
        types: CategoryIndex::default(),
        directives: CategoryIndex::default(),
        implementors: BTreeMap::new(),
        exports: BTreeSet::new(),
        errors,
    };

    definitions
        .into_iter()
        .fold(initial, |registry, definition| register(registry, definition, builtin_source))
}

fn register(mut registry: Registry, definition: Definition, builtin_source: &str) -> Registry {
    let conflicts: Vec<ErrorRecord> = {
        let index = registry.index(definition.category);
        conflicts_for(definition.category)
            .iter()
            .filter_map(|conflict| conflict.detect(index, &definition))
            .map(|data| ErrorRecord::at(RuleKind::TypeNamesAreUnique, &definition, data))
            .collect()
    };

    // Implementors and exports are recorded even for conflicting definitions
    if definition.is_type() {
        for interface in &definition.interfaces {
            registry
                .implementors
                .entry(interface.clone())
                .or_default()
                .insert(definition.identifier.clone());
        }
    }

    if is_exported(&definition, builtin_source) {
        registry.exports.insert(definition.identifier.clone());
    }

    if conflicts.is_empty() {
        match definition.category {
            Category::Type => registry.types.insert(definition),
            Category::Directive => registry.directives.insert(definition),
        }
    } else {
        for error in &conflicts {
            debug!(
                category = %definition.category,
                artifact = %error.data.artifact,
                value = %error.data.value,
                location = %error.location,
                "definition conflicts with an earlier registration"
            );
        }
    }

    registry.errors.extend(conflicts);
    registry
}
