//! Registry report
//!
//! A plain-data snapshot of the registry tables, suitable for JSON output and
//! for comparing two assembly runs.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::Registry;
use crate::checksum::Checksum;
use crate::definition::Identifier;
use crate::diagnostics::ErrorRecord;

/// Registry tables without the artifacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTables {
    pub types: BTreeMap<Identifier, String>,
    pub directives: BTreeMap<Identifier, String>,
    pub implementors: BTreeMap<Identifier, BTreeSet<Identifier>>,
    pub exports: BTreeSet<Identifier>,
    pub errors: Vec<ErrorRecord>,
}

/// Snapshot of a registry with a fingerprint over its tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryReport {
    #[serde(flatten)]
    pub tables: ReportTables,
    /// SHA256 of the canonical JSON of `tables`
    pub fingerprint: Checksum,
}

impl RegistryReport {
    pub fn from_registry(registry: &Registry) -> Self {
        let tables = ReportTables {
            types: registry.type_map().clone(),
            directives: registry.directive_map().clone(),
            implementors: registry.implementors().clone(),
            exports: registry.exports().clone(),
            errors: registry.errors().to_vec(),
        };
        let fingerprint = fingerprint(&tables);
        Self { tables, fingerprint }
    }

    /// Recompute the fingerprint and compare
    pub fn verify(&self) -> bool {
        serde_json::to_value(&self.tables)
            .map(|value| self.fingerprint.verify_json(&value))
            .unwrap_or(false)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn fingerprint(tables: &ReportTables) -> Checksum {
    Checksum::from_json(&serde_json::to_value(tables).unwrap_or_default())
}
