//! Field Import Cycles
//!
//! Builds the import graph between types, rejects every type that takes part
//! in a cycle and resolves the remaining imports in dependency order so each
//! importing type ends up carrying the fields it pulls in.

use petgraph::algo::{kosaraju_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

use super::{Checked, Rule};
use crate::definition::{Definition, FieldDefinition, Identifier};
use crate::diagnostics::{ErrorData, ErrorRecord, RuleKind};

pub const ARTIFACT: &str = "Field import cycle";

/// Drops types whose field imports form a cycle and resolves the rest
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCircularFieldImports;

impl Rule for NoCircularFieldImports {
    fn name(&self) -> &str {
        "no_circular_field_imports"
    }

    fn check(&self, definitions: Vec<Definition>, mut errors: Vec<ErrorRecord>) -> Checked {
        let graph = ImportGraph::build(&definitions);
        let cyclic = graph.cyclic();

        let (rejected, kept): (Vec<_>, Vec<_>) = definitions
            .into_iter()
            .partition(|d| d.is_type() && cyclic.contains(&d.identifier));

        for definition in &rejected {
            tracing::debug!(identifier = %definition.identifier, "field import cycle");
            errors.push(ErrorRecord::at(
                RuleKind::NoCircularFieldImports,
                definition,
                ErrorData::new(ARTIFACT, definition.identifier.clone()),
            ));
        }

        let resolved = resolve_imports(&kept, &graph.resolution_order(&cyclic));
        let definitions = kept
            .into_iter()
            .map(|mut definition| {
                if definition.is_type() && !definition.field_imports.is_empty() {
                    definition.fields = merge_imports(&definition, &resolved);
                }
                definition
            })
            .collect();

        (definitions, errors)
    }
}

// =============================================================================
// Import Graph
// =============================================================================

/// Directed graph of type -> imported type
struct ImportGraph {
    graph: DiGraph<Identifier, ()>,
}

impl ImportGraph {
    fn build(definitions: &[Definition]) -> Self {
        let mut graph = DiGraph::new();
        let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();

        for definition in definitions.iter().filter(|d| d.is_type()) {
            nodes
                .entry(definition.identifier.as_str())
                .or_insert_with(|| graph.add_node(definition.identifier.clone()));
        }

        for definition in definitions.iter().filter(|d| d.is_type()) {
            let from = nodes[definition.identifier.as_str()];
            for import in &definition.field_imports {
                // Missing targets are reported by FieldImportsExist
                if let Some(&to) = nodes.get(import.from.as_str()) {
                    graph.update_edge(from, to, ());
                }
            }
        }

        Self { graph }
    }

    /// Identifiers in a multi-member SCC or with a self import
    fn cyclic(&self) -> HashSet<Identifier> {
        kosaraju_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]))
            .flatten()
            .map(|idx| self.graph[idx].clone())
            .collect()
    }

    /// Acyclic identifiers, imported types before their importers
    fn resolution_order(&self, cyclic: &HashSet<Identifier>) -> Vec<Identifier> {
        let acyclic = self.graph.filter_map(
            |_, id| (!cyclic.contains(id)).then(|| id.clone()),
            |_, edge| Some(*edge),
        );

        match toposort(&acyclic, None) {
            Ok(order) => order.into_iter().rev().map(|idx| acyclic[idx].clone()).collect(),
            Err(cycle) => {
                tracing::warn!(
                    node = ?cycle.node_id(),
                    "import graph still cyclic, imports left unresolved"
                );
                Vec::new()
            }
        }
    }
}

// =============================================================================
// Resolution
// =============================================================================

fn resolve_imports(
    definitions: &[Definition],
    order: &[Identifier],
) -> HashMap<Identifier, Vec<FieldDefinition>> {
    let mut by_id: HashMap<&str, &Definition> = HashMap::new();
    for definition in definitions.iter().filter(|d| d.is_type()) {
        by_id.entry(definition.identifier.as_str()).or_insert(definition);
    }

    let mut resolved = HashMap::new();
    for identifier in order {
        if let Some(definition) = by_id.get(identifier.as_str()) {
            let fields = merge_imports(definition, &resolved);
            resolved.insert(identifier.clone(), fields);
        }
    }
    resolved
}

/// Own fields first, then imported ones not already declared
fn merge_imports(
    definition: &Definition,
    resolved: &HashMap<Identifier, Vec<FieldDefinition>>,
) -> Vec<FieldDefinition> {
    let mut fields = definition.fields.clone();

    for import in &definition.field_imports {
        let Some(imported) = resolved.get(&import.from) else {
            continue;
        };
        for field in imported {
            if import.except.contains(&field.identifier) {
                continue;
            }
            if fields.iter().any(|f| f.identifier == field.identifier) {
                continue;
            }
            fields.push(field.clone());
        }
    }

    fields
}
