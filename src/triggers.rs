//! Trigger linking
//!
//! Subscription fields declare which mutation fields fire them. This pre-pass
//! copies those declarations onto the mutation fields so the mutation side
//! knows which subscriptions to notify. It produces a new definition list and
//! never touches anything but the mutation definition.

use serde_json::Value;
use tracing::debug;

use crate::definition::{Definition, FieldDefinition};

/// Attribute key the linked triggers are stored under on a mutation field
pub const TRIGGERS_ATTR: &str = "triggers";

/// Link subscription triggers onto the mutation fields they name
///
/// Only applies when exactly one type is identified as `mutation` and exactly
/// one as `subscription`; otherwise the list is returned unchanged.
pub fn link_triggers(
    definitions: Vec<Definition>,
    mutation: &str,
    subscription: &str,
) -> Vec<Definition> {
    let (Some(mutation_idx), Some(subscription_idx)) = (
        single_type_index(&definitions, mutation),
        single_type_index(&definitions, subscription),
    ) else {
        return definitions;
    };

    let linked = link_fields(&definitions[mutation_idx], &definitions[subscription_idx]);

    definitions
        .into_iter()
        .enumerate()
        .map(|(i, definition)| if i == mutation_idx { linked.clone() } else { definition })
        .collect()
}

fn single_type_index(definitions: &[Definition], identifier: &str) -> Option<usize> {
    let mut matches = definitions
        .iter()
        .enumerate()
        .filter(|(_, d)| d.is_type() && d.identifier == identifier)
        .map(|(i, _)| i);

    let first = matches.next()?;
    match matches.next() {
        Some(_) => None,
        None => Some(first),
    }
}

fn link_fields(mutation: &Definition, subscription: &Definition) -> Definition {
    let mut updated = mutation.clone();
    updated.fields = mutation
        .fields
        .iter()
        .map(|field| link_field(field, subscription))
        .collect();
    updated
}

fn link_field(mutation_field: &FieldDefinition, subscription: &Definition) -> FieldDefinition {
    let triggers: Vec<Value> = subscription
        .fields
        .iter()
        .flat_map(|sub_field| {
            sub_field
                .triggers
                .iter()
                .filter(|t| t.fires_on(&mutation_field.identifier))
                .map(|t| {
                    Value::Array(vec![
                        Value::String(sub_field.identifier.clone()),
                        t.config.clone(),
                    ])
                })
        })
        .collect();

    if triggers.is_empty() {
        return mutation_field.clone();
    }

    debug!(
        field = %mutation_field.identifier,
        count = triggers.len(),
        "linked subscription triggers"
    );

    let mut field = mutation_field.clone();
    field.attrs.insert(TRIGGERS_ATTR.to_string(), Value::Array(triggers));
    field
}
