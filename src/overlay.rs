//! Description overlay
//!
//! Descriptions can be collected apart from the definitions they describe.
//! The overlay writes them back before anything else looks at the set.

use std::collections::HashMap;

use crate::definition::{Definition, Identifier};

/// Descriptions keyed by definition identifier
pub type Descriptions = HashMap<Identifier, String>;

/// Replace or insert the description of every definition that has an entry
pub fn apply_descriptions(
    definitions: Vec<Definition>,
    descriptions: &Descriptions,
) -> Vec<Definition> {
    definitions
        .into_iter()
        .map(|mut definition| {
            if let Some(text) = descriptions.get(&definition.identifier) {
                definition.description = Some(text.clone());
            }
            definition
        })
        .collect()
}
