//! Export rule

use crate::definition::Definition;

/// Whether `definition` is visible outside the registry it is assembled into
///
/// Everything is exported unless it is imported from the built-in library.
/// An explicit `export` option overrides the default either way.
pub fn is_exported(definition: &Definition, builtin_source: &str) -> bool {
    definition
        .opts
        .export
        .unwrap_or_else(|| definition.origin.source_name() != Some(builtin_source))
}
