//! Field imports must reference a defined type

use std::collections::HashSet;

use super::{Checked, Rule};
use crate::definition::Definition;
use crate::diagnostics::{ErrorData, ErrorRecord, RuleKind};

pub const ARTIFACT: &str = "Field import";

/// Flags every field import whose source type is not in the set
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldImportsExist;

impl Rule for FieldImportsExist {
    fn name(&self) -> &str {
        "field_imports_exist"
    }

    fn check(&self, definitions: Vec<Definition>, mut errors: Vec<ErrorRecord>) -> Checked {
        let types: HashSet<&str> = definitions
            .iter()
            .filter(|d| d.is_type())
            .map(|d| d.identifier.as_str())
            .collect();

        for definition in &definitions {
            for import in &definition.field_imports {
                if !types.contains(import.from.as_str()) {
                    errors.push(ErrorRecord::at(
                        RuleKind::FieldImportsExist,
                        definition,
                        ErrorData::new(ARTIFACT, import.from.clone()),
                    ));
                }
            }
        }

        (definitions, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::DefaultBuilder;
    use crate::definition::{FieldImport, Location};

    #[test]
    fn test_missing_import_is_reported() {
        let definitions = vec![
            Definition::build_type("person", "Person", DefaultBuilder::shared())
                .with_field_import(FieldImport::new("named"))
                .with_field_import(FieldImport::new("missing"))
                .with_location(Location::new("schema.ex", 4)),
            Definition::build_type("named", "Named", DefaultBuilder::shared()),
        ];

        let (definitions, errors) = FieldImportsExist.check(definitions, Vec::new());
        assert_eq!(definitions.len(), 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, RuleKind::FieldImportsExist);
        assert_eq!(errors[0].data, ErrorData::new(ARTIFACT, "missing"));
        assert_eq!(errors[0].location, Location::new("schema.ex", 4));
    }

    #[test]
    fn test_directive_is_not_an_import_target() {
        let definitions = vec![
            Definition::build_type("person", "Person", DefaultBuilder::shared())
                .with_field_import(FieldImport::new("skip")),
            Definition::build_directive("skip", "skip", DefaultBuilder::shared()),
        ];

        let (_, errors) = FieldImportsExist.check(definitions, Vec::new());
        assert_eq!(errors.len(), 1);
    }
}
