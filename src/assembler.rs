//! Schema Assembler
//!
//! Runs the full pass over a definition list:
//!
//! ```text
//! definitions -> description overlay -> trigger linking -> rule checks -> fold -> Registry
//! ```
//!
//! The pass is synchronous and deterministic. It never stops early; every
//! error it can find is returned on the registry.

use tracing::{info, info_span};

use crate::config::AssemblyConfig;
use crate::definition::Definition;
use crate::overlay::{apply_descriptions, Descriptions};
use crate::registry::{fold, Registry};
use crate::rules::RulePipeline;
use crate::triggers::link_triggers;

/// Assembles definition lists into registries
#[derive(Debug)]
pub struct Assembler {
    config: AssemblyConfig,
    rules: RulePipeline,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(AssemblyConfig::default())
    }
}

impl Assembler {
    /// Assembler running the rules enabled in `config`
    pub fn new(config: AssemblyConfig) -> Self {
        let rules = RulePipeline::from_config(&config.rules);
        Self { config, rules }
    }

    /// Assembler running a caller-supplied rule pipeline
    pub fn with_rules(config: AssemblyConfig, rules: RulePipeline) -> Self {
        Self { config, rules }
    }

    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    pub fn rules(&self) -> &RulePipeline {
        &self.rules
    }

    /// Run the assembly pass
    pub fn assemble(&self, definitions: Vec<Definition>, descriptions: &Descriptions) -> Registry {
        let span = info_span!("assemble", definitions = definitions.len());
        let _guard = span.enter();

        let schema = &self.config.schema;
        let definitions = apply_descriptions(definitions, descriptions);
        let definitions = link_triggers(definitions, &schema.mutation, &schema.subscription);
        let (definitions, errors) = self.rules.run(definitions);
        let registry = fold::fold(definitions, errors, &schema.builtin_source);

        info!(
            types = registry.type_map().len(),
            directives = registry.directive_map().len(),
            exports = registry.exports().len(),
            errors = registry.errors().len(),
            "schema assembled"
        );
        registry
    }
}

/// Assemble with the default configuration and the given rules
pub fn assemble(
    definitions: Vec<Definition>,
    descriptions: &Descriptions,
    rules: RulePipeline,
) -> Registry {
    Assembler::with_rules(AssemblyConfig::default(), rules).assemble(definitions, descriptions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::DefaultBuilder;
    use crate::definition::{FieldDefinition, FieldImport, TriggerDeclaration};
    use crate::diagnostics::RuleKind;
    use crate::triggers::TRIGGERS_ATTR;
    use serde_json::json;

    #[test]
    fn test_descriptions_reach_artifacts() {
        let descriptions: Descriptions = [("user".to_string(), "A person".to_string())]
            .into_iter()
            .collect();
        let registry = Assembler::default().assemble(
            vec![Definition::build_type("user", "User", DefaultBuilder::shared())],
            &descriptions,
        );
        let user = registry.lookup_type("user").unwrap();
        assert_eq!(user.description.as_deref(), Some("A person"));
    }

    #[test]
    fn test_custom_root_identifiers() {
        let mut config = AssemblyConfig::default();
        config.schema.mutation = "root_mutation".to_string();
        config.schema.subscription = "root_subscription".to_string();

        let definitions = vec![
            Definition::build_type("root_mutation", "Mutation", DefaultBuilder::shared())
                .with_field(FieldDefinition::new("create_post", "createPost")),
            Definition::build_type("root_subscription", "Subscription", DefaultBuilder::shared())
                .with_field(FieldDefinition::new("post_changed", "postChanged").with_trigger(
                    TriggerDeclaration::new(["create_post"], json!({"topic": "posts"})),
                )),
        ];

        let registry = Assembler::new(config).assemble(definitions, &Descriptions::new());
        let mutation = registry.lookup_type("Mutation").unwrap();
        assert_eq!(
            mutation.field("create_post").unwrap().attrs.get(TRIGGERS_ATTR),
            Some(&json!([["post_changed", {"topic": "posts"}]]))
        );
    }

    #[test]
    fn test_rule_errors_precede_fold_errors() {
        let definitions = vec![
            Definition::build_type("person", "Person", DefaultBuilder::shared())
                .with_field_import(FieldImport::new("missing")),
            Definition::build_type("person", "Person", DefaultBuilder::shared()),
        ];

        let registry = assemble(definitions, &Descriptions::new(), RulePipeline::standard());
        let rules: Vec<_> = registry.errors().iter().map(|e| e.rule).collect();
        assert_eq!(
            rules,
            vec![
                RuleKind::FieldImportsExist,
                RuleKind::TypeNamesAreUnique,
                RuleKind::TypeNamesAreUnique,
            ]
        );
    }

    #[test]
    fn test_disabled_rules_do_not_run() {
        let mut config = AssemblyConfig::default();
        config.rules.field_imports_exist = false;

        let definitions = vec![Definition::build_type("person", "Person", DefaultBuilder::shared())
            .with_field_import(FieldImport::new("missing"))];

        let registry = Assembler::new(config).assemble(definitions, &Descriptions::new());
        assert!(registry.is_valid());
    }
}
