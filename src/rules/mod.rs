//! Rule Checks
//!
//! Whole-set checks that run before registration. Each rule receives the
//! definitions and the errors found so far and hands back a possibly
//! transformed set with its own errors appended. Definitions a rule drops
//! never reach the registry.

pub mod field_imports_exist;
pub mod no_circular_field_imports;

pub use field_imports_exist::FieldImportsExist;
pub use no_circular_field_imports::NoCircularFieldImports;

use std::fmt;

use crate::config::RulesConfig;
use crate::definition::Definition;
use crate::diagnostics::ErrorRecord;

/// Definitions and errors handed from one rule to the next
pub type Checked = (Vec<Definition>, Vec<ErrorRecord>);

/// A check over the whole definition set
pub trait Rule: Send + Sync {
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn check(&self, definitions: Vec<Definition>, errors: Vec<ErrorRecord>) -> Checked;
}

impl<F> Rule for F
where
    F: Fn(Vec<Definition>, Vec<ErrorRecord>) -> Checked + Send + Sync,
{
    fn check(&self, definitions: Vec<Definition>, errors: Vec<ErrorRecord>) -> Checked {
        self(definitions, errors)
    }
}

/// Ordered sequence of rules
#[derive(Default)]
pub struct RulePipeline {
    rules: Vec<Box<dyn Rule>>,
}

impl RulePipeline {
    /// Pipeline with no rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Field import existence followed by cycle detection
    pub fn standard() -> Self {
        Self::new().with(FieldImportsExist).with(NoCircularFieldImports)
    }

    /// Pipeline with the rules enabled in `config`, in standard order
    pub fn from_config(config: &RulesConfig) -> Self {
        let mut pipeline = Self::new();
        if config.field_imports_exist {
            pipeline.push(FieldImportsExist);
        }
        if config.no_circular_field_imports {
            pipeline.push(NoCircularFieldImports);
        }
        pipeline
    }

    pub fn with(mut self, rule: impl Rule + 'static) -> Self {
        self.push(rule);
        self
    }

    pub fn push(&mut self, rule: impl Rule + 'static) {
        self.rules.push(Box::new(rule));
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule in order, starting from an empty error list
    pub fn run(&self, definitions: Vec<Definition>) -> (Vec<Definition>, Vec<ErrorRecord>) {
        self.rules
            .iter()
            .fold((definitions, Vec::new()), |(definitions, errors), rule| {
                let before = errors.len();
                let (definitions, errors) = rule.check(definitions, errors);
                tracing::debug!(
                    rule = rule.name(),
                    new_errors = errors.len().saturating_sub(before),
                    remaining = definitions.len(),
                    "rule check finished"
                );
                (definitions, errors)
            })
    }
}

impl fmt::Debug for RulePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rules.iter().map(|r| r.name())).finish()
    }
}
