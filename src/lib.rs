//! Familiar Schema Assembly
//!
//! Turns a flat list of type and directive definitions into a validated,
//! queryable schema registry.
//!
//! ## Features
//!
//! - **Duplicate Detection**: Identifier and type name collisions, first declaration wins
//! - **Trigger Linking**: Subscription triggers copied onto the mutation fields that fire them
//! - **Pluggable Rules**: Field import existence and import cycle detection, or your own
//! - **Deferred Artifacts**: Types are imported or built lazily, on first lookup
//! - **Error Accumulation**: One pass reports every problem it finds
//!
//! ## Pipeline
//!
//! ```text
//! Vec<Definition>
//!   ├── apply_descriptions   (overlay)
//!   ├── link_triggers        (mutation <- subscription)
//!   ├── RulePipeline::run    (FieldImportsExist, NoCircularFieldImports, ...)
//!   └── fold                 (conflicts, implementors, exports, producers)
//!         └── Registry
//! ```

pub mod artifact;
pub mod assembler;
pub mod builtins;
pub mod checksum;
pub mod config;
pub mod definition;
pub mod diagnostics;
pub mod error;
pub mod loader;
pub mod overlay;
pub mod registry;
pub mod rules;
pub mod triggers;

pub use artifact::{Artifact, ArtifactBuilder, ArtifactSource, DefaultBuilder, Source};
pub use assembler::{assemble, Assembler};
pub use checksum::Checksum;
pub use config::AssemblyConfig;
pub use definition::{
    Category, DeclarationOpts, Definition, FieldDefinition, FieldImport, Identifier, Location,
    Origin, TriggerDeclaration,
};
pub use diagnostics::{ErrorData, ErrorRecord, RuleKind};
pub use error::{AssemblyError, Result};
pub use overlay::Descriptions;
pub use registry::{Producer, Registry, RegistryReport};
pub use rules::{Checked, Rule, RulePipeline};
