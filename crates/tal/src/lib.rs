//! TAL, the template attribute language.
//!
//! [`TalVisitor`] walks a document depth first. Each element's TAL
//! attributes are handled by the [`AttributePipeline`] in a fixed order, and
//! the element's children are visited in the scope the pipeline left
//! behind. [`CleanupPass`] then removes whatever template vocabulary is left.

pub mod cleanup;
pub mod definitions;
pub mod handlers;
pub mod pipeline;
pub mod repetition;
pub mod visitor;

pub use cleanup::{CleanupPass, purge_reserved_attributes};
pub use definitions::{
    AttributeDefinition, DefinitionScope, InsertionMode, NodeExpression, RepeatDefinition,
    VariableDefinition, get_definitions,
};
pub use pipeline::{AttributeHandler, AttributePipeline, ChildVisit, HandlingResult, LiveElement};
pub use repetition::RepetitionContextProvider;
pub use visitor::TalVisitor;
