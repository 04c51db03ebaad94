//! Built-in expression evaluators.

mod not;
mod path;
mod string;
mod structure;

pub use not::NotEvaluator;
pub use path::PathEvaluator;
pub use string::StringEvaluator;
pub use structure::StructureEvaluator;
