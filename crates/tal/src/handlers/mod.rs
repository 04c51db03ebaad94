mod attributes;
mod condition;
mod content;
mod define;
mod omit_tag;
mod on_error;
mod repeat;

pub use attributes::AttributesHandler;
pub use condition::ConditionHandler;
pub use content::ContentOrReplaceHandler;
pub use define::DefineHandler;
pub use omit_tag::OmitTagHandler;
pub use on_error::OnErrorHandler;
pub use repeat::RepeatHandler;

pub(crate) use content::nodes_for;
