//! Zope Page Templates for Rust.
//!
//! A page template is an ordinary XML or HTML document whose `tal:*` and
//! `metal:*` attributes say how to transform it: TAL for conditions, loops,
//! substitution and attributes, METAL for macros and slots, and TALES for
//! the expressions inside both.
//!
//! ```
//! use serde_json::json;
//! use zpt::ZptRenderer;
//!
//! let renderer = ZptRenderer::new();
//! let out = renderer
//!     .render_json(
//!         r#"<ul><li tal:repeat="name here/names" tal:content="name"/></ul>"#,
//!         &json!({"names": ["a", "b"]}),
//!     )
//!     .unwrap();
//! assert_eq!(out, "<ul><li>a</li><li>b</li></ul>");
//! ```
//!
//! The member crates are re-exported for hosts that need the lower levels:
//! custom evaluators ([`tales`]), other document adapters ([`dom`]) or
//! individual passes ([`tal`], [`metal`]).

pub mod batch;
pub mod builder;
pub mod error;
pub mod renderer;

pub use batch::RenderJob;
pub use builder::RendererBuilder;
pub use error::ZptError;
pub use renderer::{Options, ZptRenderer};

pub use zpt_dom as dom;
pub use zpt_metal as metal;
pub use zpt_tal as tal;
pub use zpt_tales as tales;
pub use zpt_template_core as template_core;

pub use zpt_dom::DocumentMode;
pub use zpt_tales::{HostObject, PathHandler, TypeDescriptor, Value};
pub use zpt_template_core::{RenderConfig, RenderError};
