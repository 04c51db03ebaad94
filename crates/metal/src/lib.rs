//! METAL, the macro language of page templates.
//!
//! [`MetalVisitor`] runs before TAL. Every element carrying `metal:use-macro`
//! is replaced by a copy of the macro it names, with the usage's
//! `fill-slot` content put in place of the macro's `define-slot` elements.
//! A macro may `extend-macro` another; the chain is walked with nearer
//! fillers overriding those further away.
//!
//! Macros are ordinary element values. `template/macros/<name>` finds them
//! in the document being rendered, and a [`MetalDocument`] passed in as an
//! option exposes another document's macros the same way.

pub mod expander;
pub mod macros;
pub mod provider;
pub mod slots;
pub mod visitor;

pub use expander::MacroExpander;
pub use macros::{MacroCollection, MetalDocument, MetalMacro};
pub use provider::MacroProvider;
pub use slots::{Slot, SlotFiller, SlotFillers, SlotFinder};
pub use visitor::MetalVisitor;

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use std::rc::Rc;
    use std::sync::Arc;
    use zpt_dom::{DocumentMode, Node, XmlDocument};
    use zpt_tales::{EvaluatorRegistry, ExpressionContext, ObjectTraverser, RenderState, Value};
    use zpt_template_core::vocabulary::is_reserved;
    use zpt_template_core::{DocumentPass, RenderConfig, RenderError};

    fn expand_with(
        template: &str,
        options: IndexMap<String, Value>,
        config: &RenderConfig,
    ) -> Result<String, RenderError> {
        let _ = env_logger::builder().is_test(true).try_init();
        let doc = XmlDocument::parse(template, DocumentMode::Xml)?;
        let state = RenderState::new(
            Arc::new(EvaluatorRegistry::default()),
            Arc::new(ObjectTraverser::new()),
        )
        .with_template(Value::object(MetalDocument::snapshot(&doc.root())))
        .with_options(options);
        let context = ExpressionContext::new_root(doc.root(), Rc::new(state));
        MetalVisitor::new(config).process(&context)?;
        for element in doc.root().descendant_elements() {
            element.remove_attributes_where(&is_reserved);
        }
        Ok(doc.to_markup())
    }

    fn expand(template: &str) -> Result<String, RenderError> {
        expand_with(template, IndexMap::new(), &RenderConfig::default())
    }

    #[test]
    fn fill_slot_replaces_the_default_content() {
        let out = expand(concat!(
            r#"<body><div metal:define-macro="box"><h1 metal:define-slot="title">Default</h1><p>fixed</p></div>"#,
            r#"<section metal:use-macro="template/macros/box"><h2 metal:fill-slot="title">Mine</h2></section></body>"#,
        ))
        .unwrap();
        assert_eq!(
            out,
            "<body><div><h1>Default</h1><p>fixed</p></div><div><h2>Mine</h2><p>fixed</p></div></body>"
        );
    }

    #[test]
    fn unfilled_slots_keep_their_default() {
        let out = expand(concat!(
            r#"<body><div metal:define-macro="box"><h1 metal:define-slot="title">Default</h1></div>"#,
            r#"<p metal:use-macro="template/macros/box"/></body>"#,
        ))
        .unwrap();
        assert_eq!(out, "<body><div><h1>Default</h1></div><div><h1>Default</h1></div></body>");
    }

    #[test]
    fn extension_chain_fills_the_base_macro() {
        let out = expand(concat!(
            r#"<body><div metal:define-macro="base"><h1 metal:define-slot="title">Base</h1><p metal:define-slot="body">base body</p></div>"#,
            r#"<div metal:define-macro="child" metal:extend-macro="template/macros/base"><h1 metal:fill-slot="title">Child</h1></div>"#,
            r#"<section metal:use-macro="template/macros/child"><p metal:fill-slot="body">page body</p></section></body>"#,
        ))
        .unwrap();
        assert!(out.ends_with("<div><h1>Child</h1><p>page body</p></div></body>"), "{}", out);
    }

    #[test]
    fn usage_overrides_a_slot_the_extension_redefines() {
        let out = expand(concat!(
            r#"<body><div metal:define-macro="base"><h1 metal:define-slot="title">Base</h1></div>"#,
            r#"<div metal:define-macro="child" metal:extend-macro="template/macros/base"><h1 metal:fill-slot="title" metal:define-slot="title">Child</h1></div>"#,
            r#"<section metal:use-macro="template/macros/child"><h2 metal:fill-slot="title">Page</h2></section></body>"#,
        ))
        .unwrap();
        assert!(out.ends_with("<div><h2>Page</h2></div></body>"), "{}", out);
    }

    #[test]
    fn usage_fillers_win_over_the_extension_fillers() {
        let out = expand(concat!(
            r#"<body><div metal:define-macro="base"><h1 metal:define-slot="title">Base</h1></div>"#,
            r#"<div metal:define-macro="child" metal:extend-macro="template/macros/base"><h1 metal:fill-slot="title">Child</h1></div>"#,
            r#"<section metal:use-macro="template/macros/child"><h2 metal:fill-slot="title">Page</h2></section></body>"#,
        ))
        .unwrap();
        assert_eq!(
            out,
            "<body><div><h1>Base</h1></div><div><h1>Child</h1></div><div><h2>Page</h2></div></body>"
        );
    }

    #[test]
    fn extending_macro_renders_as_its_base() {
        let out = expand(concat!(
            r#"<body><div metal:define-macro="base"><h1 metal:define-slot="title">Base</h1><p>base-only</p></div>"#,
            r#"<div metal:define-macro="child" metal:extend-macro="template/macros/base"><h1 metal:fill-slot="title">Child</h1></div></body>"#,
        ))
        .unwrap();
        assert_eq!(
            out,
            "<body><div><h1>Base</h1><p>base-only</p></div><div><h1>Child</h1><p>base-only</p></div></body>"
        );
    }

    #[test]
    fn macros_from_another_document() {
        let layout = XmlDocument::parse(
            r#"<html metal:define-macro="page"><body metal:define-slot="body">none</body></html>"#,
            DocumentMode::Xml,
        )
        .unwrap();
        let mut options = IndexMap::new();
        options.insert(
            "layout".to_string(),
            Value::object(MetalDocument::new(layout.root())),
        );
        let out = expand_with(
            r#"<html metal:use-macro="options/layout/macros/page"><body metal:fill-slot="body">mine</body></html>"#,
            options,
            &RenderConfig::default(),
        )
        .unwrap();
        assert_eq!(out, "<html><body>mine</body></html>");
        assert_eq!(
            layout.to_markup(),
            r#"<html metal:define-macro="page"><body metal:define-slot="body">none</body></html>"#
        );
    }

    #[test]
    fn unresolved_macros_fail() {
        let err = expand(r#"<p metal:use-macro="template/macros/missing"/>"#).unwrap_err();
        assert!(matches!(err, RenderError::MacroResolution { ref expression } if expression == "template/macros/missing"));
        let err = expand(r#"<p metal:use-macro="string:box"/>"#).unwrap_err();
        assert_eq!(err.kind(), "MacroResolutionFailure");
    }

    #[test]
    fn self_using_macro_hits_the_depth_limit() {
        let config = RenderConfig {
            max_macro_depth: 4,
            ..RenderConfig::default()
        };
        let err = expand_with(
            r#"<div metal:define-macro="loop"><p metal:use-macro="template/macros/loop"/></div>"#,
            IndexMap::new(),
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::MacroDepthExceeded { limit: 4 }));
    }
}
