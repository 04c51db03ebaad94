// src/renderer.rs
use crate::builder::RendererBuilder;
use crate::error::ZptError;
use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;
use zpt_dom::XmlDocument;
use zpt_metal::{MetalDocument, MetalVisitor};
use zpt_tal::{CleanupPass, TalVisitor};
use zpt_tales::{EvaluatorRegistry, ExpressionContext, ObjectTraverser, RenderState, Value};
use zpt_template_core::{DocumentPass, RenderConfig};

/// Keyword options for one render, exposed to templates as `options`.
pub type Options = IndexMap<String, Value>;

/// Renders page templates.
///
/// The evaluator registry and the accessor cache are built once and shared
/// by every render, including concurrent ones. Everything else lives only as
/// long as a single render.
pub struct ZptRenderer {
    config: RenderConfig,
    registry: Arc<EvaluatorRegistry>,
    traverser: Arc<ObjectTraverser>,
}

impl Default for ZptRenderer {
    fn default() -> Self {
        RendererBuilder::new().build()
    }
}

impl ZptRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> RendererBuilder {
        RendererBuilder::new()
    }

    pub(crate) fn from_parts(
        config: RenderConfig,
        registry: Arc<EvaluatorRegistry>,
        traverser: Arc<ObjectTraverser>,
    ) -> Self {
        Self {
            config,
            registry,
            traverser,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn registry(&self) -> &EvaluatorRegistry {
        &self.registry
    }

    pub fn traverser(&self) -> &Arc<ObjectTraverser> {
        &self.traverser
    }

    /// Parses markup in the configured mode.
    pub fn parse(&self, text: &str) -> Result<XmlDocument, ZptError> {
        Ok(XmlDocument::parse(text, self.config.mode)?)
    }

    /// Parses a document only for its macros. Pass the result in as an
    /// option and reach them with `options/<name>/macros/<macro>`.
    pub fn load_macros(&self, text: &str) -> Result<Value, ZptError> {
        let document = self.parse(text)?;
        Ok(Value::object(MetalDocument::new(document.root())))
    }

    fn passes(&self) -> [Box<dyn DocumentPass>; 3] {
        [
            Box::new(MetalVisitor::new(&self.config)),
            Box::new(TalVisitor::new(&self.config)),
            Box::new(CleanupPass),
        ]
    }

    /// Renders `document` in place: macro expansion, then TAL, then cleanup.
    pub fn render_document(
        &self,
        document: &XmlDocument,
        here: Value,
        options: Options,
    ) -> Result<(), ZptError> {
        let state = RenderState::new(self.registry.clone(), self.traverser.clone())
            .with_here(here)
            .with_options(options)
            .with_template(Value::object(MetalDocument::snapshot(&document.root())));
        let context = ExpressionContext::new_root(document.root(), Rc::new(state));
        for pass in self.passes() {
            log::debug!("Running the {} pass", pass.name());
            pass.process(&context)?;
        }
        Ok(())
    }

    pub fn render(&self, template: &str, here: Value, options: Options) -> Result<String, ZptError> {
        let document = self.parse(template)?;
        self.render_document(&document, here, options)?;
        Ok(document.to_markup())
    }

    /// Renders with a JSON model as `here`. A JSON object also supplies the
    /// keyword options, one per member.
    pub fn render_json(&self, template: &str, model: &serde_json::Value) -> Result<String, ZptError> {
        let options = match model {
            serde_json::Value::Object(members) => members
                .iter()
                .map(|(key, value)| (key.clone(), Value::from(value.clone())))
                .collect(),
            _ => Options::new(),
        };
        self.render(template, Value::from(model.clone()), options)
    }

    pub fn render_file<P: AsRef<Path>>(
        &self,
        path: P,
        model: &serde_json::Value,
    ) -> Result<String, ZptError> {
        let template = fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded template from {}", path.as_ref().display());
        self.render_json(&template, model)
    }
}
