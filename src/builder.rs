// src/builder.rs
use crate::error::ZptError;
use crate::renderer::ZptRenderer;
use std::sync::Arc;
use zpt_dom::DocumentMode;
use zpt_tales::{EvaluatorRegistry, ExpressionEvaluator, ObjectTraverser};
use zpt_template_core::RenderConfig;

/// A builder for creating a `ZptRenderer`.
pub struct RendererBuilder {
    config: RenderConfig,
    registry: EvaluatorRegistry,
    traverser: Option<Arc<ObjectTraverser>>,
}

impl Default for RendererBuilder {
    fn default() -> Self {
        Self {
            config: RenderConfig::default(),
            registry: EvaluatorRegistry::default(),
            traverser: None,
        }
    }
}

impl RendererBuilder {
    /// Creates a builder with the built-in evaluators and XML output.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_mode(mut self, mode: DocumentMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn html(self) -> Self {
        self.with_mode(DocumentMode::Html)
    }

    pub fn with_max_macro_depth(mut self, depth: usize) -> Self {
        self.config.max_macro_depth = depth;
        self
    }

    pub fn with_strict_attributes(mut self, strict: bool) -> Self {
        self.config.strict_attributes = strict;
        self
    }

    /// Adds an evaluator for a new prefix. Fails if the prefix is taken.
    pub fn with_evaluator(
        mut self,
        evaluator: impl ExpressionEvaluator + 'static,
    ) -> Result<Self, ZptError> {
        self.registry.register(evaluator)?;
        Ok(self)
    }

    /// Shares an accessor cache with other renderers.
    pub fn with_traverser(mut self, traverser: Arc<ObjectTraverser>) -> Self {
        self.traverser = Some(traverser);
        self
    }

    pub fn build(self) -> ZptRenderer {
        ZptRenderer::from_parts(
            self.config,
            Arc::new(self.registry),
            self.traverser.unwrap_or_default(),
        )
    }
}
