//! Rendering many independent templates at once.
//!
//! With the `rayon-executor` feature (on by default) jobs run on rayon's
//! global thread pool; without it they run one after another. Each job gets
//! its own document and scope tree, while the evaluator registry and the
//! accessor cache are shared.

use crate::error::ZptError;
use crate::renderer::{Options, ZptRenderer};
use zpt_tales::Value;

#[cfg(feature = "rayon-executor")]
use rayon::prelude::*;

/// One template plus the model it is rendered against.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub template: String,
    pub here: Value,
    pub options: Options,
}

impl RenderJob {
    pub fn new(template: impl Into<String>, here: Value) -> Self {
        Self {
            template: template.into(),
            here,
            options: Options::new(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }
}

impl ZptRenderer {
    /// Renders every job, returning results in job order. A failing job does
    /// not affect the others.
    pub fn render_batch(&self, jobs: Vec<RenderJob>) -> Vec<Result<String, ZptError>> {
        log::debug!("Rendering a batch of {} job(s)", jobs.len());
        #[cfg(feature = "rayon-executor")]
        let results = jobs.into_par_iter().map(|job| self.run(job)).collect();
        #[cfg(not(feature = "rayon-executor"))]
        let results = jobs.into_iter().map(|job| self.run(job)).collect();
        results
    }

    fn run(&self, job: RenderJob) -> Result<String, ZptError> {
        self.render(&job.template, job.here, job.options)
    }
}
