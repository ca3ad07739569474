//! Compile phase - runs the declaration compiler.

use std::sync::Arc;

use async_trait::async_trait;
use eyre::Result;

use crate::{
    DeclarationCompiler,
    pipeline::{Phase, ReconcileContext},
};

/// Phase that emits declaration files into the output directory.
///
/// A compiler failure aborts the pass before anything is merged or removed.
pub struct CompilePhase {
    compiler: Arc<dyn DeclarationCompiler>,
}

impl CompilePhase {
    pub fn new(compiler: Arc<dyn DeclarationCompiler>) -> Self {
        Self { compiler }
    }
}

#[async_trait]
impl Phase for CompilePhase {
    fn name(&self) -> &'static str {
        "compile"
    }

    fn description(&self) -> &'static str {
        "Emit declaration files with the compiler"
    }

    async fn run(&self, ctx: &mut ReconcileContext) -> Result<()> {
        tracing::debug!(compiler = self.compiler.name(), "compiling declarations");
        let output = self
            .compiler
            .compile(ctx.config.in_dir(), ctx.config.out_dir())
            .await?;
        if !output.trim().is_empty() {
            tracing::debug!(output = %output.trim_end(), "compiler output");
        }
        ctx.compiler_output = Some(output);
        Ok(())
    }
}
