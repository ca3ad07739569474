//! Phase timing logged through `tracing`.

use std::{collections::HashMap, sync::Mutex, time::Instant};

use eyre::Result;

use super::{Plugin, ReconcileContext};

/// Logs the start and end of every phase with its elapsed time.
#[derive(Debug, Default)]
pub struct TracingPlugin {
    started: Mutex<HashMap<String, Instant>>,
}

impl TracingPlugin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Plugin for TracingPlugin {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn on_before_phase(&self, phase: &str, _ctx: &mut ReconcileContext) -> Result<()> {
        tracing::debug!(phase, "phase started");
        if let Ok(mut started) = self.started.lock() {
            started.insert(phase.to_string(), Instant::now());
        }
        Ok(())
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut ReconcileContext) -> Result<()> {
        let elapsed = self
            .started
            .lock()
            .ok()
            .and_then(|mut started| started.remove(phase))
            .map(|start| start.elapsed());
        tracing::debug!(
            phase,
            elapsed_ms = elapsed.map(|d| d.as_secs_f64() * 1000.0),
            warnings = ctx.warning_count(),
            "phase finished"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use dtsbundle_manifest::Options;

    use super::*;

    #[test]
    fn test_timing_entry_is_cleared_after_phase() {
        let plugin = TracingPlugin::new();
        let config = Options::new("/p/src", "/p/dist").validate().unwrap();
        let mut ctx = ReconcileContext::new(config);

        plugin.on_before_phase("compile", &mut ctx).unwrap();
        assert!(plugin.started.lock().unwrap().contains_key("compile"));

        plugin.on_after_phase("compile", &mut ctx).unwrap();
        assert!(plugin.started.lock().unwrap().is_empty());
    }
}
