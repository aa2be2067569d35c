use spikerun_engine::input::ActionMap;
use spikerun_engine::sched::SchedulerConfig;

pub const DEFAULT_CANVAS_ID: &str = "gameCanvas";

/// Browser session configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// `id` of the `<canvas>` element the game renders into.
    pub canvas_id: String,
    pub bindings: ActionMap,
    /// rAF timestamps are milliseconds, matching the default scale.
    pub scheduler: SchedulerConfig,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            canvas_id: DEFAULT_CANVAS_ID.to_string(),
            bindings: ActionMap::default(),
            scheduler: SchedulerConfig::default(),
        }
    }
}
