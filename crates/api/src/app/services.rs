use std::sync::Arc;

use stockflow_fulfillment::OrderWorkflow;
use stockflow_inventory::Warehouse;
use stockflow_observability::{FanoutSink, HistoryLog, TracingSink};

/// Process-wide domain state, constructed once and shared by handlers.
#[derive(Debug)]
pub struct AppServices {
    workflow: OrderWorkflow,
    history: Arc<HistoryLog>,
}

impl AppServices {
    pub fn new() -> Self {
        let history = Arc::new(HistoryLog::new());
        let sink = FanoutSink::new()
            .with(history.clone())
            .with(Arc::new(TracingSink));

        let warehouse = Arc::new(Warehouse::with_sink(Arc::new(sink)));
        Self {
            workflow: OrderWorkflow::new(warehouse),
            history,
        }
    }

    pub fn warehouse(&self) -> &Warehouse {
        self.workflow.warehouse()
    }

    pub fn workflow(&self) -> &OrderWorkflow {
        &self.workflow
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }
}

impl Default for AppServices {
    fn default() -> Self {
        Self::new()
    }
}
