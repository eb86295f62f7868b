use std::sync::Arc;

use tokio::sync::{Notify, Semaphore};
use xraft_status::{SinkResult, StatusProvider, StatusSink};

use super::MemorySink;

/// Holds every registration until `open` is called.
pub struct GatedSink {
    pub sink: MemorySink,
    pub entered: Notify,
    gate: Semaphore,
}

impl Default for GatedSink {
    fn default() -> Self {
        Self {
            sink: MemorySink::default(),
            entered: Notify::new(),
            gate: Semaphore::new(0),
        }
    }
}

impl GatedSink {
    pub fn open(&self) {
        self.gate.add_permits(1024);
    }
}

#[async_trait::async_trait]
impl StatusSink for GatedSink {
    async fn register(&self, name: &str, provider: Arc<dyn StatusProvider>) -> SinkResult<()> {
        self.entered.notify_one();
        let _permit = self.gate.acquire().await?;
        self.sink.register(name, provider).await
    }

    async fn unregister(&self, name: &str) -> SinkResult<()> {
        self.sink.unregister(name).await
    }
}
