use std::sync::Arc;

use crate::{GroupId, PeerId, StatusProvider};

pub type SinkResult<T> = anyhow::Result<T>;

/// External registry that makes status providers queryable, such as a
/// management agent or a metrics exporter.
#[async_trait::async_trait]
pub trait StatusSink: Send + Sync {
    async fn register(&self, name: &str, provider: Arc<dyn StatusProvider>) -> SinkResult<()>;

    async fn unregister(&self, name: &str) -> SinkResult<()>;
}

/// Stable registration name of a participant's status in one group.
pub fn registration_name(domain: &str, id: &PeerId, group_id: &GroupId) -> String {
    format!("{}:service=RaftServer,group={},id={}", domain, group_id, id)
}
