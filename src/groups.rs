use std::sync::Arc;

use tokio::sync::watch;

use crate::GroupId;

pub(crate) type GroupList = Arc<Vec<GroupId>>;

/// Groups hosted by this server, distinct and in join order.
pub(crate) struct HostedGroups {
    tx: watch::Sender<GroupList>,
}

impl Default for HostedGroups {
    fn default() -> Self {
        let (tx, _) = watch::channel(Default::default());
        Self { tx }
    }
}

impl HostedGroups {
    pub(crate) fn subscribe(&self) -> watch::Receiver<GroupList> {
        self.tx.subscribe()
    }

    pub(crate) fn current(&self) -> GroupList {
        self.tx.borrow().clone()
    }

    pub(crate) fn insert(&self, group_id: GroupId) -> bool {
        self.tx.send_if_modified(|groups| {
            if groups.contains(&group_id) {
                return false;
            }
            Arc::make_mut(groups).push(group_id);
            true
        })
    }

    pub(crate) fn remove(&self, group_id: &GroupId) -> bool {
        self.tx.send_if_modified(|groups| {
            if !groups.contains(group_id) {
                return false;
            }
            Arc::make_mut(groups).retain(|id| id != group_id);
            true
        })
    }

    pub(crate) fn clear(&self) {
        self.tx.send_replace(Default::default());
    }
}
