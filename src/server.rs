use std::sync::Arc;

use fnv::FnvHashMap;
use futures_util::future::join_all;
use tokio::sync::Mutex;

use crate::groups::HostedGroups;
use crate::provider::GroupStatus;
use crate::sink::registration_name;
use crate::{
    Config, GroupId, PeerId, Result, StatePublisher, StatusError, StatusProvider, StatusSink,
};

struct Registration {
    name: Option<String>,
    status: GroupStatus,
}

#[derive(Default)]
struct Inner {
    registrations: FnvHashMap<GroupId, Registration>,
    shutdown: bool,
}

/// Owns the status lifecycle of every group hosted by one server.
pub struct StatusServer {
    id: PeerId,
    config: Arc<Config>,
    sink: Arc<dyn StatusSink>,
    groups: HostedGroups,
    inner: Mutex<Inner>,
}

impl StatusServer {
    pub fn new(
        id: impl Into<PeerId>,
        config: Arc<Config>,
        sink: Arc<dyn StatusSink>,
    ) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(StatusError::EmptyPeerId);
        }
        Ok(Self {
            id,
            config,
            sink,
            groups: HostedGroups::default(),
            inner: Mutex::new(Inner::default()),
        })
    }

    pub fn id(&self) -> &PeerId {
        &self.id
    }

    pub fn groups(&self) -> Vec<GroupId> {
        self.groups.current().to_vec()
    }

    /// Starts hosting `group_id` and returns the publisher the consensus
    /// engine of that group reports its state through.
    ///
    /// The sink is called without holding the registration lock. If the group
    /// is left or the server shut down meanwhile, the fresh registration is
    /// withdrawn again.
    pub async fn join_group(&self, group_id: impl Into<GroupId>) -> Result<StatePublisher> {
        let group_id = group_id.into();
        if group_id.is_empty() {
            return Err(StatusError::EmptyGroupId);
        }

        let publisher = StatePublisher::new(self.id.clone(), group_id.clone());
        let status = GroupStatus::new(
            self.id.clone(),
            group_id.clone(),
            publisher.subscribe(),
            self.groups.subscribe(),
        );

        {
            let mut inner = self.inner.lock().await;
            if inner.shutdown {
                return Err(StatusError::Shutdown);
            }
            if inner.registrations.contains_key(&group_id) {
                return Err(StatusError::AlreadyJoined(group_id));
            }
            inner.registrations.insert(
                group_id.clone(),
                Registration {
                    name: None,
                    status: status.clone(),
                },
            );
            self.groups.insert(group_id.clone());
        }

        if !self.config.register_with_sink {
            debug!(
                id = %self.id,
                group = %group_id,
                "Join group",
            );
            return Ok(publisher);
        }

        let name = registration_name(&self.config.domain, &self.id, &group_id);
        let provider: Arc<dyn StatusProvider> = Arc::new(status.clone());
        let res = self.sink.register(&name, provider).await;

        let mut inner = self.inner.lock().await;
        let still_joined = matches!(
            inner.registrations.get(&group_id),
            Some(registration) if registration.status.same_join(&status)
        );
        match res {
            Ok(()) if still_joined => {
                debug!(
                    id = %self.id,
                    group = %group_id,
                    name = %name,
                    "Join group",
                );
                if let Some(registration) = inner.registrations.get_mut(&group_id) {
                    registration.name = Some(name);
                }
                Ok(publisher)
            }
            Ok(()) => {
                let shutdown = inner.shutdown;
                drop(inner);
                status.retire();
                if let Err(err) = self.sink.unregister(&name).await {
                    warn!(
                        id = %self.id,
                        name = %name,
                        error = %err,
                        "Failed to unregister status",
                    );
                }
                if shutdown {
                    Err(StatusError::Shutdown)
                } else {
                    Err(StatusError::NotJoined(group_id))
                }
            }
            Err(err) => {
                if still_joined {
                    inner.registrations.remove(&group_id);
                    self.groups.remove(&group_id);
                }
                status.retire();
                Err(StatusError::sink(err))
            }
        }
    }

    /// Stops hosting `group_id`. Providers already handed out stay queryable
    /// and report the group as torn down.
    pub async fn leave_group(&self, group_id: &GroupId) -> Result<()> {
        let registration = {
            let mut inner = self.inner.lock().await;
            let registration = inner
                .registrations
                .remove(group_id)
                .ok_or_else(|| StatusError::NotJoined(group_id.clone()))?;
            registration.status.retire();
            self.groups.remove(group_id);
            registration
        };

        debug!(
            id = %self.id,
            group = %group_id,
            "Leave group",
        );
        if let Some(name) = registration.name {
            self.sink
                .unregister(&name)
                .await
                .map_err(StatusError::sink)?;
        }
        Ok(())
    }

    /// Status of the earliest joined group still hosted, or a status
    /// reporting unknown values when no group is hosted.
    pub async fn status(&self) -> GroupStatus {
        let inner = self.inner.lock().await;
        let groups = self.groups.current();
        let status = groups
            .iter()
            .find_map(|group_id| inner.registrations.get(group_id))
            .map(|registration| registration.status.clone());
        status.unwrap_or_else(|| GroupStatus::detached(self.id.clone(), self.groups.subscribe()))
    }

    pub async fn group_status(&self, group_id: &GroupId) -> Option<GroupStatus> {
        let inner = self.inner.lock().await;
        inner
            .registrations
            .get(group_id)
            .map(|registration| registration.status.clone())
    }

    /// Unregisters every group. Later joins fail with `StatusError::Shutdown`.
    pub async fn shutdown(&self) -> Result<()> {
        let names = {
            let mut inner = self.inner.lock().await;
            if inner.shutdown {
                return Ok(());
            }
            inner.shutdown = true;
            self.groups.clear();
            inner
                .registrations
                .drain()
                .filter_map(|(_, registration)| {
                    registration.status.retire();
                    registration.name
                })
                .collect::<Vec<_>>()
        };

        let results = join_all(names.iter().map(|name| self.sink.unregister(name))).await;
        for (name, res) in names.iter().zip(results) {
            if let Err(err) = res {
                warn!(
                    id = %self.id,
                    name = %name,
                    error = %err,
                    "Failed to unregister status",
                );
            }
        }

        debug!(id = %self.id, "Shutdown");
        Ok(())
    }
}
