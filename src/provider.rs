use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::groups::GroupList;
use crate::state::ConsensusState;
use crate::{GroupId, PeerId, Role, StatusSnapshot, TermId};

/// Read-only view of a participant's consensus status.
///
/// Every method is a side-effect-free read of the latest published value and
/// never fails: state that is not known yet is reported as empty data or
/// `Role::Unknown`. Separate calls are independent reads and may observe
/// different instants.
pub trait StatusProvider: Send + Sync {
    fn id(&self) -> PeerId;

    /// Empty when no leader is known.
    fn leader_id(&self) -> PeerId;

    fn current_term(&self) -> TermId;

    fn group_id(&self) -> GroupId;

    fn role(&self) -> Role;

    /// Empty unless this participant is the leader.
    fn followers(&self) -> Vec<String>;

    /// All groups hosted by this server.
    fn groups(&self) -> Vec<GroupId>;

    fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            id: self.id(),
            leader_id: self.leader_id(),
            current_term: self.current_term(),
            group_id: self.group_id(),
            role: self.role(),
            followers: self.followers(),
            groups: self.groups(),
        }
    }
}

/// Status of this server in a single group.
///
/// Once the server stops hosting the group the status is retired: it keeps
/// reporting the last term but `Role::Unknown`, no leader and no followers,
/// even if the engine is still publishing.
#[derive(Clone)]
pub struct GroupStatus {
    id: PeerId,
    group_id: GroupId,
    state: watch::Receiver<ConsensusState>,
    groups: watch::Receiver<GroupList>,
    retired: Arc<AtomicBool>,
}

impl GroupStatus {
    pub(crate) fn new(
        id: PeerId,
        group_id: GroupId,
        state: watch::Receiver<ConsensusState>,
        groups: watch::Receiver<GroupList>,
    ) -> Self {
        Self {
            id,
            group_id,
            state,
            groups,
            retired: Default::default(),
        }
    }

    /// A status not bound to any group yet.
    pub(crate) fn detached(id: PeerId, groups: watch::Receiver<GroupList>) -> Self {
        let (_, state) = watch::channel(ConsensusState::default());
        let status = Self::new(id, GroupId::default(), state, groups);
        status.retire();
        status
    }

    pub fn is_retired(&self) -> bool {
        self.retired.load(Ordering::Acquire)
    }

    pub(crate) fn retire(&self) {
        self.retired.store(true, Ordering::Release);
    }

    /// Whether both handles were created by the same join.
    pub(crate) fn same_join(&self, other: &GroupStatus) -> bool {
        Arc::ptr_eq(&self.retired, &other.retired)
    }
}

impl StatusProvider for GroupStatus {
    fn id(&self) -> PeerId {
        self.id.clone()
    }

    fn leader_id(&self) -> PeerId {
        if self.is_retired() {
            return PeerId::default();
        }
        self.state.borrow().leader_id.clone().unwrap_or_default()
    }

    fn current_term(&self) -> TermId {
        self.state.borrow().current_term
    }

    fn group_id(&self) -> GroupId {
        self.group_id.clone()
    }

    fn role(&self) -> Role {
        if self.is_retired() {
            return Role::Unknown;
        }
        self.state.borrow().role
    }

    fn followers(&self) -> Vec<String> {
        if self.is_retired() {
            return Vec::new();
        }
        let state = self.state.borrow();
        if state.role != Role::Leader {
            return Vec::new();
        }
        state.followers.to_vec()
    }

    fn groups(&self) -> Vec<GroupId> {
        let groups = self.groups.borrow().clone();
        groups.to_vec()
    }

    /// Consensus fields are taken from a single published state, so
    /// `followers` is non-empty only when `role` is `Role::Leader`.
    fn snapshot(&self) -> StatusSnapshot {
        let mut state = self.state.borrow().clone();
        if self.is_retired() {
            state = state.torn_down();
        }
        let followers = match state.role {
            Role::Leader => state.followers.into_vec(),
            _ => Vec::new(),
        };
        StatusSnapshot {
            id: self.id.clone(),
            leader_id: state.leader_id.unwrap_or_default(),
            current_term: state.current_term,
            group_id: self.group_id.clone(),
            role: state.role,
            followers,
            groups: self.groups(),
        }
    }
}
