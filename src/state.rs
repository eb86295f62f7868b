use smallvec::SmallVec;
use tokio::sync::watch;

use crate::{GroupId, PeerId, Role, TermId};

pub type Followers = SmallVec<[String; 4]>;

/// The consensus fields of one participant, published as a whole on every change.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ConsensusState {
    pub role: Role,
    pub current_term: TermId,
    pub leader_id: Option<PeerId>,
    /// Only populated while `role` is `Role::Leader`.
    pub followers: Followers,
}

impl ConsensusState {
    pub(crate) fn torn_down(&self) -> Self {
        Self {
            current_term: self.current_term,
            ..Default::default()
        }
    }
}

/// Write half of a group's published state, owned by the consensus engine.
///
/// Every method replaces the published value in one step, so a reader sees
/// either the old or the new state, never a mix of both. Dropping the
/// publisher marks the group as torn down: readers then observe
/// `Role::Unknown` with the last term kept.
pub struct StatePublisher {
    id: PeerId,
    group_id: GroupId,
    tx: watch::Sender<ConsensusState>,
}

impl StatePublisher {
    pub(crate) fn new(id: PeerId, group_id: GroupId) -> Self {
        let (tx, _) = watch::channel(ConsensusState::default());
        Self { id, group_id, tx }
    }

    pub fn id(&self) -> &PeerId {
        &self.id
    }

    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    pub fn current(&self) -> ConsensusState {
        self.tx.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<ConsensusState> {
        self.tx.subscribe()
    }

    pub fn become_leader(&self, term: TermId, followers: impl IntoIterator<Item = String>) {
        let followers: Followers = followers.into_iter().collect();
        self.tx.send_modify(|state| {
            self.advance_term(state, term);
            state.role = Role::Leader;
            state.leader_id = Some(self.id.clone());
            state.followers = followers;
        });
        debug!(
            id = %self.id,
            group = %self.group_id,
            term = term,
            "Become to leader",
        );
    }

    pub fn become_follower(&self, term: TermId, leader_id: Option<PeerId>) {
        self.tx.send_modify(|state| {
            self.advance_term(state, term);
            state.role = Role::Follower;
            state.leader_id = leader_id;
            state.followers.clear();
        });
        debug!(
            id = %self.id,
            group = %self.group_id,
            term = term,
            "Become to follower",
        );
    }

    pub fn become_candidate(&self, term: TermId) {
        self.tx.send_modify(|state| {
            self.advance_term(state, term);
            state.role = Role::Candidate;
            state.leader_id = None;
            state.followers.clear();
        });
        debug!(
            id = %self.id,
            group = %self.group_id,
            term = term,
            "Become to candidate",
        );
    }

    pub fn become_listener(&self, leader_id: Option<PeerId>) {
        self.tx.send_modify(|state| {
            state.role = Role::Listener;
            state.leader_id = leader_id;
            state.followers.clear();
        });
        debug!(
            id = %self.id,
            group = %self.group_id,
            "Become to listener",
        );
    }

    pub fn update_term(&self, term: TermId) {
        self.tx.send_if_modified(|state| {
            let prev = state.current_term;
            self.advance_term(state, term);
            state.current_term != prev
        });
    }

    pub fn update_leader(&self, leader_id: Option<PeerId>) {
        self.tx.send_if_modified(|state| {
            if state.leader_id == leader_id {
                return false;
            }
            state.leader_id = leader_id;
            true
        });
    }

    pub fn update_followers(&self, followers: impl IntoIterator<Item = String>) {
        let followers: Followers = followers.into_iter().collect();
        self.tx.send_if_modified(|state| {
            if state.role != Role::Leader {
                warn!(
                    id = %self.id,
                    group = %self.group_id,
                    role = %state.role,
                    "Ignore followers published by a non-leader",
                );
                return false;
            }
            state.followers = followers;
            true
        });
    }

    fn advance_term(&self, state: &mut ConsensusState, term: TermId) {
        if term < state.current_term {
            warn!(
                id = %self.id,
                group = %self.group_id,
                current_term = state.current_term,
                term = term,
                "Ignore stale term",
            );
            return;
        }
        state.current_term = term;
    }
}

impl Drop for StatePublisher {
    fn drop(&mut self) {
        self.tx.send_modify(|state| *state = state.torn_down());
        debug!(
            id = %self.id,
            group = %self.group_id,
            "State publisher dropped",
        );
    }
}
