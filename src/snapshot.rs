use serde::{Deserialize, Serialize};

use crate::{GroupId, PeerId, Role, TermId};

/// Point-in-time status of one participant in one group.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub id: PeerId,
    /// Empty when no leader is known.
    pub leader_id: PeerId,
    pub current_term: TermId,
    pub group_id: GroupId,
    pub role: Role,
    pub followers: Vec<String>,
    pub groups: Vec<GroupId>,
}
