use thiserror::Error;

use crate::GroupId;

#[derive(Debug, Error)]
pub enum StatusError {
    #[error("Sink error: {0}")]
    Sink(anyhow::Error),

    #[error("Peer id must not be empty.")]
    EmptyPeerId,

    #[error("Group id must not be empty.")]
    EmptyGroupId,

    #[error("Group {0} has already been joined.")]
    AlreadyJoined(GroupId),

    #[error("Group {0} has not been joined.")]
    NotJoined(GroupId),

    #[error("Shutdown")]
    Shutdown,
}

impl StatusError {
    pub(crate) fn sink(err: anyhow::Error) -> Self {
        StatusError::Sink(err)
    }
}

pub type Result<T, E = StatusError> = std::result::Result<T, E>;
