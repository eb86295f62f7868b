#[macro_use]
extern crate tracing;

mod config;
mod error;
mod groups;
mod provider;
mod server;
mod sink;
mod snapshot;
mod state;
mod types;

pub use config::Config;
pub use error::{Result, StatusError};
pub use provider::{GroupStatus, StatusProvider};
pub use server::StatusServer;
pub use sink::{registration_name, SinkResult, StatusSink};
pub use snapshot::StatusSnapshot;
pub use state::{ConsensusState, Followers, StatePublisher};
pub use types::{GroupId, ParseRoleError, PeerId, Role, TermId};
