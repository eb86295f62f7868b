#![allow(dead_code)]

mod gated_sink;
mod memory_sink;

use std::sync::{Arc, Once};

pub use gated_sink::GatedSink;
pub use memory_sink::MemorySink;
use tracing_subscriber::layer::SubscriberExt;
use xraft_status::{Config, StatusServer};

static INIT_TRACING: Once = Once::new();

pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let subscriber = tracing_subscriber::Registry::default()
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .with(tracing_subscriber::fmt::Layer::default());
        tracing::subscriber::set_global_default(subscriber).unwrap();
    });
}

pub struct TestHarness {
    pub config: Arc<Config>,
    pub sink: Arc<MemorySink>,
    pub server: StatusServer,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl TestHarness {
    pub fn new(config: Config) -> Self {
        init_tracing();

        let config = Arc::new(config);
        let sink = Arc::new(MemorySink::default());
        let server = StatusServer::new("s1", config.clone(), sink.clone()).unwrap();
        Self {
            config,
            sink,
            server,
        }
    }

    pub fn registration_name(&self, group: &str) -> String {
        xraft_status::registration_name(
            &self.config.domain,
            self.server.id(),
            &group.into(),
        )
    }
}

pub fn followers(addrs: &[&str]) -> Vec<String> {
    addrs.iter().map(|addr| addr.to_string()).collect()
}
