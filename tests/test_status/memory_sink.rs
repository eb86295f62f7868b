use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use xraft_status::{SinkResult, StatusProvider, StatusSink};

#[derive(Default)]
pub struct MemorySink {
    providers: RwLock<BTreeMap<String, Arc<dyn StatusProvider>>>,
    reject_register: AtomicBool,
    reject_unregister: AtomicBool,
}

impl MemorySink {
    pub fn names(&self) -> Vec<String> {
        self.providers.read().unwrap().keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn StatusProvider>> {
        self.providers.read().unwrap().get(name).cloned()
    }

    pub fn reject_register(&self, reject: bool) {
        self.reject_register.store(reject, Ordering::SeqCst);
    }

    pub fn reject_unregister(&self, reject: bool) {
        self.reject_unregister.store(reject, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl StatusSink for MemorySink {
    async fn register(&self, name: &str, provider: Arc<dyn StatusProvider>) -> SinkResult<()> {
        if self.reject_register.load(Ordering::SeqCst) {
            anyhow::bail!("register rejected: {}", name);
        }
        let mut providers = self.providers.write().unwrap();
        if providers.contains_key(name) {
            anyhow::bail!("already registered: {}", name);
        }
        providers.insert(name.to_string(), provider);
        Ok(())
    }

    async fn unregister(&self, name: &str) -> SinkResult<()> {
        if self.reject_unregister.load(Ordering::SeqCst) {
            anyhow::bail!("unregister rejected: {}", name);
        }
        self.providers
            .write()
            .unwrap()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| anyhow::anyhow!("not registered: {}", name))
    }
}
