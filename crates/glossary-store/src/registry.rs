//! Process-wide glossary instance registry.
//!
//! Instances are cached by configuration identity with explicit
//! construct-once-on-miss semantics. Two calls with configurations sharing
//! a [`GlossaryConfig::cache_key`] receive the same instance.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use tracing::debug;

use glossary_core::GlossaryConfig;

use crate::glossary::Glossary;

static INSTANCES: Lazy<RwLock<HashMap<String, Arc<Glossary>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Fetch the cached instance for this configuration, constructing it on
/// first use.
pub fn instance(config: &GlossaryConfig) -> Arc<Glossary> {
    let key = config.cache_key();

    if let Some(existing) = INSTANCES.read().expect("registry lock poisoned").get(&key) {
        return Arc::clone(existing);
    }

    let mut instances = INSTANCES.write().expect("registry lock poisoned");
    // Another thread may have constructed it between the read and the
    // write lock.
    if let Some(existing) = instances.get(&key) {
        return Arc::clone(existing);
    }
    debug!(
        subsystem = "store",
        component = "registry",
        op = "construct",
        key = key.as_str(),
        "Constructing glossary instance"
    );
    let glossary = Arc::new(Glossary::new(config.clone()));
    instances.insert(key, Arc::clone(&glossary));
    glossary
}

/// Drop all cached instances (test isolation).
pub fn clear() {
    INSTANCES.write().expect("registry lock poisoned").clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests use unique endpoints and never call clear(): the registry is
    // process-wide and the test harness runs in parallel.

    #[test]
    fn test_same_key_shares_instance() {
        let config = GlossaryConfig::new("http://registry-test-shared/sparql");
        let a = instance(&config);
        let b = instance(&config.clone());
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_distinct_keys_get_distinct_instances() {
        let a = instance(&GlossaryConfig::new("http://registry-test-one/sparql"));
        let b = instance(&GlossaryConfig::new("http://registry-test-two/sparql"));
        assert!(!Arc::ptr_eq(&a, &b));
    }
}
