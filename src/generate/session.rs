use std::collections::HashSet;

use crate::generate::generics::GenericIterator;

/// Per-run generation context: the registration ledger and the pending
/// iterator records. Passed by reference through the traversal instead of
/// living in process-wide state, so a namespace-parallel generator could
/// partition it later.
#[derive(Default)]
pub struct Session {
    unregisters: Vec<(String, String)>,
    iterators: Vec<GenericIterator>,
    iterator_names: HashSet<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one emitted bridge artifact for teardown-time unbinding.
    /// Append-only; entries leave the ledger only through a drain.
    pub fn record_unregister(&mut self, namespace: &str, type_name: &str) {
        self.unregisters
            .push((namespace.to_string(), type_name.to_string()));
    }

    /// Removes and returns this namespace's ledger entries in recording
    /// order. Entries for other namespaces stay put; draining the same
    /// namespace again yields nothing.
    pub fn drain_unregisters(&mut self, namespace: &str) -> Vec<String> {
        let mut drained = Vec::new();
        self.unregisters.retain(|(ns, name)| {
            if ns == namespace {
                drained.push(name.clone());
                false
            } else {
                true
            }
        });
        drained
    }

    /// Registers an Iterable instantiation for later proxy emission.
    /// Idempotent by synthesized name within the current emission scope:
    /// re-encountering the same instantiation before the next drain must
    /// not duplicate the artifact.
    pub fn register_iterator(&mut self, iterator: GenericIterator) -> bool {
        if !self.iterator_names.insert(iterator.name.clone()) {
            return false;
        }
        self.iterators.push(iterator);
        true
    }

    /// Removes and returns the iterator records registered since the last
    /// drain, in registration order. The name set resets with the drain:
    /// proxies and their class paths are namespace-relative, so a later
    /// namespace implementing the same instantiation needs its own proxy.
    pub fn drain_iterators(&mut self) -> Vec<GenericIterator> {
        self.iterator_names.clear();
        std::mem::take(&mut self.iterators)
    }
}

/// Namespace/type allow-list. Rules are either a namespace (which admits
/// the namespace and everything below it) or a qualified `Namespace.Type`.
/// An empty rule set admits everything.
#[derive(Clone, Debug, Default)]
pub struct Filter {
    rules: Vec<String>,
}

impl Filter {
    pub fn new(rules: Vec<String>) -> Self {
        Self { rules }
    }

    pub fn includes(&self, namespace: &str, type_name: &str) -> bool {
        if self.rules.is_empty() {
            return true;
        }
        let qualified = format!("{namespace}.{type_name}");
        self.rules.iter().any(|rule| {
            rule == namespace
                || *rule == qualified
                || namespace.starts_with(&format!("{rule}."))
        })
    }
}
