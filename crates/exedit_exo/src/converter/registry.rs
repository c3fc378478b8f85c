// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared cache of converter instances.

use super::{Converter, ConverterKind};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

static GLOBAL: Lazy<ConverterRegistry> = Lazy::new(ConverterRegistry::new);

/// Converter instances keyed by kind, created on first use.
///
/// The lock is held only while looking up or inserting an entry; the
/// returned converter is used outside of it.
#[derive(Debug, Default)]
pub struct ConverterRegistry {
    converters: Mutex<HashMap<ConverterKind, Arc<Converter>>>,
}

impl ConverterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry
    pub fn global() -> &'static ConverterRegistry {
        &GLOBAL
    }

    /// Converter for `kind`, creating it if this is the first request
    pub fn resolve(&self, kind: ConverterKind) -> Arc<Converter> {
        let mut converters = self.converters.lock();
        let converter = converters.entry(kind).or_insert_with(|| {
            tracing::trace!(?kind, "Creating converter");
            Arc::new(Converter::for_kind(kind))
        });
        Arc::clone(converter)
    }

    /// Number of cached converters
    pub fn len(&self) -> usize {
        self.converters.lock().len()
    }

    /// Whether no converter has been created yet
    pub fn is_empty(&self) -> bool {
        self.converters.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_resolve_caches() {
        let registry = ConverterRegistry::new();
        assert!(registry.is_empty());

        let first = registry.resolve(ConverterKind::SignedSpacing);
        let second = registry.resolve(ConverterKind::SignedSpacing);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);

        registry.resolve(ConverterKind::FixedWidthText { max_len: 4 });
        registry.resolve(ConverterKind::FixedWidthText { max_len: 8 });
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_concurrent_resolve() {
        let registry = ConverterRegistry::new();
        let resolved: Vec<Arc<Converter>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| registry.resolve(ConverterKind::Default)))
                .collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).collect()
        });

        assert_eq!(registry.len(), 1);
        assert!(resolved.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    }

    #[test]
    fn test_global_is_shared() {
        let first = ConverterRegistry::global().resolve(ConverterKind::Default);
        let second = ConverterRegistry::global().resolve(ConverterKind::Default);
        assert!(Arc::ptr_eq(&first, &second));
    }
}
