use crate::di::{DependencyKey, defaults};
use crate::error::{AmbitError, Result};
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type Binding = Arc<dyn Any + Send + Sync>;

/// Typed dependency container with default fallback.
///
/// Every lookup resolves: a key that was never bound yields its memoized
/// default. Cloning takes an O(1) snapshot; writes go through copy-on-write,
/// so a clone handed to one consumer never observes later `set` calls made
/// on the original (or the other way round).
#[derive(Clone, Default)]
pub struct Container {
    bindings: Arc<HashMap<TypeId, Binding>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// The explicit binding for `K`, or its default
    pub fn get<K: DependencyKey>(&self) -> &K::Value {
        match self.try_get::<K>() {
            Some(value) => value,
            None => defaults::default_of::<K>(),
        }
    }

    /// The explicit binding for `K`, ignoring the default
    pub fn try_get<K: DependencyKey>(&self) -> Option<&K::Value> {
        self.bindings
            .get(&TypeId::of::<K>())
            .map(|binding| downcast::<K>(binding))
    }

    /// Like [`try_get`](Self::try_get), but reports a missing binding as an error
    ///
    /// # Errors
    /// Returns [`AmbitError::NotBound`] if `K` has no explicit binding.
    pub fn require<K: DependencyKey>(&self) -> Result<&K::Value> {
        self.try_get::<K>().ok_or_else(|| AmbitError::NotBound {
            key: type_name::<K>().to_string(),
        })
    }

    /// Bind `value` to `K`, replacing any previous binding
    pub fn set<K: DependencyKey>(&mut self, value: K::Value) -> &mut Self {
        tracing::trace!(key = type_name::<K>(), "binding set");
        Arc::make_mut(&mut self.bindings).insert(TypeId::of::<K>(), Arc::new(value));
        self
    }

    /// Consuming variant of [`set`](Self::set)
    ///
    /// `parent.clone().with::<K>(value)` is the usual way to derive an
    /// overridden snapshot for a subtree.
    pub fn with<K: DependencyKey>(mut self, value: K::Value) -> Self {
        self.set::<K>(value);
        self
    }

    pub fn contains<K: DependencyKey>(&self) -> bool {
        self.bindings.contains_key(&TypeId::of::<K>())
    }

    /// Drop the explicit binding for `K` so lookups fall back to the default
    ///
    /// Returns whether a binding was present.
    pub fn remove<K: DependencyKey>(&mut self) -> bool {
        if !self.contains::<K>() {
            return false;
        }
        tracing::trace!(key = type_name::<K>(), "binding removed");
        Arc::make_mut(&mut self.bindings)
            .remove(&TypeId::of::<K>())
            .is_some()
    }

    /// Copy every explicit binding of `other` over this container
    pub fn extend(&mut self, other: &Container) -> &mut Self {
        if other.is_empty() {
            return self;
        }
        let bindings = Arc::make_mut(&mut self.bindings);
        for (type_id, binding) in other.bindings.iter() {
            bindings.insert(*type_id, Arc::clone(binding));
        }
        self
    }

    pub fn clear(&mut self) {
        self.bindings = Arc::default();
    }

    /// Number of explicit bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Diagnostic summary, e.g. `Container { bindings: 2 }`
    pub fn describe(&self) -> String {
        format!("{self:?}")
    }
}

fn downcast<K: DependencyKey>(binding: &Binding) -> &K::Value {
    binding.downcast_ref::<K::Value>().unwrap_or_else(|| {
        panic!(
            "binding for '{}' does not hold '{}'. This is a bug in ambit.",
            type_name::<K>(),
            type_name::<K::Value>()
        )
    })
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("bindings", &self.len())
            .finish()
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct TestService {
        value: String,
    }

    struct TestServiceKey;

    impl DependencyKey for TestServiceKey {
        type Value = TestService;

        fn default_value() -> TestService {
            TestService {
                value: "default".to_string(),
            }
        }
    }

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct English;

    impl Greeter for English {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    struct Korean;

    impl Greeter for Korean {
        fn greet(&self) -> String {
            "annyeong".to_string()
        }
    }

    struct GreeterKey;

    impl DependencyKey for GreeterKey {
        type Value = Arc<dyn Greeter>;

        fn default_value() -> Arc<dyn Greeter> {
            Arc::new(English)
        }
    }

    // Two keys over the same value type.
    struct PrimaryPortKey;
    struct FallbackPortKey;

    impl DependencyKey for PrimaryPortKey {
        type Value = u16;

        fn default_value() -> u16 {
            8080
        }
    }

    impl DependencyKey for FallbackPortKey {
        type Value = u16;

        fn default_value() -> u16 {
            8081
        }
    }

    #[test]
    fn test_unbound_key_resolves_to_default() {
        let container = Container::new();
        assert_eq!(container.get::<TestServiceKey>().value, "default");
        assert_eq!(*container.get::<PrimaryPortKey>(), 8080);
        assert!(container.try_get::<TestServiceKey>().is_none());
    }

    #[test]
    fn test_set_and_get() {
        let mut container = Container::new();
        container.set::<TestServiceKey>(TestService {
            value: "Testing".to_string(),
        });
        assert_eq!(container.get::<TestServiceKey>().value, "Testing");
        assert!(container.contains::<TestServiceKey>());
    }

    #[test]
    fn test_last_write_wins() {
        let mut container = Container::new();
        container.set::<PrimaryPortKey>(1).set::<PrimaryPortKey>(2);
        assert_eq!(*container.get::<PrimaryPortKey>(), 2);
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn test_keys_with_same_value_type_do_not_collide() {
        let mut container = Container::new();
        container.set::<PrimaryPortKey>(9000);
        assert_eq!(*container.get::<PrimaryPortKey>(), 9000);
        assert_eq!(*container.get::<FallbackPortKey>(), 8081);
        assert!(!container.contains::<FallbackPortKey>());
    }

    #[test]
    fn test_trait_object_binding() {
        let mut container = Container::new();
        assert_eq!(container.get::<GreeterKey>().greet(), "hello");
        container.set::<GreeterKey>(Arc::new(Korean));
        assert_eq!(container.get::<GreeterKey>().greet(), "annyeong");
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_set() {
        let mut container = Container::new();
        let snapshot = container.clone();
        container.set::<TestServiceKey>(TestService {
            value: "Testing".to_string(),
        });
        assert_eq!(snapshot.get::<TestServiceKey>().value, "default");
        assert_eq!(container.get::<TestServiceKey>().value, "Testing");
    }

    #[test]
    fn test_source_is_not_affected_by_snapshot_mutation() {
        let mut container = Container::new().with::<PrimaryPortKey>(1);
        let mut snapshot = container.clone();
        snapshot.set::<PrimaryPortKey>(2);
        snapshot.set::<FallbackPortKey>(3);
        container.remove::<PrimaryPortKey>();

        assert_eq!(*container.get::<PrimaryPortKey>(), 8080);
        assert_eq!(*snapshot.get::<PrimaryPortKey>(), 2);
        assert_eq!(snapshot.len(), 2);
        assert!(container.is_empty());
    }

    #[test]
    fn test_remove_reverts_to_default() {
        let mut container = Container::new().with::<PrimaryPortKey>(1);
        assert!(container.remove::<PrimaryPortKey>());
        assert!(!container.remove::<PrimaryPortKey>());
        assert_eq!(*container.get::<PrimaryPortKey>(), 8080);
    }

    #[test]
    fn test_require_reports_missing_binding() {
        let container = Container::new();
        let err = container.require::<PrimaryPortKey>().unwrap_err();
        assert!(matches!(err, AmbitError::NotBound { ref key } if key.contains("PrimaryPortKey")));

        let container = container.with::<PrimaryPortKey>(1);
        assert_eq!(*container.require::<PrimaryPortKey>().unwrap(), 1);
    }

    #[test]
    fn test_extend_overlays_bindings() {
        let mut base = Container::new()
            .with::<PrimaryPortKey>(1)
            .with::<FallbackPortKey>(2);
        let overlay = Container::new().with::<FallbackPortKey>(20);
        base.extend(&overlay);

        assert_eq!(*base.get::<PrimaryPortKey>(), 1);
        assert_eq!(*base.get::<FallbackPortKey>(), 20);
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn test_describe_counts_explicit_bindings() {
        let mut container = Container::new();
        assert_eq!(container.describe(), "Container { bindings: 0 }");

        container.set::<PrimaryPortKey>(1);
        container.set::<FallbackPortKey>(2);
        container.set::<PrimaryPortKey>(3);
        let _ = container.get::<TestServiceKey>();
        assert_eq!(container.describe(), "Container { bindings: 2 }");
        assert_eq!(container.to_string(), container.describe());

        container.clear();
        assert_eq!(container.len(), 0);
    }
}
