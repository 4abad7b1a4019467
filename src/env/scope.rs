use crate::di::{Container, DependencyKey, Injectable};
use std::any::type_name;

/// A node in a tree of consumers, holding the container snapshot visible
/// at that node
///
/// Children start from their parent's snapshot. Overrides made on a child
/// are invisible to the parent and to every sibling, including siblings
/// created afterwards.
///
/// # Example
/// ```
/// use ambit::{Container, DependencyKey, Scope};
///
/// struct ThemeKey;
///
/// impl DependencyKey for ThemeKey {
///     type Value = &'static str;
///
///     fn default_value() -> &'static str {
///         "light"
///     }
/// }
///
/// let root = Scope::root(Container::new());
/// let sidebar = root.with_override::<ThemeKey>("dark");
/// let content = root.child();
///
/// assert_eq!(*sidebar.container().get::<ThemeKey>(), "dark");
/// assert_eq!(*content.container().get::<ThemeKey>(), "light");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Scope {
    container: Container,
    depth: usize,
}

impl Scope {
    pub fn root(container: Container) -> Self {
        Self {
            container,
            depth: 0,
        }
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Nesting level; the root is 0
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// A child scope sharing this scope's current snapshot
    pub fn child(&self) -> Scope {
        Scope {
            container: self.container.clone(),
            depth: self.depth + 1,
        }
    }

    /// A child scope with `K` rebound to `value`
    pub fn with_override<K: DependencyKey>(&self, value: K::Value) -> Scope {
        tracing::debug!(
            key = type_name::<K>(),
            depth = self.depth + 1,
            "scoped override"
        );
        let mut child = self.child();
        child.container.set::<K>(value);
        child
    }

    /// Rebind `K` in this scope
    ///
    /// Consumers already attached and children already created keep the
    /// snapshot they were given.
    pub fn set<K: DependencyKey>(&mut self, value: K::Value) -> &mut Self {
        self.container.set::<K>(value);
        self
    }

    /// Hand this scope's snapshot to `consumer`
    pub fn attach<T: Injectable + ?Sized>(&self, consumer: &mut T) {
        tracing::debug!(
            consumer = type_name::<T>(),
            depth = self.depth,
            bindings = self.container.len(),
            "attaching consumer"
        );
        consumer.configure(&self.container);
    }

    /// Construct a consumer and attach it
    pub fn attach_new<T: Injectable + Default>(&self) -> T {
        let mut consumer = T::default();
        self.attach(&mut consumer);
        consumer
    }

    pub fn into_container(self) -> Container {
        self.container
    }
}

impl From<Container> for Scope {
    fn from(container: Container) -> Self {
        Scope::root(container)
    }
}
