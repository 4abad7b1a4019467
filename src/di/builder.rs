use crate::di::{Container, DependencyKey};

/// Builder for assembling a container during application startup
///
/// # Example
/// ```
/// use ambit::{ContainerBuilder, DependencyKey};
///
/// struct WorkersKey;
///
/// impl DependencyKey for WorkersKey {
///     type Value = usize;
///
///     fn default_value() -> usize {
///         1
///     }
/// }
///
/// let container = ContainerBuilder::new()
///     .bind::<WorkersKey>(8)
///     .build();
/// assert_eq!(*container.get::<WorkersKey>(), 8);
/// ```
pub struct ContainerBuilder {
    container: Container,
}

impl ContainerBuilder {
    /// Create a new container builder
    pub fn new() -> Self {
        Self {
            container: Container::new(),
        }
    }

    /// Start from the bindings of an existing container
    pub fn from_container(container: Container) -> Self {
        Self { container }
    }

    /// Bind a value to a key
    pub fn bind<K: DependencyKey>(mut self, value: K::Value) -> Self {
        self.container.set::<K>(value);
        self
    }

    /// Bind a value built by `factory` to a key
    ///
    /// The factory can read bindings made earlier in the chain.
    pub fn bind_with<K, F>(mut self, factory: F) -> Self
    where
        K: DependencyKey,
        F: FnOnce(&Container) -> K::Value,
    {
        let value = factory(&self.container);
        self.container.set::<K>(value);
        self
    }

    /// Build the container
    pub fn build(self) -> Container {
        tracing::debug!(bindings = self.container.len(), "container built");
        self.container
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
