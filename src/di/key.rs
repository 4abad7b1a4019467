/// A type-level handle for one injectable dependency
///
/// The implementing type is the key: its `TypeId` identifies the binding, so
/// two keys governing the same value type never collide. Keys are usually
/// zero-sized marker types, declared with `#[derive(DependencyKey)]` or by
/// hand.
///
/// `default_value` runs at most once per key type for the lifetime of the
/// process; the result is memoized and handed out by reference on every
/// lookup that finds no explicit binding.
///
/// # Example
/// ```
/// use ambit::{Container, DependencyKey};
///
/// pub struct RetryLimitKey;
///
/// impl DependencyKey for RetryLimitKey {
///     type Value = u32;
///
///     fn default_value() -> u32 {
///         3
///     }
/// }
///
/// let container = Container::new();
/// assert_eq!(*container.get::<RetryLimitKey>(), 3);
/// ```
pub trait DependencyKey: 'static {
    /// The type of value stored under this key
    type Value: Send + Sync + 'static;

    /// Build the value used when no explicit binding exists
    fn default_value() -> Self::Value;
}
