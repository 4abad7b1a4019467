use crate::di::Container;

/// Hook for types that pull their dependencies out of a container
///
/// The owner of a consumer calls `configure` right after constructing or
/// attaching it; the container never calls it on its own. Calling it again
/// (re-attachment) re-reads every injected field from the new snapshot.
///
/// This trait is typically implemented via `#[derive(Injectable)]`.
///
/// # Example
/// ```
/// use ambit::{Container, DependencyKey, Injectable};
///
/// struct TimeoutKey;
///
/// impl DependencyKey for TimeoutKey {
///     type Value = u64;
///
///     fn default_value() -> u64 {
///         30
///     }
/// }
///
/// #[derive(Default, Injectable)]
/// struct Client {
///     #[inject(TimeoutKey)]
///     timeout_secs: u64,
/// }
///
/// let mut client = Client::default();
/// client.configure(&Container::new().with::<TimeoutKey>(5));
/// assert_eq!(client.timeout_secs, 5);
/// ```
pub trait Injectable {
    /// Read the needed keys from `container` and store them on `self`
    fn configure(&mut self, container: &Container);
}
