//! Ambient container carried by the current task.
//!
//! The container is stored in a tokio task-local, so it follows the future
//! across worker threads. Tasks started with `tokio::spawn` do not inherit
//! it; wrap the spawned future in [`scope`] with [`current`]'s result to pass
//! it on.

use crate::di::{Container, DependencyKey, Injectable};
use crate::error::{AmbitError, Result};
use std::any::type_name;
use std::future::Future;

tokio::task_local! {
    static AMBIENT: Container;
}

/// Run `future` with `container` as the ambient container
pub async fn scope<F>(container: Container, future: F) -> F::Output
where
    F: Future,
{
    tracing::debug!(bindings = container.len(), "entering ambient scope");
    AMBIENT.scope(container, future).await
}

/// Run `f` with `container` as the ambient container
pub fn sync_scope<F, R>(container: Container, f: F) -> R
where
    F: FnOnce() -> R,
{
    tracing::debug!(bindings = container.len(), "entering ambient scope");
    AMBIENT.sync_scope(container, f)
}

/// Borrow the ambient container
///
/// `f` runs while the task-local is borrowed and must not enter
/// [`scope`] or [`sync_scope`]; take a [`current`] snapshot for that.
///
/// # Errors
/// Returns [`AmbitError::NoAmbientContainer`] outside of [`scope`] and [`sync_scope`].
pub fn with_current<F, R>(f: F) -> Result<R>
where
    F: FnOnce(&Container) -> R,
{
    AMBIENT
        .try_with(f)
        .map_err(|_| AmbitError::NoAmbientContainer)
}

/// A snapshot of the ambient container
///
/// # Errors
/// Returns [`AmbitError::NoAmbientContainer`] outside of [`scope`] and [`sync_scope`].
pub fn current() -> Result<Container> {
    with_current(Container::clone)
}

/// A snapshot of the ambient container, or an empty one outside any scope
pub fn current_or_default() -> Container {
    current().unwrap_or_default()
}

/// Run `future` with the ambient container's `K` rebound to `value`
///
/// Outside any scope the override is applied to an empty container.
pub async fn override_scope<K, F>(value: K::Value, future: F) -> F::Output
where
    K: DependencyKey,
    F: Future,
{
    tracing::debug!(key = type_name::<K>(), "ambient override");
    let container = current_or_default().with::<K>(value);
    scope(container, future).await
}

/// Configure `consumer` from the ambient container
///
/// The hook runs on a snapshot, outside the task-local borrow, so it may
/// open nested scopes for the consumers it configures.
///
/// # Errors
/// Returns [`AmbitError::NoAmbientContainer`] outside of [`scope`] and [`sync_scope`].
pub fn attach<T: Injectable + ?Sized>(consumer: &mut T) -> Result<()> {
    let container = current()?;
    consumer.configure(&container);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RegionKey;

    impl DependencyKey for RegionKey {
        type Value = String;

        fn default_value() -> String {
            "us-east-1".to_string()
        }
    }

    fn region() -> String {
        with_current(|c| c.get::<RegionKey>().clone()).unwrap()
    }

    #[derive(Default)]
    struct Uploader {
        region: String,
    }

    impl Injectable for Uploader {
        fn configure(&mut self, container: &Container) {
            self.region = container.get::<RegionKey>().clone();
        }
    }

    #[test]
    fn test_no_ambient_container_outside_scope() {
        assert!(matches!(current(), Err(AmbitError::NoAmbientContainer)));
        assert!(current_or_default().is_empty());
    }

    #[test]
    fn test_sync_scope_exposes_container() {
        let container = Container::new().with::<RegionKey>("eu-west-1".to_string());
        let seen = sync_scope(container, region);
        assert_eq!(seen, "eu-west-1");
        assert!(current().is_err());
    }

    #[tokio::test]
    async fn test_override_is_limited_to_inner_future() {
        let root = Container::new();
        scope(root, async {
            assert_eq!(region(), "us-east-1");

            let inner = override_scope::<RegionKey, _>("ap-northeast-2".to_string(), async {
                region()
            })
            .await;
            assert_eq!(inner, "ap-northeast-2");

            assert_eq!(region(), "us-east-1");
            assert!(current().unwrap().is_empty());
        })
        .await;
    }

    #[tokio::test]
    async fn test_nested_override_keeps_outer_bindings() {
        struct ZoneKey;

        impl DependencyKey for ZoneKey {
            type Value = u8;

            fn default_value() -> u8 {
                0
            }
        }

        let root = Container::new().with::<ZoneKey>(3);
        let (zone, region) = scope(root, async {
            override_scope::<RegionKey, _>("sa-east-1".to_string(), async {
                current().map(|c| (*c.get::<ZoneKey>(), c.get::<RegionKey>().clone()))
            })
            .await
        })
        .await
        .unwrap();

        assert_eq!(zone, 3);
        assert_eq!(region, "sa-east-1");
    }

    #[tokio::test]
    async fn test_spawned_task_needs_explicit_handoff() {
        let root = Container::new().with::<RegionKey>("eu-central-1".to_string());
        scope(root, async {
            let orphan = tokio::spawn(async { current().is_err() }).await.unwrap();
            assert!(orphan);

            let handed = current().unwrap();
            let seen = tokio::spawn(scope(handed, async { region() }))
                .await
                .unwrap();
            assert_eq!(seen, "eu-central-1");
        })
        .await;
    }

    struct NameKey;

    impl DependencyKey for NameKey {
        type Value = &'static str;

        fn default_value() -> &'static str {
            "root"
        }
    }

    #[derive(Default)]
    struct Label {
        name: &'static str,
    }

    impl Injectable for Label {
        fn configure(&mut self, container: &Container) {
            self.name = *container.get::<NameKey>();
        }
    }

    #[derive(Default)]
    struct Panel {
        name: &'static str,
        child: Label,
    }

    impl Injectable for Panel {
        fn configure(&mut self, container: &Container) {
            self.name = *container.get::<NameKey>();
            let child = &mut self.child;
            sync_scope(container.clone().with::<NameKey>("child"), || attach(child)).unwrap();
        }
    }

    #[test]
    fn test_attach_hook_may_open_nested_scope() {
        let mut panel = Panel::default();
        sync_scope(Container::new(), || attach(&mut panel)).unwrap();

        assert_eq!(panel.name, "root");
        assert_eq!(panel.child.name, "child");
    }

    #[test]
    fn test_attach_from_ambient() {
        let mut uploader = Uploader::default();
        assert!(attach(&mut uploader).is_err());

        let container = Container::new().with::<RegionKey>("me-south-1".to_string());
        sync_scope(container, || attach(&mut uploader)).unwrap();
        assert_eq!(uploader.region, "me-south-1");
    }
}
