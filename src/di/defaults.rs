//! Process-wide memoized default values, one per key type.

use crate::di::DependencyKey;
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::OnceLock;

type DefaultCell = &'static (dyn Any + Send + Sync);

fn registry() -> &'static DashMap<TypeId, DefaultCell> {
    static REGISTRY: OnceLock<DashMap<TypeId, DefaultCell>> = OnceLock::new();
    REGISTRY.get_or_init(DashMap::new)
}

/// Look up the per-key cell, creating it on first use.
///
/// The shard lock is released before the cell is returned, so the caller may
/// run the key's factory (which may read other defaults) without holding it.
fn cell_for<K: DependencyKey>() -> &'static OnceLock<K::Value> {
    let type_id = TypeId::of::<K>();

    let cell: DefaultCell = match registry().get(&type_id) {
        Some(existing) => *existing,
        None => *registry().entry(type_id).or_insert_with(|| {
            let leaked: &'static OnceLock<K::Value> = Box::leak(Box::new(OnceLock::new()));
            leaked as DefaultCell
        }),
    };

    cell.downcast_ref::<OnceLock<K::Value>>().unwrap_or_else(|| {
        panic!(
            "default cell for '{}' holds a foreign type. This is a bug in ambit.",
            std::any::type_name::<K>()
        )
    })
}

/// The memoized default value for `K`
pub fn default_of<K: DependencyKey>() -> &'static K::Value {
    cell_for::<K>().get_or_init(|| {
        tracing::debug!(key = std::any::type_name::<K>(), "initializing default value");
        K::default_value()
    })
}
