//! PropertyMap — the key-value store on nodes, relationships and map values.

use std::collections::BTreeMap;
use super::Value;

/// A map of property names to values.
///
/// Ordered by key so that serialized maps are stable across runs.
pub type PropertyMap = BTreeMap<String, Value>;

/// Build a PropertyMap from (key, value) pairs.
pub fn property_map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> PropertyMap
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}
