//! Interned identifiers for nodes and clusters.
//!
//! Node identity is the key an author gives a node when declaring it. A
//! cluster is identified by its path from the diagram root, one snake-cased
//! label per level (`storage::s3_buckets`). Keys are interned so [`Id`] stays `Copy` and cheap to compare while the diagram
//! model is passed around.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        // A poisoned lock only means another thread panicked mid-intern;
        // the table itself is still consistent.
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned identifier of a node or cluster.
///
/// # Examples
///
/// ```
/// use stratus_core::identifier::Id;
///
/// let api = Id::new("api");
/// assert_eq!(api, "api");
///
/// let nested = Id::new("storage").create_nested(Id::new("s3_buckets"));
/// assert_eq!(nested, "storage::s3_buckets");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Joins this identifier and `child_id` with a `::` separator.
    ///
    /// Cluster paths are built this way, one segment per nesting level.
    pub fn create_nested(&self, child_id: Id) -> Self {
        let nested = format!("{self}::{child_id}");
        Self::new(&nested)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = interner();
        let value = guard.resolve(self.0).unwrap_or_default();
        f.write_str(value)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_same_key_same_id() {
        let a = Id::new("auth_lambda");
        let b = Id::new("auth_lambda");
        let c = Id::new("upload_lambda");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, "auth_lambda");
    }

    #[test]
    fn test_create_nested_deep() {
        let path = Id::new("serverless_compute")
            .create_nested(Id::new("core_functions"))
            .create_nested(Id::new("auth_lambda"));

        assert_eq!(path, "serverless_compute::core_functions::auth_lambda");
    }

    #[test]
    fn test_display_and_hash() {
        let key = Id::new("redis");
        assert_eq!(format!("{key}"), "redis");

        let mut map = HashMap::new();
        map.insert(key, 1);
        assert_eq!(map.get(&Id::new("redis")), Some(&1));
    }

    #[test]
    fn test_str_comparisons() {
        let id = Id::new("cdn");
        let owned = String::from("cdn");

        assert!(id == "cdn");
        assert!(id == owned.as_str());
        assert!(id != "alb");
    }
}
