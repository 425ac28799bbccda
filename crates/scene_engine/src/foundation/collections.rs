//! Specialized collection types

pub use slotmap::{DefaultKey, SlotMap};

/// Handle-based map using slot map for stable references
pub type HandleMap<T> = SlotMap<DefaultKey, T>;

/// Typed handle for type-safe resource references
///
/// The type parameter only tags which store the key belongs to; the handle
/// itself is a plain `Copy` key and never owns the resource.
#[derive(Debug)]
pub struct TypedHandle<T> {
    key: DefaultKey,
    _phantom: std::marker::PhantomData<fn() -> T>,
}

impl<T> TypedHandle<T> {
    /// Create a new typed handle from a key
    pub const fn new(key: DefaultKey) -> Self {
        Self {
            key,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Get the underlying key
    pub const fn key(&self) -> DefaultKey {
        self.key
    }
}

// Manual impls so that handles stay Copy/Eq regardless of `T`.
impl<T> Clone for TypedHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedHandle<T> {}

impl<T> PartialEq for TypedHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for TypedHandle<T> {}

impl<T> std::hash::Hash for TypedHandle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

/// Insert a value into a handle map and wrap the key in a typed handle
pub fn insert_typed<T>(map: &mut HandleMap<T>, value: T) -> TypedHandle<T> {
    TypedHandle::new(map.insert(value))
}
