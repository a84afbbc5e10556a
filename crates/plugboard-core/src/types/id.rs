use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

///
/// Id
///
/// Typed arena index for one entity or connection kind.
/// Carries the kind as phantom context without changing the underlying
/// index representation. Ids are handed out by [`Arena::alloc`] and stay
/// valid for the life of the session; detaching an entity from the graph
/// never invalidates its id.
///
/// [`Arena::alloc`]: super::Arena::alloc
///

#[repr(transparent)]
pub struct Id<K> {
    index: u32,
    _marker: PhantomData<fn() -> K>,
}

impl<K> Id<K> {
    /// Construct a typed id from a raw arena index.
    #[must_use]
    pub(crate) const fn new(index: u32) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// Returns the underlying arena index.
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self.index as usize
    }
}

// Manual impls: derives would bound `K`, and ids must be copyable for
// every kind regardless of what the kind itself derives.

#[allow(clippy::expl_impl_clone_on_copy)]
impl<K> Clone for Id<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Id<K> {}

impl<K> fmt::Debug for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.index).finish()
    }
}

impl<K> fmt::Display for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.index.fmt(f)
    }
}

impl<K> Eq for Id<K> {}

impl<K> PartialEq for Id<K> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<K> Ord for Id<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<K> PartialOrd for Id<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Hash for Id<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

///
/// TESTS
///
