//! Bounded object pool with RAII guards.
//!
//! Pools are constructed explicitly and passed to the call sites that
//! need them; there is no process-wide pool state. `acquire` hands out
//! a guard that returns the instance on drop, so release happens on
//! every exit path, panics included.

use std::fmt;
use std::ops::{Deref, DerefMut};

use parking_lot::Mutex;

type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;
type Recycler<T> = Box<dyn Fn(&mut T) + Send + Sync>;

/// A bounded LIFO free list of reusable instances.
///
/// `acquire`/`release` are individually thread-safe; the lock protects
/// only the free list. A borrowed instance belongs to exactly one
/// caller for the duration of the guard.
pub struct Pool<T> {
    free: Mutex<Vec<Box<T>>>,
    capacity: usize,
    factory: Factory<T>,
    recycler: Option<Recycler<T>>,
}

impl<T> Pool<T> {
    /// Default retention bound for released instances.
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn new(factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY, factory)
    }

    pub fn with_capacity(capacity: usize, factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            capacity,
            factory: Box::new(factory),
            recycler: None,
        }
    }

    /// The recycler runs on every released instance before it is
    /// retained, typically to reset it to a known state.
    pub fn with_recycler(
        capacity: usize,
        factory: impl Fn() -> T + Send + Sync + 'static,
        recycler: impl Fn(&mut T) + Send + Sync + 'static,
    ) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            capacity,
            factory: Box::new(factory),
            recycler: Some(Box::new(recycler)),
        }
    }

    /// Pops the most recently released instance, or constructs a fresh
    /// one via the factory. Never fails.
    pub fn acquire(&self) -> Pooled<'_, T> {
        let boxed = self
            .free
            .lock()
            .pop()
            .unwrap_or_else(|| Box::new((self.factory)()));
        Pooled {
            inner: Some(boxed),
            pool: self,
        }
    }

    /// Number of instances currently held for reuse.
    pub fn len(&self) -> usize {
        self.free.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn put_back(&self, mut boxed: Box<T>) {
        if let Some(recycler) = &self.recycler {
            recycler(&mut boxed);
        }
        let mut free = self.free.lock();
        if free.len() < self.capacity {
            free.push(boxed);
        }
        // Over capacity: the instance is simply dropped.
    }
}

impl<T> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

/// Guard over a pooled instance; returns it to the pool on drop.
pub struct Pooled<'p, T> {
    // `None` only after `detach` or mid-drop.
    inner: Option<Box<T>>,
    pool: &'p Pool<T>,
}

impl<T> Pooled<'_, T> {
    /// Takes the instance out of pool management; it will not be
    /// returned to the free list.
    pub fn detach(mut self) -> Box<T> {
        self.inner.take().expect("pooled instance present until drop")
    }
}

impl<T> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.inner.as_deref().expect("pooled instance present until drop")
    }
}

impl<T> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.inner
            .as_deref_mut()
            .expect("pooled instance present until drop")
    }
}

impl<T> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if let Some(boxed) = self.inner.take() {
            self.pool.put_back(boxed);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Pooled<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}
