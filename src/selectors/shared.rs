use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_STAMP: AtomicU64 = AtomicU64::new(1);

/// Process unique identity of a published value. Minted once per `Shared::new`,
/// strictly increasing, never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Stamp(u64);

impl Stamp {
    pub fn next() -> Self {
        Stamp(NEXT_STAMP.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An immutable value with an identity stamp.
///
/// Selectors compare inputs by stamp, never by content: two value-equal `Shared`s
/// created separately are different inputs. Cloning keeps the stamp.
pub struct Shared<T: ?Sized> {
    stamp: Stamp,
    value: Arc<T>,
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }
}

impl<T: ?Sized> Shared<T> {
    pub fn from_arc(value: Arc<T>) -> Self {
        Self {
            stamp: Stamp::next(),
            value,
        }
    }

    pub fn stamp(&self) -> Stamp {
        self.stamp
    }

    /// Same published value (identity, not equality)
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        a.stamp == b.stamp
    }
}

impl<T: ?Sized> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            stamp: self.stamp,
            value: Arc::clone(&self.value),
        }
    }
}

impl<T: ?Sized> Deref for Shared<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: ?Sized> AsRef<T> for Shared<T> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared")
            .field("stamp", &self.stamp)
            .field("value", &&*self.value)
            .finish()
    }
}
