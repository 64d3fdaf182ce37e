#[cfg(test)]
#[path = "debug_test.rs"]
mod test;

use std::fmt;

/// Like [fmt::Debug], for values that can only be printed with the help of a context `db`.
pub trait DebugWithDb<Db: ?Sized> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>, db: &Db) -> fmt::Result;

    /// Bundles `self` with `db` into a value implementing [fmt::Debug].
    fn debug<'a>(&'a self, db: &'a Db) -> DebugWith<'a, Self, Db> {
        DebugWith { value: self, db }
    }
}

/// A value bundled with its context. See [DebugWithDb::debug].
pub struct DebugWith<'a, T: ?Sized, Db: ?Sized> {
    value: &'a T,
    db: &'a Db,
}
impl<T: DebugWithDb<Db> + ?Sized, Db: ?Sized> fmt::Debug for DebugWith<'_, T, Db> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        DebugWithDb::fmt(self.value, f, self.db)
    }
}

impl<T: DebugWithDb<Db> + ?Sized, Db: ?Sized> DebugWithDb<Db> for &T {
    fn fmt(&self, f: &mut fmt::Formatter<'_>, db: &Db) -> fmt::Result {
        T::fmt(self, f, db)
    }
}

impl<T: DebugWithDb<Db>, Db: ?Sized> DebugWithDb<Db> for [T] {
    fn fmt(&self, f: &mut fmt::Formatter<'_>, db: &Db) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|element| element.debug(db))).finish()
    }
}

impl<T: DebugWithDb<Db>, Db: ?Sized> DebugWithDb<Db> for Vec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>, db: &Db) -> fmt::Result {
        DebugWithDb::fmt(self.as_slice(), f, db)
    }
}

impl<T: DebugWithDb<Db>, Db: ?Sized> DebugWithDb<Db> for Option<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>, db: &Db) -> fmt::Result {
        match self {
            Some(value) => f.debug_tuple("Some").field(&value.debug(db)).finish(),
            None => f.write_str("None"),
        }
    }
}
