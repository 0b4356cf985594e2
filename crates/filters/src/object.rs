use std::time::SystemTime;

/// A listed remote entry offered to [`Filter::include_object`].
///
/// [`mod_time`](Self::mod_time) may be expensive on some backends, so the
/// filter only asks for it when a time bound is configured.
///
/// [`Filter::include_object`]: crate::Filter::include_object
pub trait Object {
    /// Path relative to the root of the listing, `/` separated.
    fn remote(&self) -> &str;

    /// Size in bytes.
    fn size(&self) -> i64;

    /// Last modification time.
    fn mod_time(&self) -> SystemTime;
}

impl<T: Object + ?Sized> Object for &T {
    fn remote(&self) -> &str {
        (**self).remote()
    }

    fn size(&self) -> i64 {
        (**self).size()
    }

    fn mod_time(&self) -> SystemTime {
        (**self).mod_time()
    }
}
