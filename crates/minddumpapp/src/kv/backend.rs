use crate::error::Result;

/// Abstract interface for string-valued key-value persistence.
///
/// All methods take `&self`; backends handle their own interior mutability
/// (or are stateless I/O).
pub trait KvBackend {
    /// Returns the last stored value, or `Ok(None)` if the key was never
    /// written or has been removed.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the stored value.
    /// MUST be atomic from the caller's point of view (no torn values).
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes the key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<B: KvBackend + ?Sized> KvBackend for &B {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
