//! Storage port

use gaspad_types::GasPadResult;

/// Named string slots, the shape of browser local storage
///
/// Writes are synchronous: once `set` returns, a subsequent `get` in the same
/// process observes the new value, and no reader observes a partial value.
pub trait KeyValueStore: Send {
    /// Read a slot; `None` when it was never written
    fn get(&self, key: &str) -> GasPadResult<Option<String>>;

    /// Replace a slot
    fn set(&mut self, key: &str, value: &str) -> GasPadResult<()>;

    /// Clear a slot; clearing a missing slot is not an error
    fn remove(&mut self, key: &str) -> GasPadResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> GasPadResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> GasPadResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> GasPadResult<()> {
        (**self).remove(key)
    }
}
