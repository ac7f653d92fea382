use std::ops::{Deref, DerefMut};

/// runs a cleanup function with the guarded value when the guard goes out of scope, unless the
/// guard was dismissed.
pub struct ScopeGuard<T, F: FnOnce(T)> {
    inner: Option<(T, F)>,
}

impl<T, F: FnOnce(T)> ScopeGuard<T, F> {
    #[must_use]
    pub fn new_with_data(data: T, cleanup: F) -> Self {
        Self {
            inner: Some((data, cleanup)),
        }
    }

    /// prevents the cleanup function from running and returns the guarded data.
    pub fn dismiss(mut self) -> T {
        let (data, _cleanup) = self.inner.take().expect("guard was already consumed");
        data
    }
}

impl ScopeGuard<(), fn(())> {
    /// the return must be bound to a named variable (e.g., `let _guard = ...`).
    ///
    /// NOTE: `let _ = ...` drops the guard immediately, `let _guard = ...` keeps it until the end
    /// of the scope.
    #[must_use]
    pub fn new(cleanup: impl FnOnce()) -> ScopeGuard<(), impl FnOnce(())> {
        ScopeGuard::new_with_data((), |_| cleanup())
    }
}

impl<T, F: FnOnce(T)> Drop for ScopeGuard<T, F> {
    fn drop(&mut self) {
        if let Some((data, cleanup)) = self.inner.take() {
            cleanup(data);
        }
    }
}

impl<T, F: FnOnce(T)> Deref for ScopeGuard<T, F> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner.as_ref().expect("guard was already consumed").0
    }
}

impl<T, F: FnOnce(T)> DerefMut for ScopeGuard<T, F> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner.as_mut().expect("guard was already consumed").0
    }
}
