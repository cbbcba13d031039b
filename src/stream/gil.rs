//! # gil
//!
//! Interpreter lock discipline for boundary calls

use pyo3::prelude::*;

/// How a stream obtains the interpreter lock for each forwarded call.
///
/// Fixed at construction and honored for the stream's whole lifetime,
/// including the release of its method references on drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum GilPolicy {
    /// Acquire and release the GIL around every call.
    #[default]
    Acquire,
    /// The caller holds the GIL whenever the stream is used.
    CallerHeld,
}

impl GilPolicy {
    /// Run `f` with an interpreter token obtained under this policy.
    pub(crate) fn with<R>(self, f: impl FnOnce(Python<'_>) -> R) -> R {
        match self {
            GilPolicy::Acquire => Python::with_gil(f),
            // upheld by the contract of PyInputStream::new_unchecked
            GilPolicy::CallerHeld => f(unsafe { Python::assume_gil_acquired() }),
        }
    }
}

#[cfg(test)]
mod test {

    use pretty_assertions::assert_eq;
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn should_acquire_gil_per_call() {
        crate::mock::logger();
        crate::mock::interpreter();
        let token = GilPolicy::Acquire.with(|py| py.version_info().major);
        assert_eq!(token, 3);
    }

    #[test]
    #[serial]
    fn should_reuse_held_gil() {
        crate::mock::logger();
        crate::mock::interpreter();
        Python::with_gil(|_py| {
            let token = GilPolicy::CallerHeld.with(|py| py.version_info().major);
            assert_eq!(token, 3);
        });
    }
}
