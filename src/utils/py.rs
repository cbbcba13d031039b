//! ## py
//!
//! Conversions between the Python file protocol and native stream types

use std::io::SeekFrom;

use pyo3::prelude::*;

// `whence` values of the Python file protocol
const SEEK_SET: u8 = 0;
const SEEK_CUR: u8 = 1;
const SEEK_END: u8 = 2;

/// Resolve attribute `name` on `fileobj` if present and callable.
///
/// Absent or non-callable attributes yield `None`; nothing is raised.
pub fn resolve_method(fileobj: &Bound<'_, PyAny>, name: &str) -> Option<Py<PyAny>> {
    let attr = fileobj.getattr(name).ok()?;
    attr.is_callable().then(|| attr.unbind())
}

/// Convert a native seek target to the `(offset, whence)` pair expected by
/// the Python file protocol.
pub fn seek_args(pos: SeekFrom) -> (i64, u8) {
    match pos {
        SeekFrom::Start(offset) => (offset as i64, SEEK_SET),
        SeekFrom::Current(offset) => (offset, SEEK_CUR),
        SeekFrom::End(offset) => (offset, SEEK_END),
    }
}

#[cfg(test)]
mod test {

    use pretty_assertions::assert_eq;
    use serial_test::serial;

    use super::*;
    use crate::mock;

    #[test]
    fn should_map_seek_targets() {
        assert_eq!(seek_args(SeekFrom::Start(5)), (5, 0));
        assert_eq!(seek_args(SeekFrom::Current(-2)), (-2, 1));
        assert_eq!(seek_args(SeekFrom::End(-1)), (-1, 2));
    }

    #[test]
    #[serial]
    fn should_resolve_callable_attributes_only() {
        mock::logger();
        mock::interpreter();
        Python::with_gil(|py| {
            let fileobj = mock::bytes_io(py, b"");
            assert!(resolve_method(&fileobj, "read").is_some());
            // absent attribute
            assert!(resolve_method(&fileobj, "fsync").is_none());
            // present but not callable
            assert!(resolve_method(&fileobj, "closed").is_none());
        });
    }
}
