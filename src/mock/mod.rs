//! ## Mock
//!
//! Contains mock for test units

use std::ffi::CString;

use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict};

// -- logger

#[allow(dead_code)]
pub fn logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// -- interpreter

/// Start the embedded interpreter shared by test units.
pub fn interpreter() {
    pyo3::prepare_freethreaded_python();
}

/// An `io.BytesIO` seeded with `data`.
pub fn bytes_io<'py>(py: Python<'py>, data: &[u8]) -> Bound<'py, PyAny> {
    py.import("io")
        .unwrap()
        .call_method1("BytesIO", (PyBytes::new(py, data),))
        .unwrap()
}

/// Run `source` and instantiate the class named `class` from it.
pub fn instance<'py>(py: Python<'py>, class: &str, source: &str) -> Bound<'py, PyAny> {
    let code = CString::new(source).unwrap();
    let ns = PyDict::new(py);
    py.run(&code, Some(&ns), None).unwrap();
    ns.get_item(class).unwrap().unwrap().call0().unwrap()
}
