#![crate_name = "pyio_stream"]
#![crate_type = "lib"]

//! # pyio-stream
//!
//! pyio-stream lets a Python object exposing `read`/`seek`/`tell` methods be consumed as a
//! native Rust input stream, via [pyo3](https://github.com/PyO3/pyo3).
//!
//! ## Get started
//!
//! First of all you need to add **pyio-stream** to your project dependencies:
//!
//! ```toml
//! pyio-stream = "^0.1"
//! ```
//!
//! these features are supported:
//!
//! - `no-log`: disable logging. By default, this library will log via the `log` crate.
//!
//!
//! ### Reading a Python file-like object
//!
//! The wrapped object's `read`, `seek` and `tell` attributes are resolved once when the
//! stream is built; each of them is optional. The stream acquires the interpreter lock
//! around every forwarded call, so it can be driven from any thread.
//!
//! ```no_run
//! use std::io::{Read, Seek, SeekFrom};
//!
//! use pyio_stream::PyInputStream;
//! use pyo3::prelude::*;
//!
//! // any object with a read method works; io.BytesIO is the simplest
//! let fileobj: Py<PyAny> = Python::with_gil(|py| {
//!     let io = py.import("io").unwrap();
//!     io.call_method1("BytesIO", (b"hello".as_slice(),))
//!         .unwrap()
//!         .unbind()
//! });
//!
//! let mut stream = PyInputStream::try_new(&fileobj).unwrap();
//! assert!(stream.is_seekable());
//! assert_eq!(stream.byte_length(), Some(5));
//!
//! let mut contents = Vec::new();
//! stream.read_to_end(&mut contents).unwrap();
//! assert_eq!(contents, b"hello");
//!
//! stream.seek(SeekFrom::Start(0)).unwrap();
//! ```
//!

#![doc(html_playground_url = "https://play.rust-lang.org")]

// -- crates
#[macro_use]
extern crate log;

mod stream;

pub use stream::{PyInputStream, StreamStatus};

// -- utils
pub(crate) mod utils;
// -- mock
#[cfg(test)]
pub(crate) mod mock;
