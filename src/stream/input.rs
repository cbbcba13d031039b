//! # input
//!
//! Input stream over a Python file-like object

use std::io::{self, Read, Seek, SeekFrom};

use pyo3::exceptions::PyTypeError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use super::{GilPolicy, StreamStatus};
use crate::utils::py as py_utils;

/// Input stream over a Python file-like object.
///
/// The wrapped object's `read`, `seek` and `tell` attributes are resolved
/// once at construction; each is independently optional. Reading requires
/// `read`, while [`byte_length`](Self::byte_length) requires both `seek`
/// and `tell`. Failures are latched in a [`StreamStatus`] rather than
/// raised, so a consumer that got fewer bytes than requested polls
/// [`last_error`](Self::last_error) to find out why.
///
/// The stream holds its own references to the resolved methods; the
/// wrapped object itself stays shared with whatever else references it on
/// the interpreter side.
pub struct PyInputStream {
    read_method: Option<Py<PyAny>>,
    seek_method: Option<Py<PyAny>>,
    tell_method: Option<Py<PyAny>>,
    gil: GilPolicy,
    status: StreamStatus,
}

impl PyInputStream {
    /// Returns whether `fileobj` exposes a callable `read` attribute.
    ///
    /// This is the admission gate to run before wrapping an arbitrary
    /// object; no reference to the attribute is retained.
    pub fn supports_reading(fileobj: &Bound<'_, PyAny>) -> bool {
        py_utils::resolve_method(fileobj, "read").is_some()
    }

    /// Returns whether `fileobj` exposes callable `seek` and `tell`
    /// attributes, i.e. whether a stream wrapping it will report a length.
    pub fn supports_seeking(fileobj: &Bound<'_, PyAny>) -> bool {
        py_utils::resolve_method(fileobj, "seek").is_some()
            && py_utils::resolve_method(fileobj, "tell").is_some()
    }

    /// Wrap `fileobj`, acquiring the GIL around the method resolution and
    /// around every later call on the stream.
    ///
    /// Wrapping an object without a callable `read` is not rejected here;
    /// every read on such a stream latches [`StreamStatus::ReadError`].
    /// Use [`supports_reading`](Self::supports_reading) or
    /// [`try_new`](Self::try_new) to gate construction.
    pub fn new(fileobj: &Py<PyAny>) -> Self {
        Python::with_gil(|py| Self::resolve(fileobj.bind(py), GilPolicy::Acquire))
    }

    /// Wrap `fileobj`, rejecting objects without a callable `read`.
    ///
    /// # Errors
    ///
    /// Raises a `TypeError` when `fileobj` is not readable.
    pub fn try_new(fileobj: &Py<PyAny>) -> PyResult<Self> {
        Python::with_gil(|py| {
            let fileobj = fileobj.bind(py);
            if !Self::supports_reading(fileobj) {
                return Err(PyTypeError::new_err(
                    "object does not expose a callable read method",
                ));
            }
            Ok(Self::resolve(fileobj, GilPolicy::Acquire))
        })
    }

    /// Wrap `fileobj` from code that already holds the GIL.
    ///
    /// The returned stream never takes the GIL itself.
    ///
    /// # Safety
    ///
    /// The caller attests that the GIL is held during this call and around
    /// every later use of the stream, including its drop. A call made
    /// without the GIL is undefined behavior.
    pub unsafe fn new_unchecked(fileobj: &Bound<'_, PyAny>) -> Self {
        Self::resolve(fileobj, GilPolicy::CallerHeld)
    }

    fn resolve(fileobj: &Bound<'_, PyAny>, gil: GilPolicy) -> Self {
        let stream = Self {
            read_method: py_utils::resolve_method(fileobj, "read"),
            seek_method: py_utils::resolve_method(fileobj, "seek"),
            tell_method: py_utils::resolve_method(fileobj, "tell"),
            gil,
            status: StreamStatus::NoError,
        };
        debug!(
            "wrapped file-like object: read={} seek={} tell={}",
            stream.read_method.is_some(),
            stream.seek_method.is_some(),
            stream.tell_method.is_some()
        );
        stream
    }

    /// Latched error state of the last failed operation.
    pub fn last_error(&self) -> StreamStatus {
        self.status
    }

    /// Clear the error latch.
    pub fn reset_error(&mut self) {
        self.status = StreamStatus::NoError;
    }

    /// Whether the wrapped object resolved a `seek` method at
    /// construction. Never re-checked afterwards.
    pub fn is_seekable(&self) -> bool {
        self.seek_method.is_some()
    }

    /// Total stream length in bytes, or `None` when the wrapped object
    /// does not expose both `seek` and `tell`.
    ///
    /// Measured by seeking to the end and back; the current position is
    /// restored, but the round trip is not atomic with respect to other
    /// users of the same wrapped object.
    pub fn byte_length(&mut self) -> Option<u64> {
        if self.seek_method.is_none() || self.tell_method.is_none() {
            return None;
        }
        let mark = self.position();
        let length = self.seek_to(SeekFrom::End(0));
        self.seek_to(SeekFrom::Start(mark));
        Some(length)
    }

    /// Read up to `buf.len()` bytes through the wrapped object's `read`.
    ///
    /// Returns the number of bytes copied into `buf`. An empty `buf`
    /// returns 0 without entering the interpreter. An empty reply latches
    /// [`StreamStatus::Eof`]; a reply that is not `bytes`, or a raised
    /// exception, latches [`StreamStatus::ReadError`] and returns 0. A
    /// reply longer than requested is truncated to fit.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
        if buf.is_empty() {
            return 0;
        }
        let Some(read) = self.read_method.as_ref() else {
            self.status = StreamStatus::ReadError;
            return 0;
        };
        trace!("read({}) on wrapped object", buf.len());
        let (copied, latch) = self.gil.with(|py| match read.call1(py, (buf.len(),)) {
            Ok(reply) => match reply.downcast_bound::<PyBytes>(py) {
                Ok(payload) => {
                    // bytes only; str and bytearray replies are failures
                    let payload = payload.as_bytes();
                    let copied = payload.len().min(buf.len());
                    buf[..copied].copy_from_slice(&payload[..copied]);
                    (copied, payload.is_empty().then_some(StreamStatus::Eof))
                }
                Err(_) => {
                    error!("read returned a non-bytes value");
                    (0, Some(StreamStatus::ReadError))
                }
            },
            Err(e) => {
                error!("read raised: {}", e);
                (0, Some(StreamStatus::ReadError))
            }
        });
        if let Some(latch) = latch {
            self.status = latch;
        }
        copied
    }

    /// Writes always fail; the stream is read-only and never forwards
    /// anything to the wrapped object.
    ///
    /// Latches [`StreamStatus::WriteError`] and returns 0 for any input.
    pub fn write_bytes(&mut self, _buf: &[u8]) -> usize {
        self.status = StreamStatus::WriteError;
        0
    }

    /// Seek the wrapped object, then report the resulting position.
    ///
    /// The `seek` return value is discarded and the new position queried
    /// through [`position`](Self::position) instead, which tolerates
    /// wrapped objects whose `seek` returns nothing.
    pub fn seek_to(&mut self, pos: SeekFrom) -> u64 {
        if let Some(seek) = self.seek_method.as_ref() {
            let (offset, whence) = py_utils::seek_args(pos);
            trace!("seek({}, {}) on wrapped object", offset, whence);
            self.gil.with(|py| {
                if let Err(e) = seek.call1(py, (offset, whence)) {
                    error!("seek raised: {}", e);
                }
            });
        }
        self.position()
    }

    /// Current position as reported by the wrapped object's `tell`, or 0
    /// when the call fails or does not produce a usable offset.
    pub fn position(&self) -> u64 {
        let Some(tell) = self.tell_method.as_ref() else {
            return 0;
        };
        self.gil.with(|py| {
            tell.call0(py)
                .and_then(|offset| offset.extract::<u64>(py))
                .unwrap_or_else(|e| {
                    error!("tell produced no usable offset: {}", e);
                    0
                })
        })
    }
}

impl Clone for PyInputStream {
    /// Shallow copy sharing the wrapped object's callables.
    ///
    /// The copy keeps the GIL policy and starts with a clear error latch.
    fn clone(&self) -> Self {
        // the copy path always re-enters the GIL, even for caller-held
        // streams
        Python::with_gil(|py| Self {
            read_method: self.read_method.as_ref().map(|m| m.clone_ref(py)),
            seek_method: self.seek_method.as_ref().map(|m| m.clone_ref(py)),
            tell_method: self.tell_method.as_ref().map(|m| m.clone_ref(py)),
            gil: self.gil,
            status: StreamStatus::NoError,
        })
    }
}

impl Drop for PyInputStream {
    fn drop(&mut self) {
        // release the method references under the same GIL discipline they
        // were resolved with
        let methods = (
            self.read_method.take(),
            self.seek_method.take(),
            self.tell_method.take(),
        );
        self.gil.with(move |_py| drop(methods));
    }
}

impl Read for PyInputStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let copied = self.read_bytes(buf);
        if copied == 0 && !buf.is_empty() && self.status == StreamStatus::ReadError {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "read on wrapped object failed",
            ));
        }
        Ok(copied)
    }
}

impl Seek for PyInputStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        if !self.is_seekable() {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "wrapped object does not expose seek",
            ));
        }
        Ok(self.seek_to(pos))
    }
}
