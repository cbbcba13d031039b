//! # utils
//!
//! adapter utilities

pub mod py;
