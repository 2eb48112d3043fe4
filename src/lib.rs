//! Data Matrix (ECC 200) data codeword encoding.
//!
//! This crate implements the data part of Data Matrix encoding as defined
//! in ISO/IEC 16022: it converts a byte string into the codeword sequence
//! for one caller-chosen encodation scheme (ASCII, C40, Text, X12, EDIFACT
//! or Base 256), picks the smallest symbol that fits unless a fixed size is
//! requested, and applies the end-of-symbol and padding rules exactly.
//!
//! Error correction, module placement and rendering are separate concerns
//! and not part of this crate.
//!
//! # Example
//!
//! ```
//! use dmtx_encode::{encode_data, Scheme, SymbolSize};
//!
//! let (codewords, size) = encode_data(b"123456", Scheme::Ascii, SymbolSize::Min).unwrap();
//! assert_eq!(codewords, vec![142, 164, 186]);
//! assert_eq!(size, SymbolSize::Square10);
//! ```
#![no_std]

extern crate alloc;

mod encodation;
mod symbol_size;

pub use encodation::{encode_data, DataEncodingError, Scheme};
pub use symbol_size::SymbolSize;
