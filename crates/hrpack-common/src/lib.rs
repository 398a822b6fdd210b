//! Common utilities for hrpack.
//!
//! This crate provides the low-level building blocks shared by the hrpack crates:
//!
//! - [`BinaryReader`] - Zero-copy little-endian reading from byte slices
//! - [`WriteExt`] - Little-endian and length-prefixed writing on any [`std::io::Write`]
//! - [`crc`] - CRC32C (Castagnoli) checksum utilities

mod error;
mod reader;
mod writer;

pub mod crc;

pub use error::{Error, Result};
pub use reader::BinaryReader;
pub use writer::WriteExt;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
