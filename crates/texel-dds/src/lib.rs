//! DDS compressed-texture container parsing.
//!
//! A DDS file stores a pre-compressed, mip-mapped 2D image: a 4-byte
//! magic, a fixed 124-byte header, and the concatenated mip-level
//! payloads ordered from largest (level 0) to smallest. This crate
//! decodes the header as a typed struct and walks the mip chain with
//! per-level bounds checking, without touching any graphics API.
//!
//! # Example
//!
//! ```no_run
//! use texel_dds::DdsFile;
//!
//! let dds = DdsFile::open("assets/crate.dds")?;
//! println!("{}x{}, {} mip levels", dds.width(), dds.height(), dds.mip_count());
//!
//! for level in dds.mip_levels() {
//!     let level = level?;
//!     println!("level {}: {}x{}, {} bytes", level.index, level.width, level.height, level.data.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod file;
mod header;

pub use error::{Error, Result};
pub use file::{DdsFile, MipLevel, MipLevels};
pub use header::{mip_byte_size, DdsHeader, DdsPixelFormat, DxtFormat, FourCC};

/// DDS file magic bytes ("DDS ").
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";

/// Total size of the fixed file header: magic plus [`DdsHeader`].
pub const HEADER_SIZE: usize = 4 + std::mem::size_of::<DdsHeader>();
