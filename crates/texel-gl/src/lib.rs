//! OpenGL texture and shader loading helpers over [glow].
//!
//! This crate covers the GL-facing half of asset loading:
//!
//! - [`load_dds_texture`] - upload a pre-compressed, mip-mapped DDS
//!   container (parsed by [`texel_dds`]) to a 2D texture.
//! - [`load_image_texture`] / [`load_image_texture_flipped`] - decode a
//!   common image file (PNG/JPEG/BMP) via the [image] crate and upload
//!   it with generated mipmaps.
//! - [`compile_shader`] / [`load_shader`] / [`link_program`] - GLSL
//!   compilation and linking with info-log error reporting.
//!
//! Every call is synchronous and leaves no GL object behind on failure;
//! objects returned on success are owned by the caller and must be
//! deleted through the same context when no longer needed.
//!
//! # Safety
//!
//! All functions here issue raw GL calls and are `unsafe`: they require
//! a valid [`glow::Context`] that is current on the calling thread.
//!
//! [glow]: https://docs.rs/glow
//! [image]: https://docs.rs/image

mod error;
mod shader;
mod texture;

pub use error::{Error, Result};
pub use shader::{compile_shader, link_program, load_shader};
pub use texture::{
    gl_internal_format, load_dds_texture, load_image_texture, load_image_texture_flipped,
    COMPRESSED_RGBA_S3TC_DXT1_EXT, COMPRESSED_RGBA_S3TC_DXT3_EXT, COMPRESSED_RGBA_S3TC_DXT5_EXT,
};
