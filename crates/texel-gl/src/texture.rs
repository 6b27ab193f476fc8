//! Texture upload helpers.

use std::path::Path;

use glow::HasContext;
use texel_dds::{DdsFile, DxtFormat};

use crate::{Error, Result};

/// `GL_COMPRESSED_RGBA_S3TC_DXT1_EXT`. glow does not expose the
/// `EXT_texture_compression_s3tc` enums, so they are defined here.
pub const COMPRESSED_RGBA_S3TC_DXT1_EXT: u32 = 0x83F1;
/// `GL_COMPRESSED_RGBA_S3TC_DXT3_EXT`.
pub const COMPRESSED_RGBA_S3TC_DXT3_EXT: u32 = 0x83F2;
/// `GL_COMPRESSED_RGBA_S3TC_DXT5_EXT`.
pub const COMPRESSED_RGBA_S3TC_DXT5_EXT: u32 = 0x83F3;

/// The GL internal format for a DXT compression scheme.
pub fn gl_internal_format(format: DxtFormat) -> u32 {
    match format {
        DxtFormat::Dxt1 => COMPRESSED_RGBA_S3TC_DXT1_EXT,
        DxtFormat::Dxt3 => COMPRESSED_RGBA_S3TC_DXT3_EXT,
        DxtFormat::Dxt5 => COMPRESSED_RGBA_S3TC_DXT5_EXT,
    }
}

/// Load a DDS container from `path` and upload its mip chain to a new
/// 2D texture.
///
/// The file is validated before any GL object is created; a payload
/// truncation discovered mid-chain deletes the texture again, so no GL
/// resource survives any failure path. On success the returned texture
/// has every stored mip level resident and is owned by the caller.
///
/// # Safety
///
/// `gl` must be current on the calling thread.
pub unsafe fn load_dds_texture<P: AsRef<Path>>(
    gl: &glow::Context,
    path: P,
) -> Result<glow::Texture> {
    let path = path.as_ref();
    let dds = DdsFile::open(path).map_err(|source| Error::Dds {
        path: path.to_path_buf(),
        source,
    })?;
    let internal_format = gl_internal_format(dds.format());

    let texture = gl.create_texture().map_err(Error::CreateResource)?;
    gl.bind_texture(glow::TEXTURE_2D, Some(texture));
    // Compressed payloads are byte-tight; default row alignment is 4.
    gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);

    for level in dds.mip_levels() {
        let level = match level {
            Ok(level) => level,
            Err(source) => {
                gl.bind_texture(glow::TEXTURE_2D, None);
                gl.delete_texture(texture);
                return Err(Error::Dds {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        gl.compressed_tex_image_2d(
            glow::TEXTURE_2D,
            level.index as i32,
            internal_format as i32,
            level.width as i32,
            level.height as i32,
            0,
            level.data.len() as i32,
            level.data,
        );
    }

    gl.bind_texture(glow::TEXTURE_2D, None);

    log::debug!(
        "loaded DDS texture {:?}: {}x{} {}, {} mip levels",
        path,
        dds.width(),
        dds.height(),
        dds.format(),
        dds.mip_count()
    );
    Ok(texture)
}

/// Decode an image file and upload it to a new 2D texture.
///
/// Supports the formats the `image` decoder is built with (PNG, JPEG,
/// BMP). The texture gets repeat wrapping, trilinear filtering and a
/// generated mip chain.
///
/// # Safety
///
/// `gl` must be current on the calling thread.
pub unsafe fn load_image_texture<P: AsRef<Path>>(
    gl: &glow::Context,
    path: P,
) -> Result<glow::Texture> {
    load_image(gl, path.as_ref(), false)
}

/// Like [`load_image_texture`], but flips the image vertically before
/// upload, for formats whose row order is top-down.
///
/// # Safety
///
/// `gl` must be current on the calling thread.
pub unsafe fn load_image_texture_flipped<P: AsRef<Path>>(
    gl: &glow::Context,
    path: P,
) -> Result<glow::Texture> {
    load_image(gl, path.as_ref(), true)
}

unsafe fn load_image(gl: &glow::Context, path: &Path, flip: bool) -> Result<glow::Texture> {
    let img = image::open(path).map_err(|source| Error::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let img = if flip { img.flipv() } else { img };
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let texture = gl.create_texture().map_err(Error::CreateResource)?;
    gl.bind_texture(glow::TEXTURE_2D, Some(texture));
    gl.tex_image_2d(
        glow::TEXTURE_2D,
        0,
        glow::RGBA8 as i32,
        width as i32,
        height as i32,
        0,
        glow::RGBA,
        glow::UNSIGNED_BYTE,
        Some(rgba.as_raw().as_slice()),
    );

    gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
    gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
    gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
    gl.tex_parameter_i32(
        glow::TEXTURE_2D,
        glow::TEXTURE_MIN_FILTER,
        glow::LINEAR_MIPMAP_LINEAR as i32,
    );
    gl.generate_mipmap(glow::TEXTURE_2D);
    gl.bind_texture(glow::TEXTURE_2D, None);

    log::debug!("loaded image texture {:?}: {}x{}", path, width, height);
    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_format_mapping() {
        assert_eq!(gl_internal_format(DxtFormat::Dxt1), 0x83F1);
        assert_eq!(gl_internal_format(DxtFormat::Dxt3), 0x83F2);
        assert_eq!(gl_internal_format(DxtFormat::Dxt5), 0x83F3);
    }

    #[test]
    #[ignore = "requires GL context"]
    fn load_dds_texture_uploads_all_levels() {
        // Would test: a well-formed container yields a texture with
        // every level resident, verified via get_tex_level_parameter.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn load_dds_texture_deletes_texture_on_truncated_chain() {
        // Would test: a truncated container leaves no texture alive.
    }
}
