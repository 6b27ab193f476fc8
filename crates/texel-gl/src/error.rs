//! Error types for GL-side loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading textures or shaders.
#[derive(Debug, Error)]
pub enum Error {
    /// The DDS container could not be read or parsed.
    #[error("failed to load DDS container {path:?}: {source}")]
    Dds {
        path: PathBuf,
        #[source]
        source: texel_dds::Error,
    },

    /// The image file could not be decoded.
    #[error("failed to decode image {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// I/O error reading a source file.
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The driver refused to allocate a GL object.
    #[error("failed to allocate GL object: {0}")]
    CreateResource(String),

    /// Shader compilation failed; the driver's info log is attached.
    #[error("shader compilation failed: {log}")]
    ShaderCompile { log: String },

    /// Program linking failed; the driver's info log is attached.
    #[error("program linking failed: {log}")]
    ProgramLink { log: String },
}

/// Result type for GL-side loading.
pub type Result<T> = std::result::Result<T, Error>;
