//! DDS file access and mip-chain walking.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use zerocopy::FromBytes;

use crate::header::{mip_byte_size, DdsHeader, DxtFormat};
use crate::{Error, Result, DDS_MAGIC, HEADER_SIZE};

/// A parsed DDS container over some byte source.
///
/// The header is validated on construction; the mip payloads are bounds
/// checked lazily, one level at a time, by [`DdsFile::mip_levels`]. Use
/// [`DdsFile::open`] to memory-map a file from disk, or [`DdsFile::new`]
/// to parse an in-memory buffer.
#[derive(Debug)]
pub struct DdsFile<D> {
    data: D,
    header: DdsHeader,
    format: DxtFormat,
}

impl DdsFile<Mmap> {
    /// Open a DDS file and map it read-only.
    ///
    /// The mapping lives as long as the returned value and is released
    /// when it is dropped, on every path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;

        // A zero-length file cannot be mapped; check the size first.
        let len = file.metadata()?.len();
        if len < HEADER_SIZE as u64 {
            return Err(Error::TooSmall { size: len as usize });
        }

        let mmap = unsafe { Mmap::map(&file)? };
        Self::new(mmap)
    }
}

impl<D: AsRef<[u8]>> DdsFile<D> {
    /// Parse a DDS container from a byte source.
    ///
    /// Validates the magic, decodes the header and maps the format code.
    /// Payload sizes are not checked here; see [`DdsFile::mip_levels`].
    pub fn new(data: D) -> Result<Self> {
        let bytes = data.as_ref();

        if bytes.len() < HEADER_SIZE {
            return Err(Error::TooSmall { size: bytes.len() });
        }

        let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
        if &magic != DDS_MAGIC {
            return Err(Error::InvalidMagic(magic));
        }

        let (header, _) = DdsHeader::read_from_prefix(&bytes[4..])
            .map_err(|_| Error::TooSmall { size: bytes.len() })?;

        let four_cc = header.pixel_format.four_cc;
        let format =
            DxtFormat::from_four_cc(four_cc).ok_or(Error::UnsupportedFormat(four_cc))?;

        Ok(Self {
            data,
            header,
            format,
        })
    }

    /// The raw file bytes, header included.
    pub fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    /// The decoded header.
    pub fn header(&self) -> DdsHeader {
        self.header
    }

    /// Base (level 0) width in pixels.
    pub fn width(&self) -> u32 {
        self.header.width
    }

    /// Base (level 0) height in pixels.
    pub fn height(&self) -> u32 {
        self.header.height
    }

    /// The block-compression format.
    pub fn format(&self) -> DxtFormat {
        self.format
    }

    /// Number of mip levels stored.
    ///
    /// A header count of zero means the file carries only the base
    /// level, so this is always at least 1.
    pub fn mip_count(&self) -> u32 {
        self.header.mipmap_count.max(1)
    }

    /// Iterate over the stored mip levels, largest first.
    ///
    /// Each level's payload is bounds checked against the file length as
    /// it is reached; the first level that does not fit yields
    /// [`Error::TruncatedMip`] and ends the iteration.
    pub fn mip_levels(&self) -> MipLevels<'_> {
        MipLevels {
            data: self.data.as_ref(),
            format: self.format,
            width: self.width(),
            height: self.height(),
            offset: HEADER_SIZE,
            level: 0,
            remaining: self.mip_count(),
            failed: false,
        }
    }
}

/// One mip level of a DDS container.
#[derive(Debug, Clone, Copy)]
pub struct MipLevel<'a> {
    /// Level index, 0 for the base image.
    pub index: u32,
    /// Level width in pixels.
    pub width: u32,
    /// Level height in pixels.
    pub height: u32,
    /// Compressed payload bytes.
    pub data: &'a [u8],
}

/// Iterator over the mip levels of a [`DdsFile`].
///
/// Yields `Err` at most once, for the first level whose payload does not
/// fit in the file, and nothing after that.
pub struct MipLevels<'a> {
    data: &'a [u8],
    format: DxtFormat,
    width: u32,
    height: u32,
    offset: usize,
    level: u32,
    remaining: u32,
    failed: bool,
}

impl<'a> Iterator for MipLevels<'a> {
    type Item = Result<MipLevel<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining == 0 {
            return None;
        }

        let size = mip_byte_size(self.width, self.height, self.format.block_size());
        if self.data.len() - self.offset < size {
            self.failed = true;
            return Some(Err(Error::TruncatedMip {
                level: self.level,
                offset: self.offset,
                expected: size,
                file_size: self.data.len(),
            }));
        }

        let level = MipLevel {
            index: self.level,
            width: self.width,
            height: self.height,
            data: &self.data[self.offset..self.offset + size],
        };

        self.width = (self.width / 2).max(1);
        self.height = (self.height / 2).max(1);
        self.offset += size;
        self.level += 1;
        self.remaining -= 1;

        Some(Ok(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FourCC;

    /// Build a header-only DDS buffer; payload is appended by the caller.
    fn make_header(width: u32, height: u32, mip_count: u32, four_cc: &[u8; 4]) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_SIZE];
        data[..4].copy_from_slice(DDS_MAGIC);
        data[4..8].copy_from_slice(&DdsHeader::SIZE.to_le_bytes());
        data[12..16].copy_from_slice(&height.to_le_bytes());
        data[16..20].copy_from_slice(&width.to_le_bytes());
        data[28..32].copy_from_slice(&mip_count.to_le_bytes());
        data[76..80].copy_from_slice(&32u32.to_le_bytes());
        data[84..88].copy_from_slice(four_cc);
        data
    }

    fn make_dds(width: u32, height: u32, mip_count: u32, four_cc: &[u8; 4]) -> Vec<u8> {
        let mut data = make_header(width, height, mip_count, four_cc);
        let format = DxtFormat::from_four_cc(FourCC(*four_cc)).unwrap();
        let (mut w, mut h) = (width, height);
        for _ in 0..mip_count.max(1) {
            let size = mip_byte_size(w, h, format.block_size());
            data.extend(std::iter::repeat(0xAB).take(size));
            w = (w / 2).max(1);
            h = (h / 2).max(1);
        }
        data
    }

    #[test]
    fn parses_well_formed_file() {
        let dds = DdsFile::new(make_dds(8, 8, 2, b"DXT1")).unwrap();
        assert_eq!(dds.width(), 8);
        assert_eq!(dds.height(), 8);
        assert_eq!(dds.mip_count(), 2);
        assert_eq!(dds.format(), DxtFormat::Dxt1);
    }

    #[test]
    fn mip_levels_cover_entire_payload() {
        let dds = DdsFile::new(make_dds(16, 16, 3, b"DXT5")).unwrap();
        let levels: Vec<_> = dds.mip_levels().map(|l| l.unwrap()).collect();
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[0].data.len(), 256);
        assert_eq!(levels[1].data.len(), 64);
        assert_eq!(levels[2].data.len(), 16);

        let payload: usize = levels.iter().map(|l| l.data.len()).sum();
        assert_eq!(payload, dds.data().len() - HEADER_SIZE);
    }

    #[test]
    fn rejects_short_file() {
        let err = DdsFile::new(vec![0u8; 64]).unwrap_err();
        assert!(matches!(err, Error::TooSmall { size: 64 }));
    }

    #[test]
    fn rejects_bad_magic() {
        // 128 zero bytes: long enough, but not a DDS file.
        let err = DdsFile::new(vec![0u8; HEADER_SIZE]).unwrap_err();
        assert!(matches!(err, Error::InvalidMagic([0, 0, 0, 0])));
    }

    #[test]
    fn rejects_unknown_format_code() {
        let err = DdsFile::new(make_header(8, 8, 1, b"DX10")).unwrap_err();
        match err {
            Error::UnsupportedFormat(four_cc) => assert_eq!(four_cc, FourCC(*b"DX10")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn truncated_chain_fails_at_first_overrunning_level() {
        // Declare 3 levels of a 16x16 DXT5 but provide payload for two.
        let mut data = make_header(16, 16, 3, b"DXT5");
        data.extend(std::iter::repeat(0).take(256 + 64));

        let dds = DdsFile::new(data).unwrap();
        let mut levels = dds.mip_levels();
        assert!(levels.next().unwrap().is_ok());
        assert!(levels.next().unwrap().is_ok());

        match levels.next().unwrap().unwrap_err() {
            Error::TruncatedMip {
                level,
                offset,
                expected,
                file_size,
            } => {
                assert_eq!(level, 2);
                assert_eq!(offset, HEADER_SIZE + 256 + 64);
                assert_eq!(expected, 16);
                assert_eq!(file_size, HEADER_SIZE + 256 + 64);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // The iterator ends after reporting the failure.
        assert!(levels.next().is_none());
    }

    #[test]
    fn halving_floors_at_one() {
        let dds = DdsFile::new(make_dds(10, 6, 4, b"DXT1")).unwrap();
        let extents: Vec<_> = dds
            .mip_levels()
            .map(|l| l.map(|l| (l.width, l.height)).unwrap())
            .collect();
        assert_eq!(extents, [(10, 6), (5, 3), (2, 1), (1, 1)]);
    }

    #[test]
    fn zero_mip_count_means_base_level_only() {
        let dds = DdsFile::new(make_dds(4, 4, 0, b"DXT3")).unwrap();
        assert_eq!(dds.mip_count(), 1);
        assert_eq!(dds.mip_levels().count(), 1);
    }

    #[test]
    fn open_reports_missing_file_as_io_error() {
        let err = DdsFile::open("/no/such/texture.dds").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn open_maps_and_parses_from_disk() {
        let path = std::env::temp_dir().join(format!("texel-dds-open-{}.dds", std::process::id()));
        std::fs::write(&path, make_dds(8, 4, 2, b"DXT1")).unwrap();

        let dds = DdsFile::open(&path).unwrap();
        assert_eq!((dds.width(), dds.height()), (8, 4));
        assert_eq!(dds.mip_levels().filter_map(|l| l.ok()).count(), 2);

        drop(dds);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn open_rejects_short_file_before_mapping() {
        let path = std::env::temp_dir().join(format!("texel-dds-short-{}.dds", std::process::id()));
        std::fs::write(&path, b"DDS ").unwrap();

        let err = DdsFile::open(&path).unwrap_err();
        assert!(matches!(err, Error::TooSmall { size: 4 }));

        std::fs::remove_file(&path).unwrap();
    }
}
