use crate::boxes::{BoxHeader, BoxNode, FourCC, HEADER_SIZE};
use crate::fixed::{Fixed16, Fixed32};
use crate::parser::{self, ParseError, Result};
use byteorder::{BigEndian, ReadBytesExt};
use serde::Serialize;
use std::io::Cursor;

/// Typed view over the box types this crate decodes.
///
/// Anything not in this list becomes `KnownBox::Unknown(fourcc)`; unknown
/// boxes are never an error, only opaque siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownBox {
    Ftyp,
    Moov,
    Mvhd,
    Unknown(FourCC),
}

impl From<FourCC> for KnownBox {
    fn from(cc: FourCC) -> Self {
        match &cc.0 {
            b"ftyp" => KnownBox::Ftyp,
            b"moov" => KnownBox::Moov,
            b"mvhd" => KnownBox::Mvhd,
            _ => KnownBox::Unknown(cc),
        }
    }
}

impl KnownBox {
    /// Does this box *contain* child boxes (container semantics)?
    pub fn is_container(&self) -> bool {
        matches!(self, KnownBox::Moov)
    }
}

/// File Type Box (`ftyp`).
///
/// Payload: 4-byte major brand, big-endian u32 minor version, then
/// compatible brands in 4-byte chunks to the end of the box.
#[derive(Debug, Clone, Serialize)]
pub struct FtypBox {
    pub header: BoxHeader,
    pub major_brand: FourCC,
    pub minor_version: u32,
    pub compatible_brands: Vec<FourCC>,
}

impl FtypBox {
    pub fn decode(node: &BoxNode<'_>) -> Result<Self> {
        let data = node.payload()?;
        if data.len() < 8 {
            return Err(ParseError::TruncatedPayload {
                typ: node.typ(),
                need: 8,
                got: data.len() as u64,
            });
        }

        let major_brand = FourCC([data[0], data[1], data[2], data[3]]);
        let mut cur = Cursor::new(&data[4..8]);
        let minor_version = cur.read_u32::<BigEndian>()?;

        // chunks_exact drops a trailing partial chunk, as required
        let compatible_brands = data[8..]
            .chunks_exact(4)
            .map(|c| FourCC([c[0], c[1], c[2], c[3]]))
            .collect();

        Ok(FtypBox {
            header: node.hdr,
            major_brand,
            minor_version,
            compatible_brands,
        })
    }
}

/// Movie Header Box (`mvhd`), the subset of fields this crate reads.
///
/// Payload layout (version 0): byte 0 version, bytes 1..4 flags, bytes
/// 12..16 timescale, 16..20 duration, 20..24 16.16 rate, 24..26 8.8 volume.
#[derive(Debug, Clone, Serialize)]
pub struct MvhdBox {
    pub header: BoxHeader,
    pub version: u8,
    pub flags: u32,
    pub timescale: u32,
    pub duration: u32,
    pub rate: Fixed32,
    pub volume: Fixed16,
}

impl MvhdBox {
    /// Bytes required to reach the last field we decode (volume).
    pub const MIN_PAYLOAD: u64 = 26;

    pub fn decode(node: &BoxNode<'_>) -> Result<Self> {
        let data = node.payload()?;
        if (data.len() as u64) < Self::MIN_PAYLOAD {
            return Err(ParseError::TruncatedPayload {
                typ: node.typ(),
                need: Self::MIN_PAYLOAD,
                got: data.len() as u64,
            });
        }

        let version = data[0];
        let flags = ((data[1] as u32) << 16) | ((data[2] as u32) << 8) | (data[3] as u32);

        let mut cur = Cursor::new(&data[12..26]);
        let timescale = cur.read_u32::<BigEndian>()?;
        let duration = cur.read_u32::<BigEndian>()?;
        let rate = Fixed32(cur.read_u32::<BigEndian>()?);
        let volume = Fixed16(cur.read_u16::<BigEndian>()?);

        Ok(MvhdBox {
            header: node.hdr,
            version,
            flags,
            timescale,
            duration,
            rate,
            volume,
        })
    }
}

/// Movie Box (`moov`): container whose payload is a sequence of child boxes.
#[derive(Debug, Clone, Serialize)]
pub struct MoovBox {
    pub header: BoxHeader,
    pub mvhd: Option<MvhdBox>,
}

impl MoovBox {
    /// Walks this box's payload range and decodes the known children.
    ///
    /// A header-only box (payload of 0 bytes) is an empty container. A
    /// payload shorter than one child header cannot hold any box, so it
    /// fails before any nested walk. Unrecognized child tags are skipped.
    pub fn decode(node: &BoxNode<'_>) -> Result<Self> {
        let payload_len = node.payload_len();
        if payload_len > 0 && payload_len < HEADER_SIZE {
            return Err(ParseError::TruncatedPayload {
                typ: node.typ(),
                need: HEADER_SIZE,
                got: payload_len,
            });
        }

        let mut mvhd = None;
        for child in parser::walk(node.source(), node.payload_start(), payload_len) {
            let child = child?;
            match KnownBox::from(child.typ()) {
                KnownBox::Mvhd if mvhd.is_none() => mvhd = Some(MvhdBox::decode(&child)?),
                _ => {}
            }
        }

        Ok(MoovBox {
            header: node.hdr,
            mvhd,
        })
    }
}
