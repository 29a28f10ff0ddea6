use crate::parser::Result;
use crate::source::ReadAt;
use serde::{Serialize, Serializer};
use std::fmt;

/// Size of the fixed box header: 4-byte size + 4-byte type tag.
pub const HEADER_SIZE: u64 = 8;

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub fn from_str(s: &str) -> Option<Self> {
        let b = s.as_bytes();
        if b.len() == 4 {
            Some(FourCC([b[0], b[1], b[2], b[3]]))
        } else { None }
    }
    pub fn as_str_lossy(&self) -> String {
        self.0.iter().map(|&c| if (32..=126).contains(&c) { c as char } else { '.' })
            .collect()
    }
}
impl fmt::Debug for FourCC { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str_lossy()) } }
impl fmt::Display for FourCC { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str_lossy()) } }

impl Serialize for FourCC {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_str(&self.as_str_lossy())
    }
}

/// One decoded 8-byte box header plus the offset it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoxHeader {
    /// Total box size including the header, as written on disk.
    pub size: u32,
    pub typ: FourCC,
    /// Absolute source offset of the header's first byte.
    pub start: u64,
}

impl BoxHeader {
    pub fn end(&self) -> u64 {
        self.start + self.size as u64
    }
    pub fn payload_start(&self) -> u64 {
        self.start + HEADER_SIZE
    }
    pub fn payload_len(&self) -> u64 {
        (self.size as u64).saturating_sub(HEADER_SIZE)
    }
}

/// A decoded box positioned in its source.
///
/// Holds a non-owning reference to the source; payload bytes are fetched on
/// demand, never copied eagerly. The walker only ever constructs nodes with
/// `size >= 8`.
#[derive(Clone, Copy)]
pub struct BoxNode<'a> {
    pub hdr: BoxHeader,
    src: &'a dyn ReadAt,
}

impl<'a> BoxNode<'a> {
    pub fn new(hdr: BoxHeader, src: &'a dyn ReadAt) -> Self {
        BoxNode { hdr, src }
    }

    pub fn typ(&self) -> FourCC {
        self.hdr.typ
    }
    pub fn start(&self) -> u64 {
        self.hdr.start
    }
    pub fn size(&self) -> u32 {
        self.hdr.size
    }
    pub fn end(&self) -> u64 {
        self.hdr.end()
    }
    pub fn payload_start(&self) -> u64 {
        self.hdr.payload_start()
    }
    pub fn payload_len(&self) -> u64 {
        self.hdr.payload_len()
    }

    /// The bytes following this box's header, `[start + 8, start + size)`.
    pub fn payload(&self) -> Result<Vec<u8>> {
        if self.hdr.payload_len() == 0 {
            return Ok(Vec::new());
        }
        self.src.read_at(self.hdr.payload_start(), self.hdr.payload_len())
    }

    pub fn source(&self) -> &'a dyn ReadAt {
        self.src
    }
}

impl fmt::Debug for BoxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxNode").field("hdr", &self.hdr).finish()
    }
}
