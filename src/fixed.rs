use serde::{Serialize, Serializer};
use std::fmt;

/// 8.8 big-endian fixed-point number (e.g. mvhd volume).
///
/// Wraps the raw wire bits, so decode-then-encode is exact for every input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fixed16(pub u16);

impl Fixed16 {
    pub fn from_be_bytes(b: [u8; 2]) -> Self {
        Fixed16(u16::from_be_bytes(b))
    }
    pub fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
    pub fn from_parts(integer: u8, frac: u8) -> Self {
        Fixed16(((integer as u16) << 8) | frac as u16)
    }
    pub fn integer(self) -> u8 {
        (self.0 >> 8) as u8
    }
    /// Fractional numerator over 256.
    pub fn frac(self) -> u8 {
        (self.0 & 0xff) as u8
    }
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 256.0
    }
}

impl fmt::Display for Fixed16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

impl Serialize for Fixed16 {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(self.to_f64())
    }
}

/// 16.16 big-endian fixed-point number (e.g. mvhd rate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fixed32(pub u32);

impl Fixed32 {
    pub fn from_be_bytes(b: [u8; 4]) -> Self {
        Fixed32(u32::from_be_bytes(b))
    }
    pub fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
    pub fn from_parts(integer: u16, frac: u16) -> Self {
        Fixed32(((integer as u32) << 16) | frac as u32)
    }
    pub fn integer(self) -> u16 {
        (self.0 >> 16) as u16
    }
    /// Fractional numerator over 65536.
    pub fn frac(self) -> u16 {
        (self.0 & 0xffff) as u16
    }
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 65536.0
    }
}

impl fmt::Display for Fixed32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

impl Serialize for Fixed32 {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(self.to_f64())
    }
}
