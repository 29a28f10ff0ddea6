use crate::boxes::{BoxHeader, BoxNode, FourCC, HEADER_SIZE};
use crate::source::ReadAt;

#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("short read: {len} bytes at offset {offset}, only {available} available")]
    ShortRead { offset: u64, len: u64, available: u64 },
    #[error("malformed '{typ}' box at offset {offset}: size {size} below 8-byte header")]
    MalformedBox { typ: FourCC, offset: u64, size: u32 },
    #[error("truncated '{typ}' payload: need {need} bytes, got {got}")]
    TruncatedPayload { typ: FourCC, need: u64, got: u64 },
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Reads the fixed 8-byte box header at `offset`: big-endian u32 size, then
/// the type tag verbatim (the tag need not be printable).
///
/// ISOBMFF also defines size 0 ("box extends to end of container") and
/// size 1 (64-bit largesize follows); neither is interpreted here, so any
/// size below 8 fails with [`ParseError::MalformedBox`]. Largesize support
/// would hook in at this point.
pub fn read_box_header(src: &dyn ReadAt, offset: u64) -> Result<BoxHeader> {
    let buf = src.read_at(offset, HEADER_SIZE)?;
    let size = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let typ = FourCC([buf[4], buf[5], buf[6], buf[7]]);

    if (size as u64) < HEADER_SIZE {
        return Err(ParseError::MalformedBox { typ, offset, size });
    }
    Ok(BoxHeader { size, typ, start: offset })
}

/// Exact inverse of [`read_box_header`]: the original 8 wire bytes.
pub fn encode_box_header(hdr: &BoxHeader) -> [u8; 8] {
    let mut out = [0u8; 8];
    out[..4].copy_from_slice(&hdr.size.to_be_bytes());
    out[4..].copy_from_slice(&hdr.typ.0);
    out
}

/// Lazily walks the sibling boxes covering `[start, start + len)`.
///
/// Each step decodes one header and advances by its declared size, so the
/// yielded nodes tile the range in on-disk order. The walk holds no state
/// beyond its cursor; walking the same range twice yields the same sequence.
/// A header failure ends the walk, since later sibling offsets cannot be
/// trusted once one header is unreadable.
pub fn walk<'a>(src: &'a dyn ReadAt, start: u64, len: u64) -> BoxWalk<'a> {
    BoxWalk {
        src,
        offset: start,
        end: start.saturating_add(len),
        failed: false,
    }
}

pub struct BoxWalk<'a> {
    src: &'a dyn ReadAt,
    offset: u64,
    end: u64,
    failed: bool,
}

impl<'a> Iterator for BoxWalk<'a> {
    type Item = Result<BoxNode<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.end {
            return None;
        }
        match read_box_header(self.src, self.offset) {
            Ok(hdr) => {
                // size >= 8 is guaranteed here, so the cursor always advances
                self.offset = hdr.end();
                Some(Ok(BoxNode::new(hdr, self.src)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Collecting form of [`walk`].
pub fn read_boxes<'a>(src: &'a dyn ReadAt, start: u64, len: u64) -> Result<Vec<BoxNode<'a>>> {
    walk(src, start, len).collect()
}
