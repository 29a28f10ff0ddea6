use crate::known_boxes::{FtypBox, KnownBox, MoovBox};
use crate::parser::{self, Result};
use crate::source::ReadAt;
use serde::Serialize;

/// Decoded top-level view of one MP4 source.
///
/// A missing `ftyp` or `moov` is a valid state, not an error; consumers
/// check the options.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Mp4Document {
    pub ftyp: Option<FtypBox>,
    pub moov: Option<MoovBox>,
}

impl Mp4Document {
    /// Walks `[0, total_len)` and decodes the known top-level boxes.
    ///
    /// Pure function of the source: no state is kept between calls.
    /// Unrecognized top-level tags are skipped; the first occurrence of a
    /// known tag wins and later duplicates are ignored.
    pub fn parse(src: &dyn ReadAt) -> Result<Mp4Document> {
        let mut doc = Mp4Document::default();
        for node in parser::walk(src, 0, src.total_len()) {
            let node = node?;
            match KnownBox::from(node.typ()) {
                KnownBox::Ftyp if doc.ftyp.is_none() => doc.ftyp = Some(FtypBox::decode(&node)?),
                KnownBox::Moov if doc.moov.is_none() => doc.moov = Some(MoovBox::decode(&node)?),
                _ => {}
            }
        }
        Ok(doc)
    }
}
