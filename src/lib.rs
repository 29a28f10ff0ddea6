pub mod boxes;
pub mod document;
pub mod fixed;
pub mod known_boxes;
pub mod parser;
pub mod source;

pub use boxes::{BoxHeader, BoxNode, FourCC, HEADER_SIZE};
pub use document::Mp4Document;
pub use fixed::{Fixed16, Fixed32};
pub use known_boxes::{FtypBox, KnownBox, MoovBox, MvhdBox};
pub use parser::{BoxWalk, ParseError, Result, encode_box_header, read_box_header, read_boxes, walk};
pub use source::{FileSource, ReadAt};
