use mp4probe::parser::ParseError;
use mp4probe::{FourCC, Mp4Document};

fn boxed(typ: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&(payload.len() as u32 + 8).to_be_bytes());
    v.extend_from_slice(typ);
    v.extend_from_slice(payload);
    v
}

fn mvhd_payload(timescale: u32, duration: u32) -> [u8; 26] {
    let mut p = [0u8; 26];
    p[12..16].copy_from_slice(&timescale.to_be_bytes());
    p[16..20].copy_from_slice(&duration.to_be_bytes());
    p[20..24].copy_from_slice(&0x0001_0000u32.to_be_bytes()); // rate 1.0
    p[24..26].copy_from_slice(&0x0100u16.to_be_bytes()); // volume 1.0
    p
}

fn minimal_file() -> Vec<u8> {
    let mut ftyp_payload = Vec::new();
    ftyp_payload.extend_from_slice(b"isom");
    ftyp_payload.extend_from_slice(&512u32.to_be_bytes());
    ftyp_payload.extend_from_slice(b"iso2");
    ftyp_payload.extend_from_slice(b"mp41");

    let mut data = boxed(b"ftyp", &ftyp_payload);
    data.extend_from_slice(&boxed(b"moov", &boxed(b"mvhd", &mvhd_payload(1000, 100))));
    data.extend_from_slice(&boxed(b"mdat", &[0u8; 32])); // no decoder, skipped
    data
}

#[test]
fn parse_minimal_file() {
    let data = minimal_file();
    let doc = Mp4Document::parse(&data.as_slice()).expect("parse failed");

    let ftyp = doc.ftyp.expect("ftyp missing");
    assert_eq!(ftyp.major_brand, FourCC(*b"isom"));
    assert_eq!(ftyp.minor_version, 512);
    assert_eq!(
        ftyp.compatible_brands,
        vec![FourCC(*b"iso2"), FourCC(*b"mp41")]
    );

    let moov = doc.moov.expect("moov missing");
    assert_eq!(moov.header.typ, FourCC(*b"moov"));
    let mvhd = moov.mvhd.expect("mvhd missing");
    assert_eq!(mvhd.timescale, 1000);
    assert_eq!(mvhd.duration, 100);
    assert_eq!(mvhd.rate.integer(), 1);
    assert_eq!(mvhd.volume.integer(), 1);
}

#[test]
fn missing_top_level_boxes_are_none_not_errors() {
    let data = boxed(b"mdat", &[0u8; 16]);
    let doc = Mp4Document::parse(&data.as_slice()).expect("parse failed");
    assert!(doc.ftyp.is_none());
    assert!(doc.moov.is_none());
}

#[test]
fn empty_source_parses_to_empty_document() {
    let data: Vec<u8> = Vec::new();
    let doc = Mp4Document::parse(&data.as_slice()).expect("parse failed");
    assert!(doc.ftyp.is_none());
    assert!(doc.moov.is_none());
}

#[test]
fn first_known_box_wins_over_duplicates() {
    let mut ftyp_payload = Vec::new();
    ftyp_payload.extend_from_slice(b"isom");
    ftyp_payload.extend_from_slice(&1u32.to_be_bytes());

    let mut dup_payload = Vec::new();
    dup_payload.extend_from_slice(b"mp42");
    dup_payload.extend_from_slice(&2u32.to_be_bytes());

    let mut data = boxed(b"ftyp", &ftyp_payload);
    data.extend_from_slice(&boxed(b"ftyp", &dup_payload));

    let doc = Mp4Document::parse(&data.as_slice()).expect("parse failed");
    let ftyp = doc.ftyp.expect("ftyp missing");
    assert_eq!(ftyp.major_brand, FourCC(*b"isom"));
    assert_eq!(ftyp.minor_version, 1);
}

#[test]
fn malformed_top_level_box_aborts_parse() {
    let mut data = boxed(b"free", &[]);
    data.extend_from_slice(&3u32.to_be_bytes()); // size below header
    data.extend_from_slice(b"moov");

    let err = Mp4Document::parse(&data.as_slice()).unwrap_err();
    assert!(matches!(err, ParseError::MalformedBox { size: 3, .. }));
}

#[test]
fn document_serializes_to_json() {
    let data = minimal_file();
    let doc = Mp4Document::parse(&data.as_slice()).expect("parse failed");

    let v = serde_json::to_value(&doc).expect("serialize failed");
    assert_eq!(v["ftyp"]["major_brand"], "isom");
    assert_eq!(v["ftyp"]["minor_version"], 512);
    assert_eq!(v["moov"]["mvhd"]["timescale"], 1000);
    assert_eq!(v["moov"]["mvhd"]["rate"], 1.0);
    assert_eq!(v["moov"]["mvhd"]["volume"], 1.0);
}
