use anyhow::Context;
use clap::Parser;
use mp4probe::{FileSource, FourCC, Mp4Document};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Print ftyp/moov header fields from an MP4 file")]
struct Args {
    /// MP4/ISOBMFF file path
    path: PathBuf,

    /// Output as JSON instead of human-readable text
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let src = FileSource::open(&args.path)
        .with_context(|| format!("open {}", args.path.display()))?;
    let doc = Mp4Document::parse(&src)
        .with_context(|| format!("parse {}", args.path.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print_human(&doc);
    }

    Ok(())
}

fn print_human(doc: &Mp4Document) {
    match &doc.ftyp {
        Some(ftyp) => {
            println!("Major brand: {}", ftyp.major_brand);
            println!("Minor version: {}", ftyp.minor_version);
            println!("Compatible brands: {}", brands_line(&ftyp.compatible_brands));
        }
        None => println!("No ftyp box"),
    }

    let mvhd = match &doc.moov {
        Some(moov) => match &moov.mvhd {
            Some(mvhd) => mvhd,
            None => {
                println!("moov present, no mvhd");
                return;
            }
        },
        None => {
            println!("No moov box");
            return;
        }
    };

    println!("Movie timescale: {}", mvhd.timescale);
    if mvhd.timescale != 0 {
        let sec = mvhd.duration as f64 / mvhd.timescale as f64;
        println!("Movie duration: {} ticks -> {:.3} s", mvhd.duration, sec);
    } else {
        println!("Movie duration: {} ticks", mvhd.duration);
    }
    println!("Rate: {}", mvhd.rate);
    println!("Volume: {}", mvhd.volume);
}

fn brands_line(brands: &[FourCC]) -> String {
    if brands.is_empty() {
        return "(none)".to_string();
    }
    brands
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
