//! # `dfskit` main library
//!
//! This library reads disk images of the Acorn Disk Filing System (DFS), as used
//! with the BBC Micro.  It can decode the catalogue, extract files, and split
//! double sided images into single sided ones.
//!
//! ## Architecture
//!
//! Disk image operations are built around two layers:
//! * `img::DfsImage` holds the sector data of one side, and does not try to interpret it
//! * `fs::dfs::Disk` decodes the catalogue and takes files out of the image
//!
//! When a `Disk` is created it takes ownership of a `DfsImage`.  Nothing is ever
//! written back to the image.  Files leave through an `fs::FileSink`.
//!
//! ## Disk Images
//!
//! * SSD, single sided, a plain sequence of tracks
//! * DSD, double sided, tracks of the two sides interleaved
//!
//! Both use 10 sectors of 256 bytes per track.

pub mod fs;
pub mod img;
pub mod commands;

use std::path::Path;
use log::{info,warn};
use img::DfsImage;

pub type DYNERR = Box<dyn std::error::Error>;
pub type STDRESULT = Result<(),Box<dyn std::error::Error>>;

/// Decide whether a path names a double sided image from its extension.
/// Returns None if the extension is not recognized.
pub fn is_double_sided(img_path: &Path) -> Option<bool> {
    let ext = img_path.extension()?.to_str()?.to_lowercase();
    if img::dsd::file_extensions().contains(&ext) {
        return Some(true);
    }
    if img::file_extensions().contains(&ext) {
        return Some(false);
    }
    None
}

/// Given a bytestream return the image of each side.
/// A double sided stream is split by tracks first.
pub fn create_sides_from_bytestream(disk_img_data: Vec<u8>,double_sided: bool) -> Result<Vec<DfsImage>,img::Error> {
    match double_sided {
        true => {
            let sides = img::dsd::sides_from_bytes(&disk_img_data)?;
            info!("identified double sided image");
            Ok(sides.into())
        },
        false => Ok(vec![DfsImage::from_bytes(disk_img_data)?])
    }
}

/// Load the image of each side of the disk in the file at `img_path`.
/// The extension `dsd` selects a double sided image, `ssd` single sided;
/// anything else is treated as single sided, with a warning.
pub fn create_sides_from_file<P: AsRef<Path>>(img_path: P) -> Result<Vec<DfsImage>,img::Error> {
    let img_path = img_path.as_ref();
    match is_double_sided(img_path) {
        Some(true) => {
            let meta = std::fs::metadata(img_path)?;
            if meta.len() as usize % (2*img::TRACK_SIZE) > 0 {
                return Err(img::Error::SizeMismatch { actual: meta.len() as usize, multiple: 2*img::TRACK_SIZE });
            }
            create_sides_from_bytestream(std::fs::read(img_path)?,true)
        },
        Some(false) => Ok(vec![DfsImage::from_file(img_path)?]),
        None => {
            warn!("{}: expected extension `ssd` or `dsd`, assuming single sided",img_path.display());
            Ok(vec![DfsImage::from_file(img_path)?])
        }
    }
}

#[test]
fn sidedness_from_extension() {
    assert_eq!(is_double_sided(Path::new("games.dsd")),Some(true));
    assert_eq!(is_double_sided(Path::new("GAMES.DSD")),Some(true));
    assert_eq!(is_double_sided(Path::new("dir.x/games.ssd")),Some(false));
    assert_eq!(is_double_sided(Path::new("games.img")),None);
    assert_eq!(is_double_sided(Path::new("games")),None);
}
