//! # Disk Image Module
//!
//! A DFS disk image is a flat dump of already-decoded sectors, 256 bytes each,
//! 10 sectors to a track.  There is no header and no per-sector metadata, so the
//! only thing that can be checked when an image is connected is its length.
//!
//! ## Single and Double Sided Images
//!
//! Single sided images (SSD) are represented directly by `DfsImage`.
//! Double sided images (DSD) interleave the tracks of the two sides,
//! track 0 of side 0, track 0 of side 1, track 1 of side 0, and so on.
//! The `dsd` submodule separates the sides, after which each side is an ordinary `DfsImage`.
//!
//! ## Addressing
//!
//! All reads go through `DfsImage::addr`, which maps a (sector,offset) pair to an
//! index in the buffer and refuses any address that would fall outside it.
//! The file system layer never indexes the buffer directly.

pub mod dsd;

use std::io::Read;
use std::path::Path;
use log::{trace,debug,error};

pub const SECTOR_SIZE: usize = 256;
pub const SECTORS_PER_TRACK: usize = 10;
pub const TRACK_SIZE: usize = SECTOR_SIZE * SECTORS_PER_TRACK;
/// sectors 0 and 1 of track 0 hold the catalogue
pub const MIN_TRACKS: usize = 2;

/// Enumerates disk image errors.  The `Display` trait will print equivalent long message.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image size {actual} is not a multiple of {multiple}")]
    SizeMismatch { actual: usize, multiple: usize },
    #[error("image size {actual} is too small to hold a catalogue")]
    TooSmall { actual: usize },
    #[error("sector {sector} offset {offset} is outside the image")]
    OutOfBounds { sector: usize, offset: usize }
}

pub fn file_extensions() -> Vec<String> {
    vec!["ssd".to_string(),"dsd".to_string()]
}

/// Check that `len` bytes can form a single sided image.
pub fn check_size(len: usize) -> Result<(),Error> {
    if len==0 || len % TRACK_SIZE > 0 {
        debug!("image length {} rejected, track size is {}",len,TRACK_SIZE);
        return Err(Error::SizeMismatch { actual: len, multiple: TRACK_SIZE });
    }
    if len / TRACK_SIZE < MIN_TRACKS {
        debug!("image has {} tracks, need {}",len / TRACK_SIZE,MIN_TRACKS);
        return Err(Error::TooSmall { actual: len });
    }
    Ok(())
}

/// Wrapper for the sector data of one side of a DFS disk.
/// Once created the buffer is never modified.
#[derive(Debug,Clone,PartialEq)]
pub struct DfsImage {
    data: Vec<u8>
}

impl DfsImage {
    /// Take ownership of the bytes if they can form an image.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self,Error> {
        check_size(data.len())?;
        Ok(Self { data })
    }
    /// Load an image from a file.  The size is checked before anything is read,
    /// and nothing is kept if any step fails.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self,Error> {
        let path = path.as_ref();
        let meta = std::fs::metadata(path)?;
        let size = meta.len() as usize;
        check_size(size)?;
        let mut data = vec![0;size];
        let mut file = std::fs::File::open(path)?;
        // short read comes back as UnexpectedEof
        if let Err(e) = file.read_exact(&mut data) {
            error!("{}: expected {} bytes: {}",path.display(),size,e);
            return Err(Error::Io(e));
        }
        trace!("loaded {} tracks from {}",size / TRACK_SIZE,path.display());
        Ok(Self { data })
    }
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn track_count(&self) -> usize {
        self.data.len() / TRACK_SIZE
    }
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
    /// Map (sector,offset) to a buffer index.  The offset may run past the end of
    /// the sector, but the result must land inside the image.
    pub fn addr(&self,sector: usize,offset: usize) -> Result<usize,Error> {
        let idx = sector.checked_mul(SECTOR_SIZE).and_then(|x| x.checked_add(offset));
        match idx {
            Some(i) if i < self.data.len() => Ok(i),
            _ => Err(Error::OutOfBounds { sector, offset })
        }
    }
    pub fn byte(&self,sector: usize,offset: usize) -> Result<u8,Error> {
        Ok(self.data[self.addr(sector,offset)?])
    }
    /// Borrow `len` bytes beginning at (sector,offset).
    pub fn bytes(&self,sector: usize,offset: usize,len: usize) -> Result<&[u8],Error> {
        if len==0 {
            return Ok(&[]);
        }
        let beg = self.addr(sector,offset)?;
        // addr of the last byte checks the end
        self.addr(sector,offset + len - 1)?;
        Ok(&self.data[beg..beg+len])
    }
}

#[test]
fn size_checks() {
    assert!(matches!(check_size(0),Err(Error::SizeMismatch { actual: 0, multiple: TRACK_SIZE })));
    assert!(matches!(check_size(TRACK_SIZE+1),Err(Error::SizeMismatch { .. })));
    assert!(matches!(check_size(TRACK_SIZE),Err(Error::TooSmall { actual: TRACK_SIZE })));
    assert!(check_size(2*TRACK_SIZE).is_ok());
    assert!(check_size(80*TRACK_SIZE).is_ok());
}

#[test]
fn bounded_addressing() {
    let img = DfsImage::from_bytes(vec![0;2*TRACK_SIZE]).expect("valid size");
    assert_eq!(img.addr(1,5).unwrap(),261);
    assert_eq!(img.addr(0,300).unwrap(),300);
    assert!(img.addr(19,255).is_ok());
    assert!(matches!(img.addr(20,0),Err(Error::OutOfBounds { sector: 20, offset: 0 })));
    assert!(img.addr(usize::MAX,0).is_err());
    assert_eq!(img.bytes(19,0,256).unwrap().len(),256);
    assert!(img.bytes(19,1,256).is_err());
    assert_eq!(img.bytes(40,0,0).unwrap().len(),0);
}
