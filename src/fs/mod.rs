//! # File System Module
//!
//! File system modules interpret the sector data held by an `img::DfsImage`.
//! At present there is one sub-module, `dfs`, for the Acorn Disk Filing System.
//!
//! Files leave the disk image through the `FileSink` trait.  The file system never
//! touches the host file system directly, which lets the same extraction code feed
//! a directory, an archive, or an in-memory map.

pub mod dfs;

use std::io::Write;
use std::path::PathBuf;
use log::trace;

/// Destination for files taken out of a disk image.
pub trait FileSink {
    /// Create or truncate the output called `name` and write all of `dat` to it.
    /// Errors keep their `std::io::ErrorKind`, so that a permission problem or a short
    /// write can be told apart from a missing destination.
    fn write_file(&mut self,name: &str,dat: &[u8]) -> Result<(),std::io::Error>;
}

/// Writes each file into a host directory, which must already exist.
pub struct DirSink {
    root: PathBuf
}

impl DirSink {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
    /// DFS names may contain characters the host treats as separators,
    /// or be blank, or be a name the host reserves for directories.
    pub fn host_name(name: &str) -> String {
        let ans: String = name.chars().map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c
        }).collect();
        match ans.as_str() {
            "" => "_".to_string(),
            "." | ".." => ans.replace('.',"_"),
            _ => ans
        }
    }
}

impl FileSink for DirSink {
    fn write_file(&mut self,name: &str,dat: &[u8]) -> Result<(),std::io::Error> {
        let dest = self.root.join(Self::host_name(name));
        trace!("writing {} bytes to {}",dat.len(),dest.display());
        let mut buf = std::io::BufWriter::new(std::fs::File::create(&dest)?);
        buf.write_all(dat)?;
        buf.flush()
    }
}

#[test]
fn host_names() {
    assert_eq!(DirSink::host_name("A.PROG"),"A.PROG");
    assert_eq!(DirSink::host_name("../X"),".._X");
    assert_eq!(DirSink::host_name("B\\Y"),"B_Y");
    assert_eq!(DirSink::host_name(""),"_");
    assert_eq!(DirSink::host_name("."),"_");
    assert_eq!(DirSink::host_name(".."),"__");
    assert_eq!(DirSink::host_name("W.."),"W..");
}
