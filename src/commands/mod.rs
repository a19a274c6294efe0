//! # CLI Subcommands
//!
//! Contains modules that run the subcommands.
//! Each takes the `ArgMatches` of its subcommand.

pub mod catalog;
pub mod extract;
pub mod split;

use log::error;
use crate::fs::dfs::Disk;
use crate::img::DfsImage;
use crate::DYNERR;

#[derive(thiserror::Error,Debug)]
pub enum CommandError {
    #[error("Command could not be interpreted")]
    InvalidCommand,
    #[error("One of the parameters was out of range")]
    OutOfRange,
    #[error("{0} of {1} images could not be processed")]
    BatchFailed(usize,usize),
    #[error("{0} files could not be extracted")]
    PartialExtraction(usize)
}

/// Load the sides of the image at `path`, keeping only `side` if given.
/// Each side becomes a `Disk` along with its side number.
pub fn open_disks(path: &str,side: Option<u8>) -> Result<Vec<(usize,Disk)>,DYNERR> {
    let sides: Vec<DfsImage> = crate::create_sides_from_file(path)?;
    let mut ans = Vec::new();
    for (i,img) in sides.into_iter().enumerate() {
        match side {
            Some(s) if s as usize != i => continue,
            _ => ans.push((i,Disk::from_img(img)?))
        }
    }
    if ans.is_empty() {
        error!("{}: side {:?} not present",path,side);
        return Err(Box::new(CommandError::OutOfRange));
    }
    Ok(ans)
}
