use clap;
use std::path::Path;
use log::{info,error};
use super::{open_disks,CommandError};
use crate::fs::DirSink;
use crate::STDRESULT;

/// Extract the files of an image into a directory, creating the directory if needed.
/// For a double sided image without `--side`, each side goes to its own subdirectory.
pub fn extract(cmd: &clap::ArgMatches) -> STDRESULT {
    let (path,dir) = match (cmd.get_one::<String>("dimg"),cmd.get_one::<String>("dir")) {
        (Some(p),Some(d)) => (p,d),
        _ => return Err(Box::new(CommandError::InvalidCommand))
    };
    let side = cmd.get_one::<u8>("side").copied();
    let pattern = cmd.get_one::<String>("pattern").map(|s| s.as_str());
    let disks = open_disks(path,side)?;
    let per_side = disks.len() > 1;
    let mut skipped = 0;
    for (i,disk) in disks {
        let dest = match per_side {
            true => Path::new(dir).join(format!("side{}",i)),
            false => Path::new(dir).to_path_buf()
        };
        if let Err(e) = std::fs::create_dir_all(&dest) {
            error!("{}: {}",dest.display(),e);
            return Err(Box::new(e));
        }
        info!("side {}: {} catalogue entries",i,disk.catalogue().entries.len());
        let mut sink = DirSink::new(&dest);
        let summary = disk.extract(pattern,&mut sink)?;
        info!("{} files extracted to {}",summary.extracted.len(),dest.display());
        skipped += summary.skipped.len();
    }
    match skipped {
        0 => Ok(()),
        n => Err(Box::new(CommandError::PartialExtraction(n)))
    }
}
