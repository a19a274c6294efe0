use clap;
use log::error;
use super::{open_disks,CommandError};
use crate::STDRESULT;

/// List the catalogue of each image.  A bad image is reported and the rest are still listed.
pub fn catalog(cmd: &clap::ArgMatches) -> STDRESULT {
    let side = cmd.get_one::<u8>("side").copied();
    let paths: Vec<&String> = match cmd.get_many::<String>("dimg") {
        Some(p) => p.collect(),
        None => return Err(Box::new(CommandError::InvalidCommand))
    };
    let mut failures = 0;
    for path in &paths {
        match open_disks(path,side) {
            Ok(disks) => {
                println!("Disk image: {}",path);
                let multi = disks.len() > 1 || side.is_some();
                for (i,disk) in disks {
                    if multi {
                        print!("Side {}: ",i);
                    }
                    disk.catalog_to_stdout();
                }
            },
            Err(e) => {
                error!("{}: {}",path,e);
                failures += 1;
            }
        }
    }
    match failures {
        0 => Ok(()),
        n => Err(Box::new(CommandError::BatchFailed(n,paths.len())))
    }
}

/// Write the catalogue of one image as JSON
pub fn tree(cmd: &clap::ArgMatches) -> STDRESULT {
    let side = cmd.get_one::<u8>("side").copied().unwrap_or(0);
    let indent = cmd.get_one::<u16>("indent").copied();
    let path = match cmd.get_one::<String>("dimg") {
        Some(p) => p,
        None => return Err(Box::new(CommandError::InvalidCommand))
    };
    let disks = open_disks(path,Some(side))?;
    for (_,disk) in disks {
        println!("{}",disk.tree(indent));
    }
    Ok(())
}
