use clap;
use std::io::Write;
use log::{info,error};
use super::CommandError;
use crate::img;
use crate::STDRESULT;

fn write_side(path: &str,tracks: &[&[u8]]) -> STDRESULT {
    let mut buf = std::io::BufWriter::new(std::fs::File::create(path)?);
    for track in tracks {
        buf.write_all(track)?;
    }
    buf.flush()?;
    info!("wrote {} tracks to {}",tracks.len(),path);
    Ok(())
}

/// Split a double sided image into two single sided images.
/// The input is checked before either output is created.
pub fn split(cmd: &clap::ArgMatches) -> STDRESULT {
    let (input,out0,out1) = match (cmd.get_one::<String>("input"),cmd.get_one::<String>("side0"),cmd.get_one::<String>("side1")) {
        (Some(i),Some(a),Some(b)) => (i,a,b),
        _ => return Err(Box::new(CommandError::InvalidCommand))
    };
    let dat = match std::fs::read(input) {
        Ok(d) => d,
        Err(e) => {
            error!("{}: {}",input,e);
            return Err(Box::new(img::Error::Io(e)));
        }
    };
    let (side0,side1) = match img::dsd::split(&dat) {
        Ok(sides) => sides,
        Err(e) => {
            error!("{}: {}",input,e);
            return Err(Box::new(e));
        }
    };
    write_side(out0,&side0)?;
    write_side(out1,&side1)?;
    Ok(())
}
