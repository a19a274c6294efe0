//! ### DFS Display Module
//!
//! Presentation of the catalogue, as a console listing or as JSON.
//! Nothing here changes the decoded values, sanitizing happens on the way out.

use std::fmt;
use super::directory::{Catalogue,CatalogueEntry};
use super::types::DEFAULT_DIR;

/// Replace anything that is not printable ASCII with a space
pub fn printable(bytes: &[u8]) -> String {
    bytes.iter().map(|b| match *b {
        x if x.is_ascii_graphic() || x==b' ' => x as char,
        _ => ' '
    }).collect()
}

impl fmt::Display for CatalogueEntry {
    fn fmt(&self,f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = printable(&self.name.chars().map(|c| c as u8).collect::<Vec<u8>>());
        match self.directory {
            DEFAULT_DIR => write!(f,"  {:7}  ",name)?,
            d => write!(f,"{}.{:7}  ",printable(&[d as u8]),name)?
        }
        write!(f,"{} size {:6}, sector {:3}, load 0x{:05X}, exec 0x{:05X}",
            match self.locked { true => "L", false => " " },
            self.size,self.start_sector,self.load_addr,self.exec_addr)
    }
}

/// Allows the catalogue to be displayed to the console using `println!`.
impl fmt::Display for Catalogue {
    fn fmt(&self,f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f,"Label \"{}\", cycle {}, {:2} tracks, boot option {}, {:2} files:",
            printable(self.raw_label()),
            self.cycle,
            self.tracks(),
            self.boot_option,
            self.file_count)?;
        for entry in &self.entries {
            writeln!(f,"{}",entry)?;
        }
        Ok(())
    }
}

impl Catalogue {
    /// Output the catalogue as a JSON string, `indent` of None minifies
    pub fn to_json(&self,indent: Option<u16>) -> String {
        let mut files = json::JsonValue::new_object();
        for entry in &self.entries {
            let key = entry.path();
            // later duplicates would overwrite earlier ones
            let key = match files.has_key(&key) {
                true => format!("{}#{}",key,entry.start_sector),
                false => key
            };
            files[key] = json::object! {
                name: entry.name.clone(),
                dir: entry.directory.to_string(),
                locked: entry.locked,
                size: entry.size,
                sector: entry.start_sector,
                load: format!("{:05X}",entry.load_addr),
                exec: format!("{:05X}",entry.exec_addr)
            };
        }
        let ans = json::object! {
            label: printable(self.raw_label()),
            label_hex: hex::encode_upper(self.raw_label()),
            cycle: self.cycle,
            boot_option: self.boot_option,
            sectors: self.sector_count,
            file_count: self.file_count,
            files: files
        };
        match indent {
            Some(spaces) => json::stringify_pretty(ans,spaces),
            None => json::stringify(ans)
        }
    }
}

#[cfg(test)]
use super::directory::test_support::disk;

#[test]
fn printable_sanitizes() {
    assert_eq!(printable(b"GAMES\x00\x07\x7f\x80DI"),"GAMES    DI");
    assert_eq!(printable(b"A B-C"),"A B-C");
}

#[test]
fn listing() {
    let img = disk(b"MYDISC\r\x00    ",&[
        (b"!BOOT  ",b'$',[0x00,0x19,0x23,0x80,0x10,0x02,0x00,0x02]),
        (b"DATA   ",0x80 | b'W',[0x00,0x00,0x00,0x00,0x00,0x01,0b11_00_11_01,0x10])
    ]);
    let cat = Catalogue::decode(&img).unwrap();
    let out = cat.to_string();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0],"Label \"MYDISC      \", cycle 0, 80 tracks, boot option 0,  2 files:");
    assert_eq!(lines[1],"  !BOOT      size    528, sector   2, load 0x01900, exec 0x08023");
    assert_eq!(lines[2],"W.DATA     L size    256, sector 272, load 0x30000, exec 0x30000");
    // the decoded label is untouched
    assert_eq!(cat.label(),"MYDISC\r\0    ");
}

#[test]
fn json_tree() {
    let img = disk(b"TREE        ",&[
        (b"A      ",b'$',[0x00,0x19,0x00,0x19,0x05,0x00,0x00,0x02]),
        (b"A      ",b'$',[0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x03]),
        (b"B      ",b'X',[0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x04])
    ]);
    let cat = Catalogue::decode(&img).unwrap();
    let parsed = json::parse(&cat.to_json(Some(2))).expect("invalid json");
    assert_eq!(parsed["label"],"TREE        ");
    assert_eq!(parsed["label_hex"],"545245452020202020202020");
    assert_eq!(parsed["file_count"],3);
    assert_eq!(parsed["files"]["A"]["load"],"01900");
    assert_eq!(parsed["files"]["A"]["size"],5);
    assert_eq!(parsed["files"]["A#3"]["sector"],3);
    assert_eq!(parsed["files"]["X.B"]["dir"],"X");
    assert!(!cat.to_json(None).contains('\n'));
}
