//! ### DFS catalogue structures
//!
//! The catalogue occupies sectors 0 and 1.  Each sector is divided into 8 byte slots.
//! Slot 0 of sector 0 holds the first 8 bytes of the disk label; slot 0 of sector 1
//! holds the rest of the label, the cycle number, the file count, the boot option,
//! and the sector count.  Slot `i+1` of sector 0 holds the name of file `i`, and
//! slot `i+1` of sector 1 holds its addresses, length, and start sector.
//!
//! Decoding copies everything out of the image, the resulting `Catalogue` is independent of it.

use log::{debug,warn,trace};
use super::types::*;
use crate::img::DfsImage;

/// One file in the catalogue
#[derive(Debug,Clone,PartialEq)]
pub struct CatalogueEntry {
    pub name: String,
    pub directory: char,
    pub locked: bool,
    pub load_addr: u32,
    pub exec_addr: u32,
    pub size: u32,
    pub start_sector: u16
}

/// The decoded catalogue of one side of a disk
#[derive(Debug,Clone,PartialEq)]
pub struct Catalogue {
    pub(super) label: [u8;LABEL_SIZE],
    pub cycle: u8,
    pub file_count: usize,
    pub sector_count: u16,
    pub boot_option: u8,
    pub entries: Vec<CatalogueEntry>
}

/// Interpret the 7 name bytes.  A NUL ends the name, then trailing spaces are dropped.
pub fn name_from_bytes(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|b| *b==0).unwrap_or(bytes.len());
    let name: String = bytes[0..end].iter().map(|b| *b as char).collect();
    name.trim_end_matches(' ').to_string()
}

impl CatalogueEntry {
    /// Decode a file entry from its name slot and its address slot.
    pub fn from_slots(name: &[u8;ENTRY_SIZE],addr: &[u8;ENTRY_SIZE]) -> Self {
        let raw_dir = name[FILENAME_LEN];
        let b6 = addr[6];
        Self {
            name: name_from_bytes(&name[0..FILENAME_LEN]),
            directory: (raw_dir & !LOCK_MASK) as char,
            locked: raw_dir & LOCK_MASK > 0,
            load_addr: join18(addr[0],addr[1],load_addr_high(b6)),
            exec_addr: join18(addr[2],addr[3],exec_addr_high(b6)),
            size: join18(addr[4],addr[5],size_high(b6)),
            start_sector: join10(addr[7],start_sector_high(b6))
        }
    }
    /// Name as it appears in paths, the default directory is not shown
    pub fn path(&self) -> String {
        match self.directory {
            DEFAULT_DIR => self.name.clone(),
            d => format!("{}.{}",d,self.name)
        }
    }
    /// Name including the directory, even if it is the default
    pub fn full_name(&self) -> String {
        format!("{}.{}",self.directory,self.name)
    }
    /// Byte range of the file data in the image
    pub fn byte_range(&self) -> std::ops::Range<usize> {
        let beg = self.start_sector as usize * crate::img::SECTOR_SIZE;
        beg..beg + self.size as usize
    }
}

fn slot(img: &DfsImage,sector: usize,idx: usize) -> Result<[u8;ENTRY_SIZE],Error> {
    let mut ans = [0;ENTRY_SIZE];
    ans.copy_from_slice(img.bytes(sector,idx*ENTRY_SIZE,ENTRY_SIZE)?);
    Ok(ans)
}

impl Catalogue {
    /// Decode the catalogue in sectors 0 and 1.  Never fails for a validated image.
    pub fn decode(img: &DfsImage) -> Result<Self,Error> {
        let count = file_count(img.byte(1,5)?);
        let (ans,_) = Self::decode_with_count(img,count)?;
        Ok(ans)
    }
    /// Decode using `count` in place of the recorded file count.  A count beyond
    /// the capacity of the sector is logged and returned as a `FileCount` warning,
    /// then honored, so that slots past the end are read from whatever follows in the image.
    pub fn decode_with_count(img: &DfsImage,count: usize) -> Result<(Self,Option<Error>),Error> {
        let warning = match count > MAX_FILES {
            true => Some(Error::FileCount { count }),
            false => None
        };
        if let Some(w) = &warning {
            warn!("{}",w);
        }
        let info0 = slot(img,0,0)?;
        let info1 = slot(img,1,0)?;
        let mut label = [0;LABEL_SIZE];
        label[0..8].copy_from_slice(&info0);
        label[8..12].copy_from_slice(&info1[0..4]);
        let mut entries = Vec::new();
        for i in 0..count {
            let entry = CatalogueEntry::from_slots(&slot(img,0,i+1)?,&slot(img,1,i+1)?);
            trace!("slot {}: {:?}",i+1,entry);
            entries.push(entry);
        }
        let ans = Self {
            label,
            cycle: bcd(info1[4]),
            file_count: count,
            sector_count: sector_count(info1[6],info1[7]),
            boot_option: boot_option(info1[6]),
            entries
        };
        debug!("catalogue has {} files on {} sectors",ans.file_count,ans.sector_count);
        Ok((ans,warning))
    }
    /// The 12 label characters as stored, including any padding or control codes
    pub fn label(&self) -> String {
        self.label.iter().map(|b| *b as char).collect()
    }
    pub fn raw_label(&self) -> &[u8;LABEL_SIZE] {
        &self.label
    }
    pub fn tracks(&self) -> usize {
        self.sector_count as usize / crate::img::SECTORS_PER_TRACK
    }
    /// True if more files are listed than the catalogue sector can hold
    pub fn is_overfull(&self) -> bool {
        self.file_count > MAX_FILES
    }
    /// Entries whose path matches a unix style glob, DFS names are not case sensitive.
    pub fn glob(&self,pattern: &str) -> Result<Vec<&CatalogueEntry>,globset::Error> {
        let matcher = globset::GlobBuilder::new(pattern)
            .case_insensitive(true)
            .literal_separator(false)
            .build()?
            .compile_matcher();
        Ok(self.entries.iter().filter(|e| matcher.is_match(e.path())).collect())
    }
}


#[cfg(test)]
use test_support::disk;

#[test]
fn disk_information() {
    let mut buf = test_support::image(b"GAMES\x00\x00\x00DISC",&[]);
    buf[256+4] = 0x19;
    buf[256+6] = 0x23;
    buf[256+7] = 0x20;
    let img = DfsImage::from_bytes(buf).unwrap();
    let cat = Catalogue::decode(&img).expect("decode failed");
    assert_eq!(cat.label(),"GAMES\0\0\0DISC");
    assert_eq!(cat.cycle,19);
    assert_eq!(cat.boot_option,2);
    assert_eq!(cat.sector_count,0x320);
    assert_eq!(cat.tracks(),80);
    assert_eq!(cat.file_count,0);
    assert!(cat.entries.is_empty());
}

#[test]
fn shared_byte_fields() {
    let addr = [0x34,0x12,0x78,0x56,0xbc,0x9a,0b11_10_01_00,0x05];
    let img = disk(b"            ",&[(b"PROG   ",b'$',addr)]);
    let cat = Catalogue::decode(&img).unwrap();
    let e = &cat.entries[0];
    assert_eq!(e.load_addr,0x11234);
    assert_eq!(e.exec_addr,0x35678);
    assert_eq!(e.size,0x29abc);
    assert_eq!(e.start_sector,0x005);
}

#[test]
fn start_sector_high_bits() {
    let img = disk(b"            ",&[(b"A      ",b'$',[0,0,0,0,0,0,0b00_00_00_11,0x10])]);
    let e = &Catalogue::decode(&img).unwrap().entries[0];
    assert_eq!(e.start_sector,0x310);
    assert_eq!((e.load_addr,e.exec_addr,e.size),(0,0,0));
}

#[test]
fn each_high_field_alone() {
    let cases: [(u8,[u32;3],u16);4] = [
        (0b01_00_00_00,[0,0x10000,0],0),
        (0b00_10_00_00,[0,0,0x20000],0),
        (0b00_00_11_00,[0x30000,0,0],0),
        (0b00_00_00_10,[0,0,0],0x200)
    ];
    for (b6,[load,exec,size],sec) in cases {
        let img = disk(b"            ",&[(b"A      ",b'$',[0,0,0,0,0,0,b6,0])]);
        let e = &Catalogue::decode(&img).unwrap().entries[0];
        assert_eq!((e.load_addr,e.exec_addr,e.size,e.start_sector),(load,exec,size,sec),"b6 = {:08b}",b6);
    }
}

#[test]
fn trailing_spaces() {
    let img = disk(b"            ",&[
        (b"FOO    ",b'$',[0;8]),
        (b"A B    ",b'$',[0;8]),
        (b"SEVENCH",b'$',[0;8]),
        (b" LEAD  ",b'$',[0;8]),
        (b"NUL\0XY ",b'$',[0;8])
    ]);
    let names: Vec<String> = Catalogue::decode(&img).unwrap().entries.into_iter().map(|e| e.name).collect();
    assert_eq!(names,vec!["FOO","A B","SEVENCH"," LEAD","NUL"]);
}

#[test]
fn lock_bit() {
    let img = disk(b"            ",&[
        (b"ONE    ",0x80 | b'$',[0;8]),
        (b"TWO    ",b'$',[0;8]),
        (b"THREE  ",0x80 | b'W',[0;8]),
        (b"FOUR   ",0xff,[0;8])
    ]);
    let cat = Catalogue::decode(&img).unwrap();
    let got: Vec<(bool,char)> = cat.entries.iter().map(|e| (e.locked,e.directory)).collect();
    assert_eq!(got,vec![(true,'$'),(false,'$'),(true,'W'),(true,'\x7f')]);
}

#[test]
fn paths() {
    let img = disk(b"            ",&[(b"BOOT   ",b'$',[0;8]),(b"DATA   ",b'W',[0;8])]);
    let cat = Catalogue::decode(&img).unwrap();
    assert_eq!(cat.entries[0].path(),"BOOT");
    assert_eq!(cat.entries[0].full_name(),"$.BOOT");
    assert_eq!(cat.entries[1].path(),"W.DATA");
}

#[test]
fn overfull_count_is_honored() {
    let img = disk(b"            ",&[(b"FIRST  ",b'$',[0;8])]);
    let (cat,warning) = Catalogue::decode_with_count(&img,32).expect("decode failed");
    assert!(matches!(warning,Some(Error::FileCount { count: 32 })));
    assert_eq!(cat.entries.len(),32);
    assert!(cat.is_overfull());
    assert_eq!(cat.entries[0].name,"FIRST");
    // slot 32 of sector 0 is slot 0 of sector 1
    assert_eq!(cat.entries[31].name,"");
    let (ok,warning) = Catalogue::decode_with_count(&img,31).unwrap();
    assert!(warning.is_none());
    assert!(!ok.is_overfull());
    assert!(!Catalogue::decode(&img).unwrap().is_overfull());
}

#[test]
fn order_is_slot_order() {
    let img = disk(b"            ",&[
        (b"ZEBRA  ",b'$',[0,0,0,0,0,0,0,9]),
        (b"APPLE  ",b'$',[0,0,0,0,0,0,0,2]),
        (b"MANGO  ",b'$',[0,0,0,0,0,0,0,5])
    ]);
    let cat = Catalogue::decode(&img).unwrap();
    let order: Vec<u16> = cat.entries.iter().map(|e| e.start_sector).collect();
    assert_eq!(order,vec![9,2,5]);
}

#[test]
fn glob_is_case_insensitive() {
    let img = disk(b"            ",&[
        (b"LOADER ",b'$',[0;8]),
        (b"LEVEL1 ",b'$',[0;8]),
        (b"SCORES ",b'D',[0;8])
    ]);
    let cat = Catalogue::decode(&img).unwrap();
    let hits: Vec<String> = cat.glob("l*").unwrap().iter().map(|e| e.path()).collect();
    assert_eq!(hits,vec!["LOADER","LEVEL1"]);
    assert_eq!(cat.glob("D.*").unwrap().len(),1);
    assert!(cat.glob("[").is_err());
}
