//! # DFS file system module
//! This reads disk images containing one Acorn DFS volume per side.
//! Only the standard 10 sector, 256 byte sector geometry is handled.
//!
//! * The catalogue is decoded once when the `Disk` is created
//! * Files are contiguous, so extraction is a matter of slicing the image
//! * An entry pointing outside the image is skipped, the others are still extracted

pub mod types;
pub mod directory;
pub mod display;

use std::collections::HashSet;
use log::{info,warn,error};

pub use types::Error;
pub use directory::{Catalogue,CatalogueEntry};
use crate::img::DfsImage;
use crate::fs::FileSink;

/// Outcome of extracting a catalogue.  Entries are listed in catalogue order.
#[derive(Debug,Default)]
pub struct ExtractSummary {
    /// path of each file that was written
    pub extracted: Vec<String>,
    /// entries that were skipped, each with a `Range` error
    pub skipped: Vec<Error>
}

/// Borrow the bytes of an entry, or explain why they are not in the image.
pub fn file_data<'a>(entry: &CatalogueEntry,img: &'a DfsImage) -> Result<&'a [u8],Error> {
    let rng = entry.byte_range();
    if rng.end > img.len() {
        return Err(Error::Range { name: entry.path(), beg: rng.start, end: rng.end, len: img.len() });
    }
    Ok(&img.as_bytes()[rng])
}

/// Write each of `entries` to the sink, in order.  An entry that lies outside the image
/// is logged and skipped.  A sink failure stops the extraction and is returned.
/// If a path repeats, the later file is written as `path#sector`.
pub fn extract_entries<'a,I>(entries: I,img: &DfsImage,sink: &mut dyn FileSink) -> Result<ExtractSummary,std::io::Error>
where I: IntoIterator<Item = &'a CatalogueEntry> {
    let mut ans = ExtractSummary::default();
    let mut written: HashSet<String> = HashSet::new();
    for entry in entries {
        let mut path = entry.path();
        match file_data(entry,img) {
            Ok(dat) => {
                if !written.insert(path.clone()) {
                    let alt = format!("{}#{}",path,entry.start_sector);
                    warn!("duplicate file {}, extracting as {}",path,alt);
                    written.insert(alt.clone());
                    path = alt;
                }
                info!("extracting {} ({} bytes)",path,dat.len());
                sink.write_file(&path,dat)?;
                ans.extracted.push(path);
            },
            Err(e) => {
                error!("{}",e);
                ans.skipped.push(e);
            }
        }
    }
    Ok(ans)
}

/// Extract every file in the catalogue
pub fn extract(cat: &Catalogue,img: &DfsImage,sink: &mut dyn FileSink) -> Result<ExtractSummary,std::io::Error> {
    extract_entries(&cat.entries,img,sink)
}

/// The primary interface for disk operations, one side of a disk.
pub struct Disk {
    cat: Catalogue,
    img: DfsImage
}

impl Disk {
    /// Decode the catalogue of the image.  The Disk takes ownership of the image.
    pub fn from_img(img: DfsImage) -> Result<Self,Error> {
        let cat = Catalogue::decode(&img)?;
        Ok(Self { cat, img })
    }
    pub fn catalogue(&self) -> &Catalogue {
        &self.cat
    }
    /// Print the catalogue to stdout
    pub fn catalog_to_stdout(&self) {
        print!("{}",self.cat);
    }
    pub fn tree(&self,indent: Option<u16>) -> String {
        self.cat.to_json(indent)
    }
    /// Bytes of the first file whose path matches `path`, ignoring case.
    /// The default directory may be given explicitly, as in `$.BOOT`.
    pub fn read_file(&self,path: &str) -> Result<&[u8],Error> {
        let want = path.to_uppercase();
        for entry in &self.cat.entries {
            if entry.path().to_uppercase()==want || entry.full_name().to_uppercase()==want {
                return file_data(entry,&self.img);
            }
        }
        Err(Error::FileNotFound(path.to_string()))
    }
    /// Extract all files, or only those matching `pattern`
    pub fn extract(&self,pattern: Option<&str>,sink: &mut dyn FileSink) -> Result<ExtractSummary,crate::DYNERR> {
        let ans = match pattern {
            Some(p) => {
                let selected = self.cat.glob(p)?;
                if selected.is_empty() {
                    return Err(Box::new(Error::FileNotFound(p.to_string())));
                }
                extract_entries(selected,&self.img,sink)?
            },
            None => extract(&self.cat,&self.img,sink)?
        };
        Ok(ans)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use super::*;
    use super::directory::test_support;
    use crate::img::SECTOR_SIZE;

    #[derive(Default)]
    struct MemSink {
        files: BTreeMap<String,Vec<u8>>,
        order: Vec<String>
    }

    impl FileSink for MemSink {
        fn write_file(&mut self,name: &str,dat: &[u8]) -> Result<(),std::io::Error> {
            self.files.insert(name.to_string(),dat.to_vec());
            self.order.push(name.to_string());
            Ok(())
        }
    }

    struct FullSink;

    impl FileSink for FullSink {
        fn write_file(&mut self,_name: &str,_dat: &[u8]) -> Result<(),std::io::Error> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied,"read only"))
        }
    }

    fn sample() -> DfsImage {
        let mut buf = test_support::image(b"SAMPLE      ",&[
            (b"HELLO  ",b'$',[0x00,0x19,0x00,0x19,0x05,0x00,0x00,0x02]),
            (b"BAD    ",b'$',[0x00,0x00,0x00,0x00,0x01,0x02,0x00,0x13]),
            (b"DATA   ",b'D',[0x00,0x00,0x00,0x00,0x00,0x01,0x00,0x03])
        ]);
        buf[2*SECTOR_SIZE..2*SECTOR_SIZE+5].copy_from_slice(b"hello");
        for i in 0..SECTOR_SIZE {
            buf[3*SECTOR_SIZE+i] = i as u8;
        }
        DfsImage::from_bytes(buf).unwrap()
    }

    #[test]
    fn bad_entry_is_skipped() {
        let img = sample();
        let cat = Catalogue::decode(&img).unwrap();
        let mut sink = MemSink::default();
        let summary = extract(&cat,&img,&mut sink).expect("sink failed");
        assert_eq!(summary.extracted,vec!["HELLO","D.DATA"]);
        assert_eq!(sink.order,vec!["HELLO","D.DATA"]);
        assert_eq!(summary.skipped.len(),1);
        match &summary.skipped[0] {
            Error::Range { name, beg, end, len } => {
                assert_eq!(name,"BAD");
                assert_eq!(*beg,19*SECTOR_SIZE);
                assert_eq!(*end,19*SECTOR_SIZE+0x201);
                assert_eq!(*len,20*SECTOR_SIZE);
            },
            e => panic!("unexpected error {}",e)
        }
        assert_eq!(sink.files["HELLO"],b"hello".to_vec());
        assert_eq!(sink.files["D.DATA"],(0..=255u8).collect::<Vec<u8>>());
    }

    #[test]
    fn file_ending_at_image_end() {
        let buf = test_support::image(b"            ",&[
            (b"LAST   ",b'$',[0,0,0,0,0x00,0x01,0x00,19]),
            (b"EMPTY  ",b'$',[0,0,0,0,0x00,0x00,0x00,20]),
            (b"BEYOND ",b'$',[0,0,0,0,0x00,0x00,0x00,21])
        ]);
        let img = DfsImage::from_bytes(buf).unwrap();
        let cat = Catalogue::decode(&img).unwrap();
        assert_eq!(file_data(&cat.entries[0],&img).unwrap().len(),SECTOR_SIZE);
        assert_eq!(file_data(&cat.entries[1],&img).unwrap().len(),0);
        assert!(matches!(file_data(&cat.entries[2],&img),Err(Error::Range { .. })));
    }

    #[test]
    fn repeated_path_is_renamed() {
        let mut buf = test_support::image(b"            ",&[
            (b"TWICE  ",b'$',[0,0,0,0,0x02,0x00,0x00,0x02]),
            (b"TWICE  ",b'$',[0,0,0,0,0x03,0x00,0x00,0x03]),
            (b"TWICE  ",b'W',[0,0,0,0,0x01,0x00,0x00,0x04])
        ]);
        buf[2*SECTOR_SIZE..2*SECTOR_SIZE+2].copy_from_slice(b"ab");
        buf[3*SECTOR_SIZE..3*SECTOR_SIZE+3].copy_from_slice(b"xyz");
        let img = DfsImage::from_bytes(buf).unwrap();
        let cat = Catalogue::decode(&img).unwrap();
        let mut sink = MemSink::default();
        let summary = extract(&cat,&img,&mut sink).expect("sink failed");
        assert_eq!(summary.extracted,vec!["TWICE","TWICE#3","W.TWICE"]);
        assert_eq!(sink.files["TWICE"],b"ab".to_vec());
        assert_eq!(sink.files["TWICE#3"],b"xyz".to_vec());
    }

    #[test]
    fn sink_failure_stops_extraction() {
        let img = sample();
        let cat = Catalogue::decode(&img).unwrap();
        let err = extract(&cat,&img,&mut FullSink).expect_err("should fail");
        assert_eq!(err.kind(),std::io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn disk_reads_and_selects() {
        let disk = Disk::from_img(sample()).expect("decode failed");
        assert_eq!(disk.catalogue().entries.len(),3);
        assert_eq!(disk.read_file("hello").unwrap(),b"hello");
        assert_eq!(disk.read_file("$.HELLO").unwrap(),b"hello");
        assert_eq!(disk.read_file("d.data").unwrap().len(),256);
        assert!(matches!(disk.read_file("bad"),Err(Error::Range { .. })));
        assert!(matches!(disk.read_file("nothing"),Err(Error::FileNotFound(_))));
        let mut sink = MemSink::default();
        let summary = disk.extract(Some("D.*"),&mut sink).expect("extract failed");
        assert_eq!(summary.extracted,vec!["D.DATA"]);
        assert!(summary.skipped.is_empty());
        assert!(disk.extract(Some("Q*"),&mut sink).is_err());
    }
}
