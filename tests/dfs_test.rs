// test of dfs file system module using image files
use std::path::Path;
use dfskit::img::{self,DfsImage,TRACK_SIZE,SECTOR_SIZE};
use dfskit::fs::{DirSink,FileSink};
use dfskit::fs::dfs::{self,Catalogue,Disk};

/// Two track image with files `!BOOT`, `W.WORDS` (locked), and `BROKEN` which runs off the end
fn build_ssd(tracks: usize) -> Vec<u8> {
    let mut buf = vec![0;tracks*TRACK_SIZE];
    buf[0..8].copy_from_slice(b"TESTDISC");
    buf[256..260].copy_from_slice(b"  01");
    buf[256+4] = 0x07;
    buf[256+5] = 3*8;
    buf[256+6] = 0x30 | ((tracks*10) >> 8) as u8;
    buf[256+7] = (tracks*10) as u8;
    let names: [(&[u8;7],u8);3] = [(b"!BOOT  ",b'$'),(b"WORDS  ",0x80 | b'W'),(b"BROKEN ",b'$')];
    let addrs: [[u8;8];3] = [
        [0x00,0x19,0x00,0x19,0x0c,0x00,0x00,0x02],
        [0x00,0x30,0x00,0x30,0x00,0x01,0x00,0x03],
        [0xff,0xff,0xff,0xff,0x00,0x08,0b11_00_11_00,0x10]
    ];
    for i in 0..3 {
        let j = 8 + i*8;
        buf[j..j+7].copy_from_slice(names[i].0);
        buf[j+7] = names[i].1;
        buf[256+j..256+j+8].copy_from_slice(&addrs[i]);
    }
    buf[2*SECTOR_SIZE..2*SECTOR_SIZE+12].copy_from_slice(b"*RUN GAME\r\r\r");
    for i in 0..SECTOR_SIZE {
        buf[3*SECTOR_SIZE+i] = (255-i) as u8;
    }
    buf
}

fn write_tmp(dir: &Path,name: &str,dat: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path,dat).expect("could not write test image");
    path
}

#[test]
fn load_and_decode() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_tmp(tmp.path(),"test.ssd",&build_ssd(4));
    let img = DfsImage::from_file(&path).expect("load failed");
    assert_eq!(img.track_count(),4);
    let cat = Catalogue::decode(&img).expect("decode failed");
    assert_eq!(cat.label(),"TESTDISC  01");
    assert_eq!(cat.cycle,7);
    assert_eq!(cat.boot_option,3);
    assert_eq!(cat.sector_count,40);
    assert_eq!(cat.file_count,3);
    let words = &cat.entries[1];
    assert_eq!((words.name.as_str(),words.directory,words.locked),("WORDS",'W',true));
    assert_eq!((words.load_addr,words.exec_addr,words.size,words.start_sector),(0x3000,0x3000,256,3));
    let broken = &cat.entries[2];
    assert_eq!(broken.load_addr,0x3ffff);
    assert_eq!(broken.exec_addr,0x3ffff);
    assert_eq!(broken.size,0x0800);
    assert_eq!(broken.start_sector,0x010);
}

#[test]
fn size_not_multiple_of_track() {
    let tmp = tempfile::tempdir().unwrap();
    let mut dat = build_ssd(2);
    dat.push(0);
    let path = write_tmp(tmp.path(),"odd.ssd",&dat);
    match DfsImage::from_file(&path) {
        Err(img::Error::SizeMismatch { actual, multiple }) => {
            assert_eq!(actual,2*TRACK_SIZE+1);
            assert_eq!(multiple,TRACK_SIZE);
        },
        other => panic!("expected size mismatch, got {:?}",other)
    }
    assert!(matches!(img::dsd::split(&dat),Err(img::Error::SizeMismatch { .. })));
    let empty = write_tmp(tmp.path(),"empty.ssd",&[]);
    assert!(matches!(DfsImage::from_file(&empty),Err(img::Error::SizeMismatch { actual: 0, .. })));
}

#[test]
fn one_track_is_too_small() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_tmp(tmp.path(),"short.ssd",&vec![0;TRACK_SIZE]);
    assert!(matches!(DfsImage::from_file(&path),Err(img::Error::TooSmall { actual: TRACK_SIZE })));
}

#[test]
fn missing_file_is_io() {
    let tmp = tempfile::tempdir().unwrap();
    match DfsImage::from_file(tmp.path().join("nothing.ssd")) {
        Err(img::Error::Io(e)) => assert_eq!(e.kind(),std::io::ErrorKind::NotFound),
        other => panic!("expected i/o error, got {:?}",other)
    }
}

#[test]
fn extract_to_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let img = DfsImage::from_bytes(build_ssd(2)).unwrap();
    let cat = Catalogue::decode(&img).unwrap();
    let out = tmp.path().join("out");
    std::fs::create_dir(&out).unwrap();
    let mut sink = DirSink::new(&out);
    let summary = dfs::extract(&cat,&img,&mut sink).expect("extraction failed");
    assert_eq!(summary.extracted,vec!["!BOOT","W.WORDS"]);
    assert_eq!(summary.skipped.len(),1);
    assert!(matches!(&summary.skipped[0],dfs::Error::Range { name, .. } if name=="BROKEN"));
    assert_eq!(std::fs::read(out.join("!BOOT")).unwrap(),b"*RUN GAME\r\r\r");
    let words = std::fs::read(out.join("W.WORDS")).unwrap();
    assert_eq!(words.len(),256);
    assert_eq!(words[0],255);
    assert!(!out.join("BROKEN").exists());
}

#[test]
fn existing_output_is_truncated() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("!BOOT"),vec![b'x';1000]).unwrap();
    let disk = Disk::from_img(DfsImage::from_bytes(build_ssd(2)).unwrap()).unwrap();
    let mut sink = DirSink::new(tmp.path());
    disk.extract(Some("!*"),&mut sink).expect("extraction failed");
    assert_eq!(std::fs::read(tmp.path().join("!BOOT")).unwrap().len(),12);
}

#[test]
fn blank_names_do_not_stop_extraction() {
    let tmp = tempfile::tempdir().unwrap();
    let mut dat = build_ssd(2);
    // names the host cannot use as they stand
    dat[8..16].copy_from_slice(b"       $");
    dat[16..24].copy_from_slice(b"\0WORDS $");
    dat[24..32].copy_from_slice(b"..     $");
    dat[256+24..256+32].copy_from_slice(&[0,0,0,0,0x03,0x00,0x00,0x04]);
    dat[4*SECTOR_SIZE..4*SECTOR_SIZE+3].copy_from_slice(b"abc");
    let img = DfsImage::from_bytes(dat).unwrap();
    let cat = Catalogue::decode(&img).unwrap();
    assert_eq!(cat.entries[0].path(),"");
    let out = tmp.path().join("out");
    std::fs::create_dir(&out).unwrap();
    let mut sink = DirSink::new(&out);
    let summary = dfs::extract(&cat,&img,&mut sink).expect("extraction failed");
    assert_eq!(summary.extracted.len(),3);
    assert!(summary.skipped.is_empty());
    assert_eq!(std::fs::read(out.join("_")).unwrap(),b"*RUN GAME\r\r\r");
    assert_eq!(std::fs::read(out.join("#3")).unwrap().len(),256);
    assert_eq!(std::fs::read(out.join("__")).unwrap(),b"abc");
    assert!(!tmp.path().join("_").exists());
}

#[test]
fn sink_reports_missing_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let mut sink = DirSink::new(tmp.path().join("absent"));
    let err = sink.write_file("X",b"abc").expect_err("should fail");
    assert_eq!(err.kind(),std::io::ErrorKind::NotFound);
}

#[test]
fn double_sided_file() {
    let tmp = tempfile::tempdir().unwrap();
    let side0 = build_ssd(2);
    let mut side1 = build_ssd(2);
    side1[0..8].copy_from_slice(b"SIDE ONE");
    let mut dsd = Vec::new();
    for t in 0..2 {
        dsd.extend_from_slice(&side0[t*TRACK_SIZE..(t+1)*TRACK_SIZE]);
        dsd.extend_from_slice(&side1[t*TRACK_SIZE..(t+1)*TRACK_SIZE]);
    }
    let path = write_tmp(tmp.path(),"both.dsd",&dsd);
    let sides = dfskit::create_sides_from_file(&path).expect("load failed");
    assert_eq!(sides.len(),2);
    assert_eq!(sides[0].as_bytes(),&side0[..]);
    assert_eq!(sides[1].as_bytes(),&side1[..]);
    let cat1 = Catalogue::decode(&sides[1]).unwrap();
    assert_eq!(cat1.label(),"SIDE ONE  01");
    // same bytes as single sided gives one side
    let path = write_tmp(tmp.path(),"both.ssd",&dsd);
    assert_eq!(dfskit::create_sides_from_file(&path).unwrap().len(),1);
    // three tracks cannot be split
    let path = write_tmp(tmp.path(),"bad.dsd",&dsd[0..3*TRACK_SIZE]);
    assert!(matches!(dfskit::create_sides_from_file(&path),Err(img::Error::SizeMismatch { .. })));
}
