use crate::img;

/// Bytes in a file name, padded with spaces on disk
pub const FILENAME_LEN: usize = 7;
/// 8 label bytes in sector 0 plus 4 in sector 1
pub const LABEL_SIZE: usize = 12;
/// Size of one catalogue slot in either sector
pub const ENTRY_SIZE: usize = 8;
/// Slot 0 of each catalogue sector holds the disk information
pub const MAX_FILES: usize = (img::SECTOR_SIZE - ENTRY_SIZE) / ENTRY_SIZE;
/// Files in this directory are shown without the directory prefix
pub const DEFAULT_DIR: char = '$';
pub const LOCK_MASK: u8 = 0x80;

/// Enumerates DFS errors.  The `Display` trait will print a long message.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("{name}: bytes {beg}..{end} are outside the image ({len} bytes)")]
    Range { name: String, beg: usize, end: usize, len: usize },
    #[error("catalogue lists {count} files, at most {max} fit", max = MAX_FILES)]
    FileCount { count: usize },
    #[error("no file matches {0}")]
    FileNotFound(String),
    #[error(transparent)]
    Image(#[from] img::Error)
}

// Byte 6 of each sector 1 slot carries the high bits of four fields:
//   bits 7-6  exec address bits 17-16
//   bits 5-4  length bits 17-16
//   bits 3-2  load address bits 17-16
//   bits 1-0  start sector bits 9-8

/// start sector bits 9-8, from bits 1-0 of the shared byte
pub fn start_sector_high(b6: u8) -> u16 {
    (b6 & 3) as u16
}

/// load address bits 17-16, from bits 3-2 of the shared byte
pub fn load_addr_high(b6: u8) -> u32 {
    ((b6 >> 2) & 3) as u32
}

/// length bits 17-16, from bits 5-4 of the shared byte
pub fn size_high(b6: u8) -> u32 {
    ((b6 >> 4) & 3) as u32
}

/// exec address bits 17-16, from bits 7-6 of the shared byte
pub fn exec_addr_high(b6: u8) -> u32 {
    ((b6 >> 6) & 3) as u32
}

/// Assemble an 18 bit quantity from a little endian pair and 2 high bits
pub fn join18(lo: u8,hi: u8,top: u32) -> u32 {
    u32::from_le_bytes([lo,hi,0,0]) | (top << 16)
}

/// Assemble the 10 bit start sector
pub fn join10(lo: u8,top: u16) -> u16 {
    lo as u16 | (top << 8)
}

/// Files are stored in sector 1 byte 5 as 8 times the count
pub fn file_count(b: u8) -> usize {
    (b >> 3) as usize
}

/// sector 1 byte 6 bits 3-0 with byte 7
pub fn sector_count(b6: u8,b7: u8) -> u16 {
    u16::from_le_bytes([b7,b6 & 0x0f])
}

/// sector 1 byte 6 bits 7-4
pub fn boot_option(b6: u8) -> u8 {
    (b6 >> 4) & 0x0f
}

/// The cycle number is binary coded decimal
pub fn bcd(b: u8) -> u8 {
    (b >> 4) * 10 + (b & 0x0f)
}

/// Apply `f` to each 2 bit window value 0..3 placed at `shift`
#[cfg(test)]
fn each_window<F: Fn(u8) -> u32>(shift: u8,f: F) {
    for v in 0..4u8 {
        // fill the other windows with ones to catch leakage
        let b6 = (0xff & !(3 << shift)) | (v << shift);
        assert_eq!(f(b6),v as u32,"window at bit {} value {}",shift,v);
    }
}

#[test]
fn start_sector_window() {
    each_window(0,|b| start_sector_high(b) as u32);
    assert_eq!(start_sector_high(0b11_10_01_00),0);
}

#[test]
fn load_addr_window() {
    each_window(2,load_addr_high);
    assert_eq!(load_addr_high(0b11_10_01_00),1);
}

#[test]
fn size_window() {
    each_window(4,size_high);
    assert_eq!(size_high(0b11_10_01_00),2);
}

#[test]
fn exec_addr_window() {
    each_window(6,exec_addr_high);
    assert_eq!(exec_addr_high(0b11_10_01_00),3);
}

#[test]
fn field_assembly() {
    assert_eq!(join18(0x00,0x19,3),0x31900);
    assert_eq!(join18(0xff,0xff,3),0x3ffff);
    assert_eq!(join10(0x22,2),0x222);
    assert_eq!(file_count(0xf8),31);
    assert_eq!(file_count(0x07),0);
    assert_eq!(sector_count(0xf3,0x20),0x320);
    assert_eq!(boot_option(0x3f),3);
    assert_eq!(bcd(0x42),42);
    assert_eq!(MAX_FILES,31);
}
