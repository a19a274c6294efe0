//! ## Support for double sided images (DSD)
//!
//! The two sides of a DSD image are interleaved track by track.  Splitting
//! needs no catalogue, only the track size.

use log::{trace,debug,warn};
use super::{Error,DfsImage,TRACK_SIZE};

pub fn file_extensions() -> Vec<String> {
    vec!["dsd".to_string()]
}

/// Separate the sides of an interleaved image.  Even numbered tracks go to the
/// first list, odd numbered tracks to the second, each in their original order.
pub fn split(buf: &[u8]) -> Result<(Vec<&[u8]>,Vec<&[u8]>),Error> {
    if buf.len() % (2*TRACK_SIZE) > 0 {
        debug!("length {} is not a whole number of track pairs",buf.len());
        return Err(Error::SizeMismatch { actual: buf.len(), multiple: 2*TRACK_SIZE });
    }
    let mut side0: Vec<&[u8]> = Vec::new();
    let mut side1: Vec<&[u8]> = Vec::new();
    for (i,track) in buf.chunks_exact(TRACK_SIZE).enumerate() {
        match i % 2 {
            0 => side0.push(track),
            _ => side1.push(track)
        }
    }
    trace!("split {} tracks into {} + {}",buf.len() / TRACK_SIZE,side0.len(),side1.len());
    Ok((side0,side1))
}

/// Inverse of `split`, alternates tracks starting with `side0`.
/// Unpaired tracks at the end of the longer list are appended in order.
pub fn interleave(side0: &[&[u8]],side1: &[&[u8]]) -> Vec<u8> {
    if side0.len()!=side1.len() {
        warn!("sides have different track counts {} and {}",side0.len(),side1.len());
    }
    let mut ans: Vec<u8> = Vec::new();
    for i in 0..usize::max(side0.len(),side1.len()) {
        if let Some(t) = side0.get(i) {
            ans.extend_from_slice(t);
        }
        if let Some(t) = side1.get(i) {
            ans.extend_from_slice(t);
        }
    }
    ans
}

/// Split a DSD buffer and validate each side as a single sided image.
pub fn sides_from_bytes(buf: &[u8]) -> Result<[DfsImage;2],Error> {
    let (side0,side1) = split(buf)?;
    Ok([
        DfsImage::from_bytes(side0.concat())?,
        DfsImage::from_bytes(side1.concat())?
    ])
}

#[cfg(test)]
fn numbered_tracks(count: usize) -> Vec<u8> {
    let mut ans = Vec::new();
    for t in 0..count {
        ans.append(&mut vec![t as u8;TRACK_SIZE]);
    }
    ans
}

#[test]
fn alternate_tracks() {
    let buf = numbered_tracks(6);
    let (a,b) = split(&buf).expect("split failed");
    assert_eq!(a.len(),3);
    assert_eq!(b.len(),3);
    assert_eq!(a.iter().map(|t| t[0]).collect::<Vec<u8>>(),vec![0,2,4]);
    assert_eq!(b.iter().map(|t| t[TRACK_SIZE-1]).collect::<Vec<u8>>(),vec![1,3,5]);
    assert!(a.iter().chain(b.iter()).all(|t| t.len()==TRACK_SIZE));
}

#[test]
fn split_then_interleave() {
    let mut buf = numbered_tracks(8);
    for (i,x) in buf.iter_mut().enumerate() {
        *x = x.wrapping_mul(31) ^ (i % 251) as u8;
    }
    let (a,b) = split(&buf).expect("split failed");
    assert_eq!(interleave(&a,&b),buf);
}

#[test]
fn odd_track_count_refused() {
    let buf = numbered_tracks(3);
    assert!(matches!(split(&buf),Err(Error::SizeMismatch { actual, multiple }) if actual==3*TRACK_SIZE && multiple==2*TRACK_SIZE));
    assert!(matches!(split(&buf[0..TRACK_SIZE+10]),Err(Error::SizeMismatch { .. })));
}

#[test]
fn empty_buffer_splits_to_nothing() {
    let (a,b) = split(&[]).expect("split failed");
    assert!(a.is_empty() && b.is_empty());
}

#[test]
fn sides_need_two_tracks_each() {
    assert!(matches!(sides_from_bytes(&numbered_tracks(2)),Err(Error::TooSmall { .. })));
    let [s0,s1] = sides_from_bytes(&numbered_tracks(4)).expect("valid dsd");
    assert_eq!(s0.as_bytes()[TRACK_SIZE],2);
    assert_eq!(s1.as_bytes()[0],1);
    assert_eq!(s1.track_count(),2);
}
