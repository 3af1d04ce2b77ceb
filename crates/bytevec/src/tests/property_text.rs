use alloc::vec::Vec;

use quickcheck_macros::quickcheck;

use crate::ByteVec;

#[quickcheck]
fn terminated_bytes_read_back(bytes: Vec<u8>) -> bool {
    let bytes: Vec<u8> = bytes.into_iter().filter(|&b| b != 0).collect();
    let mut with_nul = bytes.clone();
    with_nul.push(0);
    let mut v = ByteVec::from_bytes(&with_nul);
    v.get_text::<u8>() == bytes.as_slice() && v.len() == with_nul.len()
}

#[quickcheck]
fn get_text_is_idempotent(s: Vec<u16>) -> bool {
    let mut v = ByteVec::new();
    v.cat_text::<u16>(&s);
    v.cat_text::<u16>(&[]);
    let first = v.get_wide().len();
    let size = v.len();
    let second = v.get_wide().len();
    first == second && size == v.len()
}

#[quickcheck]
fn bounded_cat_takes_prefix(s: Vec<u8>, n: u8) -> bool {
    let n = usize::from(n);
    let expected: Vec<u8> = s.iter().copied().take(n).take_while(|&b| b != 0).collect();
    let mut v = ByteVec::new();
    v.cat_text_bounded(&s, n);
    v.get_text::<u8>() == expected.as_slice() && v.len() == expected.len() + 1
}

#[quickcheck]
fn format_matches_alloc_format(a: i64, s: alloc::string::String, b: f64) -> bool {
    let expected = alloc::format!("{a}|{s}|{b}");
    let expected = expected.split('\0').next().unwrap_or_default();
    let mut v = crate::bytevec_format!("{a}|{s}|{b}");
    v.get_bstr() == expected
}
