#![allow(missing_docs)]
use std::collections::HashSet;

use bytevec::{
    ByteVec, ByteVecOptions, Element, TruncatingWriter, bytevec_cat_wformat, bytevec_format,
};

#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
struct Record {
    id: u32,
    flags: u16,
    kind: u16,
    weight: f64,
}

// SAFETY: `repr(C)` with fields laid out without padding (4 + 2 + 2 + 8).
unsafe impl Element for Record {}

#[test]
fn records_round_trip_through_typed_view() {
    let records = [
        Record {
            id: 1,
            flags: 0b01,
            kind: 7,
            weight: 0.5,
        },
        Record {
            id: 2,
            flags: 0b10,
            kind: 9,
            weight: 1.5,
        },
    ];
    let mut v = ByteVec::from_elements(&records);
    assert_eq!(v.len(), 2 * 16);

    let mut view = v.typed::<Record>();
    view.push(Record {
        id: 3,
        flags: 0,
        kind: 0,
        weight: 2.5,
    });
    view[0].weight = 4.0;
    assert_eq!(view.len(), 3);
    assert_eq!(view.pop().id, 3);
    assert_eq!(view.first().map(|r| r.weight), Some(4.0));
    assert_eq!(v.as_elements::<Record>()[1], records[1]);
}

#[test]
fn byte_vec_as_hash_key() {
    let mut set = HashSet::new();
    set.insert(ByteVec::from_bytes(b"one"));
    let mut probe = ByteVec::with_options(ByteVecOptions {
        default_capacity: 1,
        ..ByteVecOptions::default()
    });
    probe.extend_from_slice(b"one");
    assert!(set.contains(&probe));
    assert!(set.contains(&b"one"[..]));
}

#[test]
fn format_macros() {
    let mut v = bytevec_format!("{:>5}|{:<3}|", 42, "x");
    assert_eq!(v.get_bstr(), "   42|x  |");

    let mut w = ByteVec::from_wide_str("pi=");
    bytevec_cat_wformat!(w, "{:.3}", std::f64::consts::PI);
    let expected: Vec<u16> = "pi=3.142".encode_utf16().collect();
    assert_eq!(w.get_wide(), expected.as_slice());
}

#[test]
fn c_string_interop() {
    let mut v = ByteVec::new();
    v.cat_str("host");
    v.push_text_unit(b':');
    v.cat_str("8080");
    let with_nul = v.get_c_str().to_bytes_with_nul().len();
    assert_eq!(with_nul, v.len());
    assert_eq!(v.get_c_str().to_str(), Ok("host:8080"));
}

#[test]
fn truncating_writer_is_reusable_standalone() {
    use std::fmt::Write;

    let mut units = [0_u32; 3];
    let mut w = TruncatingWriter::new(&mut units);
    write!(w, "😀ab").unwrap();
    assert_eq!(w.as_units(), &[0x1F600, u32::from('a')]);
    assert!(w.is_truncated());
}

#[test]
fn vec_like_traits() {
    let mut v = ByteVec::from(b"hello");
    v.extend(b" world");
    assert_eq!(&*v, b"hello world");
    v[0] = b'H';
    assert!(v.starts_with(b"Hello"));
    let owned: Vec<u8> = v.to_vec();
    assert_eq!(owned, b"Hello world");
    assert_eq!(ByteVec::from(&owned[..]), v);
}
