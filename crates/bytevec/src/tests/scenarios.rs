//! End-to-end sequences mixing raw, typed, text and formatting operations.

use alloc::vec::Vec;

use crate::{ByteVec, ByteVecOptions, bytevec_cat_format, bytevec_cat_wformat};

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// Forces reallocation on nearly every step.
fn tiny() -> ByteVecOptions {
    ByteVecOptions {
        default_capacity: 1,
        format_capacity: 1,
        ..ByteVecOptions::default()
    }
}

#[test]
fn concat_with_formatted_segment() {
    let mut v = ByteVec::new();
    v.cat_str("a");
    v.cat_str("bb");
    bytevec_cat_format!(v, "{}", 5);
    v.cat_str("c");
    assert_eq!(v.get_bstr(), "abb5c");
}

#[test]
fn push_then_pop_raw_value() {
    let mut v = ByteVec::new();
    v.extend_from_slice(&0x4455_6677_u32.to_le_bytes());
    assert_eq!(v.as_slice(), b"\x77\x66\x55\x44");
    let popped = u32::from_le_bytes(v.pop_value::<[u8; 4]>());
    assert!(v.is_empty());
    assert_eq!(popped, 0x4455_6677);
}

#[test]
fn bounded_concat_on_empty() {
    let mut v = ByteVec::new();
    v.cat_text_bounded(b"abcde", 2);
    assert_eq!(v.get_bstr(), "ab");
}

#[test]
fn narrow_and_wide_lifecycle() {
    for options in [ByteVecOptions::default(), tiny()] {
        let mut v = ByteVec::with_options(options);
        let mut v2 = ByteVec::new();
        let mut v3 = ByteVec::new();
        let mut v4 = ByteVec::new();

        v.clear();
        v.cat_str("abc");
        v.clear();
        v.shrink_to_fit();
        v.cat_str("a");
        v.cat_str("bb");
        bytevec_cat_format!(v, "{}{}{}", 'c', "cc", 12345);
        v.cat_str("ddd");
        v.push_text_unit(b'd');
        v.cat_str("eeeee");
        assert_eq!(v.len(), 16 + 5);
        assert_eq!(v.get_bstr(), "abbccc12345ddddeeeee");

        v2.copy_from(&v);
        assert_eq!(v2.len(), 16 + 5);
        assert_eq!(v2.get_bstr(), "abbccc12345ddddeeeee");

        v.clear();
        assert!(v.is_empty());
        v.cat_wide_str("a");
        v.cat_wide_str("bb");
        bytevec_cat_wformat!(v, "{}{}{}", 'c', "cc", 12345);
        v.cat_wide_str("ddd");
        v.push_text_unit(u16::from(b'd'));
        v.cat_wide_str("eeeee");
        assert_eq!(v.len_of::<u16>(), 16 + 5);
        assert_eq!(v.get_wide(), wide("abbccc12345ddddeeeee").as_slice());

        v3.copy_from(&v);
        assert_eq!(v3.get_wide(), wide("abbccc12345ddddeeeee").as_slice());

        v.clear_and_free();
        assert!(v.is_empty());
        v4.move_from(&mut v2);
        assert!(v2.is_empty());
        assert_eq!(v4.len(), 16 + 5);
        assert_eq!(v4.get_bstr(), "abbccc12345ddddeeeee");

        v3.swap(&mut v4);
        assert_eq!(v3.get_bstr(), "abbccc12345ddddeeeee");
        assert_eq!(v4.get_wide(), wide("abbccc12345ddddeeeee").as_slice());

        v3.resize(7);
        assert_eq!(&v3.as_slice()[..7], b"abbccc1");
        v3.as_mut_slice()[3] = 0;
        v3.shrink_to_text::<u8>();
        assert_eq!(v3.len(), 4);
        assert_eq!(v3.get_bstr(), "abb");

        v4.resize_elements::<u16>(7);
        v4.typed::<u16>()[3] = 0;
        v4.shrink_to_text::<u16>();
        assert_eq!(v4.len_of::<u16>(), 4);
        assert_eq!(v4.get_wide(), wide("abb").as_slice());
    }
}

#[test]
fn append_copy_of_self() {
    let mut v = ByteVec::new();
    v.cat_str("abcdef");
    let v2 = v.clone();
    v.extend_from_byte_vec(&v2);
    assert_eq!(v.as_slice(), b"abcdef\0abcdef\0");

    let p: *mut ByteVec = &raw mut v;
    // SAFETY: `p` is the only access path to `v` while the block runs.
    unsafe {
        ByteVec::copy_raw(p, p);
        assert_eq!((*p).as_slice(), b"abcdef\0abcdef\0");
        ByteVec::move_raw(p, p);
        assert_eq!((*p).as_slice(), b"abcdef\0abcdef\0");
        ByteVec::swap_raw(p, p);
        assert_eq!((*p).as_slice(), b"abcdef\0abcdef\0");
    }

    v.clear_and_free();
    assert_eq!(v.get_bstr(), "");
    assert_eq!(v.len(), 1);
    v.clear_and_free();
    assert_eq!(v.get_wide(), &[] as &[u16]);
    assert_eq!(v.len_of::<u16>(), 1);
}

#[test]
fn single_units_become_strings() {
    let mut v = ByteVec::new();
    v.push_value(b'a');
    assert_eq!(v.get_bstr(), "a");
    assert_eq!(v.len(), 2);

    v.clear_and_free();
    v.push_value(u16::from(b'a'));
    assert_eq!(v.get_wide(), &[u16::from(b'a')]);
    assert_eq!(v.len_of::<u16>(), 2);
}

#[test]
fn bounded_concat_sequences() {
    let mut v = ByteVec::new();
    for (s, n) in [
        ("xxx", 0),
        ("abcde", 1),
        ("", 0),
        ("abcde", 2),
        ("abcde", 5),
        ("", 100),
        ("1", 100),
        ("12", 100),
    ] {
        v.cat_text_bounded(s.as_bytes(), n);
    }
    assert_eq!(v.len(), 11 + 1);
    assert_eq!(v.get_bstr(), "aababcde112");

    let mut w = ByteVec::new();
    for (s, n) in [("xxx", 0), ("abcde", 1), ("abcde", 2), ("abcde", 5), ("12", 100)] {
        w.cat_text_bounded(&wide(s), n);
    }
    assert_eq!(w.get_wide(), wide("aababcde12").as_slice());
}

#[test]
fn assign_then_append_formatted() {
    let mut v = ByteVec::new();
    v.cat_str("hahaha");
    v.assign_format::<u8>(format_args!("{}{}{}", 12345, "abcde", 67890));
    assert_eq!(v.len(), 15 + 1);
    bytevec_cat_format!(v, "{}{}{}", 54321, "EDCBA", 98765);
    assert_eq!(v.len(), 30 + 1);
    assert_eq!(v.get_bstr(), "12345abcde6789054321EDCBA98765");

    v.assign_format::<u16>(format_args!("{}{}{}", 12345, "abcde", 67890));
    assert_eq!(v.len_of::<u16>(), 15 + 1);
    bytevec_cat_wformat!(v, "{}{}{}", 54321, "EDCBA", 98765);
    assert_eq!(v.len_of::<u16>(), 30 + 1);
    assert_eq!(
        v.get_wide(),
        wide("12345abcde6789054321EDCBA98765").as_slice()
    );
}

#[test]
fn mixed_typed_pushes_little_endian_layout() {
    let mut v = ByteVec::new();
    v.push_value(0x11_u8);
    v.push_value(0x2233_u16.to_le());
    v.push_value(0_u32);
    v.push_value(0x4455_6677_i32.to_le());
    v.push_value(0x8899_AABB_u32.to_le());
    assert_eq!(v.len(), 1 + 2 + 4 + 4 + 4);
    assert_eq!(
        v.as_slice(),
        b"\x11\x33\x22\x00\x00\x00\x00\x77\x66\x55\x44\xBB\xAA\x99\x88"
    );

    v.clear();
    v.push_value(0x4455_6677_i32.to_le());
    v.push_value(0x8899_AABB_u32.to_le());
    assert_eq!(v.as_slice(), b"\x77\x66\x55\x44\xBB\xAA\x99\x88");
    assert_eq!(u32::from_le(v.last_value::<u32>().unwrap()), 0x8899_AABB);
    let _ = v.pop_value::<u32>();
    assert_eq!(v.as_slice(), b"\x77\x66\x55\x44");
    assert_eq!(i32::from_le(v.last_value::<i32>().unwrap()), 0x4455_6677);
    let _ = v.pop_value::<i32>();
    assert!(v.is_empty());
}

#[test]
fn reserve_far_beyond_default() {
    let mut v = ByteVec::new();
    v.extend_from_slice(b"seed");
    v.reserve(10_000_000);
    assert!(v.capacity() >= 10_000_000);
    assert!(v.capacity().is_power_of_two());
    assert_eq!(v.as_slice(), b"seed");
    v.assert_invariants();
}
