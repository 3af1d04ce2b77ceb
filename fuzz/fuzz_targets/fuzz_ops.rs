#![no_main]
use arbitrary::Arbitrary;
use bytevec::{ByteVec, ByteVecOptions};
use libfuzzer_sys::fuzz_target;

/// Sizes are kept small so that a single input cannot exhaust memory.
#[derive(Arbitrary, Debug)]
enum Op {
    Extend(Vec<u8>),
    Resize(u16),
    TruncateBy(u8),
    Reserve(u16),
    Clear,
    ClearAndFree,
    ShrinkToFit,
    PushU64(u64),
    PopU8,
    CopyFromOther,
    MoveFromOther,
    SwapWithOther,
    CatText(Vec<u8>),
    CatTextBounded(Vec<u8>, u8),
    GetText,
    CatFormat(i64, String),
}

#[derive(Arbitrary, Debug)]
struct Input {
    default_capacity: u8,
    format_capacity: u8,
    ops: Vec<Op>,
}

struct Model {
    v: ByteVec,
    bytes: Vec<u8>,
}

fn check(m: &Model) {
    m.v.assert_invariants();
    assert_eq!(m.v.as_slice(), m.bytes.as_slice());
}

fn apply(m: &mut Model, other: &mut Model, op: &Op) {
    match op {
        Op::Extend(data) => {
            m.v.extend_from_slice(data);
            m.bytes.extend_from_slice(data);
        }
        Op::Resize(n) => {
            let n = usize::from(*n);
            let old = m.bytes.len();
            m.v.resize(n);
            m.bytes.truncate(n);
            if n > old {
                m.bytes.extend_from_slice(&m.v.as_slice()[old..]);
            }
        }
        Op::TruncateBy(n) => {
            let n = usize::from(*n).min(m.bytes.len());
            m.v.truncate_by(n);
            m.bytes.truncate(m.bytes.len() - n);
        }
        Op::Reserve(n) => {
            let n = usize::from(*n);
            m.v.reserve(n);
            assert!(m.v.capacity() >= n);
        }
        Op::Clear => {
            let cap = m.v.capacity();
            m.v.clear();
            m.bytes.clear();
            assert_eq!(m.v.capacity(), cap);
        }
        Op::ClearAndFree => {
            m.v.clear_and_free();
            m.bytes.clear();
            assert_eq!(m.v.capacity(), 0);
        }
        Op::ShrinkToFit => {
            let before = m.v.capacity();
            m.v.shrink_to_fit();
            let cap = m.v.capacity();
            assert!(cap <= before);
            if m.bytes.is_empty() {
                assert_eq!(cap, 0);
            } else {
                assert!(cap < 2 * m.bytes.len());
            }
        }
        Op::PushU64(x) => {
            m.v.push_value(*x);
            m.bytes.extend_from_slice(&x.to_ne_bytes());
        }
        Op::PopU8 => {
            if let Some(expected) = m.bytes.pop() {
                assert_eq!(m.v.pop_value::<u8>(), expected);
            }
        }
        Op::CopyFromOther => {
            m.v.copy_from(&other.v);
            m.bytes.clone_from(&other.bytes);
        }
        Op::MoveFromOther => {
            m.v.move_from(&mut other.v);
            m.bytes = std::mem::take(&mut other.bytes);
        }
        Op::SwapWithOther => {
            m.v.swap(&mut other.v);
            std::mem::swap(&mut m.bytes, &mut other.bytes);
        }
        Op::CatText(s) => {
            m.v.cat_text(s);
            cat_model(&mut m.bytes, s, usize::MAX);
        }
        Op::CatTextBounded(s, n) => {
            m.v.cat_text_bounded(s, usize::from(*n));
            cat_model(&mut m.bytes, s, usize::from(*n));
        }
        Op::GetText => {
            let text = m.v.get_text::<u8>().to_vec();
            if m.bytes.last() != Some(&0) {
                m.bytes.push(0);
            }
            let end = m.bytes.iter().position(|&b| b == 0).unwrap_or(m.bytes.len());
            assert_eq!(text, &m.bytes[..end]);
        }
        Op::CatFormat(n, s) => {
            m.v.cat_format::<u8>(format_args!("{n}:{s}"));
            let rendered = format!("{n}:{s}");
            cat_model(&mut m.bytes, rendered.as_bytes(), usize::MAX);
        }
    }
}

fn cat_model(bytes: &mut Vec<u8>, s: &[u8], n: usize) {
    if bytes.last() == Some(&0) {
        bytes.pop();
    }
    bytes.extend(s.iter().take(n).take_while(|&&b| b != 0));
    bytes.push(0);
}

fuzz_target!(|input: Input| {
    let options = ByteVecOptions {
        default_capacity: usize::from(input.default_capacity),
        format_capacity: usize::from(input.format_capacity),
        ..ByteVecOptions::default()
    };
    let mut a = Model {
        v: ByteVec::with_options(options),
        bytes: Vec::new(),
    };
    let mut b = Model {
        v: ByteVec::with_options(options),
        bytes: Vec::new(),
    };
    for (i, op) in input.ops.iter().enumerate() {
        if i % 2 == 0 {
            apply(&mut a, &mut b, op);
        } else {
            apply(&mut b, &mut a, op);
        }
        check(&a);
        check(&b);
    }
});
