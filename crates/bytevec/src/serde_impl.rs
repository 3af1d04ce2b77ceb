use core::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{SeqAccess, Visitor},
};

use crate::ByteVec;

impl Serialize for ByteVec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.as_slice())
    }
}

struct ByteVecVisitor;

impl<'de> Visitor<'de> for ByteVecVisitor {
    type Value = ByteVec;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a byte string")
    }

    fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<ByteVec, E> {
        Ok(ByteVec::from_bytes(v))
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<ByteVec, E> {
        Ok(ByteVec::from_bytes(v.as_bytes()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ByteVec, A::Error> {
        let mut v = ByteVec::new();
        if let Some(hint) = seq.size_hint() {
            v.reserve(hint.min(4096));
        }
        while let Some(byte) = seq.next_element::<u8>()? {
            v.push_value(byte);
        }
        Ok(v)
    }
}

impl<'de> Deserialize<'de> for ByteVec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_byte_buf(ByteVecVisitor)
    }
}
