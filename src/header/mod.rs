// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

//! A minimal tagged-record metadata container: a mapping from a
//! numeric tag to a typed value, supporting create-empty, deep copy,
//! iterate, query presence, add (rejecting duplicates), and
//! serialize.

pub mod tags;

use indexmap::IndexMap;

#[cfg(test)]
#[path = "./header_test.rs"]
mod header_test;

/// Numeric key identifying one entry in a [`Header`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(pub u32);

/// The typed value stored under a single header entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    StrArray(Vec<String>),
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Bin(Vec<u8>),
}

impl Value {
    /// Number of logical elements carried by this value, as surfaced
    /// by header iteration.
    pub fn count(&self) -> usize {
        match self {
            Value::Str(_) => 1,
            Value::StrArray(v) => v.len(),
            Value::Int8(v) => v.len(),
            Value::Int16(v) => v.len(),
            Value::Int32(v) => v.len(),
            Value::Bin(v) => v.len(),
        }
    }

    fn type_code(&self) -> u32 {
        match self {
            Value::Str(_) => 0,
            Value::StrArray(_) => 1,
            Value::Int8(_) => 2,
            Value::Int16(_) => 3,
            Value::Int32(_) => 4,
            Value::Bin(_) => 5,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("tag {0:?} is already present in header")]
    DuplicateTag(Tag),
    #[error("malformed header bytes: {0}")]
    Malformed(String),
    #[error("unknown header tag name: {0}")]
    UnknownTag(String),
}

type Result<T> = std::result::Result<T, HeaderError>;

/// A tagged, ordered record of metadata entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    entries: IndexMap<Tag, Value>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a header from a simple name-to-string map, the on-disk
    /// shape a [`crate::spec::SpecHandle`] reads for a sub-package's
    /// prebuilt header.
    pub fn from_named_scalars(
        entries: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self> {
        let mut header = Self::new();
        for (name, value) in entries {
            let tag = tags::by_name(&name).ok_or_else(|| HeaderError::UnknownTag(name))?;
            header.add(tag, Value::Str(value))?;
        }
        Ok(header)
    }

    /// Add a new entry. Fails if the tag is already present.
    pub fn add(&mut self, tag: Tag, value: Value) -> Result<()> {
        if self.entries.contains_key(&tag) {
            return Err(HeaderError::DuplicateTag(tag));
        }
        self.entries.insert(tag, value);
        Ok(())
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.entries.contains_key(&tag)
    }

    pub fn get(&self, tag: Tag) -> Option<&Value> {
        self.entries.get(&tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tag, &Value)> {
        self.entries.iter().map(|(t, v)| (*t, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize this header to its on-disk byte representation.
    ///
    /// Framing: a big-endian entry count, followed by one record per
    /// entry: tag (u32 BE), type code (u32 BE), element count (u32 BE),
    /// then the type-specific payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&(self.entries.len() as u32).to_be_bytes());
        for (tag, value) in self.entries.iter() {
            out.extend_from_slice(&tag.0.to_be_bytes());
            out.extend_from_slice(&value.type_code().to_be_bytes());
            out.extend_from_slice(&(value.count() as u32).to_be_bytes());
            write_payload(&mut out, value);
        }
        out
    }
}

fn write_payload(out: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Str(s) => write_string(out, s),
        Value::StrArray(items) => {
            for item in items {
                write_string(out, item);
            }
        }
        Value::Int8(items) => {
            for i in items {
                out.push(*i as u8);
            }
        }
        Value::Int16(items) => {
            for i in items {
                out.extend_from_slice(&i.to_be_bytes());
            }
        }
        Value::Int32(items) => {
            for i in items {
                out.extend_from_slice(&i.to_be_bytes());
            }
        }
        Value::Bin(bytes) => out.extend_from_slice(bytes),
    }
}

fn write_string(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(&(s.len() as u32).to_be_bytes());
    out.extend_from_slice(s.as_bytes());
}
