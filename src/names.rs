// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Canonicalising interner for Java source identifiers.
//!
//! A [`Name`] is a small, `Copy`, identity-comparable handle. Two calls
//! to [`Names::intern`] with byte-identical content return handles that
//! compare equal; calls with different content never do, regardless of
//! hash collisions.

use std::hash::{Hash, Hasher};
use std::sync::Mutex;

/// An interned identifier. Equality and hashing are by identity
/// (the dense index), never by content.
#[derive(Clone, Copy, Eq, Debug)]
pub struct Name {
    index: u32,
}

impl PartialEq for Name {
    fn eq(&self, other: &Name) -> bool {
        self.index == other.index
    }
}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state)
    }
}

impl Name {
    /// Dense index of this handle into its owning table's entry vector.
    pub fn index(self) -> u32 {
        self.index
    }
}

#[derive(Clone, Copy)]
struct Entry {
    offset: u32,
    len: u32,
}

/// Open-addressing is not used: each bucket holds a chain of entry
/// indices, so growth never has to relocate already-placed entries
/// except by rehashing them into more buckets.
pub struct Names {
    arena: Vec<u8>,
    entries: Vec<Entry>,
    buckets: Vec<Vec<u32>>,
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

const INITIAL_BUCKETS: usize = 256;

impl Names {
    pub fn new() -> Names {
        Names {
            arena: Vec::with_capacity(4096),
            entries: Vec::new(),
            buckets: (0..INITIAL_BUCKETS).map(|_| Vec::new()).collect(),
        }
    }

    fn bucket_for(&self, hash: u64) -> usize {
        (hash as usize) & (self.buckets.len() - 1)
    }

    fn bytes_of(&self, entry: Entry) -> &[u8] {
        &self.arena[entry.offset as usize..(entry.offset + entry.len) as usize]
    }

    fn grow_if_needed(&mut self) {
        // Keep the average chain length low; rehash into double the buckets.
        if self.entries.len() > self.buckets.len() * 2 {
            let new_len = self.buckets.len() * 2;
            let mut new_buckets: Vec<Vec<u32>> = (0..new_len).map(|_| Vec::new()).collect();
            for (i, entry) in self.entries.iter().enumerate() {
                let hash = fnv1a(self.bytes_of(*entry));
                let b = (hash as usize) & (new_len - 1);
                new_buckets[b].push(i as u32);
            }
            self.buckets = new_buckets;
        }
    }

    /// Canonicalise `bytes`, returning a handle that compares equal by
    /// identity to the handle returned by any other call with the same
    /// content.
    pub fn intern_bytes(&mut self, bytes: &[u8]) -> Name {
        let hash = fnv1a(bytes);
        let bucket = self.bucket_for(hash);
        for &i in &self.buckets[bucket] {
            if self.bytes_of(self.entries[i as usize]) == bytes {
                return Name { index: i };
            }
        }

        let offset = self.arena.len() as u32;
        self.arena.extend_from_slice(bytes);
        let entry = Entry {
            offset,
            len: bytes.len() as u32,
        };
        let index = self.entries.len() as u32;
        self.entries.push(entry);
        self.buckets[bucket].push(index);
        self.grow_if_needed();
        Name { index }
    }

    /// Canonicalise the UTF-8 encoding of `s`.
    pub fn intern(&mut self, s: &str) -> Name {
        self.intern_bytes(s.as_bytes())
    }

    /// Raw access to a handle's interned bytes, for format-sensitive
    /// consumers (e.g. spelling out an identifier token).
    pub fn from_name(&self, name: Name) -> (&[u8], u32, u32) {
        let entry = self.entries[name.index as usize];
        (self.bytes_of(entry), entry.offset, entry.len)
    }

    /// UTF-8 view of the interned content. Panics if the bytes are not
    /// valid UTF-8, which cannot happen for anything interned through
    /// [`Names::intern`].
    pub fn as_str(&self, name: Name) -> &str {
        std::str::from_utf8(self.bytes_of(self.entries[name.index as usize]))
            .expect("interned identifier bytes are not valid UTF-8")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Names {
    fn default() -> Names {
        Names::new()
    }
}

/// A table explicitly shared across more than one [`crate::context::Context`].
/// Mutation takes a per-table mutex when the table is shared across
/// contexts; an unshared table stays lock-free.
#[derive(Default)]
pub struct SharedNames(Mutex<Names>);

impl SharedNames {
    pub fn new() -> SharedNames {
        SharedNames(Mutex::new(Names::new()))
    }

    pub fn intern(&self, s: &str) -> Name {
        self.0.lock().expect("name table mutex poisoned").intern(s)
    }

    pub fn as_str(&self, name: Name) -> String {
        self.0
            .lock()
            .expect("name table mutex poisoned")
            .as_str(name)
            .to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interns_equal_content_to_equal_handles() {
        let mut names = Names::new();
        let a = names.intern("foo");
        let b = names.intern("foo");
        assert_eq!(a, b);
        assert_eq!(names.as_str(a), "foo");
    }

    #[test]
    fn distinguishes_different_content() {
        let mut names = Names::new();
        let a = names.intern("foo");
        let b = names.intern("bar");
        assert_ne!(a, b);
    }

    #[test]
    fn survives_growth_past_initial_bucket_count() {
        let mut names = Names::new();
        let handles: Vec<Name> = (0..2000).map(|i| names.intern(&format!("ident{i}"))).collect();
        for (i, h) in handles.iter().enumerate() {
            assert_eq!(names.as_str(*h), format!("ident{i}"));
        }
        // Re-interning after growth must still canonicalise correctly.
        let again = names.intern("ident42");
        assert_eq!(again, handles[42]);
    }
}
