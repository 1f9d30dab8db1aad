//! Card view-model: CardId, Card, content hashing.
//!
//! A [`Card`] is the read-only input to the layout and rendering engine —
//! one displayed document summary, keyed by its stable source path. The
//! engine never mutates a card; it only derives host content from it.

use std::fmt;

/// How much of the title participates in the content hash.
const TITLE_HASH_PREFIX: usize = 80;
/// How much of the body participates in the content hash.
const BODY_HASH_PREFIX: usize = 400;

// ---------------------------------------------------------------------------
// CardId
// ---------------------------------------------------------------------------

/// Stable identifier for a card: its source document path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(String);

impl CardId {
    /// Create an id from a source path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is empty (a malformed card record).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(path: &str) -> Self {
        Self(path.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Card
// ---------------------------------------------------------------------------

/// View-model for one displayed document summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Stable identifier (the source path).
    pub id: CardId,
    /// Document title.
    pub title: String,
    /// Preview text for the card body.
    pub body: String,
    /// Tags shown on the card.
    pub tags: Vec<String>,
    /// Path of the source document, used to open it.
    pub path: String,
}

impl Card {
    /// Create a card for the document at `path` with the given title.
    ///
    /// The path doubles as the card id.
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            id: CardId::new(path.clone()),
            title: title.into(),
            body: String::new(),
            tags: Vec::new(),
            path,
        }
    }

    /// Set the preview body (builder).
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Add a tag (builder). Duplicates are ignored.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    /// Add multiple tags (builder).
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for tag in tags {
            self = self.with_tag(tag);
        }
        self
    }

    /// Hash of the visible fields: id, title prefix, truncated body, tags.
    ///
    /// The renderer compares this against the hash recorded at the last
    /// render; an unchanged hash means the card's subtree is left untouched
    /// and only its position is reapplied.
    pub fn content_hash(&self) -> u64 {
        let mut hash = Fnv1a::new();
        hash.write(self.id.as_str().as_bytes());
        hash.write(prefix(&self.title, TITLE_HASH_PREFIX).as_bytes());
        hash.write(prefix(&self.body, BODY_HASH_PREFIX).as_bytes());
        for tag in &self.tags {
            hash.write(tag.as_bytes());
            hash.write(&[0]);
        }
        hash.finish()
    }
}

/// The first `max` characters of `s`, on a char boundary.
fn prefix(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// ---------------------------------------------------------------------------
// Fnv1a
// ---------------------------------------------------------------------------

/// FNV-1a 64-bit, used for content hashing. Deterministic across runs,
/// unlike the std `DefaultHasher`.
struct Fnv1a(u64);

impl Fnv1a {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    fn new() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= u64::from(b);
            self.0 = self.0.wrapping_mul(Self::PRIME);
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

// ===========================================================================
// Tests
// ===========================================================================
