/*!
 * Document identity for leaf references.
 *
 * Leaves point at manifest items owned elsewhere. This crate only needs a
 * stable handle it can compare for identity, so resolution from an href to a
 * `DocumentId` is delegated to a `DocumentResolver` supplied by the caller.
 */

use std::collections::HashMap;
use std::fmt;

/// Opaque, resolved handle of a publication document.
///
/// Two references point at the same document exactly when their handles are
/// equal; hrefs are never compared.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct DocumentId(u32);

impl DocumentId {
    /// Wrap a raw handle value produced by a resolver
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw handle value
    pub const fn as_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}

/// Maps hrefs onto document handles.
pub trait DocumentResolver {
    /// Resolve an href (without fragment) to a document handle
    fn resolve(&self, href: &str) -> Option<DocumentId>;
}

impl<F> DocumentResolver for F
where
    F: Fn(&str) -> Option<DocumentId>,
{
    fn resolve(&self, href: &str) -> Option<DocumentId> {
        self(href)
    }
}

/// Minimal in-memory resolver: each registered href gets the next handle.
#[derive(Debug, Default, Clone)]
pub struct ManifestIndex {
    by_href: HashMap<String, DocumentId>,
}

impl ManifestIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an href, returning its handle. Registering twice returns the
    /// handle issued the first time.
    pub fn register(&mut self, href: &str) -> DocumentId {
        let next = DocumentId(self.by_href.len() as u32);
        *self.by_href.entry(href.to_string()).or_insert(next)
    }

    /// Number of registered documents
    pub fn len(&self) -> usize {
        self.by_href.len()
    }

    /// Whether nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.by_href.is_empty()
    }
}

impl DocumentResolver for ManifestIndex {
    fn resolve(&self, href: &str) -> Option<DocumentId> {
        self.by_href.get(href).copied()
    }
}

/// Reference from a leaf (or a sequence's alternate text) into a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaRef {
    /// Href of the referenced file, without fragment
    pub src_file: String,
    /// Fragment identifier, empty when the whole file is meant
    pub fragment_id: String,
    /// Resolved handle, `None` when the href did not resolve
    pub document: Option<DocumentId>,
}

impl MediaRef {
    /// Create a reference from already separated parts
    pub fn new(src_file: impl Into<String>, fragment_id: impl Into<String>, document: Option<DocumentId>) -> Self {
        Self {
            src_file: src_file.into(),
            fragment_id: fragment_id.into(),
            document,
        }
    }

    /// Split `file#fragment` and resolve the file part.
    pub fn parse<R: DocumentResolver + ?Sized>(href: &str, resolver: &R) -> Self {
        let (file, fragment) = match href.split_once('#') {
            Some((file, fragment)) => (file, fragment),
            None => (href, ""),
        };
        Self {
            src_file: file.to_string(),
            fragment_id: fragment.to_string(),
            document: resolver.resolve(file),
        }
    }

    /// Whether the reference resolved to a known document
    pub fn is_resolved(&self) -> bool {
        self.document.is_some()
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fragment_id.is_empty() {
            write!(f, "{}", self.src_file)
        } else {
            write!(f, "{}#{}", self.src_file, self.fragment_id)
        }
    }
}
