//! Compound names: `foo`, `Gtk.Window`, `x.y.z`.

use std::fmt;

use smol_str::SmolStr;

/// A possibly-dotted reference to a symbol or type, resolved left to right.
///
/// `a.b.c` is `Qualified(Qualified(Simple(a), b), c)`: the qualifier is
/// everything but the last segment.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum CompoundName {
    Simple(SmolStr),
    Qualified(Box<CompoundName>, SmolStr),
}

impl CompoundName {
    pub fn simple(name: impl Into<SmolStr>) -> Self {
        CompoundName::Simple(name.into())
    }

    /// Append a trailing segment: `self.name`.
    pub fn qualify(self, name: impl Into<SmolStr>) -> Self {
        CompoundName::Qualified(Box::new(self), name.into())
    }

    /// Build from segments. Returns `None` for an empty list.
    pub fn from_segments<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let mut segments = segments.into_iter();
        let first = CompoundName::Simple(segments.next()?.into());
        Some(segments.fold(first, CompoundName::qualify))
    }

    /// Parse dotted text such as `Gtk.Window`.
    ///
    /// Every segment must be an identifier, except that the last one may be
    /// empty (`x.` is the prefix of a member completion). The empty string is
    /// the empty simple name, i.e. "everything in scope".
    pub fn parse(text: &str) -> Option<Self> {
        let segments: Vec<&str> = text.split('.').collect();
        let (last, qualifier) = segments.split_last()?;
        if !qualifier.iter().all(|s| is_identifier(s)) {
            return None;
        }
        if !last.is_empty() && !is_identifier(last) {
            return None;
        }
        Self::from_segments(segments.iter().copied())
    }

    /// The final segment.
    pub fn last(&self) -> &SmolStr {
        match self {
            CompoundName::Simple(name) | CompoundName::Qualified(_, name) => name,
        }
    }

    /// Everything before the final segment.
    pub fn qualifier(&self) -> Option<&CompoundName> {
        match self {
            CompoundName::Simple(_) => None,
            CompoundName::Qualified(qualifier, _) => Some(qualifier),
        }
    }

    pub fn is_simple(&self) -> bool {
        matches!(self, CompoundName::Simple(_))
    }

    /// Segments from left to right.
    pub fn segments(&self) -> Vec<&str> {
        let mut segments = match self {
            CompoundName::Simple(_) => Vec::new(),
            CompoundName::Qualified(qualifier, _) => qualifier.segments(),
        };
        segments.push(self.last().as_str());
        segments
    }
}

impl fmt::Display for CompoundName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompoundName::Simple(name) => f.write_str(name),
            CompoundName::Qualified(qualifier, name) => write!(f, "{qualifier}.{name}"),
        }
    }
}

impl fmt::Debug for CompoundName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompoundName({self})")
    }
}

/// Whether `text` is a single identifier. A leading `@` escapes keywords.
pub fn is_identifier(text: &str) -> bool {
    let text = text.strip_prefix('@').unwrap_or(text);
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c == '_' || unicode_ident::is_xid_start(c) => {
            chars.all(unicode_ident::is_xid_continue)
        }
        _ => false,
    }
}
