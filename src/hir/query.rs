//! Symbol queries: the collector every scope adds candidates to.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use smol_str::SmolStr;

use super::symbol::{SymbolKind, SymbolRef};
use crate::syntax::NodeKind;

/// How a query matches candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QueryOptions {
    /// Only namespaces and class-likes.
    pub find_type: bool,
    /// Whole-name match (and stop at the first scope that matches) rather
    /// than prefix match over every scope.
    pub exact: bool,
    /// Match constructors instead of ordinary members.
    pub constructor: bool,
}

impl QueryOptions {
    /// "What does this name mean here?"
    pub const EXACT: Self = Self {
        find_type: false,
        exact: true,
        constructor: false,
    };

    /// A type reference.
    pub const TYPE: Self = Self {
        find_type: true,
        exact: true,
        constructor: false,
    };

    /// The constructor a `new` expression calls.
    pub const CONSTRUCTOR: Self = Self {
        find_type: false,
        exact: true,
        constructor: true,
    };

    /// Completion candidates.
    pub const fn prefix(constructor: bool) -> Self {
        Self {
            find_type: false,
            exact: false,
            constructor,
        }
    }

    /// The options a qualifier is resolved with: always exact, never
    /// constructors, type-only when the whole name is.
    pub const fn for_qualifier(self) -> Self {
        Self {
            find_type: self.find_type,
            exact: true,
            constructor: false,
        }
    }
}

/// Collects the symbols matching one name.
///
/// Results keep insertion order and are deduplicated by label, so the
/// innermost declaration of a name wins.
#[derive(Clone, Debug)]
pub struct SymbolQuery<'a> {
    name: SmolStr,
    options: QueryOptions,
    found: IndexMap<SmolStr, SymbolRef<'a>, FxBuildHasher>,
}

impl<'a> SymbolQuery<'a> {
    pub fn new(name: impl Into<SmolStr>, options: QueryOptions) -> Self {
        Self {
            name: name.into(),
            options,
            found: IndexMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> QueryOptions {
        self.options
    }

    /// Offer a candidate.
    ///
    /// Returns `true` when the query is exact and accepted the candidate:
    /// the caller should stop searching enclosing scopes.
    pub fn add(&mut self, symbol: SymbolRef<'a>) -> bool {
        let name = if self.options.constructor {
            symbol.match_name()
        } else {
            symbol.name()
        };
        let Some(name) = name else {
            return false;
        };
        if !self.matches(name) {
            return false;
        }

        let kind = symbol.kind();
        if self.options.find_type && !kind.is_type() {
            return false;
        }

        let accepted = if self.options.constructor {
            match kind {
                SymbolKind::Constructor | SymbolKind::Namespace => self.insert(symbol),
                kind if kind.is_class_like() => self.add_constructors(symbol),
                _ => false,
            }
        } else {
            kind != SymbolKind::Constructor && self.insert(symbol)
        };
        accepted && self.options.exact
    }

    fn matches(&self, name: &str) -> bool {
        if self.options.exact {
            name == self.name
        } else {
            name.starts_with(self.name.as_str())
        }
    }

    fn insert(&mut self, symbol: SymbolRef<'a>) -> bool {
        self.found.entry(symbol.label()).or_insert(symbol);
        true
    }

    /// Constructors a class contributes in constructor mode. A class that
    /// declares none stands in for its implicit default constructor.
    fn add_constructors(&mut self, class: SymbolRef<'a>) -> bool {
        let NodeKind::Class(data) = &class.node().kind else {
            return false;
        };
        let file = class.file();
        let mut declares_constructor = false;
        for &member in &data.members {
            let Some(member) = SymbolRef::new(file, member) else {
                continue;
            };
            match member.kind() {
                SymbolKind::Constructor => {
                    declares_constructor = true;
                    if self.options.exact {
                        if member.name().is_none() {
                            self.insert(member);
                        }
                    } else {
                        self.insert(member);
                    }
                }
                kind if kind.is_class_like() && !self.options.exact => {
                    self.add_constructors(member);
                }
                _ => {}
            }
        }
        let has_default = self.found.contains_key(class.label().as_str());
        if !declares_constructor || (self.options.exact && !has_default) {
            self.insert(class);
        }
        true
    }

    /// First match, in scope order.
    pub fn first(&self) -> Option<SymbolRef<'a>> {
        self.found.values().next().copied()
    }

    /// All matches, in scope order.
    ///
    /// A prefix query whose only match is named exactly like the prefix
    /// yields nothing: the completion would just repeat what was typed.
    pub fn symbols(&self) -> Vec<SymbolRef<'a>> {
        if !self.options.exact && self.found.len() == 1 {
            let redundant = self
                .found
                .values()
                .next()
                .and_then(|only| only.match_name())
                .is_some_and(|only| *only == self.name);
            if redundant {
                return Vec::new();
            }
        }
        self.found.values().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }
}
