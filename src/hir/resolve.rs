//! Name resolution: compound name + position → candidate declarations.
//!
//! # Algorithm
//!
//! A simple name is looked up by walking the [`ScopeChain`] at the
//! position outward until a scope satisfies the query.
//!
//! A qualified name `q.n` is resolved left to right:
//!
//! 1. Resolve `q` exactly (never as a constructor) to one candidate.
//! 2. If the candidate is a variable and we are not looking for a type,
//!    replace it with its declared type, resolved where the variable is
//!    declared. This is what makes `x.y` with `Foo x` look in `Foo`.
//! 3. Methods have no members: the result is empty.
//! 4. Otherwise look `n` up in the candidate's member scope.
//!
//! Nothing here is an error. An unknown name is an empty result.

use std::cell::Cell;

use smol_str::SmolStr;

use super::query::{QueryOptions, SymbolQuery};
use super::scope::{Scope, ScopeChain, ScopeRef};
use super::source::Sources;
use super::symbol::SymbolRef;
use crate::base::TextSize;
use crate::base::constants::MAX_RESOLVE_DEPTH;
use crate::syntax::{CompoundName, SourceFile};

/// Resolves names against one program's sources.
///
/// A resolver is cheap to build and is meant to live for one query or one
/// analysis snapshot.
#[derive(Debug)]
pub struct Resolver<'a> {
    sources: Sources<'a>,
    /// Nesting of `resolve1` calls, to cut off pathological recursion
    /// through supertypes and declared types.
    depth: Cell<usize>,
}

impl<'a> Resolver<'a> {
    pub fn new(sources: Sources<'a>) -> Self {
        Self {
            sources,
            depth: Cell::new(0),
        }
    }

    pub fn sources(&self) -> Sources<'a> {
        self.sources
    }

    /// Resolve `name` as seen from `chain` at `pos`.
    pub fn resolve1(
        &self,
        name: &CompoundName,
        chain: &ScopeChain<'a>,
        pos: TextSize,
        options: QueryOptions,
    ) -> SymbolQuery<'a> {
        let depth = self.depth.get();
        if depth >= MAX_RESOLVE_DEPTH {
            tracing::warn!("resolution of {name} exceeded depth {MAX_RESOLVE_DEPTH}, giving up");
            return SymbolQuery::new(name.last().clone(), options);
        }
        self.depth.set(depth + 1);
        let query = match name {
            CompoundName::Simple(simple) => {
                let mut query = SymbolQuery::new(simple.clone(), options);
                chain.lookup(self, &mut query, pos);
                query
            }
            CompoundName::Qualified(qualifier, last) => {
                self.resolve_member(qualifier, last, chain, pos, options)
            }
        };
        self.depth.set(depth);
        tracing::trace!("resolve {name} at {pos:?}: {} match(es)", query.len());
        query
    }

    fn resolve_member(
        &self,
        qualifier: &CompoundName,
        last: &SmolStr,
        chain: &ScopeChain<'a>,
        pos: TextSize,
        options: QueryOptions,
    ) -> SymbolQuery<'a> {
        let mut query = SymbolQuery::new(last.clone(), options);
        let Some(mut left) = self
            .resolve1(qualifier, chain, pos, options.for_qualifier())
            .first()
        else {
            return query;
        };

        if !options.find_type && left.kind().is_variable() {
            let Some(ty) = left.declared_type() else {
                return query;
            };
            match self.resolve_declared_type(left, ty) {
                Some(ty) => left = ty,
                None => return query,
            }
        }

        if left.kind().is_method() {
            return query;
        }
        if let Some(scope) = ScopeRef::of_symbol(left) {
            scope.lookup(self, &mut query, pos);
        }
        query
    }

    /// A variable's declared type, resolved where the variable is declared.
    fn resolve_declared_type(
        &self,
        variable: SymbolRef<'a>,
        ty: &CompoundName,
    ) -> Option<SymbolRef<'a>> {
        let pos = variable.range().start();
        let chain = ScopeChain::at(variable.file(), pos);
        self.resolve1(ty, &chain, pos, QueryOptions::TYPE).first()
    }

    // =========================================================================
    // QUERY POLICIES
    // =========================================================================

    /// What `name` refers to at `pos`.
    pub fn resolve(
        &self,
        name: &CompoundName,
        file: &'a SourceFile,
        pos: TextSize,
    ) -> Option<SymbolRef<'a>> {
        let chain = ScopeChain::at(file, pos);
        self.resolve1(name, &chain, pos, QueryOptions::EXACT).first()
    }

    /// The type(s) a type reference denotes at `pos`.
    pub fn resolve_type(
        &self,
        name: &CompoundName,
        file: &'a SourceFile,
        pos: TextSize,
    ) -> Vec<SymbolRef<'a>> {
        let chain = ScopeChain::at(file, pos);
        self.resolve1(name, &chain, pos, QueryOptions::TYPE).symbols()
    }

    /// Completion candidates whose name starts with the last segment of
    /// `prefix`.
    pub fn resolve_prefix(
        &self,
        prefix: &CompoundName,
        file: &'a SourceFile,
        pos: TextSize,
        constructors: bool,
    ) -> Vec<SymbolRef<'a>> {
        let chain = ScopeChain::at(file, pos);
        self.resolve1(prefix, &chain, pos, QueryOptions::prefix(constructors))
            .symbols()
    }

    /// The constructor `new name (...)` calls, or the class itself when it
    /// relies on the implicit default constructor.
    pub fn resolve_constructor(
        &self,
        name: &CompoundName,
        file: &'a SourceFile,
        pos: TextSize,
    ) -> Option<SymbolRef<'a>> {
        let chain = ScopeChain::at(file, pos);
        self.resolve1(name, &chain, pos, QueryOptions::CONSTRUCTOR)
            .first()
    }
}
