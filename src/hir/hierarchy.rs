//! Member lookup through a class and its supertypes.

use rustc_hash::FxHashSet;

use super::query::{QueryOptions, SymbolQuery};
use super::resolve::Resolver;
use super::scope::ScopeChain;
use super::symbol::SymbolRef;
use crate::base::SymbolId;
use crate::syntax::NodeKind;

impl<'a> Resolver<'a> {
    /// Offer `class`'s members, then those of each supertype in declaration
    /// order.
    ///
    /// Supertype names are resolved at lookup time, never cached, in the
    /// scope just outside the class declaration. `seen` holds every class
    /// already visited by this lookup; revisiting one means the hierarchy
    /// is cyclic and that branch is dropped.
    pub(crate) fn lookup_in_class(
        &self,
        class: SymbolRef<'a>,
        query: &mut SymbolQuery<'a>,
        seen: &mut FxHashSet<SymbolId>,
    ) -> bool {
        let NodeKind::Class(data) = &class.node().kind else {
            return false;
        };
        if !seen.insert(class.id()) {
            tracing::trace!("supertype cycle through {}", class.label());
            return false;
        }

        let file = class.file();
        for &member in &data.members {
            let Some(symbol) = SymbolRef::new(file, member) else {
                continue;
            };
            if query.add(symbol) {
                return true;
            }
        }

        if data.supertypes.is_empty() {
            return false;
        }
        let start = class.range().start();
        let chain = ScopeChain::at_excluding(file, class.node_id(), start);
        for supertype in &data.supertypes {
            let base = self
                .resolve1(supertype, &chain, start, QueryOptions::TYPE)
                .first()
                .filter(|base| base.kind().is_class_like());
            let Some(base) = base else {
                tracing::trace!("unresolved supertype {supertype} of {}", class.label());
                continue;
            };
            if seen.contains(&base.id()) {
                tracing::trace!("skipping already visited supertype {}", base.label());
                continue;
            }
            if self.lookup_in_class(base, query, seen) {
                return true;
            }
        }
        false
    }
}
