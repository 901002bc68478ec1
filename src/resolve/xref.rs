//! Cross-reference resolution: call drafts and aliases to concrete
//! edges.

use rayon::prelude::*;
use tracing::debug;

use crate::base::{CallEdgeKind, GraphKind, ReceiverScope, SymbolId, qualify};
use crate::diagnostics::Diagnostic;
use crate::graph::{CallEdge, UnresolvedEdge};
use crate::normalize::CallDraft;
use crate::resolve::{EntityIndex, InheritanceResolver, MroResolver, TextHeuristic};

/// Everything cross-reference resolution produced.
#[derive(Debug, Clone, Default)]
pub struct XrefOutcome {
    pub calls: Vec<CallEdge>,
    pub constant_refs: Vec<(SymbolId, SymbolId)>,
    pub unresolved: Vec<UnresolvedEdge>,
    pub diagnostics: Vec<Diagnostic>,
}

impl XrefOutcome {
    fn absorb(&mut self, other: XrefOutcome) {
        self.calls.extend(other.calls);
        self.constant_refs.extend(other.constant_refs);
        self.unresolved.extend(other.unresolved);
        self.diagnostics.extend(other.diagnostics);
    }
}

/// Resolves call-edge drafts against the frozen entity set.
///
/// Resolution is read-only over shared state; drafts fan out across
/// threads and results are combined in draft order, so the outcome is
/// deterministic for a deterministically ordered draft list.
pub struct CrossReferenceResolver<'a> {
    index: &'a EntityIndex<'a>,
    inheritance: &'a InheritanceResolver<'a>,
    mro: &'a MroResolver<'a>,
    heuristic: TextHeuristic<'a>,
}

impl<'a> CrossReferenceResolver<'a> {
    pub fn new(
        index: &'a EntityIndex<'a>,
        inheritance: &'a InheritanceResolver<'a>,
        mro: &'a MroResolver<'a>,
    ) -> Self {
        Self {
            index,
            inheritance,
            mro,
            heuristic: TextHeuristic::new(index),
        }
    }

    /// Resolve all drafts. Unresolvable targets become dangling edges
    /// plus resolution warnings; nothing here fails the run.
    pub fn resolve_drafts(&self, drafts: &[CallDraft]) -> XrefOutcome {
        let partials: Vec<XrefOutcome> = drafts
            .par_iter()
            .map(|draft| self.resolve_one(draft))
            .collect();
        let mut outcome = XrefOutcome::default();
        for partial in partials {
            outcome.absorb(partial);
        }
        debug!(
            "[XREF] {} drafts -> {} calls, {} constant refs, {} unresolved",
            drafts.len(),
            outcome.calls.len(),
            outcome.constant_refs.len(),
            outcome.unresolved.len()
        );
        outcome
    }

    fn resolve_one(&self, draft: &CallDraft) -> XrefOutcome {
        let mut outcome = XrefOutcome::default();
        let caller_fqname = qualify(&draft.caller_owner, &draft.caller_name);

        // The call site lives inside a method; without that method in
        // the frozen set there is nothing to hang an edge on.
        let Some(caller) = self.lookup_caller(draft) else {
            outcome.diagnostics.push(Diagnostic::resolution_warning(format!(
                "call site in unknown method {caller_fqname}"
            )));
            return outcome;
        };

        if draft.constant_ref {
            self.resolve_constant_ref(draft, caller, &mut outcome);
            return outcome;
        }

        match draft.kind {
            CallEdgeKind::SuperCall => self.resolve_super(draft, caller, &mut outcome),
            CallEdgeKind::SelfCall => self.resolve_in_context(draft, caller, &mut outcome),
            CallEdgeKind::ClassMethodCall => {
                self.resolve_class_method(draft, caller, &mut outcome)
            }
            CallEdgeKind::Ordinary => match &draft.receiver {
                Some(_) => self.resolve_by_heuristic(draft, caller, &mut outcome),
                None => self.resolve_in_context(draft, caller, &mut outcome),
            },
        }
        outcome
    }

    fn lookup_caller(&self, draft: &CallDraft) -> Option<SymbolId> {
        self.index
            .method_on(&draft.caller_owner, &draft.caller_name, draft.caller_scope)
            .or_else(|| {
                let flipped = match draft.caller_scope {
                    ReceiverScope::Instance => ReceiverScope::Class,
                    ReceiverScope::Class => ReceiverScope::Instance,
                };
                self.index
                    .method_on(&draft.caller_owner, &draft.caller_name, flipped)
            })
    }

    /// `super` resolves to the same method name in the nearest ancestor
    /// that defines it.
    fn resolve_super(&self, draft: &CallDraft, caller: SymbolId, outcome: &mut XrefOutcome) {
        let owner_class = self.index.class_at(&draft.caller_owner);
        let target = owner_class.and_then(|class| {
            self.inheritance
                .ancestors(class)
                .ancestors
                .iter()
                .find_map(|&ancestor| {
                    let owner_fqname = self.index.fqname_of(ancestor)?;
                    self.index
                        .method_on(owner_fqname, &draft.target, draft.caller_scope)
                })
        });
        match target {
            Some(to) => outcome
                .calls
                .push(CallEdge::new(caller, to, CallEdgeKind::SuperCall)),
            None => {
                outcome.unresolved.push(UnresolvedEdge::call(
                    caller,
                    draft.target.as_str(),
                    CallEdgeKind::SuperCall,
                ));
                outcome.diagnostics.push(Diagnostic::resolution_warning(format!(
                    "super call in {}.{} found no ancestor definition",
                    draft.caller_owner, draft.caller_name
                )));
            }
        }
    }

    /// Bare and `self.` call targets: the calling context's own
    /// namespace first, then the method resolution order.
    fn resolve_in_context(&self, draft: &CallDraft, caller: SymbolId, outcome: &mut XrefOutcome) {
        let mut target = self
            .index
            .method_on(&draft.caller_owner, &draft.target, draft.caller_scope);
        if target.is_none() {
            if let Some(owner) = self.index.type_at(&draft.caller_owner) {
                target = self.mro.resolve(owner).order.iter().find_map(|&link| {
                    let owner_fqname = self.index.fqname_of(link)?;
                    self.index
                        .method_on(owner_fqname, &draft.target, draft.caller_scope)
                });
            }
        }
        if target.is_none() && draft.kind == CallEdgeKind::Ordinary {
            target = self.heuristic.unique_method(&draft.target);
        }
        match target {
            Some(to) => outcome.calls.push(CallEdge::new(caller, to, draft.kind)),
            None => {
                outcome
                    .unresolved
                    .push(UnresolvedEdge::call(caller, draft.target.as_str(), draft.kind));
                outcome.diagnostics.push(Diagnostic::resolution_warning(format!(
                    "unresolved call to {} from {}.{}",
                    draft.target, draft.caller_owner, draft.caller_name
                )));
            }
        }
    }

    /// `Receiver.method` with a capitalized receiver: resolve the
    /// receiver as a type (which also yields a constant reference),
    /// then the method on its class side.
    fn resolve_class_method(&self, draft: &CallDraft, caller: SymbolId, outcome: &mut XrefOutcome) {
        let receiver = draft.receiver.as_deref().unwrap_or_default();
        let Some(receiver_type) = self
            .index
            .resolve_type_outward(receiver, &draft.caller_owner)
        else {
            outcome.unresolved.push(UnresolvedEdge::call(
                caller,
                format!("{receiver}.{}", draft.target),
                CallEdgeKind::ClassMethodCall,
            ));
            outcome.diagnostics.push(Diagnostic::resolution_warning(format!(
                "unresolved receiver {receiver} in {}.{}",
                draft.caller_owner, draft.caller_name
            )));
            return;
        };
        outcome.constant_refs.push((caller, receiver_type));

        let receiver_fqname = self.index.fqname_of(receiver_type).unwrap_or_default();
        let target = self
            .index
            .method_on(receiver_fqname, &draft.target, ReceiverScope::Class)
            .or_else(|| {
                // Modules contribute class-side methods as plain
                // definitions pulled in via `extend`.
                self.index
                    .method_on(receiver_fqname, &draft.target, ReceiverScope::Instance)
            });
        match target {
            Some(to) => outcome
                .calls
                .push(CallEdge::new(caller, to, CallEdgeKind::ClassMethodCall)),
            None => {
                outcome.unresolved.push(UnresolvedEdge::call(
                    caller,
                    format!("{receiver}.{}", draft.target),
                    CallEdgeKind::ClassMethodCall,
                ));
                outcome.diagnostics.push(Diagnostic::resolution_warning(format!(
                    "unresolved class method {}.{} called from {}.{}",
                    receiver, draft.target, draft.caller_owner, draft.caller_name
                )));
            }
        }
    }

    /// Calls on a lowercase receiver have no structural type to search;
    /// only the text heuristic applies.
    fn resolve_by_heuristic(&self, draft: &CallDraft, caller: SymbolId, outcome: &mut XrefOutcome) {
        match self.heuristic.unique_method(&draft.target) {
            Some(to) => outcome
                .calls
                .push(CallEdge::new(caller, to, CallEdgeKind::Ordinary)),
            None => {
                outcome.unresolved.push(UnresolvedEdge::call(
                    caller,
                    draft.target.as_str(),
                    CallEdgeKind::Ordinary,
                ));
                outcome.diagnostics.push(Diagnostic::resolution_warning(format!(
                    "unresolved call to {} on receiver {} from {}.{}",
                    draft.target,
                    draft.receiver.as_deref().unwrap_or_default(),
                    draft.caller_owner,
                    draft.caller_name
                )));
            }
        }
    }

    /// A constant reference resolves to the class or module it names,
    /// or to the owner that defines it as an owned constant.
    fn resolve_constant_ref(&self, draft: &CallDraft, caller: SymbolId, outcome: &mut XrefOutcome) {
        if let Some(target) = self
            .index
            .resolve_type_outward(&draft.target, &draft.caller_owner)
        {
            outcome.constant_refs.push((caller, target));
            return;
        }
        if self.index.owns_constant(&draft.caller_owner, &draft.target) {
            if let Some(owner) = self.index.type_at(&draft.caller_owner) {
                outcome.constant_refs.push((caller, owner));
                return;
            }
        }
        outcome.unresolved.push(UnresolvedEdge::new(
            GraphKind::ConstantRef,
            caller,
            draft.target.as_str(),
        ));
        outcome.diagnostics.push(Diagnostic::resolution_warning(format!(
            "unresolved constant {} referenced from {}.{}",
            draft.target, draft.caller_owner, draft.caller_name
        )));
    }

    /// Materialize edges for alias methods: alias -> aliased target on
    /// the same owner.
    pub fn resolve_aliases(&self) -> XrefOutcome {
        let mut outcome = XrefOutcome::default();
        for alias in self.index.aliased_methods() {
            let target_name = alias.aliased_from.as_deref().unwrap_or_default();
            let target = self
                .index
                .method_on(&alias.owner, target_name, alias.receiver_scope)
                .filter(|&id| id != alias.symbol_id);
            match target {
                Some(to) => outcome
                    .calls
                    .push(CallEdge::new(alias.symbol_id, to, CallEdgeKind::Ordinary)),
                None => {
                    outcome.unresolved.push(UnresolvedEdge::call(
                        alias.symbol_id,
                        target_name,
                        CallEdgeKind::Ordinary,
                    ));
                    outcome.diagnostics.push(Diagnostic::resolution_warning(format!(
                        "alias {} points at undefined method {}",
                        alias.fqname, target_name
                    )));
                }
            }
        }
        outcome
    }
}
