//! Call-site normalization: classifying raw operand text into edge
//! drafts for the cross-reference resolver.

use smol_str::SmolStr;

use crate::base::{CallEdgeKind, ReceiverScope, SEPARATOR, SourceLocation};
use crate::diagnostics::Diagnostic;
use crate::facts::{FactPayload, RawSymbolFact};

/// A classified call observation awaiting resolution.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CallDraft {
    /// Fqname of the type whose method contains the call site.
    pub caller_owner: String,
    /// Simple name of the calling method.
    pub caller_name: SmolStr,
    pub caller_scope: ReceiverScope,
    pub kind: CallEdgeKind,
    /// Explicit receiver text, when the operand had one (`User` in
    /// `User.find`). Never set for `self` or `super` forms.
    pub receiver: Option<String>,
    /// The referenced name: a method name, or a constant path for
    /// constant references.
    pub target: SmolStr,
    /// True when the operand references a constant rather than calling
    /// a method.
    pub constant_ref: bool,
    pub location: Option<SourceLocation>,
}

/// Reject call facts without a caller or operand.
pub fn validate(fact: &RawSymbolFact) -> Result<(), Diagnostic> {
    if fact.name.trim().is_empty() {
        return Err(Diagnostic::validation(
            "call fact rejected: missing caller name",
            fact.location.clone(),
        ));
    }
    match &fact.payload {
        FactPayload::Call { operand, .. } if operand.trim().is_empty() => Err(
            Diagnostic::validation(
                format!("call fact in {} rejected: missing operand", fact.name),
                fact.location.clone(),
            ),
        ),
        _ => Ok(()),
    }
}

/// Strip an argument list and surrounding whitespace from an operand.
fn strip_arguments(operand: &str) -> &str {
    let operand = operand.trim();
    match operand.find('(') {
        Some(open) => operand[..open].trim_end(),
        None => operand,
    }
}

fn starts_uppercase(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_uppercase)
}

/// Classify a call fact from its raw operand text.
///
/// `super` dispatches up the ancestor chain; `self.x` is a self call;
/// `Receiver.x` with a capitalized receiver is a class-method call; a
/// capitalized bare operand (or dotted path ending in a capitalized
/// segment) is a constant reference; everything else is an ordinary
/// call.
pub fn normalize(fact: &RawSymbolFact) -> CallDraft {
    let (operand, caller_scope) = match &fact.payload {
        FactPayload::Call {
            operand,
            caller_scope,
        } => (operand.as_str(), *caller_scope),
        _ => ("", ReceiverScope::Instance),
    };
    let operand = strip_arguments(operand);

    let mut draft = CallDraft {
        caller_owner: fact.namespace_str().to_string(),
        caller_name: SmolStr::from(fact.name.trim()),
        caller_scope,
        kind: CallEdgeKind::Ordinary,
        receiver: None,
        target: SmolStr::default(),
        constant_ref: false,
        location: fact.location.clone(),
    };

    if operand == "super" {
        draft.kind = CallEdgeKind::SuperCall;
        draft.target = draft.caller_name.clone();
        return draft;
    }

    if let Some(rest) = operand.strip_prefix("self.") {
        draft.kind = CallEdgeKind::SelfCall;
        draft.target = SmolStr::from(rest);
        return draft;
    }

    if let Some((receiver, member)) = operand.rsplit_once(SEPARATOR) {
        if starts_uppercase(member) {
            // Dotted path ending in a constant: the whole operand is a
            // constant reference.
            draft.constant_ref = true;
            draft.target = SmolStr::from(operand);
        } else {
            draft.kind = if starts_uppercase(receiver.trim_start_matches(SEPARATOR)) {
                CallEdgeKind::ClassMethodCall
            } else {
                CallEdgeKind::Ordinary
            };
            draft.receiver = Some(receiver.to_string());
            draft.target = SmolStr::from(member);
        }
        return draft;
    }

    if starts_uppercase(operand) {
        draft.constant_ref = true;
    }
    draft.target = SmolStr::from(operand);
    draft
}
