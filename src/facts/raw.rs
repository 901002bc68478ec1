//! The raw fact record and its kind-specific payloads.

use std::str::FromStr;

use smol_str::SmolStr;

use crate::base::{EntityKind, ReceiverScope, SourceLocation};
use crate::diagnostics::TagParseError;
use crate::facts::Origin;

/// What a fact describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "lowercase"))]
pub enum FactKind {
    Class,
    Module,
    Method,
    Attribute,
    Constant,
    Mixin,
    Call,
    Alias,
}

impl FactKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FactKind::Class => "class",
            FactKind::Module => "module",
            FactKind::Method => "method",
            FactKind::Attribute => "attribute",
            FactKind::Constant => "constant",
            FactKind::Mixin => "mixin",
            FactKind::Call => "call",
            FactKind::Alias => "alias",
        }
    }
}

impl FromStr for FactKind {
    type Err = TagParseError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "class" => Ok(FactKind::Class),
            "module" => Ok(FactKind::Module),
            "method" => Ok(FactKind::Method),
            "attribute" => Ok(FactKind::Attribute),
            "constant" => Ok(FactKind::Constant),
            "mixin" => Ok(FactKind::Mixin),
            "call" => Ok(FactKind::Call),
            "alias" => Ok(FactKind::Alias),
            other => Err(TagParseError::UnknownFactKind(other.to_string())),
        }
    }
}

/// Method visibility. Ordered so that `max` picks the most restrictive
/// value (private > protected > public).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "lowercase"))]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

impl FromStr for Visibility {
    type Err = TagParseError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "public" => Ok(Visibility::Public),
            "protected" => Ok(Visibility::Protected),
            "private" => Ok(Visibility::Private),
            other => Err(TagParseError::UnknownVisibility(other.to_string())),
        }
    }
}

/// How a parameter binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "lowercase"))]
pub enum ParamKind {
    /// Required positional.
    Required,
    /// Optional positional (has a default).
    Optional,
    /// Variadic rest parameter.
    Rest,
    /// Keyword-only.
    Keyword,
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct RawParam {
    pub kind: ParamKind,
    pub name: SmolStr,
}

impl RawParam {
    pub fn new(kind: ParamKind, name: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn required(name: impl Into<SmolStr>) -> Self {
        Self::new(ParamKind::Required, name)
    }

    pub fn optional(name: impl Into<SmolStr>) -> Self {
        Self::new(ParamKind::Optional, name)
    }

    pub fn rest(name: impl Into<SmolStr>) -> Self {
        Self::new(ParamKind::Rest, name)
    }

    pub fn keyword(name: impl Into<SmolStr>) -> Self {
        Self::new(ParamKind::Keyword, name)
    }
}

/// The relation a mixin establishes on its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "lowercase"))]
pub enum MixinKind {
    Include,
    Extend,
    Prepend,
}

impl MixinKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MixinKind::Include => "include",
            MixinKind::Extend => "extend",
            MixinKind::Prepend => "prepend",
        }
    }
}

impl FromStr for MixinKind {
    type Err = TagParseError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "include" => Ok(MixinKind::Include),
            "extend" => Ok(MixinKind::Extend),
            "prepend" => Ok(MixinKind::Prepend),
            other => Err(TagParseError::UnknownMixinRelation(other.to_string())),
        }
    }
}

/// What an attribute declaration generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "lowercase"))]
pub enum AccessMode {
    Read,
    Write,
    ReadWrite,
}

impl AccessMode {
    pub fn generates_reader(self) -> bool {
        matches!(self, AccessMode::Read | AccessMode::ReadWrite)
    }

    pub fn generates_writer(self) -> bool {
        matches!(self, AccessMode::Write | AccessMode::ReadWrite)
    }
}

/// Kind-specific payload of a raw fact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "snake_case"))]
pub enum FactPayload {
    /// Class or module definition. `kind_tag`, when present, overrides
    /// the fact kind (runtime reflection may know better than the tag
    /// the adapter guessed).
    Type {
        superclass: Option<String>,
        kind_tag: Option<EntityKind>,
    },
    /// Method definition on the owner named by `namespace` + `name`.
    Method {
        params: Vec<RawParam>,
        visibility: Option<Visibility>,
        receiver_scope: ReceiverScope,
    },
    /// Attribute declaration; expands to accessor methods.
    Attribute {
        access: AccessMode,
        visibility: Option<Visibility>,
    },
    /// Constant definition owned by `namespace`.
    Constant,
    /// Mixin applied to the owner named by `namespace` + `name`.
    Mixin { relation: MixinKind, target: String },
    /// Call site inside the method named by `namespace` + `name`.
    /// `operand` is the raw call-target text (`super`, `self.validate`,
    /// `User.find`, `save`, `MAX_RETRIES`).
    Call {
        operand: String,
        caller_scope: ReceiverScope,
    },
    /// Alias of an existing method on the same owner.
    Alias { target: SmolStr },
}

/// One observation from one source. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct RawSymbolFact {
    pub kind: FactKind,
    pub name: SmolStr,
    /// Dotted enclosing namespace; `None` for top-level definitions.
    pub namespace: Option<String>,
    pub payload: FactPayload,
    pub origin: Origin,
    pub location: Option<SourceLocation>,
}

impl RawSymbolFact {
    /// The enclosing namespace, or the empty string at top level.
    pub fn namespace_str(&self) -> &str {
        self.namespace.as_deref().unwrap_or("")
    }

    /// A class definition fact.
    pub fn class(name: impl Into<SmolStr>, namespace: Option<&str>, origin: Origin) -> Self {
        Self {
            kind: FactKind::Class,
            name: name.into(),
            namespace: namespace.map(str::to_string),
            payload: FactPayload::Type {
                superclass: None,
                kind_tag: None,
            },
            origin,
            location: None,
        }
    }

    /// A module definition fact.
    pub fn module(name: impl Into<SmolStr>, namespace: Option<&str>, origin: Origin) -> Self {
        Self {
            kind: FactKind::Module,
            name: name.into(),
            namespace: namespace.map(str::to_string),
            payload: FactPayload::Type {
                superclass: None,
                kind_tag: Some(EntityKind::Module),
            },
            origin,
            location: None,
        }
    }

    /// A method definition fact with an instance receiver.
    pub fn method(
        name: impl Into<SmolStr>,
        namespace: Option<&str>,
        params: Vec<RawParam>,
        origin: Origin,
    ) -> Self {
        Self {
            kind: FactKind::Method,
            name: name.into(),
            namespace: namespace.map(str::to_string),
            payload: FactPayload::Method {
                params,
                visibility: None,
                receiver_scope: ReceiverScope::Instance,
            },
            origin,
            location: None,
        }
    }

    /// A mixin fact applied to the owner `namespace`.`name`.
    pub fn mixin(
        owner_name: impl Into<SmolStr>,
        namespace: Option<&str>,
        relation: MixinKind,
        target: impl Into<String>,
    ) -> Self {
        Self {
            kind: FactKind::Mixin,
            name: owner_name.into(),
            namespace: namespace.map(str::to_string),
            payload: FactPayload::Mixin {
                relation,
                target: target.into(),
            },
            origin: Origin::StaticParse,
            location: None,
        }
    }

    /// A call fact observed inside the method `namespace`.`name`.
    pub fn call(
        caller_name: impl Into<SmolStr>,
        caller_namespace: &str,
        operand: impl Into<String>,
    ) -> Self {
        Self {
            kind: FactKind::Call,
            name: caller_name.into(),
            namespace: Some(caller_namespace.to_string()),
            payload: FactPayload::Call {
                operand: operand.into(),
                caller_scope: ReceiverScope::Instance,
            },
            origin: Origin::StaticParse,
            location: None,
        }
    }

    /// Builder-style helpers used by adapters and tests.
    pub fn with_superclass(mut self, superclass: impl Into<String>) -> Self {
        if let FactPayload::Type { superclass: slot, .. } = &mut self.payload {
            *slot = Some(superclass.into());
        }
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        match &mut self.payload {
            FactPayload::Method { visibility: slot, .. }
            | FactPayload::Attribute { visibility: slot, .. } => *slot = Some(visibility),
            _ => {}
        }
        self
    }

    pub fn with_receiver_scope(mut self, scope: ReceiverScope) -> Self {
        match &mut self.payload {
            FactPayload::Method { receiver_scope, .. } => *receiver_scope = scope,
            FactPayload::Call { caller_scope, .. } => *caller_scope = scope,
            _ => {}
        }
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}
