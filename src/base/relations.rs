//! Relationship vocabulary shared by the edge model and the graph index.

/// Which typed graph an edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "snake_case"))]
pub enum GraphKind {
    Inheritance,
    Mixin,
    Call,
    ConstantRef,
}

impl GraphKind {
    pub const ALL: [GraphKind; 4] = [
        GraphKind::Inheritance,
        GraphKind::Mixin,
        GraphKind::Call,
        GraphKind::ConstantRef,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GraphKind::Inheritance => "inheritance",
            GraphKind::Mixin => "mixin",
            GraphKind::Call => "call",
            GraphKind::ConstantRef => "constant_ref",
        }
    }
}

/// How a call site reaches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "snake_case"))]
pub enum CallEdgeKind {
    /// Plain call, receiver unknown or implicit.
    Ordinary,
    /// Explicit call on `self`.
    SelfCall,
    /// `super` dispatch to the nearest ancestor definition.
    SuperCall,
    /// Call on a class object (`User.find`).
    ClassMethodCall,
}

impl CallEdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CallEdgeKind::Ordinary => "ordinary",
            CallEdgeKind::SelfCall => "self_call",
            CallEdgeKind::SuperCall => "super_call",
            CallEdgeKind::ClassMethodCall => "class_method_call",
        }
    }
}
