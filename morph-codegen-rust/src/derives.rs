//! Derive computation for generated types.
//!
//! A trait is derived for a model only when every type reachable from it
//! implements the trait. Recursive models are walked once per model: a model
//! already on the walk counts as supporting the trait.

use std::collections::HashSet;

use morphgen_meta::{ConstrainedGraph, ConstrainedId, ConstrainedKind};

/// Traits that are derived only when every reachable type allows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeriveTrait {
    Copy,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
}

impl DeriveTrait {
    pub const ALL: [DeriveTrait; 6] = [
        DeriveTrait::Copy,
        DeriveTrait::Eq,
        DeriveTrait::Hash,
        DeriveTrait::Ord,
        DeriveTrait::PartialEq,
        DeriveTrait::PartialOrd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeriveTrait::Copy => "Copy",
            DeriveTrait::Eq => "Eq",
            DeriveTrait::Hash => "Hash",
            DeriveTrait::Ord => "Ord",
            DeriveTrait::PartialEq => "PartialEq",
            DeriveTrait::PartialOrd => "PartialOrd",
        }
    }

    /// Traits that must hold as well for this one to be derivable.
    fn requires(&self) -> &'static [DeriveTrait] {
        match self {
            DeriveTrait::Eq => &[DeriveTrait::PartialEq],
            DeriveTrait::Ord => &[DeriveTrait::Eq, DeriveTrait::PartialOrd],
            _ => &[],
        }
    }

    /// Whether a single node, ignoring its children, can implement the trait.
    fn allows(&self, kind: &ConstrainedKind) -> bool {
        // enum values holding objects render as a map payload
        let map_payload = matches!(kind, ConstrainedKind::Enum { values }
            if values.iter().any(|v| v.original_value.is_object()));
        match self {
            DeriveTrait::Hash => !map_payload && !matches!(
                kind,
                ConstrainedKind::Dictionary { .. } | ConstrainedKind::Float | ConstrainedKind::Any
            ),
            DeriveTrait::Copy => !map_payload && !matches!(
                kind,
                ConstrainedKind::Any
                    | ConstrainedKind::Dictionary { .. }
                    | ConstrainedKind::Reference { .. }
                    | ConstrainedKind::String
                    | ConstrainedKind::Array { .. }
            ),
            DeriveTrait::PartialEq => !matches!(kind, ConstrainedKind::Any),
            DeriveTrait::Eq => !matches!(kind, ConstrainedKind::Float | ConstrainedKind::Any),
            DeriveTrait::PartialOrd => !map_payload && !matches!(
                kind,
                ConstrainedKind::Any | ConstrainedKind::Dictionary { .. }
            ),
            DeriveTrait::Ord => !map_payload && !matches!(
                kind,
                ConstrainedKind::Float | ConstrainedKind::Any | ConstrainedKind::Dictionary { .. }
            ),
        }
    }
}

/// Returns true if `model` and everything it reaches can derive `derive`.
pub fn can_derive(graph: &ConstrainedGraph, model: ConstrainedId, derive: DeriveTrait) -> bool {
    derive
        .requires()
        .iter()
        .all(|required| can_derive(graph, model, *required))
        && walk(graph, model, derive, &mut HashSet::new())
}

fn walk(
    graph: &ConstrainedGraph,
    id: ConstrainedId,
    derive: DeriveTrait,
    visited: &mut HashSet<ConstrainedId>,
) -> bool {
    if !visited.insert(id) {
        return true;
    }
    let kind = &graph[id].kind;
    if !derive.allows(kind) {
        return false;
    }
    match kind {
        ConstrainedKind::Reference { target } => walk(graph, *target, derive, visited),
        _ => kind
            .children()
            .into_iter()
            .all(|child| walk(graph, child, derive, visited)),
    }
}

/// Every derive of a generated type, sorted by name.
///
/// `Clone`, `Debug` and the serde traits are always present.
pub fn derives_for(graph: &ConstrainedGraph, model: ConstrainedId) -> Vec<&'static str> {
    let mut derives = vec!["Clone", "Debug", "Deserialize", "Serialize"];
    derives.extend(
        DeriveTrait::ALL
            .iter()
            .filter(|derive| can_derive(graph, model, **derive))
            .map(DeriveTrait::as_str),
    );
    derives.sort_unstable();
    derives
}

/// The `#[derive(...)]` line of a generated type.
pub fn render_derive(graph: &ConstrainedGraph, model: ConstrainedId) -> String {
    format!("#[derive({})]", derives_for(graph, model).join(", "))
}
