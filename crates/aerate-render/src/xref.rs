//! Cross-reference resolution for `<ref>` markup.
//!
//! Doxygen refers to documented entities by opaque ids (`refid`) plus a
//! `kindref` saying whether the id names a compound or a member. The index
//! maps those ids to the entity's kind and qualified name, which is all a
//! Sphinx domain role needs.

use std::collections::HashMap;

use aerate_tree::TreeNode;

/// Namespace of a reference id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    Compound,
    Member,
}

impl RefKind {
    /// Parse a `kindref` attribute value.
    #[must_use]
    pub fn from_kindref(kindref: &str) -> Option<Self> {
        match kindref {
            "compound" => Some(Self::Compound),
            "member" => Some(Self::Member),
            _ => None,
        }
    }
}

/// A resolved cross-reference target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Doxygen kind (`function`, `struct`, `define`, ...).
    pub kind: String,
    /// Name to reference in the output.
    pub name: String,
}

impl Target {
    #[must_use]
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Sphinx domain role for this target, if its kind has one.
    #[must_use]
    pub fn role(&self) -> Option<&'static str> {
        Some(match self.kind.as_str() {
            "function" => "func",
            "define" => "macro",
            "typedef" => "type",
            "struct" => "struct",
            "union" => "union",
            "enum" => "enum",
            "enumvalue" => "enumerator",
            "variable" => "var",
            _ => return None,
        })
    }
}

/// Read-only lookup of reference targets.
pub trait Resolve {
    fn resolve(&self, kind: RefKind, id: &str) -> Option<&Target>;
}

/// Reference targets of one Doxygen run.
///
/// Built once before rendering and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct XrefIndex {
    compounds: HashMap<String, Target>,
    members: HashMap<String, Target>,
}

impl XrefIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from the document element of Doxygen's `index.xml`.
    ///
    /// Entries without a `refid` are skipped. A member listed under several
    /// compounds (a file and a group, say) keeps its first entry.
    #[must_use]
    pub fn from_index(root: &TreeNode) -> Self {
        let mut index = Self::new();
        for compound in root.children_named("compound") {
            index.insert_entry(RefKind::Compound, compound);
            for member in compound.children_named("member") {
                index.insert_entry(RefKind::Member, member);
            }
        }
        tracing::debug!(
            compounds = index.compounds.len(),
            members = index.members.len(),
            "Built cross-reference index"
        );
        index
    }

    /// Add a target, keeping an existing entry for the same id.
    pub fn insert(&mut self, kind: RefKind, id: impl Into<String>, target: Target) {
        self.table_mut(kind).entry(id.into()).or_insert(target);
    }

    /// Number of known targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.compounds.len() + self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert_entry(&mut self, kind: RefKind, entry: &TreeNode) {
        let (Some(id), Some(entity_kind)) = (entry.attr("refid"), entry.attr("kind")) else {
            return;
        };
        let name = entry
            .child("name")
            .map(TreeNode::text_content)
            .unwrap_or_default();
        self.insert(kind, id, Target::new(entity_kind, name.trim()));
    }

    fn table_mut(&mut self, kind: RefKind) -> &mut HashMap<String, Target> {
        match kind {
            RefKind::Compound => &mut self.compounds,
            RefKind::Member => &mut self.members,
        }
    }
}

impl Resolve for XrefIndex {
    fn resolve(&self, kind: RefKind, id: &str) -> Option<&Target> {
        match kind {
            RefKind::Compound => self.compounds.get(id),
            RefKind::Member => self.members.get(id),
        }
    }
}
