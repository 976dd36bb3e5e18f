//! Documented entities of a Doxygen compound file.
//!
//! A compound file holds one or more `compounddef` elements (a header, a
//! struct, a group). Each lists its members in `sectiondef` blocks; the
//! members with a description become [`Entity`] values owning a detached
//! description tree ready for canonicalization.

use aerate_tree::TreeNode;

const DESCRIPTION_TAGS: [&str; 2] = ["briefdescription", "detaileddescription"];

/// Member kinds rendered as Sphinx domain directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntityKind {
    Function,
    Define,
    Typedef,
    Variable,
}

impl EntityKind {
    /// Parse a `memberdef` `kind` attribute.
    pub(crate) fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "function" => Some(Self::Function),
            "define" => Some(Self::Define),
            "typedef" => Some(Self::Typedef),
            "variable" => Some(Self::Variable),
            _ => None,
        }
    }

    pub(crate) fn directive(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Define => "macro",
            Self::Typedef => "type",
            Self::Variable => "var",
        }
    }
}

/// One documented member.
#[derive(Debug, Clone)]
pub(crate) struct Entity {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) kind: EntityKind,
    /// Declaration shown in the directive line.
    pub(crate) signature: String,
    /// `root` node holding the member's brief and detailed descriptions.
    pub(crate) description: TreeNode,
}

/// A compound and its documented members in declaration order.
#[derive(Debug, Clone)]
pub(crate) struct Compound {
    pub(crate) name: String,
    pub(crate) kind: String,
    pub(crate) description: TreeNode,
    pub(crate) entities: Vec<Entity>,
}

/// Collect the compounds of a parsed compound file (`<doxygen>` element).
pub(crate) fn load_compounds(document: &TreeNode) -> Vec<Compound> {
    document
        .children_named("compounddef")
        .map(load_compound)
        .collect()
}

fn load_compound(def: &TreeNode) -> Compound {
    let entities = def
        .children_named("sectiondef")
        .flat_map(|section| section.children_named("memberdef"))
        .filter_map(load_entity)
        .collect::<Vec<_>>();

    let compound = Compound {
        name: child_text(def, "compoundname"),
        kind: def.attr("kind").unwrap_or_default().to_owned(),
        description: description_tree(def),
        entities,
    };
    tracing::debug!(
        compound = %compound.name,
        kind = %compound.kind,
        entities = compound.entities.len(),
        "Loaded compound"
    );
    compound
}

fn load_entity(member: &TreeNode) -> Option<Entity> {
    let kind = EntityKind::from_kind(member.attr("kind")?)?;
    let description = description_tree(member);
    if !is_documented(&description) {
        return None;
    }
    let name = child_text(member, "name");
    Some(Entity {
        id: member.attr("id").unwrap_or_default().to_owned(),
        signature: signature(member, kind, &name),
        name,
        kind,
        description,
    })
}

/// Copy the description elements of `owner` under a fresh `root` node.
fn description_tree(owner: &TreeNode) -> TreeNode {
    let children = DESCRIPTION_TAGS
        .iter()
        .filter_map(|tag| owner.child(tag))
        .map(|description| {
            let mut description = description.clone();
            description.tail.clear();
            description
        })
        .collect();
    TreeNode::new("root").with_children(children)
}

fn is_documented(description: &TreeNode) -> bool {
    description
        .children
        .iter()
        .any(|d| !d.children.is_empty() || !d.text.trim().is_empty())
}

fn signature(member: &TreeNode, kind: EntityKind, name: &str) -> String {
    match kind {
        EntityKind::Function | EntityKind::Variable => format!(
            "{}{}",
            child_text(member, "definition"),
            child_text(member, "argsstring")
        ),
        EntityKind::Typedef => {
            let definition = child_text(member, "definition");
            definition
                .strip_prefix("typedef ")
                .unwrap_or(&definition)
                .to_owned()
        }
        EntityKind::Define => {
            let mut params = member.children_named("param").peekable();
            if params.peek().is_none() {
                return name.to_owned();
            }
            let params = params
                .map(|param| child_text(param, "defname"))
                .filter(|p| !p.is_empty())
                .collect::<Vec<_>>();
            format!("{name}({})", params.join(", "))
        }
    }
}

/// Trimmed, whitespace-collapsed text of the first `tag` child.
fn child_text(node: &TreeNode, tag: &str) -> String {
    node.child(tag)
        .map(TreeNode::text_content)
        .unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerate_tree::XmlTreeParser;
    use pretty_assertions::assert_eq;

    const ACCESS_XML: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygen version="1.9.8">
  <compounddef id="access_8h" kind="file" language="C++">
    <compoundname>vector/access.h</compoundname>
    <sectiondef kind="define">
      <memberdef kind="define" id="access_8h_1a10">
        <name>VECTOR_AT</name>
        <param><defname>vector</defname></param>
        <param><defname>index</defname></param>
        <briefdescription><para>Element at <emphasis>index</emphasis>.</para></briefdescription>
        <detaileddescription></detaileddescription>
      </memberdef>
      <memberdef kind="define" id="access_8h_1a11">
        <name>VECTOR_NONE</name>
        <briefdescription><para>Sentinel.</para></briefdescription>
        <detaileddescription></detaileddescription>
      </memberdef>
    </sectiondef>
    <sectiondef kind="typedef">
      <memberdef kind="typedef" id="access_8h_1a20">
        <type>struct vector</type>
        <definition>typedef struct vector Vector</definition>
        <argsstring></argsstring>
        <name>Vector</name>
        <briefdescription><para>Vector handle.</para></briefdescription>
        <detaileddescription></detaileddescription>
      </memberdef>
    </sectiondef>
    <sectiondef kind="func">
      <memberdef kind="function" id="access_8h_1a2f">
        <type>void *</type>
        <definition>void * vector_get</definition>
        <argsstring>(Vector *vector, size_t index)</argsstring>
        <name>vector_get</name>
        <briefdescription>
<para>Get an element.</para>
        </briefdescription>
        <detaileddescription>
<para>Bounds are checked.<simplesect kind="return"><para>The element.</para></simplesect></para>
        </detaileddescription>
      </memberdef>
      <memberdef kind="function" id="access_8h_1a30">
        <definition>void vector_undocumented</definition>
        <argsstring>(void)</argsstring>
        <name>vector_undocumented</name>
        <briefdescription>
        </briefdescription>
        <detaileddescription>
        </detaileddescription>
      </memberdef>
    </sectiondef>
    <sectiondef kind="enum">
      <memberdef kind="enum" id="access_8h_1a40">
        <name>order</name>
        <briefdescription><para>Not rendered.</para></briefdescription>
      </memberdef>
    </sectiondef>
    <briefdescription><para>Element access.</para></briefdescription>
    <detaileddescription></detaileddescription>
  </compounddef>
</doxygen>"#;

    fn compound() -> Compound {
        let document = XmlTreeParser::new().parse(ACCESS_XML).unwrap();
        let mut compounds = load_compounds(&document);
        assert_eq!(compounds.len(), 1);
        compounds.remove(0)
    }

    #[test]
    fn test_compound_metadata() {
        let compound = compound();
        assert_eq!(compound.name, "vector/access.h");
        assert_eq!(compound.kind, "file");
        assert_eq!(compound.description.children.len(), 2);
    }

    #[test]
    fn test_documented_members_in_order() {
        let names = compound()
            .entities
            .into_iter()
            .map(|e| (e.name, e.kind))
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                ("VECTOR_AT".to_owned(), EntityKind::Define),
                ("VECTOR_NONE".to_owned(), EntityKind::Define),
                ("Vector".to_owned(), EntityKind::Typedef),
                ("vector_get".to_owned(), EntityKind::Function),
            ]
        );
    }

    #[test]
    fn test_signatures() {
        let signatures = compound()
            .entities
            .into_iter()
            .map(|e| e.signature)
            .collect::<Vec<_>>();
        assert_eq!(
            signatures,
            vec![
                "VECTOR_AT(vector, index)",
                "VECTOR_NONE",
                "struct vector Vector",
                "void * vector_get(Vector *vector, size_t index)",
            ]
        );
    }

    #[test]
    fn test_description_tree_is_detached() {
        let compound = compound();
        let entity = &compound.entities[3];
        assert_eq!(entity.id, "access_8h_1a2f");
        assert_eq!(entity.description.tag, "root");
        let tags = entity
            .description
            .children
            .iter()
            .map(|c| c.tag.as_str())
            .collect::<Vec<_>>();
        assert_eq!(tags, vec!["briefdescription", "detaileddescription"]);
        assert!(entity.description.children.iter().all(|c| c.tail.is_empty()));
    }

    #[test]
    fn test_directives() {
        assert_eq!(EntityKind::Function.directive(), "function");
        assert_eq!(EntityKind::Define.directive(), "macro");
        assert_eq!(EntityKind::Typedef.directive(), "type");
        assert_eq!(EntityKind::Variable.directive(), "var");
        assert_eq!(EntityKind::from_kind("enum"), None);
    }
}
