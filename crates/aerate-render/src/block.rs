//! Paragraph and structural block rendering.
//!
//! Every renderer returns text starting at column zero; nesting is expressed
//! by the caller indenting the returned text.

use aerate_canonical::{Markup, PARAGRAPH, Structural};
use aerate_tree::TreeNode;

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::escape::collapse_whitespace;
use crate::inline::render_inline;
use crate::util::{hanging, indent};

/// Section tags Doxygen nests inside descriptions.
const SECTION_TAGS: &[&str] = &["sect1", "sect2", "sect3", "sect4", "internal"];

/// Admonition directives Sphinx provides for simple sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admonition {
    SeeAlso,
    Note,
    Warning,
    Attention,
    Hint,
    Todo,
}

impl Admonition {
    /// Admonition for a `simplesect` kind, if Sphinx has a dedicated one.
    #[must_use]
    pub fn from_kind(kind: &str) -> Option<Self> {
        Some(match kind {
            "see" => Self::SeeAlso,
            "note" => Self::Note,
            "warning" => Self::Warning,
            "attention" => Self::Attention,
            "remark" => Self::Hint,
            "todo" => Self::Todo,
            _ => return None,
        })
    }

    /// Directive name.
    #[must_use]
    pub fn directive(self) -> &'static str {
        match self {
            Self::SeeAlso => "seealso",
            Self::Note => "note",
            Self::Warning => "warning",
            Self::Attention => "attention",
            Self::Hint => "hint",
            Self::Todo => "todo",
        }
    }
}

/// Render each paragraph of `container` to one string.
///
/// Paragraphs that render to nothing (index entries only, say) are left out.
/// Doxygen sections inside the container contribute a rubric for their title
/// followed by their own paragraphs.
///
/// # Errors
///
/// Fails on content that is not canonical or has no reStructuredText form.
pub fn render_paragraphs(
    container: &TreeNode,
    ctx: &RenderContext<'_>,
) -> Result<Vec<String>, RenderError> {
    let mut blocks = Vec::new();
    push_paragraphs(container, ctx, &mut blocks)?;
    Ok(blocks)
}

/// Render the paragraphs of `container` separated by blank lines.
pub fn render_description(
    container: &TreeNode,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    Ok(render_paragraphs(container, ctx)?.join("\n\n"))
}

fn push_paragraphs(
    container: &TreeNode,
    ctx: &RenderContext<'_>,
    blocks: &mut Vec<String>,
) -> Result<(), RenderError> {
    for child in &container.children {
        match child.tag.as_str() {
            PARAGRAPH => {
                let block = render_para(child, ctx)?;
                if !block.is_empty() {
                    blocks.push(block);
                }
            }
            // Rendered by the owning section
            "title" if owns_title(container) => {}
            tag if SECTION_TAGS.contains(&tag) => {
                if let Some(title) = child.child("title") {
                    let title = render_inline(title, ctx)?;
                    if !title.is_empty() {
                        blocks.push(format!(".. rubric:: {title}"));
                    }
                }
                push_paragraphs(child, ctx, blocks)?;
            }
            _ => {
                return Err(RenderError::UnsupportedMarkup {
                    tag: child.tag.clone(),
                    parent: container.tag.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Render one canonical paragraph.
fn render_para(para: &TreeNode, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    let is_block = para
        .children
        .iter()
        .any(|child| matches!(Markup::classify(&child.tag), Some(Markup::Structural(_))));
    if !is_block {
        return render_inline(para, ctx);
    }
    if !para.text.trim().is_empty() {
        return Err(not_canonical(para));
    }

    let mut blocks = Vec::new();
    for child in &para.children {
        let structural = match Markup::classify(&child.tag) {
            Some(Markup::Structural(structural)) if child.tail.trim().is_empty() => structural,
            Some(_) => return Err(not_canonical(para)),
            None => {
                return Err(RenderError::UnsupportedMarkup {
                    tag: child.tag.clone(),
                    parent: para.tag.clone(),
                });
            }
        };
        if let Some(block) = render_block(structural, child, ctx)? {
            blocks.push(block);
        }
    }
    Ok(blocks.join("\n\n"))
}

/// Render one structural element. `None` means it produces no output.
fn render_block(
    structural: Structural,
    node: &TreeNode,
    ctx: &RenderContext<'_>,
) -> Result<Option<String>, RenderError> {
    let block = match structural {
        Structural::ItemizedList => render_list(node, "- ", ctx)?,
        Structural::OrderedList => render_list(node, "#. ", ctx)?,
        Structural::SimpleSect => Some(render_simplesect(node, ctx)?),
        Structural::ParameterList => render_parameterlist(node, ctx)?,
        Structural::ProgramListing => render_programlisting(node, ctx),
        Structural::Preformatted | Structural::Verbatim => render_literal(node, ctx),
        Structural::BlockQuote => non_empty(indent(&render_description(node, ctx)?, ctx.indent)),
        Structural::ParBlock | Structural::CopyDoc | Structural::Language => {
            non_empty(render_description(node, ctx)?)
        }
        Structural::VariableList => render_variablelist(node, ctx)?,
        Structural::Table => render_table(node, ctx)?,
        Structural::XrefSect => Some(render_xrefsect(node, ctx)?),
        Structural::Heading => render_heading(node, ctx)?,
        Structural::Title => {
            non_empty(render_inline(node, ctx)?).map(|title| format!(".. rubric:: {title}"))
        }
        Structural::HRuler => Some("----".to_owned()),
        Structural::IndexEntry | Structural::TocList => None,
        Structural::DotFile | Structural::MscFile | Structural::DiaFile => {
            return Err(RenderError::Unsupported {
                tag: node.tag.clone(),
            });
        }
    };
    Ok(block)
}

fn render_list(
    list: &TreeNode,
    marker: &str,
    ctx: &RenderContext<'_>,
) -> Result<Option<String>, RenderError> {
    let items = list
        .children_named("listitem")
        .map(|item| Ok(hanging(marker, &render_description(item, ctx)?, marker.len())))
        .collect::<Result<Vec<_>, RenderError>>()?;
    if items.is_empty() {
        return Ok(None);
    }

    let separator = if items.iter().any(|item| item.contains('\n')) {
        "\n\n"
    } else {
        "\n"
    };
    Ok(Some(items.join(separator)))
}

fn render_simplesect(sect: &TreeNode, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    let kind = sect.attr("kind").unwrap_or_default();
    let body = render_description(sect, ctx)?;

    if kind == "return" {
        return Ok(hanging(":returns: ", &body, ctx.indent));
    }
    if let Some(admonition) = Admonition::from_kind(kind) {
        return Ok(directive(admonition.directive(), "", &[], &body, ctx));
    }

    let title = match sect.child("title") {
        Some(title) => render_inline(title, ctx)?,
        None => simplesect_title(kind),
    };
    Ok(directive("admonition", &title, &[], &body, ctx))
}

/// Title for simple section kinds without a dedicated directive.
fn simplesect_title(kind: &str) -> String {
    let title = match kind {
        "pre" => "Precondition",
        "post" => "Postcondition",
        "invariant" => "Invariant",
        "author" => "Author",
        "authors" => "Authors",
        "version" => "Version",
        "since" => "Since",
        "date" => "Date",
        "copyright" => "Copyright",
        "rcs" => "RCS",
        "par" | "" => "Note",
        other => {
            let mut chars = other.chars();
            return chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            });
        }
    };
    title.to_owned()
}

fn render_parameterlist(
    list: &TreeNode,
    ctx: &RenderContext<'_>,
) -> Result<Option<String>, RenderError> {
    let field = match list.attr("kind").unwrap_or_default() {
        "retval" => "retval",
        "exception" => "raises",
        "templateparam" => "tparam",
        _ => "param",
    };

    let mut fields = Vec::new();
    for item in list.children_named("parameteritem") {
        let body = match item.child("parameterdescription") {
            Some(description) => render_description(description, ctx)?,
            None => String::new(),
        };
        let names = item
            .children_named("parameternamelist")
            .flat_map(|names| names.children_named("parametername"))
            .map(|name| collapse_whitespace(&name.text_content()))
            .filter(|name| !name.is_empty());
        for name in names {
            fields.push(hanging(&format!(":{field} {name}: "), &body, ctx.indent));
        }
    }
    Ok(non_empty(fields.join("\n")))
}

fn render_programlisting(listing: &TreeNode, ctx: &RenderContext<'_>) -> Option<String> {
    let language = listing
        .attr("filename")
        .and_then(|filename| filename.strip_prefix('.'))
        .filter(|extension| !extension.is_empty())
        .unwrap_or(ctx.language);

    let lines: Vec<String> = listing
        .children_named("codeline")
        .map(TreeNode::text_content)
        .collect();
    let code = lines.join("\n");
    let code = code.trim_end();
    if code.trim().is_empty() {
        return None;
    }
    Some(directive("code-block", language, &[], code, ctx))
}

fn render_literal(node: &TreeNode, ctx: &RenderContext<'_>) -> Option<String> {
    let content = node.text_content();
    let content = content.trim_matches('\n').trim_end();
    if content.trim().is_empty() {
        return None;
    }
    Some(format!("::\n\n{}", indent(content, ctx.indent)))
}

fn render_variablelist(
    list: &TreeNode,
    ctx: &RenderContext<'_>,
) -> Result<Option<String>, RenderError> {
    let mut entries = Vec::new();
    let mut term = None;
    for child in &list.children {
        match child.tag.as_str() {
            "varlistentry" => {
                term = match child.child("term") {
                    Some(node) => Some(render_inline(node, ctx)?),
                    None => Some(String::new()),
                };
            }
            "listitem" => {
                let body = render_description(child, ctx)?;
                let term = term.take().unwrap_or_default();
                entries.push(if body.is_empty() {
                    term
                } else {
                    format!("{term}\n{}", indent(&body, ctx.indent))
                });
            }
            _ => {
                return Err(RenderError::UnsupportedMarkup {
                    tag: child.tag.clone(),
                    parent: list.tag.clone(),
                });
            }
        }
    }
    Ok(non_empty(entries.join("\n\n")))
}

fn render_table(table: &TreeNode, ctx: &RenderContext<'_>) -> Result<Option<String>, RenderError> {
    let mut rows = Vec::new();
    let mut header_rows = 0;
    let mut in_header = true;

    for row in table.children_named("row") {
        let entries: Vec<&TreeNode> = row.children_named("entry").collect();
        let is_header = !entries.is_empty()
            && entries
                .iter()
                .all(|entry| entry.attr("thead") == Some("yes"));
        if in_header && is_header {
            header_rows += 1;
        } else {
            in_header = false;
        }

        let cells = entries
            .iter()
            .map(|entry| Ok(hanging("- ", &render_description(entry, ctx)?, 2)))
            .collect::<Result<Vec<_>, RenderError>>()?;
        rows.push(hanging("* ", &cells.join("\n"), 2));
    }
    if rows.is_empty() {
        return Ok(None);
    }

    let caption = match table.child("caption") {
        Some(caption) => render_inline(caption, ctx)?,
        None => String::new(),
    };
    let options = if header_rows > 0 {
        vec![format!(":header-rows: {header_rows}")]
    } else {
        Vec::new()
    };
    Ok(Some(directive(
        "list-table",
        &caption,
        &options,
        &rows.join("\n"),
        ctx,
    )))
}

fn render_xrefsect(sect: &TreeNode, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    let title = sect
        .child("xreftitle")
        .map(|title| collapse_whitespace(&title.text_content()))
        .unwrap_or_default();
    let body = match sect.child("xrefdescription") {
        Some(description) => render_description(description, ctx)?,
        None => String::new(),
    };
    Ok(directive("admonition", &title, &[], &body, ctx))
}

fn render_heading(
    heading: &TreeNode,
    ctx: &RenderContext<'_>,
) -> Result<Option<String>, RenderError> {
    let title = render_inline(heading, ctx)?;
    if title.is_empty() {
        return Ok(None);
    }
    let level = heading
        .attr("level")
        .and_then(|level| level.parse::<usize>().ok())
        .unwrap_or(1);
    let underline = match level {
        0 | 1 => '=',
        2 => '-',
        3 => '~',
        4 => '^',
        5 => '"',
        _ => '\'',
    };
    let width = title.chars().count();
    Ok(Some(format!(
        "{title}\n{}",
        std::iter::repeat_n(underline, width).collect::<String>()
    )))
}

/// `.. name:: argument`, then option lines, then an indented body.
fn directive(
    name: &str,
    argument: &str,
    options: &[String],
    body: &str,
    ctx: &RenderContext<'_>,
) -> String {
    let mut out = format!(".. {name}::");
    if !argument.is_empty() {
        out.push(' ');
        out.push_str(argument);
    }
    for option in options {
        out.push('\n');
        out.push_str(&indent(option, ctx.indent));
    }
    if !body.is_empty() {
        out.push_str("\n\n");
        out.push_str(&indent(body, ctx.indent));
    }
    out
}

/// Whether `container` renders its own `<title>` child.
fn owns_title(container: &TreeNode) -> bool {
    container.tag == "simplesect" || SECTION_TAGS.contains(&container.tag.as_str())
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

fn not_canonical(node: &TreeNode) -> RenderError {
    RenderError::NotCanonical {
        tag: node.tag.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerate_tree::XmlTreeParser;
    use pretty_assertions::assert_eq;

    fn description(body: &str) -> TreeNode {
        XmlTreeParser::new()
            .parse(&format!("<detaileddescription>{body}</detaileddescription>"))
            .unwrap()
    }

    fn render(body: &str) -> Vec<String> {
        render_paragraphs(&description(body), &RenderContext::new("c")).unwrap()
    }

    fn render_err(body: &str) -> RenderError {
        render_paragraphs(&description(body), &RenderContext::new("c")).unwrap_err()
    }

    #[test]
    fn test_one_string_per_paragraph() {
        assert_eq!(
            render("<para>First <bold>one</bold>.</para>\n<para>Second.</para>"),
            vec!["First **one**.", "Second."]
        );
    }

    #[test]
    fn test_itemized_list() {
        assert_eq!(
            render("<para><itemizedlist><listitem><para>a</para></listitem><listitem><para>b</para></listitem></itemizedlist></para>"),
            vec!["- a\n- b"]
        );
    }

    #[test]
    fn test_ordered_list_with_multiple_paragraphs() {
        assert_eq!(
            render("<para><orderedlist><listitem><para>a</para><para>more</para></listitem><listitem><para>b</para></listitem></orderedlist></para>"),
            vec!["#. a\n\n   more\n\n#. b"]
        );
    }

    #[test]
    fn test_nested_list() {
        assert_eq!(
            render("<para><itemizedlist><listitem><para>a</para><para><itemizedlist><listitem><para>b</para></listitem></itemizedlist></para></listitem></itemizedlist></para>"),
            vec!["- a\n\n  - b"]
        );
    }

    #[test]
    fn test_simplesect_admonitions() {
        assert_eq!(
            render(r#"<para><simplesect kind="note"><para>Careful.</para></simplesect></para>"#),
            vec![".. note::\n\n   Careful."]
        );
        assert_eq!(
            render(r#"<para><simplesect kind="see"><para>Other.</para></simplesect></para>"#),
            vec![".. seealso::\n\n   Other."]
        );
        assert_eq!(
            render(r#"<para><simplesect kind="remark"><para>Hm.</para></simplesect></para>"#),
            vec![".. hint::\n\n   Hm."]
        );
    }

    #[test]
    fn test_simplesect_return() {
        assert_eq!(
            render(r#"<para><simplesect kind="return"><para>The <computeroutput>i</computeroutput>th element.</para></simplesect></para>"#),
            vec![":returns: The ``i``\\th element."]
        );
    }

    #[test]
    fn test_simplesect_generic_and_par() {
        assert_eq!(
            render(r#"<para><simplesect kind="pre"><para>v is valid.</para></simplesect></para>"#),
            vec![".. admonition:: Precondition\n\n   v is valid."]
        );
        assert_eq!(
            render(r#"<para><simplesect kind="par"><title>Complexity</title><para>O(1).</para></simplesect></para>"#),
            vec![".. admonition:: Complexity\n\n   O(1)."]
        );
    }

    #[test]
    fn test_parameterlist() {
        let xml = r#"<para><parameterlist kind="param">
<parameteritem><parameternamelist><parametername direction="in">v</parametername></parameternamelist><parameterdescription><para>The vector.</para></parameterdescription></parameteritem>
<parameteritem><parameternamelist><parametername>i</parametername></parameternamelist><parameterdescription><para>Index.</para><para>Zero-based.</para></parameterdescription></parameteritem>
</parameterlist></para>"#;
        assert_eq!(
            render(xml),
            vec![":param v: The vector.\n:param i: Index.\n\n   Zero-based."]
        );
    }

    #[test]
    fn test_parameterlist_kinds() {
        assert_eq!(
            render(r#"<para><parameterlist kind="retval"><parameteritem><parameternamelist><parametername>NULL</parametername></parameternamelist><parameterdescription><para>Out of range.</para></parameterdescription></parameteritem></parameterlist></para>"#),
            vec![":retval NULL: Out of range."]
        );
        assert_eq!(
            render(r#"<para><parameterlist kind="exception"><parameteritem><parameternamelist><parametername>E</parametername></parameternamelist><parameterdescription/></parameteritem></parameterlist></para>"#),
            vec![":raises E:"]
        );
    }

    #[test]
    fn test_programlisting() {
        let xml = r#"<para><programlisting filename=".py"><codeline><highlight class="normal">x<sp/>=<sp/>1</highlight></codeline><codeline><highlight class="normal">print(x)</highlight></codeline></programlisting></para>"#;
        assert_eq!(render(xml), vec![".. code-block:: py\n\n   x = 1\n   print(x)"]);
    }

    #[test]
    fn test_programlisting_default_language() {
        let xml = r#"<para><programlisting><codeline><highlight class="normal">int<sp/>x;</highlight></codeline><codeline></codeline></programlisting></para>"#;
        assert_eq!(render(xml), vec![".. code-block:: c\n\n   int x;"]);
    }

    #[test]
    fn test_verbatim() {
        assert_eq!(
            render("<para><verbatim>\n  a *b*\n  c\n</verbatim></para>"),
            vec!["::\n\n     a *b*\n     c"]
        );
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(
            render("<para><blockquote><para>Quoted.</para></blockquote></para>"),
            vec!["   Quoted."]
        );
    }

    #[test]
    fn test_variablelist() {
        let xml = "<para><variablelist><varlistentry><term><bold>Term</bold></term></varlistentry><listitem><para>Meaning.</para></listitem></variablelist></para>";
        assert_eq!(render(xml), vec!["**Term**\n   Meaning."]);
    }

    #[test]
    fn test_table() {
        let xml = r#"<para><table rows="2" cols="2"><row><entry thead="yes"><para>Name</para></entry><entry thead="yes"><para>Value</para></entry></row><row><entry thead="no"><para>a</para></entry><entry thead="no"><para>1</para></entry></row></table></para>"#;
        assert_eq!(
            render(xml),
            vec![".. list-table::\n   :header-rows: 1\n\n   * - Name\n     - Value\n   * - a\n     - 1"]
        );
    }

    #[test]
    fn test_xrefsect() {
        let xml = r#"<para><xrefsect id="deprecated_1_deprecated000001"><xreftitle>Deprecated</xreftitle><xrefdescription><para>Use something else.</para></xrefdescription></xrefsect></para>"#;
        assert_eq!(
            render(xml),
            vec![".. admonition:: Deprecated\n\n   Use something else."]
        );
    }

    #[test]
    fn test_heading_title_and_ruler() {
        assert_eq!(
            render(r#"<para><heading level="2">Usage</heading></para><para><title>Notes</title></para><para><hruler/></para>"#),
            vec!["Usage\n-----", ".. rubric:: Notes", "----"]
        );
    }

    #[test]
    fn test_index_entries_render_nothing() {
        assert_eq!(
            render("<para><indexentry><primaryie>x</primaryie></indexentry></para><para>Text.</para>"),
            vec!["Text."]
        );
    }

    #[test]
    fn test_sections_flatten_to_rubrics() {
        assert_eq!(
            render("<para>Intro.</para><sect1 id=\"s\"><title>Details</title><para>More.</para></sect1>"),
            vec!["Intro.", ".. rubric:: Details", "More."]
        );
    }

    #[test]
    fn test_diagram_files_unsupported() {
        assert_eq!(
            render_err(r#"<para><dotfile name="graph.dot"/></para>"#),
            RenderError::Unsupported {
                tag: "dotfile".to_owned()
            }
        );
    }

    #[test]
    fn test_mixed_paragraph_not_canonical() {
        assert_eq!(
            render_err("<para>Intro<itemizedlist/></para>"),
            RenderError::NotCanonical {
                tag: "para".to_owned()
            }
        );
        assert_eq!(
            render_err("<para><itemizedlist/>tail text</para>"),
            RenderError::NotCanonical {
                tag: "para".to_owned()
            }
        );
    }

    #[test]
    fn test_unknown_container_child() {
        assert_eq!(
            render_err("<para>a</para><blink/>"),
            RenderError::UnsupportedMarkup {
                tag: "blink".to_owned(),
                parent: "detaileddescription".to_owned(),
            }
        );
    }

    #[test]
    fn test_custom_indent() {
        let tree = description(r#"<para><simplesect kind="warning"><para>Hot.</para></simplesect></para>"#);
        let ctx = RenderContext::new("c").with_indent(4);
        assert_eq!(
            render_paragraphs(&tree, &ctx).unwrap(),
            vec![".. warning::\n\n    Hot."]
        );
    }
}
