//! Inline run rendering.
//!
//! Turns a node holding text and canonical inline leaves (a simple paragraph,
//! a heading, a list term) into one line of reStructuredText.

use aerate_canonical::{Inline, Markup};
use aerate_tree::TreeNode;

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::escape::{
    END_ESCAPE, END_ESCAPE_BEFORE_MARKUP, START_ESCAPE, collapse_whitespace, escape_text,
    needs_end_escape, needs_start_escape,
};
use crate::util::squeeze_spaces;
use crate::xref::RefKind;

/// How a decoration's content is written between its markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Content {
    /// Escaped like plain text.
    Escaped,
    /// Written verbatim.
    Literal,
    /// Verbatim with TeX math delimiters removed.
    Math,
}

/// Output form of one inline leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Decoration {
    /// Text between start and end markers.
    Marked {
        prefix: String,
        suffix: String,
        content: Content,
    },
    /// Text without markers.
    Plain,
    /// Nothing.
    Hidden,
}

impl Decoration {
    fn marked(prefix: impl Into<String>, suffix: impl Into<String>, content: Content) -> Self {
        Self::Marked {
            prefix: prefix.into(),
            suffix: suffix.into(),
            content,
        }
    }

    fn symmetric(marker: &str, content: Content) -> Self {
        Self::marked(marker, marker, content)
    }
}

/// What comes right after a decoration's end marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Follower {
    /// First character of plain text.
    Text(char),
    /// First character of the next decoration's text.
    Markup(char),
    /// End of the text block.
    End,
}

/// Render `node`'s text and inline children as one line.
///
/// Whitespace runs collapse to single spaces and the result is trimmed.
///
/// # Errors
///
/// Fails on children outside the inline vocabulary and on decorations that
/// are not leaves.
pub fn render_inline(node: &TreeNode, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    let mut out = escape_text(&node.text);

    for (index, child) in node.children.iter().enumerate() {
        let inline = match Markup::classify(&child.tag) {
            Some(Markup::Inline(inline)) if child.is_leaf() => inline,
            Some(_) => {
                return Err(RenderError::NotCanonical {
                    tag: child.tag.clone(),
                });
            }
            None => {
                return Err(RenderError::UnsupportedMarkup {
                    tag: child.tag.clone(),
                    parent: node.tag.clone(),
                });
            }
        };

        let tail = escape_text(&child.tail);
        let follower = follower_of(node, index, ctx);

        match decoration(inline, child, ctx) {
            Decoration::Marked {
                prefix,
                suffix,
                content,
            } => decorate(&mut out, &child.text, &prefix, &suffix, content, follower),
            Decoration::Plain => out.push_str(&escape_text(&child.text)),
            Decoration::Hidden => {}
        }
        out.push_str(&tail);
    }

    Ok(squeeze_spaces(out.trim()))
}

/// First output after the child at `index`: its tail, then whatever the
/// following siblings render. Hidden siblings contribute only their tails.
fn follower_of(node: &TreeNode, index: usize, ctx: &RenderContext<'_>) -> Follower {
    let Some(child) = node.children.get(index) else {
        return Follower::End;
    };
    if let Some(c) = escape_text(&child.tail).chars().next() {
        return Follower::Text(c);
    }

    for next in node.children.iter().skip(index + 1) {
        let Some(Markup::Inline(inline)) = Markup::classify(&next.tag) else {
            return Follower::End;
        };
        let first = match decoration(inline, next, ctx) {
            Decoration::Marked { .. } => next.text.chars().next().map(Follower::Markup),
            Decoration::Plain => escape_text(&next.text).chars().next().map(Follower::Text),
            Decoration::Hidden => None,
        };
        if let Some(follower) = first {
            return follower;
        }
        if let Some(c) = escape_text(&next.tail).chars().next() {
            return Follower::Text(c);
        }
    }
    Follower::End
}

/// Choose the output form for an inline leaf.
fn decoration(inline: Inline, node: &TreeNode, ctx: &RenderContext<'_>) -> Decoration {
    match inline {
        Inline::Bold => Decoration::symmetric("**", Content::Escaped),
        Inline::Emphasis => Decoration::symmetric("*", Content::Escaped),
        Inline::ComputerOutput => Decoration::symmetric("``", Content::Literal),
        Inline::Subscript => Decoration::marked(":sub:`", "`", Content::Escaped),
        Inline::Superscript => Decoration::marked(":sup:`", "`", Content::Escaped),
        Inline::Formula => Decoration::marked(":math:`", "`", Content::Math),
        Inline::Ulink => match node.attr("url") {
            Some(url) => Decoration::marked("`", format!(" <{url}>`__"), Content::Escaped),
            None => Decoration::Plain,
        },
        Inline::Ref => reference(node, ctx),
        Inline::S
        | Inline::Strike
        | Inline::Del
        | Inline::Underline
        | Inline::Ins
        | Inline::Center
        | Inline::Small
        | Inline::Emoji
        | Inline::LineBreak => Decoration::Plain,
        Inline::HtmlOnly
        | Inline::ManOnly
        | Inline::XmlOnly
        | Inline::RtfOnly
        | Inline::LatexOnly
        | Inline::DocbookOnly
        | Inline::Image
        | Inline::Dot
        | Inline::Msc
        | Inline::PlantUml
        | Inline::Anchor => Decoration::Hidden,
    }
}

/// Domain role for a resolvable reference, plain text otherwise.
fn reference(node: &TreeNode, ctx: &RenderContext<'_>) -> Decoration {
    let target = node
        .attr("kindref")
        .and_then(RefKind::from_kindref)
        .zip(node.attr("refid"))
        .and_then(|(kind, id)| ctx.resolve(kind, id));
    let Some((target, role)) = target.and_then(|target| Some((target, target.role()?))) else {
        tracing::trace!(refid = node.attr("refid"), "Unresolved reference");
        return Decoration::Plain;
    };

    let prefix = format!(":{}:{role}:`", ctx.domain);
    if collapse_whitespace(&node.text) == target.name {
        Decoration::marked(prefix, "`", Content::Literal)
    } else {
        Decoration::marked(prefix, format!(" <{}>`", target.name), Content::Escaped)
    }
}

/// Append `text` wrapped in markers, escaping against its neighbors.
///
/// Leading and trailing whitespace moves outside the markers. Whitespace-only
/// text is written without markers and, like all other whitespace, collapsed
/// to a single space rather than kept verbatim.
fn decorate(
    out: &mut String,
    text: &str,
    prefix: &str,
    suffix: &str,
    content: Content,
    follower: Follower,
) {
    let core = text.trim();
    if core.is_empty() {
        out.push_str(&escape_text(text));
        return;
    }
    if text.starts_with(char::is_whitespace) {
        out.push(' ');
    }
    if needs_start_escape(out.chars().next_back()) {
        out.push_str(START_ESCAPE);
    }

    out.push_str(prefix);
    match content {
        Content::Escaped => out.push_str(&escape_text(core)),
        Content::Literal => out.push_str(&collapse_whitespace(core)),
        Content::Math => out.push_str(&collapse_whitespace(strip_math_delimiters(core))),
    }
    out.push_str(suffix);

    if text.ends_with(char::is_whitespace) {
        out.push(' ');
        return;
    }
    match follower {
        Follower::Text(c) if needs_end_escape(Some(c)) => out.push_str(END_ESCAPE),
        Follower::Markup(c) if needs_end_escape(Some(c)) => out.push_str(END_ESCAPE_BEFORE_MARKUP),
        Follower::Text(_) | Follower::Markup(_) | Follower::End => {}
    }
}

/// Remove `$...$`, `\[...\]` or `\(...\)` around a formula.
fn strip_math_delimiters(formula: &str) -> &str {
    let stripped = formula
        .strip_prefix('$')
        .and_then(|f| f.strip_suffix('$'))
        .or_else(|| formula.strip_prefix("\\[").and_then(|f| f.strip_suffix("\\]")))
        .or_else(|| formula.strip_prefix("\\(").and_then(|f| f.strip_suffix("\\)")));
    stripped.map_or(formula, str::trim)
}
