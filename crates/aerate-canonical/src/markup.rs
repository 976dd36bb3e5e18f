//! Closed markup vocabularies.
//!
//! Every tag that may appear as a child of a paragraph is either an inline
//! decoration or structural (block) content. Anything else is unsupported and
//! must be reported rather than guessed at.

use std::fmt;

/// Tag of paragraph-class nodes.
pub const PARAGRAPH: &str = "para";

/// Inline decorations: wrap a run of text. Canonical form is a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inline {
    Ulink,
    Bold,
    S,
    Strike,
    Underline,
    Emphasis,
    ComputerOutput,
    Subscript,
    Superscript,
    Center,
    Small,
    Del,
    Ins,
    HtmlOnly,
    ManOnly,
    XmlOnly,
    RtfOnly,
    LatexOnly,
    DocbookOnly,
    Image,
    Dot,
    Msc,
    PlantUml,
    Anchor,
    Formula,
    Ref,
    Emoji,
    LineBreak,
}

impl Inline {
    /// Classify a tag as inline markup.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "ulink" => Self::Ulink,
            "bold" => Self::Bold,
            "s" => Self::S,
            "strike" => Self::Strike,
            "underline" => Self::Underline,
            "emphasis" => Self::Emphasis,
            "computeroutput" => Self::ComputerOutput,
            "subscript" => Self::Subscript,
            "superscript" => Self::Superscript,
            "center" => Self::Center,
            "small" => Self::Small,
            "del" => Self::Del,
            "ins" => Self::Ins,
            "htmlonly" => Self::HtmlOnly,
            "manonly" => Self::ManOnly,
            "xmlonly" => Self::XmlOnly,
            "rtfonly" => Self::RtfOnly,
            "latexonly" => Self::LatexOnly,
            "docbookonly" => Self::DocbookOnly,
            "image" => Self::Image,
            "dot" => Self::Dot,
            "msc" => Self::Msc,
            "plantuml" => Self::PlantUml,
            "anchor" => Self::Anchor,
            "formula" => Self::Formula,
            "ref" => Self::Ref,
            "emoji" => Self::Emoji,
            "linebreak" => Self::LineBreak,
            _ => return None,
        })
    }

    /// Source tag name.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Ulink => "ulink",
            Self::Bold => "bold",
            Self::S => "s",
            Self::Strike => "strike",
            Self::Underline => "underline",
            Self::Emphasis => "emphasis",
            Self::ComputerOutput => "computeroutput",
            Self::Subscript => "subscript",
            Self::Superscript => "superscript",
            Self::Center => "center",
            Self::Small => "small",
            Self::Del => "del",
            Self::Ins => "ins",
            Self::HtmlOnly => "htmlonly",
            Self::ManOnly => "manonly",
            Self::XmlOnly => "xmlonly",
            Self::RtfOnly => "rtfonly",
            Self::LatexOnly => "latexonly",
            Self::DocbookOnly => "docbookonly",
            Self::Image => "image",
            Self::Dot => "dot",
            Self::Msc => "msc",
            Self::PlantUml => "plantuml",
            Self::Anchor => "anchor",
            Self::Formula => "formula",
            Self::Ref => "ref",
            Self::Emoji => "emoji",
            Self::LineBreak => "linebreak",
        }
    }
}

/// Structural markup: block-level content, never required to be a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Structural {
    HRuler,
    Preformatted,
    ProgramListing,
    Verbatim,
    IndexEntry,
    OrderedList,
    ItemizedList,
    SimpleSect,
    Title,
    VariableList,
    Table,
    Heading,
    DotFile,
    MscFile,
    DiaFile,
    TocList,
    Language,
    ParameterList,
    XrefSect,
    CopyDoc,
    BlockQuote,
    ParBlock,
}

impl Structural {
    /// Classify a tag as structural markup.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "hruler" => Self::HRuler,
            "preformatted" => Self::Preformatted,
            "programlisting" => Self::ProgramListing,
            "verbatim" => Self::Verbatim,
            "indexentry" => Self::IndexEntry,
            "orderedlist" => Self::OrderedList,
            "itemizedlist" => Self::ItemizedList,
            "simplesect" => Self::SimpleSect,
            "title" => Self::Title,
            "variablelist" => Self::VariableList,
            "table" => Self::Table,
            "heading" => Self::Heading,
            "dotfile" => Self::DotFile,
            "mscfile" => Self::MscFile,
            "diafile" => Self::DiaFile,
            "toclist" => Self::TocList,
            "language" => Self::Language,
            "parameterlist" => Self::ParameterList,
            "xrefsect" => Self::XrefSect,
            "copydoc" => Self::CopyDoc,
            "blockquote" => Self::BlockQuote,
            "parblock" => Self::ParBlock,
            _ => return None,
        })
    }

    /// Source tag name.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::HRuler => "hruler",
            Self::Preformatted => "preformatted",
            Self::ProgramListing => "programlisting",
            Self::Verbatim => "verbatim",
            Self::IndexEntry => "indexentry",
            Self::OrderedList => "orderedlist",
            Self::ItemizedList => "itemizedlist",
            Self::SimpleSect => "simplesect",
            Self::Title => "title",
            Self::VariableList => "variablelist",
            Self::Table => "table",
            Self::Heading => "heading",
            Self::DotFile => "dotfile",
            Self::MscFile => "mscfile",
            Self::DiaFile => "diafile",
            Self::TocList => "toclist",
            Self::Language => "language",
            Self::ParameterList => "parameterlist",
            Self::XrefSect => "xrefsect",
            Self::CopyDoc => "copydoc",
            Self::BlockQuote => "blockquote",
            Self::ParBlock => "parblock",
        }
    }
}

/// A classified paragraph child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Markup {
    Inline(Inline),
    Structural(Structural),
}

impl Markup {
    /// Classify a tag, returning `None` for tags outside both vocabularies.
    #[must_use]
    pub fn classify(tag: &str) -> Option<Self> {
        Inline::from_tag(tag)
            .map(Self::Inline)
            .or_else(|| Structural::from_tag(tag).map(Self::Structural))
    }

    /// Source tag name.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Inline(inline) => inline.tag(),
            Self::Structural(structural) => structural.tag(),
        }
    }

    /// True for inline decorations.
    #[must_use]
    pub fn is_inline(self) -> bool {
        matches!(self, Self::Inline(_))
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.tag())
    }
}
