//! Doxygen character elements.
//!
//! Doxygen writes some characters as empty elements (`<sp/>`, `<ndash/>`,
//! `<copy/>`) instead of text. They carry no markup meaning, so the parser
//! folds them into the surrounding text stream before any classification sees
//! the tree.

/// Map a character element name to its text.
pub(crate) fn character_element(name: &str) -> Option<&'static str> {
    Some(match name {
        // Whitespace
        "sp" => " ",
        "nonbreakablespace" => "\u{00a0}",
        "ensp" => "\u{2002}",
        "emsp" => "\u{2003}",
        "thinsp" => "\u{2009}",
        "zwnj" => "\u{200c}",
        "zwj" => "\u{200d}",

        // Dashes and quotes
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "sbquo" => "\u{201a}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "bdquo" => "\u{201e}",
        "lsaquo" => "\u{2039}",
        "rsaquo" => "\u{203a}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",

        // Punctuation
        "iexcl" => "\u{00a1}",
        "iquest" => "\u{00bf}",
        "hellip" => "\u{2026}",
        "bull" => "\u{2022}",
        "middot" => "\u{00b7}",
        "dagger" => "\u{2020}",
        "Dagger" => "\u{2021}",
        "permil" => "\u{2030}",
        "sect" => "\u{00a7}",
        "para" => "\u{00b6}",

        // Legal symbols
        "copy" => "\u{00a9}",
        "registered" => "\u{00ae}",
        "trademark" | "tm" => "\u{2122}",

        // Currency
        "cent" => "\u{00a2}",
        "pound" => "\u{00a3}",
        "curren" => "\u{00a4}",
        "yen" => "\u{00a5}",
        "euro" => "\u{20ac}",

        // Math symbols
        "plusmn" => "\u{00b1}",
        "times" => "\u{00d7}",
        "divide" => "\u{00f7}",
        "deg" => "\u{00b0}",
        "micro" => "\u{00b5}",
        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "ne" => "\u{2260}",
        "infin" => "\u{221e}",
        "sup1" => "\u{00b9}",
        "sup2" => "\u{00b2}",
        "sup3" => "\u{00b3}",
        "frac14" => "\u{00bc}",
        "frac12" => "\u{00bd}",
        "frac34" => "\u{00be}",

        // Arrows
        "larr" => "\u{2190}",
        "uarr" => "\u{2191}",
        "rarr" => "\u{2192}",
        "darr" => "\u{2193}",
        "harr" => "\u{2194}",

        _ => return None,
    })
}
