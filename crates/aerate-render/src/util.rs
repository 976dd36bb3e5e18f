//! Text layout helpers.

/// Indent every non-empty line of `text` by `width` spaces.
pub fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Put `body` after `marker` on the first line and indent the rest by `width`.
///
/// An empty body yields the marker without trailing whitespace.
pub(crate) fn hanging(marker: &str, body: &str, width: usize) -> String {
    let Some((first, rest)) = body.split_once('\n') else {
        return format!("{marker}{body}").trim_end().to_owned();
    };
    format!("{marker}{first}\n{}", indent(rest, width))
}

/// Collapse runs of spaces into one.
pub(crate) fn squeeze_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == ' ' && out.ends_with(' ') {
            continue;
        }
        out.push(c);
    }
    out
}
