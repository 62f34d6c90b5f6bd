// src/core/sanitize.rs

/// An identifier is used verbatim as a file stem, so it must not name a path.
pub fn is_safe_identifier(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\', '\0'])
}

/// "SMITH JOHN &" → "SMITH, JOHN".
/// First token, comma, remaining tokens; every `&` dropped, then trimmed.
/// A lone token keeps its comma ("ACME" → "ACME,"). None only for a blank candidate.
pub fn format_owner_name(candidate: &str) -> Option<String> {
    let mut parts = candidate.split_whitespace();
    let first = parts.next()?;
    let rest: Vec<&str> = parts.collect();

    let formatted = join!(first, ", ", &rest.join(" ")).replace('&', "");
    Some(s!(formatted.trim()))
}

/// Split a multi-line owner cell and format each non-blank line.
pub fn format_owner_names<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(|l| l.as_ref())
        .filter(|l| !l.trim().is_empty())
        .filter_map(format_owner_name)
        .collect()
}

/// Render a list the way the owner column has always been written:
/// `['SMITH, JOHN', "O'NEIL, PAT"]`.
pub fn render_list(items: &[String]) -> String {
    let mut out = s!("[");
    for (i, item) in items.iter().enumerate() {
        if i > 0 { out.push_str(", "); }
        out.push_str(&quote_item(item));
    }
    out.push(']');
    out
}

fn quote_item(item: &str) -> String {
    // Double quotes only when that avoids escaping a single quote.
    let quote = if item.contains('\'') && !item.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(item.len() + 2);
    out.push(quote);
    for ch in item.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c == quote => { out.push('\\'); out.push(c); }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
