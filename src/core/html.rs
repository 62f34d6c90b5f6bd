// src/core/html.rs
// Thin helpers over `scraper` for the handful of shapes the specs need.

use scraper::{ElementRef, Node, Selector};

use crate::error::{Error, Result};

/// Compile a selector, keeping the source text in the error.
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Selector {
        selector: s!(css),
        reason: format!("{e:?}"),
    })
}

/// Selector for an element by id. Ids on these pages are plain `[A-Za-z0-9_]`.
pub fn id_selector(id: &str) -> Result<Selector> {
    selector(&join!("#", id))
}

/// Visible text with `<br>` turned into newlines, so callers can split on lines.
pub fn text_with_breaks(el: ElementRef<'_>) -> String {
    let mut out = s!();
    for node in el.descendants() {
        match node.value() {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) if e.name().eq_ignore_ascii_case("br") => out.push('\n'),
            _ => {}
        }
    }
    out
}

/// Text content with the ends trimmed; inner line breaks are kept. None if empty.
pub fn element_text(el: ElementRef<'_>) -> Option<String> {
    let raw: String = el.text().collect();
    let clean = raw.trim();
    (!clean.is_empty()).then(|| s!(clean))
}

/// Element siblings after `el` with the given tag name.
pub fn next_sibling_elements<'a>(
    el: ElementRef<'a>,
    tag: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .filter(move |e| e.value().name().eq_ignore_ascii_case(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn breaks_become_newlines() {
        let doc = Html::parse_fragment("<div>SMITH JOHN &amp;<br>SMITH JANE<br/></div>");
        let div = doc.select(&selector("div").unwrap()).next().unwrap();
        assert_eq!(text_with_breaks(div), "SMITH JOHN &\nSMITH JANE\n");
    }

    #[test]
    fn element_text_trims_ends_only() {
        let doc = Html::parse_fragment(
            "<span id=\"a\">  LOT 12\n  BLK  A </span><span id=\"b\">   </span>",
        );
        let a = doc.select(&id_selector("a").unwrap()).next().unwrap();
        let b = doc.select(&id_selector("b").unwrap()).next().unwrap();
        assert_eq!(element_text(a).as_deref(), Some("LOT 12\n  BLK  A"));
        assert_eq!(element_text(b), None);
    }

    #[test]
    fn siblings_filtered_by_tag() {
        let doc = Html::parse_document(
            "<table><tr class=h><th>x</th></tr><tr><td>1</td></tr><tr><td>2</td></tr></table>",
        );
        let head = doc.select(&selector("tr.h").unwrap()).next().unwrap();
        let rows: Vec<_> = next_sibling_elements(head, "tr").collect();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn bad_selector_reports_source() {
        match selector("td[") {
            Err(Error::Selector { selector, .. }) => assert_eq!(selector, "td["),
            other => panic!("expected selector error, got {other:?}"),
        }
    }
}
