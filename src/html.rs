use std::sync::LazyLock;

use regex::Regex;

static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<table[^>]*class="[^"]*wikitable[^"]*"[^>]*>(.*?)</table>"#).unwrap()
});
static ROW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").unwrap());
static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<t[hd][^>]*>(.*?)</t[hd]>").unwrap());
static FOOTNOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[a-z0-9]{1,3}\]").unwrap());

/// One HTML table reduced to trimmed cell text: a header row plus body rows.
#[derive(Debug, Clone)]
pub struct Grid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// All wikitables on the page, in document order. Not a general HTML
/// engine: nested tables and rowspan expansion are out of scope.
pub fn wikitables(html: &str) -> Vec<Grid> {
    TABLE_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).and_then(|m| grid_from_table(m.as_str())))
        .collect()
}

fn grid_from_table(inner: &str) -> Option<Grid> {
    let mut trs = ROW_RE.captures_iter(inner);
    let headers = row_cells(trs.next()?.get(1)?.as_str());
    if headers.is_empty() {
        return None;
    }
    let rows: Vec<Vec<String>> = trs
        .filter_map(|caps| caps.get(1).map(|m| row_cells(m.as_str())))
        .collect();
    Some(Grid { headers, rows })
}

fn row_cells(tr: &str) -> Vec<String> {
    CELL_RE
        .captures_iter(tr)
        .filter_map(|caps| caps.get(1).map(|m| cell_text(m.as_str())))
        .collect()
}

fn cell_text(raw: &str) -> String {
    let stripped = strip_tags(raw);
    let decoded = decode_entities(&stripped);
    // Citation markers like [1] or [b] survive tag stripping
    let cleaned = FOOTNOTE_RE.replace_all(&decoded, "");
    normalize_ws(&cleaned)
}

/// Drop markup, keeping adjacent text runs adjacent: the <br> between the
/// name and the date fragment must not introduce a space.
fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

fn decode_entities(s: &str) -> String {
    s.replace("&#160;", " ")
        .replace("&nbsp;", " ")
        .replace("&#8211;", "\u{2013}")
        .replace("&ndash;", "\u{2013}")
        .replace("&#8212;", "\u{2014}")
        .replace("&mdash;", "\u{2014}")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
