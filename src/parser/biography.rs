use std::sync::LazyLock;

use regex::Regex;

use crate::error::ExtractionError;

// Year range: four digits, en dash, four digits. Dash variants are
// normalized to the en dash before matching; the ASCII hyphen is not a
// year separator on this page (it occurs inside names and constituencies).
static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})\u{2013}(\d{4})").unwrap());
// Still living: the `b. <year>` marker
static LIVING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"b\.\s+(\d{4})").unwrap());

/// Life dates captured from the parenthesized fragment, as digit strings.
/// Conversion to integers is the reconciler's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifeDates {
    /// Birth and death from the year-range pattern.
    Range { birth: String, death: String },
    /// Only the `b. <year>` marker was present; no recorded death year.
    Living { birth: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBiography {
    pub name: String,
    pub dates: LifeDates,
}

/// Split one biographical cell ("Name(Birth–Death)Constituency") into the
/// name and its life dates.
///
/// The split is on the FIRST opening parenthesis; the remainder is searched
/// as-is, no balanced-parenthesis matching. The range and living searches
/// are independent; the living marker wins when both match.
pub fn parse_cell(text: &str) -> Result<ParsedBiography, ExtractionError> {
    let (name, remainder) = text
        .split_once('(')
        .ok_or_else(|| ExtractionError::MalformedEntry(text.to_string()))?;
    let remainder = normalize_dashes(remainder);

    let living = LIVING_RE.captures(&remainder);
    let range = RANGE_RE.captures(&remainder);

    let dates = if let Some(caps) = living {
        LifeDates::Living {
            birth: caps[1].to_string(),
        }
    } else if let Some(caps) = range {
        LifeDates::Range {
            birth: caps[1].to_string(),
            death: caps[2].to_string(),
        }
    } else {
        return Err(ExtractionError::NoYearFound(text.to_string()));
    };

    Ok(ParsedBiography {
        name: name.trim().to_string(),
        dates,
    })
}

/// Collapse dash-like glyphs (en/em dash, horizontal bar, figure dash,
/// minus sign) to the canonical en dash. The ASCII hyphen is deliberately
/// excluded.
fn normalize_dashes(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' | '\u{2015}' | '\u{2012}' | '\u{2212}' => '\u{2013}',
            _ => c,
        })
        .collect()
}
