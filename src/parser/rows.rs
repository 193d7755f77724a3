use std::collections::HashSet;

use crate::error::ExtractionError;
use crate::html::Grid;

/// Pull the biographical column out of the grid: order-preserving, with the
/// header-echo artifact row and exact duplicates removed.
pub fn extract_rows(grid: &Grid, column: &str) -> Result<Vec<String>, ExtractionError> {
    let idx = grid
        .headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| ExtractionError::MissingColumn(column.to_string()))?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for row in &grid.rows {
        // Rows shortened by rowspan carry no biographical cell
        let Some(cell) = row.get(idx) else { continue };
        let cell = cell.trim();
        // Exact-match filter for the header row re-rendered as a body row,
        // a known artifact of the source table
        if cell.is_empty() || cell == column {
            continue;
        }
        if seen.insert(cell.to_string()) {
            out.push(cell.to_string());
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COL: &str = "Name(Birth\u{2013}Death)Constituency";

    fn grid(rows: Vec<Vec<&str>>) -> Grid {
        Grid {
            headers: vec!["No.".into(), COL.into(), "Party".into()],
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        }
    }

    #[test]
    fn missing_column_is_an_error() {
        let g = Grid {
            headers: vec!["No.".into(), "Party".into()],
            rows: vec![],
        };
        assert_eq!(
            extract_rows(&g, COL),
            Err(ExtractionError::MissingColumn(COL.into()))
        );
    }

    #[test]
    fn header_echo_row_excluded() {
        let g = grid(vec![
            vec!["1", COL, "Protectionist"],
            vec!["2", "Edmund Barton(1849\u{2013}1920)MP for Hunter", "Protectionist"],
        ]);
        let rows = extract_rows(&g, COL).unwrap();
        assert_eq!(rows, vec!["Edmund Barton(1849\u{2013}1920)MP for Hunter"]);
    }

    #[test]
    fn duplicates_removed_order_preserved() {
        let g = grid(vec![
            vec!["1", "Alfred Deakin(1856\u{2013}1919)MP for Ballarat", "Protectionist"],
            vec!["2", "Chris Watson(1867\u{2013}1941)MP for Bland", "Labour"],
            vec!["3", "Alfred Deakin(1856\u{2013}1919)MP for Ballarat", "Protectionist"],
        ]);
        let rows = extract_rows(&g, COL).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("Alfred Deakin"));
        assert!(rows[1].starts_with("Chris Watson"));
    }

    #[test]
    fn short_rows_skipped() {
        let g = grid(vec![vec!["1"], vec!["2", "Jane Doe(b. 1975)MP for X", "Labor"]]);
        let rows = extract_rows(&g, COL).unwrap();
        assert_eq!(rows, vec!["Jane Doe(b. 1975)MP for X"]);
    }
}
