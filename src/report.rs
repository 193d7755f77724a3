use anyhow::Result;
use chrono::Datelike;

use crate::db::PmRecord;

/// Report table: Name, Birth year, Death year, Age at death.
pub fn print_table(records: &[PmRecord]) {
    if records.is_empty() {
        println!("No records. Run 'process' first.");
        return;
    }

    println!(
        "{:>3} | {:<28} | {:>5} | {:>5} | {:>4}",
        "#", "Prime Minister", "Born", "Died", "Age"
    );
    println!("{}", "-".repeat(58));

    for (i, r) in records.iter().enumerate() {
        let died = r
            .death_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "-".into());
        let age = r
            .age_at_death
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "{:>3} | {:<28} | {:>5} | {:>5} | {:>4}",
            i + 1,
            truncate(&r.name, 28),
            r.birth_year,
            died,
            age
        );
    }

    let living = records.iter().filter(|r| r.death_year.is_none()).count();
    println!("\n{} prime ministers ({} living)", records.len(), living);
}

/// Lifespan timeline: one horizontal segment per person, birth year to
/// death year for the deceased (#), birth year to the current year for the
/// living (= with an open end).
pub fn print_chart(records: &[PmRecord], width: usize) {
    if records.is_empty() {
        println!("No records. Run 'process' first.");
        return;
    }
    let current_year = chrono::Utc::now().year();
    let end_of = |r: &PmRecord| r.death_year.unwrap_or(current_year);

    let min_year = records
        .iter()
        .map(|r| r.birth_year)
        .min()
        .unwrap_or(current_year);
    let max_year = records.iter().map(end_of).max().unwrap_or(current_year);
    let span = (max_year - min_year).max(1) as f64;
    let scale = |year: i32| ((year - min_year) as f64 / span * width as f64).round() as usize;

    for r in records {
        let start = scale(r.birth_year);
        // Reversed ranges reach the store unchecked; never underflow here
        let len = scale(end_of(r)).saturating_sub(start).max(1);
        let (glyph, label) = match r.death_year {
            Some(d) => ('#', format!("{}\u{2013}{}", r.birth_year, d)),
            None => ('=', format!("b. {}", r.birth_year)),
        };

        let mut bar = " ".repeat(start);
        bar.extend(std::iter::repeat(glyph).take(len));
        if r.death_year.is_none() {
            bar.push('>');
        }
        println!(
            "{:<22} {:<w$} {}",
            truncate(&r.name, 22),
            bar,
            label,
            w = width + 1
        );
    }

    // Year axis under the bars
    let left = min_year.to_string();
    let right = max_year.to_string();
    println!(
        "{:<22} {}{}{}",
        "",
        left,
        " ".repeat((width + 1).saturating_sub(left.len() + right.len())),
        right
    );
    println!("\n# deceased   => living (to {})", current_year);
}

/// Records as pretty JSON for downstream consumers.
pub fn to_json(records: &[PmRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
