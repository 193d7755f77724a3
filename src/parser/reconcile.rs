use crate::db::PmRecord;
use crate::error::ExtractionError;

use super::biography::{LifeDates, ParsedBiography};

/// One parsed biography → one typed record. Age at death is computed only
/// when a death year is present, never against a placeholder.
pub fn to_record(bio: &ParsedBiography) -> Result<PmRecord, ExtractionError> {
    let (birth_year, death_year) = match &bio.dates {
        LifeDates::Range { birth, death } => (parse_year(birth)?, Some(parse_year(death)?)),
        LifeDates::Living { birth } => (parse_year(birth)?, None),
    };

    Ok(PmRecord {
        name: bio.name.clone(),
        birth_year,
        death_year,
        age_at_death: death_year.map(|d| d - birth_year),
    })
}

// Guarded even though the upstream regex only captures digits
fn parse_year(s: &str) -> Result<i32, ExtractionError> {
    s.parse::<i32>()
        .map_err(|_| ExtractionError::BadYear(s.to_string()))
}

/// Full-field dedup preserving first-appearance order. Collapses prime
/// ministers who served non-consecutive terms and appear once per term in
/// the source table. Idempotent.
pub fn dedup_records(records: Vec<PmRecord>) -> Vec<PmRecord> {
    let mut out: Vec<PmRecord> = Vec::with_capacity(records.len());
    for record in records {
        if !out.contains(&record) {
            out.push(record);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(name: &str, birth: &str, death: &str) -> ParsedBiography {
        ParsedBiography {
            name: name.into(),
            dates: LifeDates::Range {
                birth: birth.into(),
                death: death.into(),
            },
        }
    }

    #[test]
    fn age_from_range() {
        let r = to_record(&range("John Smith", "1900", "1980")).unwrap();
        assert_eq!(r.birth_year, 1900);
        assert_eq!(r.death_year, Some(1980));
        assert_eq!(r.age_at_death, Some(80));
    }

    #[test]
    fn living_has_no_age() {
        let bio = ParsedBiography {
            name: "Jane Doe".into(),
            dates: LifeDates::Living {
                birth: "1975".into(),
            },
        };
        let r = to_record(&bio).unwrap();
        assert_eq!(r.birth_year, 1975);
        assert_eq!(r.death_year, None);
        assert_eq!(r.age_at_death, None);
    }

    #[test]
    fn bad_digits_rejected() {
        let err = to_record(&range("X", "19OO", "1980")).unwrap_err();
        assert_eq!(err, ExtractionError::BadYear("19OO".into()));
    }

    #[test]
    fn multi_term_pm_collapses() {
        let a = to_record(&range("Alfred Deakin", "1856", "1919")).unwrap();
        let b = a.clone();
        let out = dedup_records(vec![a.clone(), b]);
        assert_eq!(out, vec![a]);
    }

    #[test]
    fn dedup_is_idempotent() {
        let records = vec![
            to_record(&range("A", "1850", "1920")).unwrap(),
            to_record(&range("B", "1860", "1930")).unwrap(),
            to_record(&range("A", "1850", "1920")).unwrap(),
        ];
        let once = dedup_records(records);
        let twice = dedup_records(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn same_name_different_years_kept() {
        let out = dedup_records(vec![
            to_record(&range("John Smith", "1850", "1920")).unwrap(),
            to_record(&range("John Smith", "1900", "1980")).unwrap(),
        ]);
        assert_eq!(out.len(), 2);
    }
}
