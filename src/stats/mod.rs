//! Age statistics
//!
//! Computes the mean and median of the `age` column of a merged [`Dataset`]
//! and picks the representative median record: the first row, in dataset
//! order, whose age equals the median exactly. An interpolated median (even
//! number of ages, two different middle values) usually matches no row, in
//! which case no record is reported.
//!
//! # Example
//!
//! ```
//! use agestat::stats::{mean, median};
//!
//! assert_eq!(mean(&[30.0, 40.0]), Some(35.0));
//! assert_eq!(median(&[20.0, 30.0, 25.0]), Some(25.0));
//! assert_eq!(median(&[]), None);
//! ```

use crate::dataset::{Dataset, DatasetError, AGE_COLUMN, FIRST_NAME_COLUMN, LAST_NAME_COLUMN};
use serde::Serialize;

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median with linear interpolation between the two middle values
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Name of the record whose age equals the median
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedianRecord {
    pub fname: String,
    pub lname: String,
}

/// Statistics of one run
///
/// `average` and `median` are NaN when the dataset holds no ages at all.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeSummary {
    /// Number of rows with an age value
    pub count: usize,
    pub average: f64,
    pub median: f64,
    pub median_record: Option<MedianRecord>,
}

/// Compute the age statistics of a dataset
pub fn summarize(dataset: &Dataset) -> Result<AgeSummary, DatasetError> {
    let ages = dataset.numeric_column(AGE_COLUMN)?;
    let present: Vec<f64> = ages.iter().flatten().copied().collect();

    let average = mean(&present).unwrap_or(f64::NAN);
    let middle = median(&present).unwrap_or(f64::NAN);
    let median_record = find_median_record(dataset, &ages, middle)?;

    Ok(AgeSummary {
        count: present.len(),
        average,
        median: middle,
        median_record,
    })
}

/// First row whose age equals `target`
///
/// `ages` must be the age column of `dataset` in row order.
fn find_median_record(
    dataset: &Dataset,
    ages: &[Option<f64>],
    target: f64,
) -> Result<Option<MedianRecord>, DatasetError> {
    let Some(row) = dataset
        .rows()
        .zip(ages)
        .find(|(_, age)| **age == Some(target))
        .map(|(row, _)| row)
    else {
        return Ok(None);
    };

    let field = |column: &str| {
        row.get_or_empty(column)
            .map(str::to_string)
            .ok_or_else(|| DatasetError::MissingColumn {
                column: column.to_string(),
                source_name: row.source().to_string(),
            })
    };

    Ok(Some(MedianRecord {
        fname: field(FIRST_NAME_COLUMN)?,
        lname: field(LAST_NAME_COLUMN)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::RecordSet;

    fn people(source: &str, rows: &[(&str, &str, &str)]) -> RecordSet {
        RecordSet::new(
            source,
            vec!["fname".into(), "lname".into(), "age".into()],
            rows.iter()
                .map(|(f, l, a)| vec![f.to_string(), l.to_string(), a.to_string()])
                .collect(),
        )
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[42.0]), Some(42.0));
        assert_eq!(mean(&[20.0, 25.0, 30.0]), Some(25.0));
    }

    #[test]
    fn test_median_odd() {
        assert_eq!(median(&[30.0, 20.0, 25.0]), Some(25.0));
    }

    #[test]
    fn test_median_even_interpolates() {
        assert_eq!(median(&[40.0, 30.0]), Some(35.0));
        assert_eq!(median(&[1.0, 2.0, 3.0, 10.0]), Some(2.5));
    }

    #[test]
    fn test_summarize_odd_count_has_record() {
        let dataset: Dataset = vec![people(
            "a.csv",
            &[("Ann", "Lee", "20"), ("Bob", "Ray", "25"), ("Cy", "Fox", "30")],
        )]
        .into_iter()
        .collect();

        let summary = summarize(&dataset).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average, 25.0);
        assert_eq!(summary.median, 25.0);
        assert_eq!(
            summary.median_record,
            Some(MedianRecord {
                fname: "Bob".into(),
                lname: "Ray".into()
            })
        );
    }

    #[test]
    fn test_summarize_interpolated_median_has_no_record() {
        let dataset: Dataset = vec![people("a.csv", &[("Ann", "Lee", "30"), ("Bob", "Ray", "40")])]
            .into_iter()
            .collect();

        let summary = summarize(&dataset).unwrap();
        assert_eq!(summary.average, 35.0);
        assert_eq!(summary.median, 35.0);
        assert_eq!(summary.median_record, None);
    }

    #[test]
    fn test_summarize_even_count_with_matching_row() {
        let dataset: Dataset = vec![
            people("a.csv", &[("Ann", "Lee", "30"), ("Bob", "Ray", "35")]),
            people("b.csv", &[("Cy", "Fox", "35"), ("Di", "Orr", "40")]),
        ]
        .into_iter()
        .collect();

        let summary = summarize(&dataset).unwrap();
        assert_eq!(summary.median, 35.0);
        // First match in dataset order wins
        assert_eq!(summary.median_record.unwrap().fname, "Bob");
    }

    #[test]
    fn test_summarize_skips_missing_ages() {
        let dataset: Dataset = vec![people(
            "a.csv",
            &[("Ann", "Lee", ""), ("Bob", "Ray", "50"), ("Cy", "Fox", "60"), ("Di", "Orr", "70")],
        )]
        .into_iter()
        .collect();

        let summary = summarize(&dataset).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average, 60.0);
        assert_eq!(summary.median_record.unwrap().fname, "Cy");
    }

    #[test]
    fn test_summarize_skips_nan_and_na_ages() {
        let dataset: Dataset = vec![people(
            "a.csv",
            &[("Ann", "Lee", "20"), ("Nan", "Cell", "NaN"), ("Bob", "Ray", "25"), ("Na", "Cell", "NA"), ("Cy", "Fox", "30")],
        )]
        .into_iter()
        .collect();

        let summary = summarize(&dataset).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average, 25.0);
        assert_eq!(summary.median, 25.0);
        assert_eq!(summary.median_record.unwrap().fname, "Bob");
    }

    #[test]
    fn test_summarize_no_rows() {
        let dataset: Dataset = vec![people("a.csv", &[])].into_iter().collect();

        let summary = summarize(&dataset).unwrap();
        assert_eq!(summary.count, 0);
        assert!(summary.average.is_nan());
        assert!(summary.median.is_nan());
        assert_eq!(summary.median_record, None);
    }

    #[test]
    fn test_summarize_missing_age_column() {
        let no_age = RecordSet::new("a.csv", vec!["fname".into()], vec![vec!["Ann".into()]]);
        let dataset: Dataset = vec![no_age].into_iter().collect();

        assert!(matches!(
            summarize(&dataset),
            Err(DatasetError::MissingColumn { ref column, .. }) if column == "age"
        ));
    }

    #[test]
    fn test_summarize_short_row_on_match() {
        let short = RecordSet::new(
            "a.csv",
            vec!["fname".into(), "age".into(), "lname".into()],
            vec![vec!["Ann".into(), "33".into()]],
        );
        let dataset: Dataset = vec![short].into_iter().collect();

        let record = summarize(&dataset).unwrap().median_record.unwrap();
        assert_eq!(record.fname, "Ann");
        assert_eq!(record.lname, "");
    }

    #[test]
    fn test_summarize_missing_lname_on_match() {
        let no_lname = RecordSet::new(
            "a.csv",
            vec!["fname".into(), "age".into()],
            vec![vec!["Ann".into(), "33".into()]],
        );
        let dataset: Dataset = vec![no_lname].into_iter().collect();

        assert!(matches!(
            summarize(&dataset),
            Err(DatasetError::MissingColumn { ref column, .. }) if column == "lname"
        ));
    }
}
