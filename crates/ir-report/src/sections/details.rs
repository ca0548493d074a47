//! Detail table pages.

use crate::paginate::paginate;
use ir_common::{ColumnSet, InstallationRecord};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// One printed table page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailPage {
    /// 1-based page number.
    pub number: usize,
    /// Cell texts per row, aligned with the section's columns.
    pub rows: Vec<Vec<String>>,
}

impl DetailPage {
    /// Page heading.
    pub fn heading(&self) -> String {
        format!("Installation Details - Page {}", self.number)
    }

    /// Caption under the table.
    pub fn caption(&self, total_units: usize) -> String {
        format!(
            "Showing {} units on this page. Total units in report: {}",
            self.rows.len(),
            total_units
        )
    }
}

/// All detail pages sharing one column set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailsSection {
    /// Columns shown on every page.
    pub columns: ColumnSet,
    /// Pages in order.
    pub pages: Vec<DetailPage>,
    /// Consolidated record count.
    pub total_units: usize,
}

impl DetailsSection {
    /// Paginate records into table pages.
    ///
    /// Cells are resolved against `columns`; a record lacking a displayed key
    /// gets an empty cell.
    pub fn build(records: &[InstallationRecord], columns: ColumnSet, page_size: NonZeroUsize) -> Self {
        let pages = paginate(records, page_size)
            .into_iter()
            .enumerate()
            .map(|(idx, chunk)| DetailPage {
                number: idx + 1,
                rows: chunk.iter().map(|r| columns.row_cells(r)).collect(),
            })
            .collect();

        Self {
            columns,
            pages,
            total_units: records.len(),
        }
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<InstallationRecord> {
        (0..n)
            .map(|i| {
                InstallationRecord::new()
                    .with("Unit", format!("{}", 100 + i))
                    .with("Toilet", 1)
            })
            .collect()
    }

    fn page_size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_seventeen_records_two_pages() {
        let recs = records(17);
        let columns = ColumnSet::from_first_record(&recs, 8);
        let details = DetailsSection::build(&recs, columns, page_size(15));

        assert_eq!(details.page_count(), 2);
        assert_eq!(details.pages[0].rows.len(), 15);
        assert_eq!(details.pages[1].rows.len(), 2);
        assert_eq!(details.pages[1].heading(), "Installation Details - Page 2");
        assert_eq!(
            details.pages[1].caption(details.total_units),
            "Showing 2 units on this page. Total units in report: 17"
        );
    }

    #[test]
    fn test_no_records_no_pages() {
        let details = DetailsSection::build(&[], ColumnSet::default(), page_size(15));
        assert_eq!(details.page_count(), 0);
        assert_eq!(details.total_units, 0);
    }

    #[test]
    fn test_missing_key_renders_empty_cell() {
        let recs = vec![
            InstallationRecord::new().with("Unit", "101").with("Toilet", 1),
            InstallationRecord::new().with("Unit", "102"),
        ];
        let columns = ColumnSet::from_first_record(&recs, 8);
        let details = DetailsSection::build(&recs, columns, page_size(15));
        assert_eq!(details.pages[0].rows[1], vec!["102".to_string(), String::new()]);
    }
}
