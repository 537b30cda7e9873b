//! Display classification of import rows and the result list the view renders.

use crate::model::alias_import::{AliasImportRow, AliasImportStatus};
use serde::Serialize;

/// Style tag for a rendered import row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DisplayClass {
    Ok,
    Overwrite,
    Error,
}

impl DisplayClass {
    /// CSS class used by the result list.
    pub fn css_class(self) -> &'static str {
        match self {
            DisplayClass::Ok => "alias-import-ok",
            DisplayClass::Overwrite => "alias-import-overwrite",
            DisplayClass::Error => "alias-import-error",
        }
    }
}

/// Maps a row to its style. Total over the three statuses.
pub fn classify(row: &AliasImportRow) -> DisplayClass {
    match row.status {
        AliasImportStatus::New => DisplayClass::Ok,
        AliasImportStatus::Changed => DisplayClass::Overwrite,
        AliasImportStatus::Error => DisplayClass::Error,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedRow {
    pub row: AliasImportRow,
    pub class: DisplayClass,
}

/// Ordered list of classified rows shown after an import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResultList {
    entries: Vec<ClassifiedRow>,
}

impl ImportResultList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the list with `rows`, classified, in input order.
    ///
    /// Previous content is always discarded first, so calling this twice with
    /// the same rows yields the same list.
    pub fn accumulate(&mut self, rows: &[AliasImportRow]) {
        self.clear();
        self.entries.extend(rows.iter().map(|row| ClassifiedRow {
            row: row.clone(),
            class: classify(row),
        }));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ClassifiedRow] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of rows per class, as `(ok, overwrite, error)`.
    pub fn summary(&self) -> (usize, usize, usize) {
        self.entries
            .iter()
            .fold((0, 0, 0), |(ok, overwrite, error), entry| match entry.class {
                DisplayClass::Ok => (ok + 1, overwrite, error),
                DisplayClass::Overwrite => (ok, overwrite + 1, error),
                DisplayClass::Error => (ok, overwrite, error + 1),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(line: u32, status: AliasImportStatus) -> AliasImportRow {
        AliasImportRow::new(line, status, format!("line {}", line))
    }

    #[test]
    fn classify_is_fixed_per_status() {
        assert_eq!(classify(&row(1, AliasImportStatus::New)), DisplayClass::Ok);
        assert_eq!(
            classify(&row(1, AliasImportStatus::Changed)),
            DisplayClass::Overwrite
        );
        assert_eq!(
            classify(&row(1, AliasImportStatus::Error)),
            DisplayClass::Error
        );
        // message and line play no part
        assert_eq!(
            classify(&AliasImportRow::new(99, AliasImportStatus::Changed, "")),
            DisplayClass::Overwrite
        );
    }

    #[test]
    fn accumulate_preserves_count_and_order() {
        let rows = vec![
            row(1, AliasImportStatus::Error),
            row(2, AliasImportStatus::New),
            row(7, AliasImportStatus::Changed),
            row(8, AliasImportStatus::New),
        ];
        let mut list = ImportResultList::new();
        list.accumulate(&rows);

        assert_eq!(list.len(), rows.len());
        let lines: Vec<u32> = list.entries().iter().map(|e| e.row.line).collect();
        assert_eq!(lines, vec![1, 2, 7, 8]);
        assert_eq!(list.entries()[2].class, DisplayClass::Overwrite);
        assert_eq!(list.summary(), (2, 1, 1));
    }

    #[test]
    fn accumulate_never_mixes_calls() {
        let mut list = ImportResultList::new();
        list.accumulate(&[row(1, AliasImportStatus::New), row(2, AliasImportStatus::New)]);
        list.accumulate(&[row(5, AliasImportStatus::Error)]);

        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].row.line, 5);
    }

    #[test]
    fn accumulate_is_idempotent() {
        let rows = [row(1, AliasImportStatus::New), row(2, AliasImportStatus::Changed)];
        let mut once = ImportResultList::new();
        once.accumulate(&rows);
        let mut twice = once.clone();
        twice.accumulate(&rows);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_rows_give_empty_list() {
        let mut list = ImportResultList::new();
        list.accumulate(&[row(1, AliasImportStatus::New)]);
        list.accumulate(&[]);
        assert!(list.is_empty());
        assert_eq!(list.summary(), (0, 0, 0));
    }
}
