//! Diff computation

use std::collections::BTreeSet;

use ahash::AHashMap;
use sheetvc_core::{Cell, CellValue, Workbook, Worksheet};
use tracing::debug;

use crate::model::{CellChange, ChangeType, Diff, SheetDiff};
use crate::options::DiffOptions;

const ARROW: &str = "→";

/// Compare two workbooks
///
/// Comparing a workbook with itself yields a diff with no sheet entries.
pub fn compute_diff(old: &Workbook, new: &Workbook) -> Diff {
    compute_diff_with(old, new, &DiffOptions::default())
}

/// Compare two workbooks, restricted by `options`
pub fn compute_diff_with(old: &Workbook, new: &Workbook, options: &DiffOptions) -> Diff {
    let old_sheets: AHashMap<&str, &Worksheet> =
        old.sheets.iter().map(|s| (s.name.as_str(), s)).collect();
    let new_sheets: AHashMap<&str, &Worksheet> =
        new.sheets.iter().map(|s| (s.name.as_str(), s)).collect();

    // Old order first, then sheets that only exist in `new`
    let mut names: Vec<&str> = Vec::with_capacity(old_sheets.len() + new_sheets.len());
    let mut seen = BTreeSet::new();
    for sheet in old.sheets.iter().chain(&new.sheets) {
        if seen.insert(sheet.name.as_str()) {
            names.push(sheet.name.as_str());
        }
    }

    let mut sheet_diffs = Vec::new();
    for name in names.into_iter().filter(|n| options.includes_sheet(n)) {
        let sheet_diff = match (old_sheets.get(name), new_sheets.get(name)) {
            (None, Some(added)) => SheetDiff {
                sheet_name: name.to_string(),
                action: Some(ChangeType::Add),
                changes: diff_cells(None, Some(added), options),
            },
            (Some(removed), None) => SheetDiff {
                sheet_name: name.to_string(),
                action: Some(ChangeType::Delete),
                changes: diff_cells(Some(removed), None, options),
            },
            (Some(before), Some(after)) => {
                let changes = diff_cells(Some(before), Some(after), options);
                if changes.is_empty() {
                    continue;
                }
                SheetDiff {
                    sheet_name: name.to_string(),
                    action: None,
                    changes,
                }
            }
            (None, None) => continue,
        };
        debug!(
            sheet = %sheet_diff.sheet_name,
            action = ?sheet_diff.action,
            changes = sheet_diff.changes.len(),
            "sheet differs"
        );
        sheet_diffs.push(sheet_diff);
    }

    Diff::new(sheet_diffs)
}

fn diff_cells(
    old: Option<&Worksheet>,
    new: Option<&Worksheet>,
    options: &DiffOptions,
) -> Vec<CellChange> {
    let old_cells = old.map(|s| &s.cells);
    let new_cells = new.map(|s| &s.cells);

    let references: BTreeSet<&str> = old_cells
        .into_iter()
        .chain(new_cells)
        .flat_map(|cells| cells.keys().map(String::as_str))
        .collect();

    let mut changes: Vec<CellChange> = references
        .into_iter()
        .filter_map(|reference| {
            let before = old_cells.and_then(|cells| cells.get(reference));
            let after = new_cells.and_then(|cells| cells.get(reference));
            cell_change(reference, before, after)
        })
        .filter(|change| !(options.ignore_empty && is_blank_change(change)))
        .collect();

    changes.sort_by(|a, b| a.cell.cmp(&b.cell));
    changes
}

fn cell_change(reference: &str, old: Option<&Cell>, new: Option<&Cell>) -> Option<CellChange> {
    let (change_type, old_value, new_value, old_formula, new_formula) = match (old, new) {
        (None, None) => return None,
        (None, Some(added)) => (
            ChangeType::Add,
            None,
            Some(added.value.clone()),
            None,
            non_empty(&added.formula),
        ),
        (Some(removed), None) => (
            ChangeType::Delete,
            Some(removed.value.clone()),
            None,
            non_empty(&removed.formula),
            None,
        ),
        (Some(before), Some(after)) => {
            if !cells_differ(before, after) {
                return None;
            }
            let with_formula = before.has_formula() || after.has_formula();
            (
                ChangeType::Modify,
                Some(before.value.clone()),
                Some(after.value.clone()),
                with_formula.then(|| before.formula.clone()),
                with_formula.then(|| after.formula.clone()),
            )
        }
    };

    Some(CellChange {
        cell: reference.to_string(),
        change_type,
        old_value,
        new_value,
        old_formula,
        new_formula,
        description: describe_cell_change(old, new),
    })
}

/// Compared fields: value, formula, type, comment and hyperlink. Style is not.
fn cells_differ(old: &Cell, new: &Cell) -> bool {
    !same_value(&old.value, &new.value)
        || old.formula != new.formula
        || old.cell_type != new.cell_type
        || old.comment != new.comment
        || old.hyperlink != new.hyperlink
}

/// Human-readable summary of a cell change
///
/// ```
/// use sheetvc_core::Cell;
/// use sheetvc_diff::describe_cell_change;
///
/// let old = Cell::formula("=SUM(A1:A10)", 10);
/// let new = Cell::formula("=SUM(B1:B10)", 15);
/// assert_eq!(
///     describe_cell_change(Some(&old), Some(&new)),
///     "Changed value: 10 → 15, formula: =SUM(A1:A10) → =SUM(B1:B10)"
/// );
/// ```
pub fn describe_cell_change(old: Option<&Cell>, new: Option<&Cell>) -> String {
    match (old, new) {
        (None, None) => String::new(),
        (None, Some(added)) if added.has_formula() => format!("Added formula: {}", added.formula),
        (None, Some(added)) => format!("Added value: {}", added.value),
        (Some(removed), None) if removed.has_formula() => {
            format!("Removed formula: {}", removed.formula)
        }
        (Some(removed), None) => format!("Removed value: {}", removed.value),
        (Some(before), Some(after)) => {
            let mut changed = Vec::new();
            let mut one_sided = Vec::new();
            if !same_value(&before.value, &after.value) {
                changed.push(format!("value: {} {ARROW} {}", before.value, after.value));
            }
            field_change(
                "formula",
                non_empty(&before.formula),
                non_empty(&after.formula),
                &mut changed,
                &mut one_sided,
            );
            if before.cell_type != after.cell_type {
                changed.push(format!("type: {} {ARROW} {}", before.cell_type, after.cell_type));
            }
            field_change(
                "comment",
                before.comment.as_ref().map(ToString::to_string),
                after.comment.as_ref().map(ToString::to_string),
                &mut changed,
                &mut one_sided,
            );
            field_change(
                "hyperlink",
                before.hyperlink.clone(),
                after.hyperlink.clone(),
                &mut changed,
                &mut one_sided,
            );

            let mut clauses = Vec::with_capacity(one_sided.len() + 1);
            if !changed.is_empty() {
                clauses.push(format!("Changed {}", changed.join(", ")));
            }
            clauses.extend(one_sided);
            clauses.join("; ")
        }
    }
}

/// Sorts a sub-field change into `field: a → b` or an added/removed clause
fn field_change(
    field: &str,
    before: Option<String>,
    after: Option<String>,
    changed: &mut Vec<String>,
    one_sided: &mut Vec<String>,
) {
    match (before, after) {
        (Some(a), Some(b)) if a != b => changed.push(format!("{field}: {a} {ARROW} {b}")),
        (None, Some(b)) => one_sided.push(format!("added {field}: {b}")),
        (Some(a), None) => one_sided.push(format!("removed {field}: {a}")),
        _ => {}
    }
}

/// Value equality under which NaN equals NaN
fn same_value(a: &CellValue, b: &CellValue) -> bool {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => x == y || (x.is_nan() && y.is_nan()),
        _ => a == b,
    }
}

fn is_blank_change(change: &CellChange) -> bool {
    let blank = |value: &Option<CellValue>| value.as_ref().map_or(true, CellValue::is_blank);
    let no_formula = |formula: &Option<String>| formula.as_deref().map_or(true, str::is_empty);
    blank(&change.old_value)
        && blank(&change.new_value)
        && no_formula(&change.old_formula)
        && no_formula(&change.new_formula)
}

fn non_empty(formula: &str) -> Option<String> {
    (!formula.is_empty()).then(|| formula.to_string())
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetvc_core::{CellComment, CellStyle, CellType, CellValue};

    fn sheet(name: &str, cells: &[(&str, Cell)]) -> Worksheet {
        let mut sheet = Worksheet::new(name, 0);
        for (reference, cell) in cells {
            sheet.set_cell(*reference, cell.clone());
        }
        sheet
    }

    fn workbook(sheets: Vec<Worksheet>) -> Workbook {
        let mut wb = Workbook::new();
        for sheet in sheets {
            wb.push_sheet(sheet);
        }
        wb
    }

    #[test]
    fn test_identical_workbooks() {
        let wb = workbook(vec![sheet("S", &[("A1", Cell::new("x")), ("B2", Cell::formula("=A1", "x"))])]);
        let diff = compute_diff(&wb, &wb.clone());
        assert!(!diff.has_changes());
        assert!(diff.sheet_diffs.is_empty());
        assert_eq!(diff.summary.total_changes, 0);
        assert_eq!(diff.summary.cell_changes, 0);
        assert_eq!(diff.to_string(), "No changes detected");
    }

    #[test]
    fn test_value_change() {
        let old = workbook(vec![sheet("S", &[("A1", Cell::new("Test Value"))])]);
        let new = workbook(vec![sheet("S", &[("A1", Cell::new("Modified Value"))])]);

        let diff = compute_diff(&old, &new);
        assert_eq!(diff.summary.modified_sheets, 1);
        assert_eq!(diff.summary.cell_changes, 1);

        let sheet = &diff.sheet_diffs[0];
        assert_eq!(sheet.action, None);
        let change = &sheet.changes[0];
        assert_eq!(change.change_type, ChangeType::Modify);
        assert_eq!(change.old_value, Some(CellValue::from("Test Value")));
        assert_eq!(change.new_value, Some(CellValue::from("Modified Value")));
        assert_eq!(change.old_formula, None);
        assert_eq!(change.description, "Changed value: Test Value → Modified Value");
    }

    #[test]
    fn test_added_and_deleted_cells() {
        let old = workbook(vec![sheet("S", &[("A1", Cell::new(1)), ("C3", Cell::new(true))])]);
        let new = workbook(vec![sheet("S", &[("A1", Cell::new(1)), ("B2", Cell::formula("=A1*2", 2))])]);

        let diff = compute_diff(&old, &new);
        let changes = &diff.sheet_diffs[0].changes;
        assert_eq!(changes.len(), 2);

        assert_eq!(changes[0].cell, "B2");
        assert_eq!(changes[0].change_type, ChangeType::Add);
        assert_eq!(changes[0].new_formula.as_deref(), Some("=A1*2"));
        assert_eq!(changes[0].description, "Added formula: =A1*2");

        assert_eq!(changes[1].cell, "C3");
        assert_eq!(changes[1].change_type, ChangeType::Delete);
        assert_eq!(changes[1].old_value, Some(CellValue::Boolean(true)));
        assert_eq!(changes[1].description, "Removed value: TRUE");
    }

    #[test]
    fn test_added_sheet() {
        let old = workbook(vec![sheet("Main", &[])]);
        let new = workbook(vec![
            sheet("Main", &[]),
            sheet("New Sheet", &[("A1", Cell::new("New Sheet Data"))]),
        ]);

        let diff = compute_diff(&old, &new);
        assert_eq!(diff.summary.added_sheets, 1);
        assert_eq!(diff.summary.total_changes, 1);
        assert_eq!(diff.summary.cell_changes, 1);

        let sheet = &diff.sheet_diffs[0];
        assert_eq!(sheet.sheet_name, "New Sheet");
        assert_eq!(sheet.action, Some(ChangeType::Add));
        assert_eq!(sheet.changes[0].description, "Added value: New Sheet Data");
    }

    #[test]
    fn test_empty_added_sheet_is_reported() {
        let diff = compute_diff(&Workbook::new(), &workbook(vec![sheet("Blank", &[])]));
        assert_eq!(diff.sheet_diffs.len(), 1);
        assert!(diff.sheet_diffs[0].changes.is_empty());
        assert_eq!(diff.to_string(), "1 sheet(s) added");
    }

    #[test]
    fn test_sheet_order() {
        let old = workbook(vec![sheet("B", &[("A1", Cell::new(1))]), sheet("A", &[("A1", Cell::new(1))])]);
        let new = workbook(vec![sheet("Z", &[]), sheet("A", &[("A1", Cell::new(2))]), sheet("Y", &[])]);

        let diff = compute_diff(&old, &new);
        let names: Vec<_> = diff.sheet_diffs.iter().map(|s| s.sheet_name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "Z", "Y"]);
    }

    #[test]
    fn test_changes_sorted_by_reference_string() {
        let old = workbook(vec![sheet("S", &[])]);
        let new = workbook(vec![sheet(
            "S",
            &[("B2", Cell::new(1)), ("A1", Cell::new(2)), ("A10", Cell::new(3))],
        )]);
        let diff = compute_diff(&old, &new);
        let cells: Vec<_> = diff.sheet_diffs[0].changes.iter().map(|c| c.cell.as_str()).collect();
        assert_eq!(cells, vec!["A1", "A10", "B2"]);
    }

    #[test]
    fn test_formula_added_without_value_change() {
        let old = workbook(vec![sheet("S", &[("A1", Cell::new(10))])]);
        let mut with_formula = Cell::new(10);
        with_formula.formula = "=B1+B2".into();
        let new = workbook(vec![sheet("S", &[("A1", with_formula)])]);

        let change = &compute_diff(&old, &new).sheet_diffs[0].changes[0];
        assert_eq!(change.change_type, ChangeType::Modify);
        assert_eq!(change.description, "added formula: =B1+B2");
        assert!(!change.description.contains("value"));
        assert_eq!(change.old_formula.as_deref(), Some(""));
        assert_eq!(change.new_formula.as_deref(), Some("=B1+B2"));
    }

    #[test]
    fn test_numeric_and_text_are_different() {
        let old = workbook(vec![sheet("S", &[("A1", Cell::new("25"))])]);
        let new = workbook(vec![sheet("S", &[("A1", Cell::new(25))])]);
        let change = &compute_diff(&old, &new).sheet_diffs[0].changes[0];
        assert_eq!(change.description, "Changed value: 25 → 25, type: string → number");
    }

    #[test]
    fn test_comment_and_hyperlink_changes() {
        let old = workbook(vec![sheet("S", &[("A1", Cell::new(1)), ("A2", Cell::new("go"))])]);
        let new = workbook(vec![sheet(
            "S",
            &[
                ("A1", Cell::new(1).with_comment(CellComment::new("ann", "check"))),
                ("A2", Cell::new("go").with_hyperlink("https://example.com")),
            ],
        )]);

        let changes = &compute_diff(&old, &new).sheet_diffs[0].changes;
        assert_eq!(changes[0].description, "added comment: [ann]: check");
        assert_eq!(changes[1].description, "added hyperlink: https://example.com");
    }

    #[test]
    fn test_mixed_description_clauses() {
        let old = Cell::formula("=A1", 10).with_comment(CellComment::text_only("draft"));
        let new = Cell::new(15).with_hyperlink("https://example.com");
        assert_eq!(
            describe_cell_change(Some(&old), Some(&new)),
            "Changed value: 10 → 15, type: formula → number; removed formula: =A1; \
             removed comment: draft; added hyperlink: https://example.com"
        );

        let old = Cell::new(1).with_comment(CellComment::new("ann", "check"));
        let new = Cell::new(1).with_comment(CellComment::new("ann", "done"));
        assert_eq!(
            describe_cell_change(Some(&old), Some(&new)),
            "Changed comment: [ann]: check → [ann]: done"
        );
    }

    #[test]
    fn test_nan_cells_are_unchanged() {
        let wb = workbook(vec![sheet("S", &[("A1", Cell::new(f64::NAN)), ("A2", Cell::new(0.5))])]);
        let diff = compute_diff(&wb, &wb.clone());
        assert!(!diff.has_changes());

        let new = workbook(vec![sheet("S", &[("A1", Cell::new(1.5)), ("A2", Cell::new(0.5))])]);
        let change = &compute_diff(&wb, &new).sheet_diffs[0].changes[0];
        assert_eq!(change.description, "Changed value: NaN → 1.5");
    }

    #[test]
    fn test_style_is_not_compared() {
        let old = workbook(vec![sheet("S", &[("A1", Cell::new(1))])]);
        let new = workbook(vec![sheet("S", &[("A1", Cell::new(1).with_style(CellStyle::new().bold()))])]);
        assert!(!compute_diff(&old, &new).has_changes());
    }

    #[test]
    fn test_type_only_change() {
        let old = workbook(vec![sheet("S", &[("A1", Cell::new(45000))])]);
        let new = workbook(vec![sheet("S", &[("A1", Cell::new(45000).with_type(CellType::Date))])]);
        let change = &compute_diff(&old, &new).sheet_diffs[0].changes[0];
        assert_eq!(change.description, "Changed type: number → date");
    }

    #[test]
    fn test_empty_string_is_not_absent() {
        let old = workbook(vec![sheet("S", &[])]);
        let new = workbook(vec![sheet("S", &[("A1", Cell::new(""))])]);

        let diff = compute_diff(&old, &new);
        assert_eq!(diff.sheet_diffs[0].changes[0].change_type, ChangeType::Add);

        let filtered = compute_diff_with(&old, &new, &DiffOptions::new().ignore_empty(true));
        assert!(!filtered.has_changes());
    }

    #[test]
    fn test_ignore_empty_keeps_real_changes() {
        let old = workbook(vec![sheet("S", &[("A1", Cell::new("  ")), ("B1", Cell::new(1))])]);
        let new = workbook(vec![sheet("S", &[("A1", Cell::new("")), ("B1", Cell::new(2))])]);

        let diff = compute_diff_with(&old, &new, &DiffOptions::new().ignore_empty(true));
        let cells: Vec<_> = diff.sheet_diffs[0].changes.iter().map(|c| c.cell.as_str()).collect();
        assert_eq!(cells, vec!["B1"]);
        assert_eq!(diff.summary.cell_changes, 1);
    }

    #[test]
    fn test_sheet_filter() {
        let old = workbook(vec![sheet("A", &[("A1", Cell::new(1))]), sheet("B", &[("A1", Cell::new(1))])]);
        let new = workbook(vec![sheet("A", &[("A1", Cell::new(2))]), sheet("B", &[("A1", Cell::new(2))])]);

        let diff = compute_diff_with(&old, &new, &DiffOptions::new().sheets(["B"]));
        assert_eq!(diff.sheet_diffs.len(), 1);
        assert_eq!(diff.sheet_diffs[0].sheet_name, "B");
        assert_eq!(diff.summary.modified_sheets, 1);
    }

    #[test]
    fn test_describe_added_removed() {
        assert_eq!(describe_cell_change(None, Some(&Cell::new("new value"))), "Added value: new value");
        assert_eq!(
            describe_cell_change(Some(&Cell::formula("=NOW()", 1)), None),
            "Removed formula: =NOW()"
        );
        assert_eq!(describe_cell_change(None, None), "");
    }
}
