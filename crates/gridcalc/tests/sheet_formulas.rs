//! End-to-end tests for formula evaluation against a live sheet

use gridcalc::prelude::*;
use pretty_assertions::assert_eq;

fn sheet() -> Sheet {
    Sheet::new(26, 26)
}

#[test]
fn test_unwritten_cells_read_empty() {
    let sheet = sheet();
    assert_eq!(sheet.get_cell_value(Coord::new(1, 1)), "");
    assert_eq!(sheet.get_cell_value(Coord::new(26, 26)), "");
}

#[test]
fn test_write_then_read_identity() {
    let mut sheet = sheet();
    sheet.set_cell_value(Coord::new(3, 4), "first").unwrap();
    sheet.set_cell_value(Coord::new(3, 4), "second").unwrap();
    assert_eq!(sheet.get_cell_value(Coord::new(3, 4)), "second");
}

#[test]
fn test_plain_arithmetic() {
    let sheet = sheet();
    let result = sheet.execute_formula(Coord::new(1, 1), "5+5").unwrap();
    assert_eq!(result, "10");
}

#[test]
fn test_reference_outside_grid_is_not_available() {
    let sheet = Sheet::new(2, 2);
    let result = sheet.execute_formula(Coord::new(1, 1), "C3");
    assert!(matches!(result, Err(FormulaError::NotAvailable(_))));

    // Even when the reference is only part of a larger expression
    let result = sheet.execute_formula(Coord::new(1, 1), "1+C3");
    assert!(matches!(result, Err(FormulaError::NotAvailable(_))));
}

#[test]
fn test_direct_self_reference_rejected() {
    let sheet = sheet();
    // Cell (2,2) is B2; evaluating "B2" on its behalf references itself
    let result = sheet.execute_formula(Coord::new(2, 2), "B2");
    assert!(matches!(result, Err(FormulaError::SelfReference(_))));
}

#[test]
fn test_sum_over_range_of_cell_text() {
    let mut sheet = sheet();
    sheet.set_cell_value(Coord::new(1, 1), "1").unwrap();
    sheet.set_cell_value(Coord::new(2, 1), "2").unwrap();

    let result = sheet
        .execute_formula(Coord::new(5, 5), "SUM(A1:B1)")
        .unwrap();
    assert_eq!(result, "3");
}

#[test]
fn test_sum_over_range_with_holes() {
    let mut sheet = sheet();
    sheet.set_cell_value(Coord::new(1, 1), "1").unwrap();
    // B1, A2, B2 left blank

    let result = sheet
        .execute_formula(Coord::new(5, 5), "SUM(A1:B2)")
        .unwrap();
    assert_eq!(result, "1");
}

#[test]
fn test_cell_reference_reads_raw_value() {
    let mut sheet = sheet();
    sheet.set_cell_value(Coord::new(1, 1), "5").unwrap();

    let result = sheet.execute_formula(Coord::new(2, 2), "A1*2").unwrap();
    assert_eq!(result, "10");
}

#[test]
fn test_blank_reference_evaluates_to_empty() {
    let sheet = sheet();
    let result = sheet.execute_formula(Coord::new(2, 2), "A1").unwrap();
    assert_eq!(result, "");
}

#[test]
fn test_formula_points_to_formula() {
    let mut sheet = sheet();
    // A1 computes to the text "=5", which is itself a formula
    sheet.set_cell_value(Coord::new(1, 1), "=5").unwrap();

    let result = sheet.execute_formula(Coord::new(2, 1), "A1").unwrap();
    assert_eq!(result, "5");
}

#[test]
fn test_formula_chain_through_two_cells() {
    let mut sheet = sheet();
    sheet.set_cell_value(Coord::new(1, 1), "=2+3").unwrap();
    sheet.set_cell_value(Coord::new(2, 1), "=A1").unwrap();

    // B1's own display runs the chain: A1's raw text is a formula, so the
    // computed result is re-evaluated one level at a time
    assert_eq!(sheet.display_value(Coord::new(2, 1)), "5");
}

#[test]
fn test_chained_error_propagates_unchanged() {
    let mut sheet = sheet();
    sheet.set_cell_value(Coord::new(1, 1), "=5+").unwrap();

    let result = sheet.execute_formula(Coord::new(2, 1), "A1");
    assert!(matches!(result, Err(FormulaError::Parse(_))));
}

#[test]
fn test_range_member_formulas_resolve_inline() {
    let mut sheet = sheet();
    sheet.set_cell_value(Coord::new(1, 1), "=B1*2").unwrap();
    sheet.set_cell_value(Coord::new(2, 1), "7").unwrap();

    // A1 is evaluated with its own coordinate, so its B1 reference works
    let result = sheet
        .execute_formula(Coord::new(5, 5), "SUM(A1:B1)")
        .unwrap();
    assert_eq!(result, "21");
}

#[test]
fn test_range_aborts_on_bad_member_formula() {
    let mut sheet = sheet();
    sheet.set_cell_value(Coord::new(1, 1), "1").unwrap();
    sheet.set_cell_value(Coord::new(2, 1), "=5+").unwrap();

    // No partial ranges: the member's error is the range's error
    let result = sheet.execute_formula(Coord::new(5, 5), "SUM(A1:B1)");
    assert!(matches!(result, Err(FormulaError::Parse(_))));
}

#[test]
fn test_range_member_self_reference_aborts_range() {
    let mut sheet = sheet();
    sheet.set_cell_value(Coord::new(1, 1), "=A1").unwrap();

    let result = sheet.execute_formula(Coord::new(5, 5), "SUM(A1:B1)");
    assert!(matches!(result, Err(FormulaError::SelfReference(_))));
}

#[test]
fn test_malformed_expression_is_parse_error() {
    let sheet = sheet();
    assert!(matches!(
        sheet.execute_formula(Coord::new(1, 1), "((1+2"),
        Err(FormulaError::Parse(_))
    ));
    assert!(matches!(
        sheet.execute_formula(Coord::new(1, 1), "1 @ 2"),
        Err(FormulaError::Parse(_))
    ));
}

#[test]
fn test_runtime_faults_are_typed_errors() {
    let mut sheet = sheet();
    sheet.set_cell_value(Coord::new(1, 1), "0").unwrap();

    assert!(matches!(
        sheet.execute_formula(Coord::new(2, 2), "1/A1"),
        Err(FormulaError::Eval(_))
    ));
    assert!(matches!(
        sheet.execute_formula(Coord::new(2, 2), "NOSUCHFN(1)"),
        Err(FormulaError::UnknownFunction(_))
    ));
    assert!(matches!(
        sheet.execute_formula(Coord::new(2, 2), "ABS(1,2,3)"),
        Err(FormulaError::ArgumentCount { .. })
    ));
}

#[test]
fn test_display_value_renders_errors_as_invalid() {
    let mut sheet = sheet();
    sheet.set_cell_value(Coord::new(1, 1), "=1/0").unwrap();
    sheet.set_cell_value(Coord::new(2, 1), "=B1").unwrap(); // self-reference
    sheet.set_cell_value(Coord::new(3, 1), "literal").unwrap();

    assert_eq!(sheet.display_value(Coord::new(1, 1)), INVALID_DISPLAY);
    assert_eq!(sheet.display_value(Coord::new(2, 1)), INVALID_DISPLAY);
    assert_eq!(sheet.display_value(Coord::new(3, 1)), "literal");
}

#[test]
fn test_conditional_on_cell_values() {
    let mut sheet = sheet();
    sheet.set_cell_value(Coord::new(1, 1), "15").unwrap();

    let result = sheet
        .execute_formula(Coord::new(2, 2), "IF(A1>10,\"big\",\"small\")")
        .unwrap();
    assert_eq!(result, "big");
}

#[test]
fn test_concat_with_cell_values() {
    let mut sheet = sheet();
    sheet.set_cell_value(Coord::new(1, 1), "world").unwrap();

    let result = sheet
        .execute_formula(Coord::new(2, 2), "\"hello \"&A1")
        .unwrap();
    assert_eq!(result, "hello world");
}

#[test]
fn test_every_render_recomputes() {
    let mut sheet = sheet();
    sheet.set_cell_value(Coord::new(1, 1), "1").unwrap();
    sheet.set_cell_value(Coord::new(1, 2), "=A1+1").unwrap();

    assert_eq!(sheet.display_value(Coord::new(1, 2)), "2");

    // An edit elsewhere is visible on the next evaluation, no cache
    sheet.set_cell_value(Coord::new(1, 1), "41").unwrap();
    assert_eq!(sheet.display_value(Coord::new(1, 2)), "42");
}
