//! Cell sanitization: line-break normalization and formula escaping

use std::borrow::Cow;

use crate::model::CellValue;

/// Leading characters that make Excel treat a cell as a formula
const FORMULA_TRIGGERS: [char; 4] = ['-', '@', '=', '+'];

/// Collapse `\r\n` and bare `\r` to `\n`, leaving all other characters as is
pub fn normalize_line_breaks(s: &str) -> Cow<'_, str> {
    if !s.contains('\r') {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Whether a spreadsheet application would evaluate this value as a formula
pub fn is_formula_like(s: &str) -> bool {
    s.starts_with(FORMULA_TRIGGERS)
}

/// Prefix a tab to formula-like values so they open as text
///
/// Cells beginning with `=`, `+`, `-`, or `@` execute as formulas when the
/// workbook is opened, which turns user-controlled data into code. The tab
/// forces text interpretation and is invisible in the rendered sheet.
pub fn escape_formula(s: &str) -> Cow<'_, str> {
    if is_formula_like(s) {
        Cow::Owned(format!("\t{}", s))
    } else {
        Cow::Borrowed(s)
    }
}

/// Normalize one cell for output
///
/// Null becomes the empty string; string cells get line-break normalization
/// and, when `escape` is set, formula escaping. Numeric, boolean, and
/// temporal cells pass through untouched.
pub fn sanitize_cell(value: CellValue, escape: bool) -> CellValue {
    match value {
        CellValue::Null => CellValue::String(Cow::Borrowed("")),
        CellValue::String(s) => {
            let mut normalized = normalize_line_breaks(&s).into_owned();
            if escape && is_formula_like(&normalized) {
                normalized.insert(0, '\t');
            }
            CellValue::String(Cow::Owned(normalized))
        }
        other => other,
    }
}
