//! Tolerant scalar coercions shared by all sheet codecs.
//!
//! Nothing in here fails: garbage coerces to a default so a single bad cell
//! can never abort a read. The one asymmetry worth calling out lives in
//! [`delivered`]: empty/`auto`/`null` mean "derive from SRN", while
//! non-numeric garbage coerces to an explicit 0 — not back to auto.

use crate::model::Delivered;
use crate::store::Cell;

/// Numeric view of a cell. Text parses as f64 where possible; everything
/// else is 0.
pub fn number(cell: &Cell) -> f64 {
    match cell {
        Cell::Number(v) => *v,
        Cell::Text(s) => s.trim().parse().unwrap_or(0.0),
        Cell::Date { .. } | Cell::Empty => 0.0,
    }
}

/// Textual view of a cell. Numbers print without a trailing `.0`, native
/// dates print as `DD/MM/YYYY`.
pub fn text(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Number(v) => number_text(*v),
        Cell::Date { date } => date.format("%d/%m/%Y").to_string(),
        Cell::Text(s) => s.clone(),
    }
}

/// Date view of a cell, normalized to `DD/MM/YYYY`.
///
/// Backends that infer dates hand back native date cells for values the user
/// typed as text; this reverses that. Date-looking text is re-formatted too,
/// so ISO input normalizes the same way. Anything else passes through as
/// plain text.
pub fn date_text(cell: &Cell) -> String {
    match cell {
        Cell::Date { date } => date.format("%d/%m/%Y").to_string(),
        Cell::Text(s) => match Cell::parse_date_text(s) {
            Some(date) => date.format("%d/%m/%Y").to_string(),
            None => s.clone(),
        },
        other => text(other),
    }
}

/// Decode the tri-state `delivered` cell.
///
/// Auto when the cell is empty, the literal `null`, or `auto` in any case;
/// otherwise explicit, with non-numeric garbage coercing to an explicit 0.
pub fn delivered(cell: &Cell) -> Delivered {
    match cell {
        Cell::Empty => Delivered::Auto,
        Cell::Number(v) => Delivered::Explicit(*v),
        Cell::Date { .. } => Delivered::Explicit(0.0),
        Cell::Text(s) => {
            let t = s.trim();
            if t.is_empty() || t == "null" || t.eq_ignore_ascii_case("auto") {
                Delivered::Auto
            } else {
                Delivered::Explicit(t.parse().unwrap_or(0.0))
            }
        }
    }
}

/// Encode the tri-state `delivered` value: auto writes the literal `auto`
/// marker, explicit writes its number (an explicit 0 writes `0`, not blank).
pub fn delivered_cell(value: Delivered) -> Cell {
    match value {
        Delivered::Auto => Cell::text("auto"),
        Delivered::Explicit(v) => Cell::Number(v),
    }
}

/// Format a number the way a grid cell displays it: integral values without
/// a fractional part.
pub fn number_text(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}
