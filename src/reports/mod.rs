mod grid;
mod tables;

pub use self::grid::print_layout as print_layout_grid;
pub use self::tables::{
    comparison as print_comparison_report, evaluation as print_evaluation_report,
    finger_loads as print_finger_load_report, swaps as print_swap_report,
    top_ngrams as print_top_ngrams,
};

/// Printable form of a character: visible stand-ins for blanks and controls.
fn show(c: char) -> String {
    match c {
        ' ' => "␣".to_string(),
        c if c.is_control() => c.escape_default().to_string(),
        c => c.to_string(),
    }
}
