use super::show;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use keyevo::geometry::ROW_COUNT;
use keyevo::layout::Layout;

pub fn print_layout(layout: &Layout) {
    println!("\nLayout: {}", layout.name());
    let positions = layout.reverse_map();
    let cols = positions.keys().map(|&(_, c)| c as usize + 1).max().unwrap_or(0);

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    for row in 0..ROW_COUNT {
        let cells: Vec<Cell> = (0..cols)
            .map(|col| {
                let label = positions
                    .get(&(row, col as u8))
                    .map(|&c| show(c))
                    .unwrap_or_else(|| " ".to_string());
                Cell::new(label).set_alignment(CellAlignment::Center)
            })
            .collect();
        table.add_row(cells);
    }
    println!("{}", table);
}
