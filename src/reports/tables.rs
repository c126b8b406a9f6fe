use super::show;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keyevo::config::MovementWeights;
use keyevo::corpus::FrequencyTable;
use keyevo::geometry::{Finger, Hand};
use keyevo::scorer::{EvaluationResult, Movement};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, from: usize, to: usize) {
    for i in from..=to {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn impact_color(v: f64) -> Color {
    if v > 0.0 {
        Color::Red
    } else if v < 0.0 {
        Color::Green
    } else {
        Color::Reset
    }
}

pub fn evaluation(title: &str, d: &EvaluationResult, w: &MovementWeights) {
    println!("\n=== {} ===", title);
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("Movement").add_attribute(Attribute::Bold),
        Cell::new("Weight"),
        Cell::new("Count"),
        Cell::new("%"),
        Cell::new("Impact").add_attribute(Attribute::Bold),
    ]);

    for m in Movement::ALL {
        let impact = d.contributions[m];
        table.add_row(vec![
            Cell::new(m.label()),
            Cell::new(format!("{:+.1}", w.weight(m))),
            Cell::new(d.counts[m]),
            Cell::new(format!("{:.2}", d.share(m))),
            Cell::new(format!("{:.1}", impact)).fg(impact_color(impact)),
        ]);
    }

    table.add_row(vec![
        Cell::new("Bigram subtotal").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(d.total_bigrams),
        Cell::new(""),
        Cell::new(format!("{:.1}", d.bigram_subtotal())),
    ]);
    table.add_row(vec![
        Cell::new("Trigram subtotal").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(d.total_trigrams),
        Cell::new(""),
        Cell::new(format!("{:.1}", d.trigram_subtotal())),
    ]);
    if w.finger_load_weight != 0.0 {
        table.add_row(vec![
            Cell::new("Finger load"),
            Cell::new(format!("{:+.1}", w.finger_load_weight)),
            Cell::new(""),
            Cell::new(format!("{:.2}", d.finger_load_deviation)),
            Cell::new(format!(
                "{:.1}",
                w.finger_load_weight * d.finger_load_deviation
            )),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total score").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(format!("{:.1}", d.score))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ]);

    align_right(&mut table, 1, 4);
    println!("{}", table);
}

pub fn finger_loads(d: &EvaluationResult, w: &MovementWeights) {
    let ideal = w.ideal_load();
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("Finger").add_attribute(Attribute::Bold),
        Cell::new("Load %"),
        Cell::new("Ideal %"),
        Cell::new("Diff"),
    ]);

    for f in Finger::ALL {
        let diff = d.finger_load[f] - ideal[f];
        table.add_row(vec![
            Cell::new(f.short_name()),
            Cell::new(format!("{:.2}", d.finger_load[f])),
            Cell::new(format!("{:.1}", ideal[f])),
            Cell::new(format!("{:+.2}", diff)).fg(if diff.abs() > 3.0 {
                Color::Yellow
            } else {
                Color::Reset
            }),
        ]);
    }

    align_right(&mut table, 1, 3);
    println!("{}", table);
    println!(
        "Hands: left {:.1}% / right {:.1}% / unplaced {:.1}%  (deviation {:.2})",
        d.hand_share(Hand::Left),
        d.hand_share(Hand::Right),
        d.unplaced_load,
        d.finger_load_deviation
    );
}

pub fn comparison(before: &EvaluationResult, after: &EvaluationResult) {
    println!("\n=== BEFORE / AFTER ===");
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("Movement").add_attribute(Attribute::Bold),
        Cell::new("Initial"),
        Cell::new("Optimized"),
        Cell::new("Change"),
    ]);

    for m in Movement::ALL {
        let delta = after.counts[m] as i128 - before.counts[m] as i128;
        table.add_row(vec![
            Cell::new(m.label()),
            Cell::new(before.counts[m]),
            Cell::new(after.counts[m]),
            Cell::new(format!("{:+}", delta)),
        ]);
    }

    let gain = after.score - before.score;
    table.add_row(vec![
        Cell::new("Score").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.1}", before.score)),
        Cell::new(format!("{:.1}", after.score)).fg(Color::Cyan),
        Cell::new(format!("{:+.1}", gain)).fg(impact_color(gain)),
    ]);

    align_right(&mut table, 1, 3);
    println!("{}", table);
}

pub fn swaps(pairs: &[(char, char)]) {
    if pairs.is_empty() {
        println!("\nNo character moved.");
        return;
    }
    println!("\n=== MOVED KEYS ({}) ===", pairs.len());
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Was").add_attribute(Attribute::Bold),
        Cell::new("Now").add_attribute(Attribute::Bold),
    ]);
    for &(before, after) in pairs {
        table.add_row(vec![
            Cell::new(show(before)).set_alignment(CellAlignment::Center),
            Cell::new(show(after)).set_alignment(CellAlignment::Center),
        ]);
    }
    println!("{}", table);
}

pub fn top_ngrams(freq: &FrequencyTable, limit: usize) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Char").add_attribute(Attribute::Bold),
        Cell::new("Count"),
        Cell::new("Bigram").add_attribute(Attribute::Bold),
        Cell::new("Count"),
        Cell::new("Trigram").add_attribute(Attribute::Bold),
        Cell::new("Count"),
    ]);

    let mono = freq.monograms();
    let bi = freq.bigrams();
    let tri = freq.trigrams();
    let rows = limit.min(mono.len().max(bi.len()).max(tri.len()));

    for i in 0..rows {
        let mut cells = Vec::with_capacity(6);
        match mono.get(i) {
            Some(&(c, n)) => cells.extend([Cell::new(show(c)), Cell::new(n)]),
            None => cells.extend([Cell::new(""), Cell::new("")]),
        }
        match bi.get(i) {
            Some((k, n)) => cells.extend([
                Cell::new(k.iter().map(|&c| show(c)).collect::<String>()),
                Cell::new(n),
            ]),
            None => cells.extend([Cell::new(""), Cell::new("")]),
        }
        match tri.get(i) {
            Some((k, n)) => cells.extend([
                Cell::new(k.iter().map(|&c| show(c)).collect::<String>()),
                Cell::new(n),
            ]),
            None => cells.extend([Cell::new(""), Cell::new("")]),
        }
        table.add_row(cells);
    }

    for i in [1, 3, 5] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("{}", table);
}
