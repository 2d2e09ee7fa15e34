//! Plain-text rendering of catalog pages and comparison tables.

use ebike_core::catalog::display_price;
use ebike_core::{BikeEntity, Catalog, ComparisonTable, Pagination};
use std::io::{self, Write};

/// One page of results plus the result summary and page navigation.
pub fn bike_list(
    out: &mut impl Write,
    results: &[&BikeEntity],
    pagination: &Pagination,
) -> io::Result<()> {
    if results.is_empty() {
        writeln!(out, "No bikes found. Try adjusting your filters or search terms.")?;
        return Ok(());
    }

    let summary = Catalog::summary(results);
    writeln!(
        out,
        "{} bikes from {} manufacturers",
        summary.results, summary.manufacturers
    )?;
    writeln!(out)?;

    for bike in pagination.slice(results) {
        bike_card(out, bike)?;
    }

    if pagination.total_pages() > 1 {
        let pages: Vec<String> = pagination
            .window()
            .map(|p| {
                if p == pagination.page() {
                    format!("[{p}]")
                } else {
                    p.to_string()
                }
            })
            .collect();
        writeln!(
            out,
            "{}page {} of {}: {}{}",
            if pagination.has_prev() { "< " } else { "" },
            pagination.page(),
            pagination.total_pages(),
            pages.join(" "),
            if pagination.has_next() { " >" } else { "" },
        )?;
    }
    Ok(())
}

fn bike_card(out: &mut impl Write, bike: &BikeEntity) -> io::Result<()> {
    writeln!(out, "{}  ({})", bike.name, bike.manufacturer)?;
    writeln!(out, "  {}", display_price(bike.price))?;
    for (label, value) in [
        ("Battery", &bike.battery),
        ("Motor", &bike.motor_type),
        ("Max Speed", &bike.max_speed),
        ("Range", &bike.range),
    ] {
        if !value.is_empty() {
            writeln!(out, "  {label}: {value}")?;
        }
    }
    if !bike.url.is_empty() {
        writeln!(out, "  {}", bike.url)?;
    }
    writeln!(out, "  id: {}", bike.id)?;
    writeln!(out)
}

pub fn manufacturers(out: &mut impl Write, names: &[&str]) -> io::Result<()> {
    for name in names {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

/// Column-aligned comparison table.
pub fn comparison(out: &mut impl Write, table: &ComparisonTable) -> io::Result<()> {
    const FIRST_COLUMN: &str = "Specification";

    let label_width = table
        .rows
        .iter()
        .map(|r| r.label.chars().count())
        .chain([FIRST_COLUMN.len()])
        .max()
        .unwrap_or_default();
    let widths: Vec<usize> = table
        .header
        .iter()
        .enumerate()
        .map(|(i, name)| {
            table
                .rows
                .iter()
                .filter_map(|r| r.values.get(i))
                .map(|v| v.chars().count())
                .chain([name.chars().count()])
                .max()
                .unwrap_or_default()
        })
        .collect();

    table_line(out, (FIRST_COLUMN, label_width), &table.header, &widths)?;
    let rule_len = label_width + widths.iter().map(|w| w + 3).sum::<usize>();
    writeln!(out, "{}", "-".repeat(rule_len))?;
    for row in &table.rows {
        table_line(out, (row.label, label_width), &row.values, &widths)?;
    }
    Ok(())
}

fn table_line(
    out: &mut impl Write,
    (first, first_width): (&str, usize),
    cells: &[String],
    widths: &[usize],
) -> io::Result<()> {
    write!(out, "{first:<first_width$}")?;
    for (cell, &width) in cells.iter().zip(widths) {
        write!(out, " | {cell:<width$}")?;
    }
    writeln!(out)
}
