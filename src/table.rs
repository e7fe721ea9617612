use std::io::{self, Write};

use tabwriter::TabWriter;

use crate::report::Report;

/// Header and cells of the table, one `Vec` per line.
pub fn table_cells(report: &Report) -> (Vec<&'static str>, Vec<Vec<String>>) {
    let unit = report.mode.unit_label();
    let mut header = vec!["Container", "Value"];
    header.extend(unit);

    let rows = report
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.container.clone(), row.raw_value.clone()];
            if unit.is_some() {
                cells.push(format!("{:.2}", row.converted.unwrap_or(0.0)));
            }
            cells
        })
        .collect();

    (header, rows)
}

fn tabwriter_writeln<W: Write, S: AsRef<str>>(w: &mut W, cells: &[S]) -> io::Result<()> {
    for cell in cells {
        write!(w, "| {}\t", cell.as_ref())?;
    }
    writeln!(w, "|")
}

/// Writes the report as a table with side borders and a rule under the header.
pub fn render<W: Write>(w: &mut W, report: &Report) -> io::Result<()> {
    let (header, rows) = table_cells(report);

    let mut aligned = Vec::new();
    {
        let mut tw = TabWriter::new(&mut aligned).minwidth(0).padding(1);
        tabwriter_writeln(&mut tw, &header)?;
        for row in &rows {
            tabwriter_writeln(&mut tw, row)?;
        }
        tw.flush()?;
    }

    let aligned = String::from_utf8_lossy(&aligned);
    let mut lines = aligned.lines();
    if let Some(header_line) = lines.next() {
        let rule: String = header_line
            .chars()
            .map(|c| if c == '|' { '|' } else { '-' })
            .collect();
        writeln!(w, "{}", header_line)?;
        writeln!(w, "{}", rule)?;
    }
    for line in lines {
        writeln!(w, "{}", line)?;
    }

    Ok(())
}
