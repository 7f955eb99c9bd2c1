use std::cmp::max;

/// Column-aligned text rendering for the automaton dumps.
#[derive(Default, Debug, Clone)]
pub(crate) struct Table {
    widths: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn push_row(&mut self, row: Vec<String>) {
        if row.len() > self.widths.len() {
            self.widths.resize(row.len(), 0);
        }
        self.widths
            .iter_mut()
            .zip(&row)
            .for_each(|(width, cell)| *width = max(*width, cell.chars().count()));
        self.rows.push(row);
    }

    pub fn render(&self, sep: &str) -> String {
        self.rows
            .iter()
            .map(|row| {
                let line = row
                    .iter()
                    .zip(&self.widths)
                    .map(|(cell, width)| {
                        let padding = width.saturating_sub(cell.chars().count());
                        format!("{cell}{}", " ".repeat(padding))
                    })
                    .collect::<Vec<_>>()
                    .join(sep);
                line.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::Table;

    #[test]
    fn columns_align_to_the_widest_cell() {
        let mut table = Table::default();
        table.push_row(vec!["a".into(), "bbb".into()]);
        table.push_row(vec!["aaa".into(), "b".into()]);
        assert_eq!(table.render(" "), "a   bbb\naaa b");
    }

    #[test]
    fn short_rows_are_allowed() {
        let mut table = Table::default();
        table.push_row(vec!["x".into(), "y".into(), "z".into()]);
        table.push_row(vec!["xx".into()]);
        assert_eq!(table.render(" "), "x  y z\nxx");
    }
}
