use crate::models::Activity;

/// Plain-text table for terminal output
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Table {
            col_widths: headers.iter().map(|h| h.chars().count()).collect(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// One row per activity: report id, time, amount, counterparty, action
    pub fn from_activities<'a>(activities: impl IntoIterator<Item = &'a Activity>) -> Self {
        let mut table = Table::new(&["Report", "Date", "Amount", "Phone", "Action"]);
        for activity in activities {
            table.add_row(vec![
                activity.report_id.clone(),
                activity.date_time.clone(),
                activity.amount.clone(),
                activity.phone.clone(),
                activity.action.clone(),
            ]);
        }
        table
    }

    /// Cells beyond the header count are dropped
    pub fn add_row(&mut self, mut row: Vec<String>) {
        row.truncate(self.headers.len());

        // Width in chars: amounts carry multi-byte currency glyphs
        for (width, col) in self.col_widths.iter_mut().zip(&row) {
            *width = (*width).max(col.chars().count());
        }

        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut output = self.render_row(&self.headers);
        output.push('\n');
        output.push_str(&self.render_separator());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }

        output
    }

    fn render_row(&self, row: &[String]) -> String {
        row.iter()
            .zip(&self.col_widths)
            .map(|(col, &width)| format!("{:<width$}", col, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    }

    fn render_separator(&self) -> String {
        self.col_widths
            .iter()
            .map(|&width| "-".repeat(width))
            .collect::<Vec<_>>()
            .join("-+-")
    }
}
