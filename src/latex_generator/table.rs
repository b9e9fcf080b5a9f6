use std::fmt::Write as _;

/// Turns delimited text into a `longtable`, one table row per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedTable {
    delimiter: String,
    widths: Vec<u32>,
    escape: Vec<char>,
}

impl DelimitedTable {
    /// `widths` are the column widths in pt. Only `#` is escaped by default.
    pub fn new(delimiter: impl Into<String>, widths: Vec<u32>) -> Self {
        Self {
            delimiter: delimiter.into(),
            widths,
            escape: vec!['#'],
        }
    }

    pub fn escape(&mut self, characters: impl IntoIterator<Item = char>) -> &mut Self {
        self.escape = characters.into_iter().collect();
        self
    }

    fn escape_cell(&self, cell: &str) -> String {
        let mut result = String::with_capacity(cell.len());
        for c in cell.chars() {
            if self.escape.contains(&c) {
                result.push('\\');
            }
            result.push(c);
        }

        result
    }

    #[must_use]
    pub fn render(&self, input: &str) -> String {
        let columns = self
            .widths
            .iter()
            .map(|width| format!("p{{{}pt}}", width))
            .collect::<Vec<_>>();

        let mut result = String::new();
        // writing to a String can not fail
        let _ = write!(
            result,
            "\\begin{{center}}\n\\begin{{longtable}}{{|{}|}}\n\\hline\n",
            columns.join("|")
        );

        for line in input.lines() {
            let cells = line
                .split(self.delimiter.as_str())
                .map(|cell| self.escape_cell(cell))
                .collect::<Vec<_>>();

            let _ = write!(result, "{} \\\\\n\\hline\n", cells.join(" & ").trim());
        }

        result.push_str("\\end{longtable}\n\\end{center}\n");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_table() {
        let table = DelimitedTable::new(",", vec![60, 120]);

        assert_eq!(
            table.render("Issue,Owner\n#12,alice\n"),
            concat!(
                "\\begin{center}\n",
                "\\begin{longtable}{|p{60pt}|p{120pt}|}\n",
                "\\hline\n",
                "Issue & Owner \\\\\n",
                "\\hline\n",
                "\\#12 & alice \\\\\n",
                "\\hline\n",
                "\\end{longtable}\n",
                "\\end{center}\n",
            )
        );
    }

    #[test]
    fn test_custom_escape_characters() {
        let mut table = DelimitedTable::new(";", vec![40]);
        table.escape(['%', '&']);

        assert_eq!(
            table.render("50% R&D #1"),
            concat!(
                "\\begin{center}\n",
                "\\begin{longtable}{|p{40pt}|}\n",
                "\\hline\n",
                "50\\% R\\&D #1 \\\\\n",
                "\\hline\n",
                "\\end{longtable}\n",
                "\\end{center}\n",
            )
        );
    }

    #[test]
    fn test_multi_character_delimiter() {
        let table = DelimitedTable::new("::", vec![10, 10, 10]);

        assert!(table.render("a::b::c").contains("a & b & c \\\\\n"));
    }
}
