// ---------------------------------------------------------------------------
// TableRenderer
// ---------------------------------------------------------------------------

/// Renders a 2-D array of strings into a bordered, word-wrapped monospace
/// table. Widths are measured in characters; each column is as wide as its
/// longest wrapped line, capped by `max_column_width` per wrap step.
pub struct TableRenderer {
    column_count: usize,
    max_column_width: usize,
}

impl TableRenderer {
    pub fn new(column_count: usize, max_column_width: usize) -> Self {
        Self {
            column_count,
            max_column_width: max_column_width.max(1),
        }
    }

    pub fn render(&self, rows: &[Vec<String>]) -> String {
        let normalized = self.normalize(rows);
        let wrapped: Vec<Vec<Vec<String>>> = normalized
            .iter()
            .map(|row| row.iter().map(|cell| self.wrap_cell(cell)).collect())
            .collect();
        let widths = self.column_widths(&wrapped);
        self.render_wrapped(&wrapped, &widths)
    }

    /// Truncate long rows and right-pad short rows with empty cells so every
    /// row has exactly `column_count` cells.
    fn normalize(&self, rows: &[Vec<String>]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| {
                let mut cells: Vec<String> =
                    row.iter().take(self.column_count).cloned().collect();
                cells.resize(self.column_count, String::new());
                cells
            })
            .collect()
    }

    /// Break a cell's text into lines no wider than `max_column_width`.
    /// Explicit blank lines are preserved; an empty cell yields exactly one
    /// empty line.
    fn wrap_cell(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();

        for raw in text.split('\n') {
            let input = raw.trim_end();
            if input.is_empty() {
                out.push(String::new());
                continue;
            }

            let mut line = String::new();
            let mut line_chars = 0usize;

            for word in input.split_whitespace() {
                let mut word = word;
                let mut word_chars = word.chars().count();

                if word_chars > self.max_column_width {
                    let (chunks, remainder) = self.split_long_word(word);
                    out.extend(chunks.into_iter().map(str::to_string));
                    word = remainder;
                    word_chars = word.chars().count();
                }

                if line.is_empty() {
                    line.push_str(word);
                    line_chars = word_chars;
                } else if line_chars + 1 + word_chars <= self.max_column_width {
                    line.push(' ');
                    line.push_str(word);
                    line_chars += 1 + word_chars;
                } else {
                    out.push(std::mem::take(&mut line));
                    line.push_str(word);
                    line_chars = word_chars;
                }
            }

            if !line.is_empty() {
                out.push(line);
            }
        }

        if out.is_empty() {
            out.push(String::new());
        }
        out
    }

    /// Split an over-long word into fixed-size chunks of exactly
    /// `max_column_width` characters; the final remainder (at most one full
    /// width) re-enters normal packing.
    fn split_long_word<'a>(&self, mut word: &'a str) -> (Vec<&'a str>, &'a str) {
        let mut chunks = Vec::new();
        while word.chars().count() > self.max_column_width {
            let split_at = word
                .char_indices()
                .nth(self.max_column_width)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            let (chunk, rest) = word.split_at(split_at);
            chunks.push(chunk);
            word = rest;
        }
        (chunks, word)
    }

    /// Per-column width: the longest wrapped line across all rows (0 if the
    /// column is entirely empty).
    fn column_widths(&self, wrapped: &[Vec<Vec<String>>]) -> Vec<usize> {
        let mut widths = vec![0usize; self.column_count];
        for row in wrapped {
            for (col, cell) in row.iter().enumerate() {
                for line in cell {
                    widths[col] = widths[col].max(line.chars().count());
                }
            }
        }
        widths
    }

    fn render_wrapped(&self, wrapped: &[Vec<Vec<String>>], widths: &[usize]) -> String {
        let divider = self.divider(widths);
        let mut out = String::new();

        out.push_str(&divider);
        out.push('\n');

        for row in wrapped {
            let height = row.iter().map(Vec::len).max().unwrap_or(1);

            for line_idx in 0..height {
                out.push('|');
                for (col, cell) in row.iter().enumerate() {
                    let text = cell.get(line_idx).map(String::as_str).unwrap_or("");
                    out.push(' ');
                    out.push_str(&self.pad(text, widths[col]));
                    out.push_str(" |");
                }
                out.push('\n');
            }

            // Every row is closed by a divider, including the last.
            out.push_str(&divider);
            out.push('\n');
        }

        out
    }

    fn divider(&self, widths: &[usize]) -> String {
        let mut out = String::from("+");
        for &width in widths {
            out.push_str(&"-".repeat(width + 2));
            out.push('+');
        }
        out
    }

    fn pad(&self, text: &str, width: usize) -> String {
        let len = text.chars().count();
        if len >= width {
            text.chars().take(width).collect()
        } else {
            let mut padded = text.to_string();
            padded.push_str(&" ".repeat(width - len));
            padded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(cells: &[&[&str]]) -> Vec<Vec<String>> {
        cells
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn wraps_greedily_at_max_width() {
        let renderer = TableRenderer::new(1, 10);
        let lines = renderer.wrap_cell("one two three four");
        assert_eq!(lines, vec!["one two", "three four"]);
    }

    #[test]
    fn double_width_word_splits_into_two_exact_lines() {
        let renderer = TableRenderer::new(1, 5);
        let lines = renderer.wrap_cell("aaaaabbbbb");
        assert_eq!(lines, vec!["aaaaa", "bbbbb"]);
        assert!(lines.iter().all(|l| l.chars().count() == 5));
    }

    #[test]
    fn long_word_remainder_continues_packing() {
        let renderer = TableRenderer::new(1, 5);
        // 7 chars: one exact chunk plus "bb", which then packs with "cc".
        let lines = renderer.wrap_cell("aaaaabb cc");
        assert_eq!(lines, vec!["aaaaa", "bb cc"]);
    }

    #[test]
    fn blank_lines_are_preserved() {
        let renderer = TableRenderer::new(1, 10);
        let lines = renderer.wrap_cell("first\n\nsecond");
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn empty_cell_yields_one_empty_line() {
        let renderer = TableRenderer::new(1, 10);
        assert_eq!(renderer.wrap_cell(""), vec![""]);
    }

    #[test]
    fn rows_are_normalized_to_column_count() {
        let renderer = TableRenderer::new(2, 10);
        let normalized = renderer.normalize(&rows(&[&["a", "b", "c"], &["d"]]));
        assert_eq!(normalized[0], vec!["a", "b"]);
        assert_eq!(normalized[1], vec!["d", ""]);
    }

    #[test]
    fn row_height_is_max_wrapped_count_with_blank_padding() {
        let renderer = TableRenderer::new(2, 6);
        let output = renderer.render(&rows(&[&["one two three", "x"]]));
        let expected = "\
+-------+---+
| one   | x |
| two   |   |
| three |   |
+-------+---+
";
        assert_eq!(output, expected);
    }

    #[test]
    fn every_row_is_closed_by_a_divider() {
        let renderer = TableRenderer::new(1, 10);
        let output = renderer.render(&rows(&[&["a"], &["b"]]));
        let dividers = output.lines().filter(|l| l.starts_with('+')).count();
        assert_eq!(dividers, 3);
        assert!(output.ends_with("+---+\n"));
    }

    #[test]
    fn empty_column_renders_zero_width() {
        let renderer = TableRenderer::new(2, 10);
        let output = renderer.render(&rows(&[&["a", ""]]));
        let expected = "\
+---+--+
| a |  |
+---+--+
";
        assert_eq!(output, expected);
    }

    #[test]
    fn widths_are_measured_in_characters() {
        let renderer = TableRenderer::new(1, 10);
        let output = renderer.render(&rows(&[&["ärm"], &["word"]]));
        // Both cells fit a 4-char column; the umlaut counts as one.
        assert!(output.contains("| ärm  |"));
        assert!(output.contains("| word |"));
    }
}
