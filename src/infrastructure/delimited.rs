// Delimited text tokenizer
use crate::domain::row::Row;

/// Split `text` into rows on `\n`, then each line into fields on `delimiter`.
///
/// With `drop_first_row` everything up to and including the first line
/// break is discarded; a text without any line break is then header-only
/// and yields no rows. Fields are neither trimmed nor unescaped, and field
/// counts are not checked.
pub fn tokenize(text: &str, delimiter: &str, drop_first_row: bool) -> Vec<Row> {
    let (body, first_line) = if drop_first_row {
        match text.split_once('\n') {
            Some((_, rest)) => (rest, 2),
            None => ("", 2),
        }
    } else {
        (text, 1)
    };

    if body.is_empty() {
        return Vec::new();
    }

    body.split('\n')
        .enumerate()
        .map(|(i, line)| {
            let fields = line.split(delimiter).map(str::to_string).collect();
            Row::new(first_line + i, fields)
        })
        .collect()
}
