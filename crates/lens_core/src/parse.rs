/// Display-oriented line derived from extracted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRow {
    KeyValue { label: String, value: String },
    Plain { value: String },
}

/// Split extracted text into rows. Never fails; unstructured lines become `Plain`.
///
/// Blank lines are dropped. A line is a `KeyValue` when its first colon is
/// neither the first nor the last character of the line as written; only the
/// emitted label and value are trimmed.
pub fn parse_rows(text: &str) -> Vec<ParsedRow> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> ParsedRow {
    match line.find(':') {
        Some(idx) if idx > 0 && idx + 1 < line.len() => ParsedRow::KeyValue {
            label: line[..idx].trim().to_string(),
            value: line[idx + 1..].trim().to_string(),
        },
        _ => ParsedRow::Plain {
            value: line.trim().to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_rows, ParsedRow};

    fn kv(label: &str, value: &str) -> ParsedRow {
        ParsedRow::KeyValue {
            label: label.to_string(),
            value: value.to_string(),
        }
    }

    fn plain(value: &str) -> ParsedRow {
        ParsedRow::Plain {
            value: value.to_string(),
        }
    }

    #[test]
    fn mixed_lines_keep_order() {
        let rows = parse_rows("Username: alice\nPlain note\nPassword: secret");
        assert_eq!(
            rows,
            vec![kv("Username", "alice"), plain("Plain note"), kv("Password", "secret")]
        );
    }

    #[test]
    fn colon_at_edges_is_plain() {
        assert_eq!(parse_rows(":value"), vec![plain(":value")]);
        assert_eq!(parse_rows("label:"), vec![plain("label:")]);
    }

    #[test]
    fn surrounding_whitespace_counts_for_colon_position() {
        assert_eq!(parse_rows("label: "), vec![kv("label", "")]);
        assert_eq!(parse_rows("  :value"), vec![kv("", "value")]);
    }

    #[test]
    fn blank_lines_and_crlf_are_dropped() {
        let rows = parse_rows("\r\n  \nA: 1\r\n\n\tB :2 \r\n");
        assert_eq!(rows, vec![kv("A", "1"), kv("B", "2")]);
    }

    #[test]
    fn splits_on_first_colon_only() {
        assert_eq!(parse_rows("Time: 12:30"), vec![kv("Time", "12:30")]);
    }

    #[test]
    fn empty_text_yields_no_rows() {
        assert!(parse_rows("").is_empty());
        assert!(parse_rows(" \n\t\n").is_empty());
    }
}
