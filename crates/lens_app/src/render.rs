use lens_core::{
    AppViewModel, ItemRowView, ItemStatus, ParsedRow, SessionPhase, SubmissionError,
    SubmissionReport, ViewMode,
};

pub fn progress_line(view: &AppViewModel) -> String {
    let phase = match view.phase {
        SessionPhase::Idle => "Idle",
        SessionPhase::Running => "Running",
        SessionPhase::Settled => "Done",
    };
    let current = view
        .items
        .iter()
        .find(|row| row.status == ItemStatus::Processing)
        .map(|row| format!(" | now: {}", row.name))
        .unwrap_or_default();
    format!(
        "{phase} [{}/{}] ok {} failed {} | model {}{current}",
        view.completed, view.total, view.succeeded, view.failed, view.model
    )
}

/// Lines describing the last submission, if it needs the user's attention.
pub fn submission_lines(report: &SubmissionReport) -> Vec<String> {
    match report {
        SubmissionReport::Rejected { observed_bytes } => {
            let err = SubmissionError::TotalSizeExceeded {
                observed_bytes: *observed_bytes,
            };
            vec![format!("Batch rejected: {err}")]
        }
        SubmissionReport::Empty { excluded } => {
            let mut lines = vec!["No usable images in this batch:".to_string()];
            lines.extend(excluded.iter().map(|p| format!("  {} {}", p.name, p.reason)));
            lines
        }
        SubmissionReport::Accepted { excluded, .. } if excluded.is_empty() => Vec::new(),
        SubmissionReport::Accepted { accepted, excluded } => {
            let mut lines = vec![format!(
                "Some files were skipped ({accepted} accepted):"
            )];
            lines.extend(excluded.iter().map(|p| format!("  {} {}", p.name, p.reason)));
            lines
        }
    }
}

/// One item's section. `rows` are the parsed rows of this item.
pub fn item_block(row: &ItemRowView, mode: ViewMode, rows: &[ParsedRow]) -> String {
    let mut out = format!("=== {} [{}] ===\n", row.name, row.status.label());
    match (row.status, mode) {
        (ItemStatus::Error, _) => {
            if let Some(message) = &row.error_message {
                out.push_str(message);
                out.push('\n');
            }
        }
        (ItemStatus::Success, ViewMode::Raw) => {
            if let Some(text) = &row.result_text {
                out.push_str(text);
                out.push('\n');
            }
        }
        (ItemStatus::Success, ViewMode::List) => {
            if rows.is_empty() {
                out.push_str("(no text)\n");
            }
            out.push_str(&format_rows(rows));
        }
        (ItemStatus::Pending | ItemStatus::Processing, _) => {}
    }
    out
}

fn format_rows(rows: &[ParsedRow]) -> String {
    let width = rows
        .iter()
        .filter_map(|row| match row {
            ParsedRow::KeyValue { label, .. } => Some(label.chars().count()),
            ParsedRow::Plain { .. } => None,
        })
        .max()
        .unwrap_or(0);

    rows.iter()
        .map(|row| match row {
            ParsedRow::KeyValue { label, value } => format!("{label:<width$} : {value}\n"),
            ParsedRow::Plain { value } => format!("{value}\n"),
        })
        .collect()
}
