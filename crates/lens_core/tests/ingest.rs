use lens_core::{
    normalize, ItemStatus, ProblemReason, RawFile, SubmissionError, MAX_FILE_BYTES,
};
use pretty_assertions::assert_eq;

const MIB: usize = 1024 * 1024;

fn image(name: &str, bytes: &[u8]) -> RawFile {
    RawFile::new(name, "image/png", bytes.to_vec())
}

#[test]
fn accepted_files_keep_input_order_and_fresh_ids() {
    let mut next_id = 7;
    let normalized = normalize(
        vec![image("b.png", b"bb"), image("a.png", b"a"), image("c.png", b"ccc")],
        &mut next_id,
    )
    .expect("accepted");

    let names: Vec<_> = normalized
        .items
        .iter()
        .map(|item| item.source().name.as_str())
        .collect();
    assert_eq!(names, vec!["b.png", "a.png", "c.png"]);
    let ids: Vec<_> = normalized.items.iter().map(|item| item.id()).collect();
    assert_eq!(ids, vec![7, 8, 9]);
    assert_eq!(next_id, 10);
    assert!(normalized.warning.is_none());
    assert!(normalized
        .items
        .iter()
        .all(|item| item.status() == ItemStatus::Pending));
}

#[test]
fn payload_is_full_base64_of_the_input() {
    let mut next_id = 1;
    let normalized = normalize(vec![image("hello.png", b"hello")], &mut next_id).unwrap();
    let item = &normalized.items[0];
    assert_eq!(item.payload().base64, "aGVsbG8=");
    assert_eq!(item.payload().mime_type, "image/png");
    assert_eq!(item.source().byte_len, 5);
}

#[test]
fn oversized_and_unsupported_files_degrade_to_warning() {
    let mut next_id = 1;
    let big = vec![0u8; MAX_FILE_BYTES as usize + 1];
    let normalized = normalize(
        vec![
            image("ok.png", b"x"),
            RawFile::new("huge.jpg", "image/jpeg", big),
            RawFile::new("notes.txt", "text/plain", b"hi".to_vec()),
            image("also-ok.png", b"y"),
        ],
        &mut next_id,
    )
    .expect("partial batch accepted");

    assert_eq!(normalized.items.len(), 2);
    let warning = normalized.warning.expect("warning");
    assert_eq!(warning.problems.len(), 2);
    assert_eq!(warning.problems[0].name, "huge.jpg");
    assert_eq!(
        warning.problems[0].reason,
        ProblemReason::TooLarge {
            byte_len: MAX_FILE_BYTES + 1
        }
    );
    assert_eq!(warning.problems[1].name, "notes.txt");
    assert_eq!(
        warning.problems[1].reason,
        ProblemReason::UnsupportedType {
            content_type: "text/plain".to_string()
        }
    );
}

#[test]
fn batch_over_total_limit_is_rejected_wholesale() {
    let mut next_id = 1;
    // 20 x 26 MiB = 520 MiB, each file under the per-file limit.
    let files: Vec<_> = (0..20)
        .map(|i| RawFile::new(format!("{i}.png"), "image/png", vec![0u8; 26 * MIB]))
        .collect();

    let err = normalize(files, &mut next_id).unwrap_err();
    assert_eq!(
        err,
        SubmissionError::TotalSizeExceeded {
            observed_bytes: (520 * MIB) as u64
        }
    );
    assert_eq!(next_id, 1);
    assert!(err.to_string().contains("520.00 MiB"));
}

#[test]
fn untyped_heic_resolves_to_heic_mime() {
    let mut next_id = 1;
    let normalized = normalize(
        vec![RawFile::new("photo.HEIC", "", b"heic".to_vec())],
        &mut next_id,
    )
    .unwrap();
    assert_eq!(normalized.items[0].payload().mime_type, "image/heic");
}

#[test]
fn nothing_usable_yields_empty_items() {
    let mut next_id = 1;
    let normalized = normalize(
        vec![RawFile::new("doc.pdf", "application/pdf", b"%PDF".to_vec())],
        &mut next_id,
    )
    .unwrap();
    assert!(normalized.items.is_empty());
    assert_eq!(normalized.warning.unwrap().problems.len(), 1);
}
