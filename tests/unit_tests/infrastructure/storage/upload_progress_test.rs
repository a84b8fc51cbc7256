use docrelay::infrastructure::storage::UploadProgress;

#[test]
fn given_chunks_when_advancing_then_each_decile_reported_once() {
    let progress = UploadProgress::new(100);

    assert_eq!(progress.advance(5), None);
    assert_eq!(progress.advance(5), Some(10));
    assert_eq!(progress.advance(4), None);
    assert_eq!(progress.advance(31), Some(40));
    assert_eq!(progress.advance(55), Some(100));
}

#[test]
fn given_empty_payload_when_advancing_then_reports_complete() {
    let progress = UploadProgress::new(0);

    assert_eq!(progress.advance(0), Some(100));
}
