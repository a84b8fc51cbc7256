use docrelay::domain::progress::processing_progress;

#[test]
fn given_first_and_last_page_when_mapping_then_band_edges_are_hit() {
    assert_eq!(processing_progress(0, 4), 30);
    assert_eq!(processing_progress(4, 4), 80);
}

#[test]
fn given_partial_page_when_mapping_then_value_is_floored() {
    assert_eq!(processing_progress(1, 3), 46);
    assert_eq!(processing_progress(2, 3), 63);
}

#[test]
fn given_zero_total_when_mapping_then_stays_at_band_start() {
    assert_eq!(processing_progress(0, 0), 30);
}
