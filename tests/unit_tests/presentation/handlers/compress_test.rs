use docrelay::domain::Fidelity;
use docrelay::presentation::handlers::parse_fidelity;

#[test]
fn given_no_fidelity_fields_when_parsing_then_defaults_apply() {
    let fidelity = parse_fidelity(None, None).unwrap();

    assert_eq!(fidelity, Fidelity::default());
}

#[test]
fn given_percent_values_when_parsing_then_converted_to_fractions() {
    let fidelity = parse_fidelity(Some(30), Some(50)).unwrap();

    assert!((fidelity.quality() - 0.3).abs() < f32::EPSILON);
    assert!((fidelity.scale() - 0.5).abs() < f32::EPSILON);
}

#[test]
fn given_out_of_range_values_when_parsing_then_rejected() {
    assert!(parse_fidelity(Some(0), None).is_err());
    assert!(parse_fidelity(Some(101), None).is_err());
    assert!(parse_fidelity(None, Some(-5)).is_err());
    assert!(parse_fidelity(None, Some(400)).is_err());
}
