//! Tests for value parsing, unit resolution and side expansion.

use boxwood_common::{NullSink, RecordingSink};
use boxwood_css::values::split_parameters;
use boxwood_css::{Color, Number, ParseError, Sides, StyleValue, Unit, parse_values};

// ========== numbers ==========

#[test]
fn test_number_parse_units() {
    assert_eq!(Number::parse("12px"), Some(Number::px(12.0)));
    assert_eq!(Number::parse("-1.5em"), Some(Number::new(-1.5, Unit::Em)));
    assert_eq!(Number::parse("50%"), Some(Number::new(50.0, Unit::Percentage)));
    assert_eq!(Number::parse("50pct"), Some(Number::new(50.0, Unit::Percentage)));
    assert_eq!(Number::parse("7"), Some(Number::new(7.0, Unit::None)));
    assert_eq!(Number::parse("3vw"), Some(Number::new(3.0, Unit::Unknown)));
    assert_eq!(Number::parse("auto"), None);
    assert_eq!(Number::parse("-"), None);
}

#[test]
fn test_to_pixels_by_unit() {
    let sink = NullSink;
    assert_eq!(Number::px(10.4).to_pixels(0, 8.0, &sink), 10);
    assert_eq!(Number::new(50.0, Unit::Percentage).to_pixels(200, 8.0, &sink), 100);
    assert_eq!(Number::new(12.5, Unit::Percentage).to_pixels(100, 8.0, &sink), 13);
    assert_eq!(Number::new(1.5, Unit::Em).to_pixels(0, 8.0, &sink), 12);
}

#[test]
fn test_to_pixels_without_unit_warns() {
    let sink = RecordingSink::new();
    assert_eq!(Number::new(7.0, Unit::None).to_pixels(100, 8.0, &sink), 7);
    assert_eq!(Number::new(3.0, Unit::Unknown).to_pixels(100, 8.0, &sink), 3);
    assert_eq!(sink.warnings().len(), 2);
}

// ========== colors ==========

#[test]
fn test_hex_colors() {
    assert_eq!(Color::from_hex("#f80"), Some(Color::rgb(255, 136, 0)));
    assert_eq!(Color::from_hex("ff8800"), Some(Color::rgb(255, 136, 0)));
    assert_eq!(
        Color::from_hex("#11223344"),
        Some(Color {
            r: 0x11,
            g: 0x22,
            b: 0x33,
            a: 0x44
        })
    );
    assert_eq!(Color::from_hex("#12345"), None);
    assert_eq!(Color::from_hex("#ggg"), None);
}

#[test]
fn test_rgb_functions() {
    assert_eq!(
        StyleValue::parse("rgb(255, 0, 0)"),
        Ok(StyleValue::Color(Color::rgb(255, 0, 0)))
    );
    assert_eq!(
        StyleValue::parse("rgba(0 0 0 / 50%)"),
        Ok(StyleValue::Color(Color {
            r: 0,
            g: 0,
            b: 0,
            a: 128
        }))
    );
    assert_eq!(
        StyleValue::parse("rgb(100%, 0%, 0%)"),
        Ok(StyleValue::Color(Color::rgb(255, 0, 0)))
    );
    assert!(matches!(
        StyleValue::parse("rgb(1, 2)"),
        Err(ParseError::InvalidColorFunction(_))
    ));
}

#[test]
fn test_named_colors_resolve_through_keywords() {
    let value = StyleValue::parse("Red").unwrap();
    assert_eq!(value, StyleValue::keyword("Red"));
    assert_eq!(value.as_color(), Some(Color::rgb(255, 0, 0)));
    assert_eq!(StyleValue::keyword("auto").as_color(), None);
}

// ========== tokens ==========

#[test]
fn test_parse_token_kinds() {
    assert_eq!(StyleValue::parse("4px"), Ok(StyleValue::px(4.0)));
    assert_eq!(StyleValue::parse("auto"), Ok(StyleValue::keyword("auto")));
    assert_eq!(StyleValue::parse("\"Submit\""), Ok(StyleValue::keyword("Submit")));
    assert_eq!(StyleValue::parse("  "), Err(ParseError::Empty));
    assert_eq!(
        StyleValue::parse("calc(1px + 2px)"),
        Err(ParseError::UnsupportedFunction("calc".to_string()))
    );
    assert!(matches!(
        StyleValue::parse("#zz"),
        Err(ParseError::InvalidHexColor(_))
    ));
}

#[test]
fn test_keyword_comparison_ignores_case() {
    assert!(StyleValue::keyword("AUTO").is_keyword("auto"));
    assert!(!StyleValue::px(0.0).is_keyword("auto"));
}

#[test]
fn test_parse_values_strips_important() {
    let values = parse_values("4px auto !important", &NullSink);
    assert_eq!(values, vec![StyleValue::px(4.0), StyleValue::keyword("auto")]);

    let values = parse_values("block!IMPORTANT", &NullSink);
    assert_eq!(values, vec![StyleValue::keyword("block")]);
}

#[test]
fn test_parse_values_drops_bad_tokens() {
    let sink = RecordingSink::new();
    let values = parse_values("1px #zz 2px", &sink);
    assert_eq!(values, vec![StyleValue::px(1.0), StyleValue::px(2.0)]);
    assert!(sink.contains("#zz"));
}

#[test]
fn test_parse_values_non_ascii_does_not_panic() {
    let values = parse_values("\"héllo wörld\"", &NullSink);
    assert_eq!(values, vec![StyleValue::keyword("héllo wörld")]);
}

#[test]
fn test_split_parameters_respects_quotes_and_parens() {
    assert_eq!(
        split_parameters("rgb(1, 2, 3) 4px, 'a b'"),
        vec!["rgb(1, 2, 3)", "4px", "'a b'"]
    );
    assert!(split_parameters("   ").is_empty());
}

// ========== sides ==========

#[test]
fn test_sides_from_value_counts() {
    let one = Sides::from_values(&[1]).unwrap();
    assert_eq!((one.top, one.left, one.bottom, one.right), (1, 1, 1, 1));

    let two = Sides::from_values(&[1, 2]).unwrap();
    assert_eq!((two.top, two.left, two.bottom, two.right), (1, 2, 1, 2));

    let three = Sides::from_values(&[1, 2, 3]).unwrap();
    assert_eq!((three.top, three.left, three.bottom, three.right), (1, 2, 3, 2));

    let four = Sides::from_values(&[1, 2, 3, 4]).unwrap();
    assert_eq!((four.top, four.left, four.bottom, four.right), (1, 4, 3, 2));

    assert_eq!(Sides::<i32>::from_values(&[]), None);
    assert_eq!(Sides::from_values(&[1, 2, 3, 4, 5]), None);
}

#[test]
fn test_sides_width_and_height() {
    let sides = Sides::from_values(&[1, 2, 3, 4]).unwrap();
    assert_eq!(sides.width(), 6);
    assert_eq!(sides.height(), 4);
}
