// Test serialization using json

use msdf_text::fonts::DefaultGlyph;
use msdf_text::{Align, Environment, Vec2, Winding, WrapMode, WrapOptions};
use serde::{de::Deserialize, ser::Serialize};
use std::cmp::PartialEq;
use std::fmt::Debug;

fn test<X: Debug + PartialEq + Serialize + for<'a> Deserialize<'a>>(x: X, t: &str) {
    match serde_json::to_string(&x) {
        Ok(text) => assert_eq!(text, t),
        Err(err) => panic!("Ser of '{x:?}' failed: {err}"),
    }

    match serde_json::from_str::<X>(t) {
        Ok(v) => assert_eq!(v, x),
        Err(err) => panic!("Deser of '{t}' failed: {err}"),
    }
}

#[test]
fn vec2() {
    test(Vec2(1.0, 2.0), "[1.0,2.0]");
}

#[test]
fn enums() {
    test(Align::Centre, "\"Centre\"");
    test(WrapMode::Pre, "\"Pre\"");
    test(WrapMode::NoWrap, "\"NoWrap\"");
    test(Winding::CounterClockwise, "\"CounterClockwise\"");
    test(DefaultGlyph::FirstInserted, "\"FirstInserted\"");
    test(
        DefaultGlyph::Priority(vec!['m', 'n']),
        "{\"Priority\":[\"m\",\"n\"]}",
    );
}

#[test]
fn wrap_options() {
    let opts = WrapOptions {
        mode: WrapMode::Greedy,
        max_width: Some(120.0),
        ..Default::default()
    };
    test(
        opts,
        "{\"mode\":\"Greedy\",\"max_width\":120.0,\"monospace\":false,\"start\":null,\"end\":null}",
    );
}

#[test]
fn partial_environment() {
    let env: Environment = serde_json::from_str("{}").unwrap();
    assert_eq!(env, Environment::default());

    let env: Environment =
        serde_json::from_str(r#"{"flip_y": true, "place": {"align": "Right"}}"#).unwrap();
    assert!(env.flip_y);
    assert_eq!(env.place.align, Align::Right);
    assert_eq!(env.place.tab_size, 4.0);
    assert_eq!(env.place.line_height, None);
    assert_eq!(env.wrap, WrapOptions::default());
    assert_eq!(env.winding, Winding::Clockwise);
}
