use serde_zon::{from_str, to_string, zon, ZonMap, ZonValue};

#[test]
fn test_zon_macro_null() {
    let value = zon!(null);
    assert_eq!(value, ZonValue::Null);
}

#[test]
fn test_zon_macro_booleans() {
    assert_eq!(zon!(true), ZonValue::Bool(true));
    assert_eq!(zon!(false), ZonValue::Bool(false));
}

#[test]
fn test_zon_macro_numbers() {
    assert_eq!(zon!(42), ZonValue::Int(42));
    assert_eq!(zon!(3.5), ZonValue::Float(3.5));
    assert_eq!(zon!(-123), ZonValue::Int(-123));
    assert_eq!(zon!(7u64), ZonValue::UInt(7));
}

#[test]
fn test_zon_macro_strings() {
    assert_eq!(zon!("hello world"), ZonValue::String("hello world".to_string()));
    assert_eq!(zon!(""), ZonValue::String(String::new()));
    assert_eq!(zon!(".atom"), ZonValue::String(".atom".to_string()));
}

#[test]
fn test_zon_macro_arrays() {
    assert_eq!(zon!([]), ZonValue::Array(vec![]));

    assert_eq!(
        zon!([1, 2, 3]),
        ZonValue::Array(vec![ZonValue::Int(1), ZonValue::Int(2), ZonValue::Int(3)])
    );

    assert_eq!(
        zon!([1, "hello", true, null]),
        ZonValue::Array(vec![
            ZonValue::Int(1),
            ZonValue::String("hello".to_string()),
            ZonValue::Bool(true),
            ZonValue::Null,
        ])
    );
}

#[test]
fn test_zon_macro_objects() {
    assert_eq!(zon!({}), ZonValue::Object(ZonMap::new()));

    let simple_object = zon!({
        "name": "Alice",
        "age": 30
    });

    match simple_object {
        ZonValue::Object(ref obj) => {
            assert_eq!(obj.len(), 2);
            assert_eq!(obj.get("name"), Some(&ZonValue::String("Alice".to_string())));
            assert_eq!(obj.get("age"), Some(&ZonValue::Int(30)));
        }
        _ => panic!("Expected object"),
    }
}

#[test]
fn test_zon_macro_nested() {
    let nested = zon!({
        "user": {
            "id": 123,
            "name": "Bob",
            "active": true
        },
        "tags": ["admin", "developer"],
        "count": 42
    });

    let obj = nested.as_object().expect("Expected object");
    assert_eq!(obj.len(), 3);

    if let Some(ZonValue::Object(user)) = obj.get("user") {
        assert_eq!(user.get("id"), Some(&ZonValue::Int(123)));
        assert_eq!(user.get("name"), Some(&ZonValue::String("Bob".to_string())));
        assert_eq!(user.get("active"), Some(&ZonValue::Bool(true)));
    } else {
        panic!("Expected user to be an object");
    }

    if let Some(ZonValue::Array(tags)) = obj.get("tags") {
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[1], ZonValue::String("developer".to_string()));
    } else {
        panic!("Expected tags to be an array");
    }

    assert_eq!(obj.get("count"), Some(&ZonValue::Int(42)));
}

#[test]
fn test_zon_value_methods() {
    let null_val = zon!(null);
    assert!(null_val.is_null());
    assert!(!null_val.is_bool());
    assert!(!null_val.is_number());
    assert!(!null_val.is_string());
    assert!(!null_val.is_array());
    assert!(!null_val.is_object());

    let bool_val = zon!(true);
    assert!(bool_val.is_bool());
    assert_eq!(bool_val.as_bool(), Some(true));

    let str_val = zon!("hello");
    assert!(str_val.is_string());
    assert_eq!(str_val.as_str(), Some("hello"));

    let array_val = zon!([1, 2, 3]);
    assert!(array_val.is_array());
    assert_eq!(array_val.as_array().unwrap().len(), 3);

    let obj_val = zon!({"key": "value"});
    assert!(obj_val.is_object());
    assert_eq!(obj_val.as_object().unwrap().len(), 1);
}

#[test]
fn test_zon_macro_renders_and_parses_back() {
    let value = zon!({
        "name": "serde_zon",
        "kind": ".library",
        "mask": "0xFF",
        "deps": ["serde", "indexmap"],
        "nested": { "depth": 2 }
    });

    let text = to_string(&value).unwrap();
    assert_eq!(
        text,
        ".{.name = \"serde_zon\", .kind = .library, .mask = 0xFF, .deps = .{\"serde\", \"indexmap\"}, .nested = .{.depth = 2}}"
    );
    assert_eq!(value.to_string(), text);

    let back: ZonValue = from_str(&text).unwrap();
    assert_eq!(back.get("name"), value.get("name"));
    assert_eq!(back.get("nested"), value.get("nested"));
    // Bare tokens decode to what they denote, not the strings they came from.
    assert_eq!(back.get("kind"), Some(&ZonValue::from("library")));
    assert_eq!(back.get("mask"), Some(&ZonValue::UInt(255)));
}
