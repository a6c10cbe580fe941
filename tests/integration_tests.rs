use serde::{Deserialize, Serialize};
use serde_zon::{
    from_reader, from_slice, from_str, from_value, to_string, to_string_pretty,
    to_string_with_options, to_value, to_writer, Error, Value, ZonOptions,
};
use std::collections::{BTreeMap, HashMap};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
    note: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Shape {
    Empty,
    Circle(f64),
    Line(i32, i32),
    Rect { w: u32, h: u32 },
}

fn sample_user() -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    }
}

#[test]
fn test_simple_struct() {
    let user = sample_user();

    let zon = to_string(&user).unwrap();
    println!("User ZON: {}", zon);
    assert_eq!(
        zon,
        ".{.id = 123, .name = \"Alice\", .active = true, .tags = .{\"admin\", \"developer\"}}"
    );

    let user_back: User = from_str(&zon).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_nested_struct() {
    let order = Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        total: 109.97,
        note: None,
    };

    let zon = to_string_pretty(&order).unwrap();
    println!("Order ZON:\n{}", zon);
    assert!(zon.contains("\n    .note = null,\n"));

    let order_back: Order = from_str(&zon).unwrap();
    assert_eq!(order, order_back);
}

#[test]
fn test_array_of_objects() {
    let products = vec![
        Product {
            sku: "A001".to_string(),
            price: 10.99,
            quantity: 5,
        },
        Product {
            sku: "B002".to_string(),
            price: 15.99,
            quantity: 3,
        },
    ];

    let zon = to_string(&products).unwrap();
    assert_eq!(
        zon,
        ".{.{.sku = \"A001\", .price = 10.99, .quantity = 5}, .{.sku = \"B002\", .price = 15.99, .quantity = 3}}"
    );

    let products_back: Vec<Product> = from_str(&zon).unwrap();
    assert_eq!(products, products_back);
}

#[test]
fn test_primitives() {
    assert_roundtrip(&42i32);
    assert_roundtrip(&3.5f64);
    assert_roundtrip(&true);
    assert_roundtrip(&false);
    assert_roundtrip(&"hello world".to_string());
    assert_roundtrip(&'z');
    assert_roundtrip(&());
    assert_roundtrip(&vec![1, 2, 3, 4, 5]);
    assert_roundtrip(&(1u8, "two".to_string(), 3.0f32));
}

#[test]
fn test_numbers() {
    assert_roundtrip(&-128i8);
    assert_roundtrip(&32767i16);
    assert_roundtrip(&-2147483648i32);
    assert_roundtrip(&i64::MIN);
    assert_roundtrip(&i64::MAX);
    assert_roundtrip(&i128::MIN);
    assert_roundtrip(&255u8);
    assert_roundtrip(&65535u16);
    assert_roundtrip(&4294967295u32);
    assert_roundtrip(&u64::MAX);
    assert_roundtrip(&u128::MAX);

    assert_roundtrip(&0.0f32);
    assert_roundtrip(&-2.5f32);
    assert_roundtrip(&4.25f64);
    assert_roundtrip(&1e300f64);
    assert_roundtrip(&-5.75e-10f64);
}

#[test]
fn test_number_literal_forms() {
    assert_eq!(from_str::<i32>("0x1F").unwrap(), 31);
    assert_eq!(from_str::<i64>("-0x10").unwrap(), -16);
    assert!(matches!(
        from_str::<u16>("+12"),
        Err(Error::InvalidNumber { .. })
    ));
    assert_eq!(from_str::<f64>("1.5E2").unwrap(), 150.0);
    assert_eq!(from_str::<f64>("7").unwrap(), 7.0);
    assert_eq!(from_str::<Value>("0x1F").unwrap(), Value::UInt(31));
    assert_eq!(from_str::<Value>("-3").unwrap(), Value::Int(-3));
    assert_eq!(from_str::<Value>("2.0").unwrap(), Value::Float(2.0));
    assert_eq!(
        from_str::<Value>("18446744073709551615").unwrap(),
        Value::UInt(u64::MAX)
    );
}

#[test]
fn test_integer_out_of_range() {
    let err = from_str::<u8>("300").unwrap_err();
    assert!(matches!(err, Error::InvalidNumber { .. }));

    let err = from_str::<u32>("-1").unwrap_err();
    assert!(matches!(err, Error::InvalidNumber { .. }));

    let err = from_str::<Value>("99999999999999999999999").unwrap_err();
    assert!(matches!(err, Error::InvalidNumber { .. }));
}

#[test]
fn test_non_finite_floats_encode_as_null() {
    assert_eq!(to_string(&f64::NAN).unwrap(), "null");
    assert_eq!(to_string(&vec![f32::INFINITY]).unwrap(), ".{null}");
    assert_eq!(from_str::<f64>("null").unwrap(), 0.0);
}

#[test]
fn test_options() {
    let user = sample_user();

    let options = ZonOptions::new().with_indent("\t");
    let zon = to_string_with_options(&user, options).unwrap();
    assert_eq!(
        zon,
        ".{\n\t.id = 123,\n\t.name = \"Alice\",\n\t.active = true,\n\t.tags = .{\n\t\t\"admin\",\n\t\t\"developer\",\n\t},\n}"
    );
    let user_back: User = from_str(&zon).unwrap();
    assert_eq!(user, user_back);

    let mut map = HashMap::new();
    map.insert("zeta", 1);
    map.insert("alpha", 2);
    map.insert("mid", 3);
    let options = ZonOptions::new().with_sorted_keys(true);
    assert_eq!(
        to_string_with_options(&map, options).unwrap(),
        ".{.alpha = 2, .mid = 3, .zeta = 1}"
    );
}

#[test]
fn test_to_value() {
    let value = to_value(&sample_user()).unwrap();

    match value {
        Value::Object(obj) => {
            assert_eq!(obj.get("id"), Some(&Value::UInt(123)));
            assert_eq!(obj.get("name"), Some(&Value::String("Alice".to_string())));
            assert_eq!(obj.get("active"), Some(&Value::Bool(true)));

            if let Some(Value::Array(tags)) = obj.get("tags") {
                assert_eq!(tags.len(), 2);
                assert_eq!(tags[0], Value::String("admin".to_string()));
            } else {
                panic!("Expected tags to be an array");
            }
        }
        _ => panic!("Expected object"),
    }
}

#[test]
fn test_value_round_trip_through_typed() {
    let value: Value = from_str(".{ .id = 7, .name = \"Bob\", .active = false, .tags = .{} }").unwrap();
    let user: User = from_value(value).unwrap();
    assert_eq!(
        user,
        User {
            id: 7,
            name: "Bob".to_string(),
            active: false,
            tags: vec![],
        }
    );
}

#[test]
fn test_empty_collections() {
    let empty_vec: Vec<i32> = vec![];
    assert_eq!(to_string(&empty_vec).unwrap(), ".{}");
    assert_eq!(to_string_pretty(&empty_vec).unwrap(), ".{}");
    assert_roundtrip(&empty_vec);

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Empty {}

    assert_roundtrip(&Empty {});
    assert_roundtrip(&BTreeMap::<String, i32>::new());
}

#[test]
fn test_special_strings() {
    let special_strings = vec![
        "",
        "hello, world",
        "line1\nline2",
        "tab\there",
        " leading space",
        "trailing space ",
        "true",
        "null",
        "123",
        ".{}",
        "// not a comment",
        "ünïcödé ✓",
        "0x1F",
        ".red",
    ];

    for s in special_strings {
        println!("Testing string: {:?}", s);
        assert_roundtrip(&s.to_string());
    }
}

#[test]
fn test_quote_in_string_is_rejected() {
    let err = to_string(&"say \"hi\"").unwrap_err();
    assert_eq!(err, Error::UnrepresentableString("say \"hi\"".to_string()));
}

#[test]
fn test_enums() {
    assert_eq!(to_string(&Shape::Empty).unwrap(), ".Empty");
    assert_eq!(to_string(&Shape::Circle(1.5)).unwrap(), ".{.Circle = 1.5}");
    assert_eq!(to_string(&Shape::Line(1, -2)).unwrap(), ".{.Line = .{1, -2}}");
    assert_eq!(
        to_string(&Shape::Rect { w: 4, h: 3 }).unwrap(),
        ".{.Rect = .{.w = 4, .h = 3}}"
    );

    for shape in [
        Shape::Empty,
        Shape::Circle(2.0),
        Shape::Line(0, 9),
        Shape::Rect { w: 1, h: 2 },
    ] {
        assert_roundtrip(&shape);
    }

    assert_eq!(from_str::<Shape>("\"Empty\"").unwrap(), Shape::Empty);
    assert_eq!(from_str::<Shape>("Empty").unwrap(), Shape::Empty);
    assert!(from_str::<Shape>(".Hexagon").is_err());
}

#[test]
fn test_unknown_fields_are_skipped() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct OnlyX {
        x: i32,
    }

    let value: OnlyX = from_str(".{ .x = 1, .unknown = 2, .nested = .{ .deep = .{1, 2} } }").unwrap();
    assert_eq!(value, OnlyX { x: 1 });
}

#[test]
fn test_renamed_and_defaulted_fields() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Config {
        #[serde(rename = "listen_port")]
        port: u16,
        #[serde(default)]
        verbose: bool,
    }

    let config: Config = from_str(".{ .listen_port = 8080 }").unwrap();
    assert_eq!(
        config,
        Config {
            port: 8080,
            verbose: false
        }
    );
    assert_eq!(
        to_string(&config).unwrap(),
        ".{.listen_port = 8080, .verbose = false}"
    );
}

#[test]
fn test_null_into_non_optional_fields() {
    let user: User = from_str(".{ .id = null, .name = null, .active = null, .tags = null }").unwrap();
    assert_eq!(
        user,
        User {
            id: 0,
            name: String::new(),
            active: false,
            tags: vec![],
        }
    );

    let product: Product = from_str("null").unwrap();
    assert_eq!(product.quantity, 0);
    assert!(matches!(
        from_str::<Shape>("null"),
        Err(Error::InvalidDestination(_))
    ));
}

#[test]
fn test_comments_and_trailing_commas() {
    let input = "
        // list of ports
        .{
            80,   // http
            443,  // https
        }
    ";
    assert_eq!(from_str::<Vec<u16>>(input).unwrap(), vec![80, 443]);
    assert_eq!(from_str::<Vec<i32>>(".{1,2,3,}").unwrap(), vec![1, 2, 3]);
    assert_eq!(from_str::<Vec<i32>>(".{}").unwrap(), Vec::<i32>::new());
}

#[test]
fn test_generic_map_keys() {
    let map: HashMap<String, i32> = from_str(".{ .a = 1, .b = 2 }").unwrap();
    assert_eq!(map.get("a"), Some(&1));
    assert_eq!(map.get("b"), Some(&2));

    let mut dotted = BTreeMap::new();
    dotted.insert(".already".to_string(), 1);
    assert_eq!(to_string(&dotted).unwrap(), ".{.already = 1}");

    let mut bad = BTreeMap::new();
    bad.insert("two words".to_string(), 1);
    assert!(matches!(to_string(&bad), Err(Error::InvalidKey(_))));
}

#[test]
fn test_nested_destinations_drive_parsing() {
    let input = ".{ .{ .a = .{1, 2} }, .{ .b = .{} } }";
    let parsed: Vec<HashMap<String, Vec<u8>>> = from_str(input).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0]["a"], vec![1, 2]);
    assert!(parsed[1]["b"].is_empty());
}

#[test]
fn test_tuple_length_mismatch() {
    assert!(from_str::<(i32, i32)>(".{1, 2, 3}").is_err());
    assert!(from_str::<(i32, i32)>(".{1}").is_err());
    assert_eq!(from_str::<[u8; 3]>(".{1, 2, 3}").unwrap(), [1, 2, 3]);
}

#[test]
fn test_malformed_input_reports_errors() {
    let cases = [
        "",
        ".{",
        ".{ .a = ",
        ".{ .a = }",
        ". ",
        "\"unterminated",
        ".{ 1, 2 ",
        "}",
        "=",
    ];
    for input in cases {
        assert!(from_str::<Value>(input).is_err(), "{input:?} should fail");
    }

    assert!(matches!(
        from_str::<Value>("\"open"),
        Err(Error::UnterminatedString { .. })
    ));
    assert!(matches!(
        from_str::<Value>(".{ .a = 1"),
        Err(Error::UnexpectedEnd { .. })
    ));
    assert!(matches!(
        from_str::<bool>("yes"),
        Err(Error::InvalidBoolean { .. })
    ));
    assert!(matches!(
        from_slice::<String>(b"\"\xff\""),
        Err(Error::InvalidUtf8 { .. })
    ));
}

#[test]
fn test_depth_limit() {
    let deep = ".{".repeat(500);
    assert!(matches!(
        from_str::<Value>(&deep),
        Err(Error::DepthLimitExceeded { .. })
    ));

    let nested = format!("{}{}", ".{".repeat(100), "}".repeat(100));
    assert!(from_str::<Value>(&nested).is_ok());
}

#[test]
fn test_io_helpers() {
    let user = sample_user();
    let mut buffer = Vec::new();
    to_writer(&mut buffer, &user).unwrap();
    let user_back: User = from_reader(buffer.as_slice()).unwrap();
    assert_eq!(user, user_back);
}

fn assert_roundtrip<T>(original: &T)
where
    T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug,
{
    let zon = to_string(original).unwrap();
    let deserialized: T = from_str(&zon).unwrap();
    assert_eq!(*original, deserialized);
}
