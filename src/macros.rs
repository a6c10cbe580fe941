/// Builds a [`ZonValue`](crate::ZonValue) from JSON-like syntax.
///
/// Object keys are string literals written without the leading dot.
///
/// # Examples
///
/// ```rust
/// use serde_zon::{zon, to_string};
///
/// let config = zon!({
///     "name": "app",
///     "mode": ".release",
///     "ports": [8080, 8081],
///     "debug": false
/// });
/// assert_eq!(
///     to_string(&config).unwrap(),
///     ".{.name = \"app\", .mode = .release, .ports = .{8080, 8081}, .debug = false}"
/// );
/// ```
#[macro_export]
macro_rules! zon {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::zon!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::ZonMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::ZonMap::new();
        $(
            object.insert($key.to_string(), $crate::zon!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Any other expression goes through `to_value`.
    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    }};
}

#[cfg(test)]
mod tests {
    use crate::{Value, ZonMap};

    #[test]
    fn test_zon_macro_primitives() {
        assert_eq!(zon!(null), Value::Null);
        assert_eq!(zon!(true), Value::Bool(true));
        assert_eq!(zon!(false), Value::Bool(false));
        assert_eq!(zon!(42), Value::Int(42));
        assert_eq!(zon!(3.5), Value::Float(3.5));
        assert_eq!(zon!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_zon_macro_arrays() {
        assert_eq!(zon!([]), Value::Array(vec![]));
        assert_eq!(
            zon!([1, "two", null,]),
            Value::Array(vec![Value::Int(1), Value::from("two"), Value::Null])
        );
    }

    #[test]
    fn test_zon_macro_objects() {
        assert_eq!(zon!({}), Value::Object(ZonMap::new()));

        let obj = zon!({
            "name": "Alice",
            "nested": { "ok": true }
        });
        let map = obj.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("name"), Some(&Value::from("Alice")));
        assert_eq!(obj.get("nested").and_then(|n| n.get("ok")), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_zon_macro_expressions() {
        let n = 7u8;
        assert_eq!(zon!(n), Value::UInt(7));
        assert_eq!(zon!(vec![1, 2]), Value::Array(vec![Value::Int(1), Value::Int(2)]));
    }
}
