#[macro_export]
macro_rules! toon {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty list
    ([]) => {
        $crate::Value::List(vec![])
    };

    // Handle non-empty list
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::List(vec![$($crate::toon!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::toon!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Fallback for any other expression
    ($other:expr) => {{
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    }};
}

#[cfg(test)]
mod tests {
    use crate::{Map, Value};

    #[test]
    fn test_toon_macro_primitives() {
        assert_eq!(toon!(null), Value::Null);
        assert_eq!(toon!(true), Value::Bool(true));
        assert_eq!(toon!(false), Value::Bool(false));
        assert_eq!(toon!(42), Value::Int(42));
        assert_eq!(toon!(3.5), Value::Float(3.5));
        assert_eq!(toon!("hello"), Value::Str("hello".to_string()));
    }

    #[test]
    fn test_toon_macro_lists() {
        assert_eq!(toon!([]), Value::List(vec![]));

        let list = toon!([1, 2, 3]);
        assert_eq!(
            list,
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }

    #[test]
    fn test_toon_macro_objects() {
        assert_eq!(toon!({}), Value::Object(Map::new()));

        let object = toon!({
            "name": "Alice",
            "age": 30
        });

        match object {
            Value::Object(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map.get("name"), Some(&Value::Str("Alice".to_string())));
                assert_eq!(map.get("age"), Some(&Value::Int(30)));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_toon_macro_nested() {
        let value = toon!({
            "user": {"name": "Alice", "tags": ["a", "b"]},
            "count": 2
        });
        let object = value.as_object().unwrap();
        let user = object.get("user").unwrap().as_object().unwrap();
        assert_eq!(user.get("tags").unwrap().as_list().unwrap().len(), 2);
    }
}
