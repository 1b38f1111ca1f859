use toml::Value;

/// Overlay `right` onto `left`, merging nested tables and arrays up to
/// `depth` levels deep and replacing anything below that.
///
/// Array items that are tables with a `name` key are matched by name: an
/// item in `right` merges into the `left` item of the same name, and unnamed
/// or unmatched items are appended. This is what lets a user file tweak one
/// built-in style:
///
/// ```toml
/// [[styles]]
/// name  = "Code"
/// font  = "Cascadia Mono"
/// ```
pub fn merge_values(left: Value, right: Value, depth: usize) -> Value {
  fn name_of(value: &Value) -> Option<&str> {
    value.get("name").and_then(Value::as_str)
  }

  match (left, right) {
    (Value::Array(mut left_items), Value::Array(right_items)) if depth > 0 => {
      left_items.reserve(right_items.len());
      for item in right_items {
        let position = name_of(&item)
          .and_then(|name| left_items.iter().position(|left| name_of(left) == Some(name)));
        match position {
          Some(position) => {
            let merged = merge_values(left_items.remove(position), item, depth - 1);
            left_items.insert(position, merged);
          },
          None => left_items.push(item),
        }
      }
      Value::Array(left_items)
    },
    (Value::Table(mut left_map), Value::Table(right_map)) if depth > 0 => {
      for (key, value) in right_map {
        let merged = match left_map.remove(&key) {
          Some(existing) => merge_values(existing, value, depth - 1),
          None => value,
        };
        left_map.insert(key, merged);
      }
      Value::Table(left_map)
    },
    (_, value) => value,
  }
}
