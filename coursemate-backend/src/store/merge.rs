//! Default-merging of a loaded JSON document over the built-in defaults.

use serde_json::Value;

/// Recursively backfill `loaded` from `defaults`.
///
/// For objects, every key present in `defaults` but missing (or `null`) in
/// `loaded` is copied over; keys present in both are merged recursively;
/// keys only in `loaded` are kept. Non-object values, arrays included, are
/// taken from `loaded` unchanged. Returns the number of keys inserted.
pub fn merge_defaults(loaded: &mut Value, defaults: &Value) -> usize {
    let (Value::Object(target), Value::Object(base)) = (loaded, defaults) else {
        return 0;
    };

    let mut inserted = 0;
    for (key, default_value) in base {
        let fill = match target.get(key) {
            None => true,
            Some(Value::Null) => !default_value.is_null(),
            Some(_) => false,
        };
        if fill {
            target.insert(key.clone(), default_value.clone());
            inserted += 1;
        } else if let Some(existing) = target.get_mut(key) {
            inserted += merge_defaults(existing, default_value);
        }
    }
    inserted
}
