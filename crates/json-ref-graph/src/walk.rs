//! Depth-first JSON visitor.
//!
//! Nodes are visited in pre-order: a value first, then its children. Object
//! fields follow insertion order and array elements follow index order, so
//! two walks over the same value see the same node sequence.

use serde_json::Value;

/// What the walker does after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Descend into the node's children.
    Continue,
    /// Do not descend into this node.
    Skip,
}

/// Walk every node in a JSON value tree, calling `callback` on each.
///
/// Uses an explicit stack, so documents nested deeper than the call stack
/// allows are still walked.
pub fn walk<'a, F>(value: &'a Value, callback: &mut F)
where
    F: FnMut(&'a Value) -> Walk,
{
    let mut stack = vec![value];
    while let Some(node) = stack.pop() {
        if callback(node) == Walk::Skip {
            continue;
        }
        match node {
            Value::Array(arr) => stack.extend(arr.iter().rev()),
            Value::Object(obj) => stack.extend(obj.values().rev()),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn walks_scalar() {
        let mut visited = vec![];
        walk(&json!(42), &mut |v| {
            visited.push(v.clone());
            Walk::Continue
        });
        assert_eq!(visited, vec![json!(42)]);
    }

    #[test]
    fn walks_array_in_order() {
        let mut visited = vec![];
        walk(&json!([1, 2, 3]), &mut |v| {
            visited.push(v.clone());
            Walk::Continue
        });
        assert_eq!(visited, vec![json!([1, 2, 3]), json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn walks_nested_object_pre_order() {
        let val = json!({"a": {"b": 1}, "c": [2]});
        let mut visited = vec![];
        walk(&val, &mut |v| {
            visited.push(v.clone());
            Walk::Continue
        });
        assert_eq!(
            visited,
            vec![val.clone(), json!({"b": 1}), json!(1), json!([2]), json!(2)]
        );
    }

    #[test]
    fn skip_prunes_children() {
        let val = json!({"skip": {"x": 1}, "keep": {"y": 2}});
        let mut count = 0;
        walk(&val, &mut |v| {
            count += 1;
            if v.get("x").is_some() {
                Walk::Skip
            } else {
                Walk::Continue
            }
        });
        // root + skip + keep + 2
        assert_eq!(count, 4);
    }

    #[test]
    fn walks_deep_nesting() {
        let mut val = json!(0);
        for _ in 0..10_000 {
            val = Value::Array(vec![val]);
        }
        let mut count = 0;
        walk(&val, &mut |_| {
            count += 1;
            Walk::Continue
        });
        assert_eq!(count, 10_001);
        // Avoid a recursive drop of the deep value.
        let mut current = val;
        while let Value::Array(mut arr) = current {
            current = arr.pop().unwrap_or(Value::Null);
        }
    }
}
