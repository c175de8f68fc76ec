use serde_json::Value;

/// Whether `value` looks like a tree node: an object with a nonempty string `type`.
pub(crate) fn node_like(value: &Value) -> bool {
    kind(value).is_some_and(|k| !k.is_empty())
}

/// Whether `value` is an element: a node whose `type` is `"element"` and whose `tagName` is a string.
///
/// The `tagName` may be empty; only its shape matters here.
pub(crate) fn element_like(value: &Value) -> bool {
    kind(value) == Some("element") && tag_name(value).is_some()
}

/// Whether `value` could be a parent: a node that also carries a `children` array.
///
/// The children themselves are never inspected.
pub(crate) fn parent_like(value: &Value) -> bool {
    node_like(value)
        && value
            .as_object()
            .and_then(|obj| obj.get("children"))
            .is_some_and(Value::is_array)
}

pub(crate) fn tag_name(value: &Value) -> Option<&str> {
    value.as_object()?.get("tagName")?.as_str()
}

fn kind(value: &Value) -> Option<&str> {
    value.as_object()?.get("type")?.as_str()
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn nodes() {
        assert!(node_like(&json!({"type": "text", "value": "hi"})));
        assert!(node_like(&json!({"type": "element", "tagName": "div"})));
        assert!(!node_like(&json!({"type": ""})));
        assert!(!node_like(&json!({"type": 5})));
        assert!(!node_like(&json!({"tagName": "div"})));
        assert!(!node_like(&json!("element")));
        assert!(!node_like(&json!(null)));
        assert!(!node_like(&json!([{"type": "text"}])));
    }

    #[test]
    fn elements() {
        assert!(element_like(&json!({"type": "element", "tagName": "div"})));
        assert!(element_like(&json!({"type": "element", "tagName": ""})));
        assert!(!element_like(&json!({"type": "element"})));
        assert!(!element_like(&json!({"type": "element", "tagName": 5})));
        assert!(!element_like(&json!({"type": "text", "tagName": "div"})));
    }

    #[test]
    fn parents() {
        assert!(parent_like(&json!({"type": "root", "children": []})));
        assert!(parent_like(&json!({"type": "element", "tagName": "ul", "children": [{"type": "text"}]})));
        assert!(!parent_like(&json!({"type": "root"})));
        assert!(!parent_like(&json!({"children": []})));
        assert!(!parent_like(&json!({"type": "", "children": []})));
        assert!(!parent_like(&json!({"type": "root", "children": "not a list"})));
    }
}
