use crate::check::{convert, Error, Test};
use crate::node;
use serde_json::Value;
use std::any::Any;

/// Checks whether `node` is an element, and whether it passes the given test.
///
/// An absent test matches any element. The index and parent describe where `node` sits in its tree; they must be
/// supplied together, the index must be a non-negative finite number, and the parent must itself look like a node
/// with a `children` sequence. The context is handed to [`Test::Func`] functions untouched.
///
/// The argument checks run in a fixed order: the test is compiled first, then the index and parent are validated.
/// Only then, an absent or non-node `node` yields `Ok(false)`, which means a malformed index still errors even
/// when the node could never have matched. The index/parent pairing is checked last, after the node short-circuit.
///
/// ```
/// use elq::{is_element, Test};
/// use serde_json::json;
///
/// let node = json!({"type": "element", "tagName": "div"});
/// assert_eq!(is_element(Some(&node), None, None, None, None), Ok(true));
/// assert_eq!(is_element(Some(&node), Some(&Test::from("div")), None, None, None), Ok(true));
/// assert_eq!(is_element(Some(&node), Some(&Test::from("span")), None, None, None), Ok(false));
/// assert_eq!(is_element(Some(&json!({"type": "text"})), None, None, None, None), Ok(false));
/// ```
pub fn is_element(
    node: Option<&Value>,
    test: Option<&Test>,
    index: Option<f64>,
    parent: Option<&Value>,
    context: Option<&dyn Any>,
) -> Result<bool, Error> {
    let check = convert(test);

    if let Some(index) = index {
        if index < 0.0 || index == f64::INFINITY {
            return Err(Error::BadIndex);
        }
    }

    if let Some(parent) = parent {
        if !node::parent_like(parent) {
            return Err(Error::BadParent);
        }
    }

    let Some(node) = node else {
        return Ok(false);
    };
    if !node::node_like(node) {
        return Ok(false);
    }

    if parent.is_some() != index.is_some() {
        return Err(Error::UnpairedIndex);
    }

    Ok(check.matches(node, index, parent, context))
}

/// Like [is_element], but takes the test as data.
///
/// The test is read via [`Test::from_value`] before anything else happens, so a malformed test errors first, even
/// when `node` is absent and the call would otherwise have returned `Ok(false)`. Function tests can't arrive as
/// data, so there is no invocation context here.
pub fn is_element_value(
    node: Option<&Value>,
    test: Option<&Value>,
    index: Option<f64>,
    parent: Option<&Value>,
) -> Result<bool, Error> {
    let test = match test {
        None => None,
        Some(value) => Some(Test::from_value(value)?),
    };
    is_element(node, test.as_ref(), index, parent, None)
}
