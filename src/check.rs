use crate::node;
use serde_json::Value;
use std::any::Any;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// Signature for caller-supplied test functions.
///
/// A test function receives the candidate node, the node's index within its parent (if one was given), the parent
/// (if one was given), and the caller's invocation context, exactly as they were passed to
/// [`is_element`](crate::is_element) or [`Check::matches`]. It only ever sees elements; the non-element cases are
/// filtered out before it is consulted.
pub type TestFn = dyn Fn(&Value, Option<f64>, Option<&Value>, Option<&dyn Any>) -> bool + Send + Sync;

/// What to match an element against.
///
/// Tests only ever match elements: a node whose `type` is `"element"` and which has a string `tagName`. Every
/// variant checks that much on its own, so a compiled test is safe to apply to arbitrary values.
pub enum Test {
    /// Matches any element.
    Any,
    /// Matches an element whose `tagName` equals this string exactly. Case-sensitive, no normalization.
    Tag(String),
    /// Matches an element for which the function returns `true`.
    Func(Arc<TestFn>),
    /// Matches when any entry matches. An empty list matches nothing, elements included.
    AnyOf(Vec<Test>),
}

impl Test {
    /// Wraps a closure as a [`Test::Func`].
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&Value, Option<f64>, Option<&Value>, Option<&dyn Any>) -> bool + Send + Sync + 'static,
    {
        Self::Func(Arc::new(f))
    }

    /// Reads a test that arrived as data.
    ///
    /// JSON `null` means any element, a string is a tag name, and an array is a list of tests (its entries read
    /// recursively, so `[null]` also matches any element). Anything else is not a test:
    ///
    /// ```
    /// use elq::Test;
    /// use serde_json::json;
    ///
    /// assert_eq!(Test::from_value(&json!(["div", "span"])).is_ok(), true);
    ///
    /// let err = Test::from_value(&json!(42)).unwrap_err();
    /// assert_eq!(err.to_string(), "Expected function, string, or array as test");
    /// ```
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Null => Ok(Self::Any),
            Value::String(tag) => Ok(Self::Tag(tag.clone())),
            Value::Array(entries) => {
                let mut tests = Vec::with_capacity(entries.len());
                for entry in entries {
                    tests.push(Self::from_value(entry)?);
                }
                Ok(Self::AnyOf(tests))
            }
            _ => Err(Error::BadTest),
        }
    }
}

impl Clone for Test {
    fn clone(&self) -> Self {
        match self {
            Self::Any => Self::Any,
            Self::Tag(tag) => Self::Tag(tag.clone()),
            Self::Func(f) => Self::Func(Arc::clone(f)),
            Self::AnyOf(tests) => Self::AnyOf(tests.clone()),
        }
    }
}

impl Debug for Test {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
            Self::AnyOf(tests) => f.debug_tuple("AnyOf").field(tests).finish(),
        }
    }
}

impl PartialEq for Test {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Any, Self::Any) => true,
            (Self::Tag(t1), Self::Tag(t2)) => t1 == t2,
            (Self::Func(f1), Self::Func(f2)) => std::ptr::addr_eq(Arc::as_ptr(f1), Arc::as_ptr(f2)),
            (Self::AnyOf(a1), Self::AnyOf(a2)) => a1 == a2,
            _ => false,
        }
    }
}

impl From<&str> for Test {
    fn from(tag: &str) -> Self {
        Self::Tag(tag.to_string())
    }
}

impl From<String> for Test {
    fn from(tag: String) -> Self {
        Self::Tag(tag)
    }
}

impl TryFrom<&Value> for Test {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// Returned when a call's test, index, or parent argument has the wrong shape.
///
/// These are all malformed calls, not malformed data: an absent or non-element node is never an error, just a
/// `false` result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Error {
    /// The test was not nullish, a string, a function, or a list.
    BadTest,
    /// The index was negative or infinite.
    BadIndex,
    /// The parent lacked a node's `type` or a `children` sequence.
    BadParent,
    /// Only one of index and parent was supplied.
    UnpairedIndex,
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Error::BadTest => "Expected function, string, or array as test",
            Error::BadIndex => "Expected positive finite index for child node",
            Error::BadParent => "Expected parent node",
            Error::UnpairedIndex => "Expected both parent and index",
        };
        f.write_str(message)
    }
}

/// A [Test] compiled into its canonical, directly-invokable form.
///
/// A `Check` is pure and stateless: it is `Clone`, `Send`, and `Sync`, so callers who apply one test to many nodes
/// can compile it once (see [convert]) and share it freely, including across threads.
#[derive(Clone)]
pub enum Check {
    /// Any element.
    Elem,
    /// An element with exactly this `tagName`.
    Tag(String),
    /// An element for which the function returns `true`.
    Func(Arc<TestFn>),
    /// Any entry, left to right, short-circuiting on the first match.
    AnyOf(Vec<Check>),
}

impl Check {
    /// Applies this check to a candidate value.
    ///
    /// Safe to call on arbitrary values, not just pre-validated elements: every arm re-verifies element-ness before
    /// consulting its own match logic. The index, parent, and context are passed through to [`Test::Func`]
    /// functions unchanged and are otherwise ignored; in particular, `context` is never inspected here.
    ///
    /// Unlike [`is_element`](crate::is_element), this does not validate the index or parent arguments. It assumes
    /// the caller already did, if it cares.
    pub fn matches(&self, node: &Value, index: Option<f64>, parent: Option<&Value>, context: Option<&dyn Any>) -> bool {
        match self {
            Check::Elem => node::element_like(node),
            Check::Tag(tag) => node::element_like(node) && node::tag_name(node) == Some(tag.as_str()),
            Check::Func(f) => node::element_like(node) && f(node, index, parent, context),
            Check::AnyOf(checks) => checks.iter().any(|check| check.matches(node, index, parent, context)),
        }
    }
}

impl Debug for Check {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Elem => f.write_str("Elem"),
            Self::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
            Self::AnyOf(checks) => f.debug_tuple("AnyOf").field(checks).finish(),
        }
    }
}

/// Compiles a test into a [Check].
///
/// An absent test compiles to [`Check::Elem`], the plain "is this an element" check; the other shapes map over
/// structurally, recursively for lists. Compiling the same test twice yields behaviorally identical checks.
pub fn convert(test: Option<&Test>) -> Check {
    match test {
        None | Some(Test::Any) => Check::Elem,
        Some(Test::Tag(tag)) => Check::Tag(tag.clone()),
        Some(Test::Func(f)) => Check::Func(Arc::clone(f)),
        Some(Test::AnyOf(tests)) => Check::AnyOf(tests.iter().map(|test| convert(Some(test))).collect()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn from_value_shapes() {
        assert_eq!(Test::from_value(&json!(null)), Ok(Test::Any));
        assert_eq!(Test::from_value(&json!("div")), Ok(Test::Tag("div".to_string())));
        assert_eq!(
            Test::from_value(&json!(["div", null, ["strong"]])),
            Ok(Test::AnyOf(vec![
                Test::Tag("div".to_string()),
                Test::Any,
                Test::AnyOf(vec![Test::Tag("strong".to_string())]),
            ]))
        );
        assert_eq!(Test::from_value(&json!(5)), Err(Error::BadTest));
        assert_eq!(Test::from_value(&json!(true)), Err(Error::BadTest));
        assert_eq!(Test::from_value(&json!({})), Err(Error::BadTest));
        assert_eq!(Test::from_value(&json!(["div", 5])), Err(Error::BadTest));
    }

    #[test]
    fn error_messages() {
        assert_eq!(Error::BadTest.to_string(), "Expected function, string, or array as test");
        assert_eq!(Error::BadIndex.to_string(), "Expected positive finite index for child node");
        assert_eq!(Error::BadParent.to_string(), "Expected parent node");
        assert_eq!(Error::UnpairedIndex.to_string(), "Expected both parent and index");
    }

    #[test]
    fn elem_check() {
        let check = convert(None);
        assert!(check.matches(&element("div"), None, None, None));
        assert!(!check.matches(&json!({"type": "text", "value": "hi"}), None, None, None));
        assert!(!check.matches(&json!({"type": "element"}), None, None, None));
        assert!(!check.matches(&json!({"type": "element", "tagName": 5}), None, None, None));
        assert!(!check.matches(&json!("element"), None, None, None));
        assert!(!check.matches(&json!(null), None, None, None));
    }

    #[test]
    fn explicit_any_compiles_like_absent() {
        let check = convert(Some(&Test::Any));
        assert!(check.matches(&element("div"), None, None, None));
        assert!(!check.matches(&json!({"type": "text"}), None, None, None));
    }

    #[test]
    fn tag_check() {
        let check = convert(Some(&Test::from("div")));
        assert!(check.matches(&element("div"), None, None, None));
        assert!(!check.matches(&element("DIV"), None, None, None));
        assert!(!check.matches(&element("span"), None, None, None));
        assert!(!check.matches(&json!({"type": "text"}), None, None, None));

        let empty = convert(Some(&Test::from("")));
        assert!(empty.matches(&element(""), None, None, None));
        assert!(!empty.matches(&element("div"), None, None, None));
    }

    #[test]
    fn func_check_sees_all_args_once() {
        let parent = json!({"type": "root", "children": []});
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_in_probe = Arc::clone(&calls);
        let parent_in_probe = parent.clone();
        let test = Test::func(move |node, index, parent, context| {
            calls_in_probe.fetch_add(1, Ordering::SeqCst);
            assert_eq!(node, &element("div"));
            assert_eq!(index, Some(3.0));
            assert_eq!(parent, Some(&parent_in_probe));
            let ctx = context.expect("expected a context");
            assert_eq!(ctx.downcast_ref::<&str>(), Some(&"hello"));
            true
        });

        let check = convert(Some(&test));
        assert!(check.matches(&element("div"), Some(3.0), Some(&parent), Some(&"hello")));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn func_check_without_context() {
        let test = Test::func(|_, index, parent, context| {
            assert_eq!(index, None);
            assert_eq!(parent, None);
            assert!(context.is_none());
            false
        });
        assert!(!convert(Some(&test)).matches(&element("div"), None, None, None));
    }

    #[test]
    fn func_not_called_for_non_element() {
        let test = Test::func(|_, _, _, _| panic!("test function invoked for a non-element"));
        let check = convert(Some(&test));
        assert!(!check.matches(&json!({"type": "text"}), None, None, None));
        assert!(!check.matches(&json!(42), None, None, None));
    }

    #[test]
    fn any_of_check() {
        let check = convert(Some(&Test::AnyOf(vec![Test::from("div"), Test::from("strong")])));
        assert!(check.matches(&element("div"), None, None, None));
        assert!(check.matches(&element("strong"), None, None, None));
        assert!(!check.matches(&element("em"), None, None, None));
        assert!(!check.matches(&json!({"type": "text"}), None, None, None));
    }

    #[test]
    fn empty_list_matches_nothing() {
        let check = convert(Some(&Test::AnyOf(Vec::new())));
        assert!(!check.matches(&element("div"), None, None, None));
    }

    #[test]
    fn any_of_short_circuits() {
        let test = Test::AnyOf(vec![
            Test::from("div"),
            Test::func(|_, _, _, _| panic!("entries after the first match should not be consulted")),
        ]);
        assert!(convert(Some(&test)).matches(&element("div"), None, None, None));
    }

    #[test]
    fn null_entry_matches_any_element() {
        let test = Test::from_value(&json!([null])).unwrap();
        let check = convert(Some(&test));
        assert!(check.matches(&element("div"), None, None, None));
        assert!(!check.matches(&json!({"type": "text"}), None, None, None));
    }

    #[test]
    fn checks_are_shareable() {
        fn assert_shareable<T: Clone + Send + Sync>() {}
        assert_shareable::<Test>();
        assert_shareable::<Check>();
    }

    #[test]
    fn test_eq_is_by_function_identity() {
        let f = Test::func(|_, _, _, _| true);
        assert_eq!(f, f.clone());
        assert_ne!(f, Test::func(|_, _, _, _| true));
        assert_eq!(Test::from("div"), Test::Tag("div".to_string()));
        assert_ne!(Test::from("div"), Test::Any);
    }

    fn element(tag: &str) -> Value {
        json!({"type": "element", "tagName": tag})
    }
}
