//! Check whether nodes in a JSON document tree are elements matching a test.
//!
//! A node is any JSON object with a string `type`; an element is a node whose `type` is `"element"` and which
//! carries a string `tagName`. A [Test] says what to match: any element, an exact tag name, a caller-supplied
//! function, or a list of those (any entry matching suffices). [is_element] applies a test to one node; it never
//! walks the tree for you.
//!
//! ```
//! use elq::{convert, is_element, Test};
//! use serde_json::json;
//!
//! let node = json!({"type": "element", "tagName": "div"});
//! assert_eq!(is_element(Some(&node), Some(&Test::from("div")), None, None, None), Ok(true));
//!
//! // Compile once, reuse across many nodes:
//! let check = convert(Some(&Test::AnyOf(vec![Test::from("div"), Test::from("strong")])));
//! assert!(check.matches(&node, None, None, None));
//! assert!(!check.matches(&json!({"type": "text", "value": "hi"}), None, None, None));
//! ```
//!
//! A `false` result conflates "not an element at all" with "an element that failed the test". Callers who need to
//! tell those apart should first check with no test, then apply their test.

mod check;
mod is_elem;
mod node;
pub mod run;

pub use check::{convert, Check, Error, Test, TestFn};
pub use is_elem::{is_element, is_element_value};
