//! Deterministic interaction runtime for the HTML documentation pages
//! produced by an ANTLR4 railroad-diagram generator.
//!
//! The generated pages carry a small interaction layer: a global control that
//! shows or hides every rule block at once, and one clickable header per
//! ruleset that shows or hides the block it names. This crate hosts that
//! behavior natively: it parses the page into an in-memory DOM, wires the
//! click handlers through [`toggler::install`], and models the fade
//! animations on a virtual clock so tests can drive clicks and assert
//! visibility without a browser.

use std::error::Error as StdError;
use std::fmt;

mod dom;
mod effects;
mod html;
mod page;
mod runtime_state;
mod selector;
pub mod toggler;


pub use page::Page;
pub use runtime_state::{Action, Binding};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    Runtime(String),
    SelectorNotFound(String),
    UnsupportedSelector(String),
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::Runtime(msg) => write!(f, "runtime error: {msg}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
        }
    }
}

impl StdError for Error {}
