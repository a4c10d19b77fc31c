//! Click wiring for the generated grammar documentation pages.
//!
//! The markup contract comes from the page template: one control with id
//! [`RULE_TOGGLE_ID`], any number of rule blocks with class
//! [`ELEMENTS_CLASS`], and one clickable header per ruleset carrying
//! [`RULESET_DATA_ATTR`] with the id of the block it controls. Every part of
//! the contract is optional at runtime; missing structure degrades to a
//! silent no-op, never an error.

use crate::{Action, Binding, Page, Result};

/// Id of the page-wide show/hide control.
pub const RULE_TOGGLE_ID: &str = "ruletoggle";
/// Class carried by every rule block the page-wide control toggles.
pub const ELEMENTS_CLASS: &str = "elements";
/// Class carried by each clickable ruleset header.
pub const RULESET_HEAD_CLASS: &str = "grammarlisthead";
/// Attribute on a header naming the id of the block it controls.
pub const RULESET_DATA_ATTR: &str = "data-ruleset";

/// Register the page's two click handlers behind the ready gate.
pub fn install(page: &mut Page) -> Result<()> {
    // show all-rules action
    let toggle_all = Binding::click(
        &format!("#{RULE_TOGGLE_ID}"),
        Action::fade_toggle_matching(&format!(".{ELEMENTS_CLASS}"))?,
    )?;

    // click action on each grammar rule set
    let toggle_ruleset = Binding::click(
        &format!(".{RULESET_HEAD_CLASS}"),
        Action::fade_toggle_linked(RULESET_DATA_ATTR),
    )?;

    page.on_ready(vec![toggle_all, toggle_ruleset])
}

/// Load a page, install the toggler, and fire the ready condition.
pub fn open(html: &str) -> Result<Page> {
    let mut page = Page::from_html(html)?;
    install(&mut page)?;
    page.document_ready()?;
    Ok(page)
}
