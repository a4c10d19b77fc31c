use super::*;

#[test]
fn clicking_a_header_toggles_its_named_block() -> Result<()> {
    let html = r#"
        <div class='grammarlisthead' data-ruleset='ruleA'>rule a</div>
        <div id='ruleA' style='display: none'>diagram a</div>
        "#;

    let mut page = toggler::open(html)?;
    page.click(".grammarlisthead")?;
    page.settle()?;
    page.assert_visible("#ruleA")?;

    page.click(".grammarlisthead")?;
    page.settle()?;
    page.assert_hidden("#ruleA")?;
    Ok(())
}

#[test]
fn only_the_named_block_is_affected() -> Result<()> {
    let html = r#"
        <div class='grammarlisthead' id='head-a' data-ruleset='ruleA'>a</div>
        <div id='ruleA'>diagram a</div>
        <div class='grammarlisthead' id='head-b' data-ruleset='ruleB'>b</div>
        <div id='ruleB'>diagram b</div>
        "#;

    let mut page = toggler::open(html)?;
    page.click("#head-a")?;
    page.settle()?;

    page.assert_hidden("#ruleA")?;
    page.assert_visible("#ruleB")?;
    page.assert_visible("#head-a")?;
    page.assert_visible("#head-b")?;
    Ok(())
}

#[test]
fn every_header_gets_its_own_listener() -> Result<()> {
    let html = r#"
        <div class='grammarlisthead' id='head-a' data-ruleset='ruleA'>a</div>
        <div id='ruleA'>diagram a</div>
        <div class='grammarlisthead' id='head-b' data-ruleset='ruleB'>b</div>
        <div id='ruleB'>diagram b</div>
        "#;

    let mut page = toggler::open(html)?;
    page.click("#head-b")?;
    page.settle()?;
    page.assert_visible("#ruleA")?;
    page.assert_hidden("#ruleB")?;

    page.click("#head-a")?;
    page.settle()?;
    page.assert_hidden("#ruleA")?;
    page.assert_hidden("#ruleB")?;
    Ok(())
}

#[test]
fn dangling_ruleset_reference_is_a_silent_noop() -> Result<()> {
    let html = r#"
        <div class='grammarlisthead' id='head' data-ruleset='missing'>orphan</div>
        <div id='other'>unrelated</div>
        "#;

    let mut page = toggler::open(html)?;
    page.click("#head")?;
    page.settle()?;

    assert_eq!(page.pending_fades(), 0);
    page.assert_visible("#other")?;
    page.assert_visible("#head")?;
    Ok(())
}

#[test]
fn header_without_the_data_attribute_is_a_silent_noop() -> Result<()> {
    let html = r#"
        <div class='grammarlisthead' id='head'>no attribute</div>
        <div id='ruleA'>diagram</div>
        "#;

    let mut page = toggler::open(html)?;
    page.click("#head")?;
    page.settle()?;

    assert_eq!(page.pending_fades(), 0);
    page.assert_visible("#ruleA")?;
    Ok(())
}

#[test]
fn click_inside_a_header_bubbles_to_the_header_listener() -> Result<()> {
    let html = r#"
        <div class='grammarlisthead' data-ruleset='ruleA'>
          <span id='caption'>rule a</span>
        </div>
        <div id='ruleA'>diagram a</div>
        "#;

    let mut page = toggler::open(html)?;
    page.click("#caption")?;
    page.settle()?;
    page.assert_hidden("#ruleA")?;
    Ok(())
}

#[test]
fn ruleset_value_with_selector_metacharacters_resolves_by_id() -> Result<()> {
    // The attribute value is an identifier and must be looked up literally,
    // never spliced into selector syntax.
    let html = r#"
        <div class='grammarlisthead' id='head' data-ruleset='grammar.rule:first'>head</div>
        <div id='grammar.rule:first'>diagram</div>
        "#;

    let mut page = toggler::open(html)?;
    page.click("#head")?;
    page.settle()?;
    page.assert_hidden("div[id='grammar.rule:first']")?;
    Ok(())
}
