use super::*;

#[test]
fn clicking_the_toggle_hides_and_restores_every_rule_block() -> Result<()> {
    let html = r#"
        <button id='ruletoggle'>rules</button>
        <div class='elements' id='block-a'>rule a</div>
        <div class='elements' id='block-b'>rule b</div>
        "#;

    let mut page = toggler::open(html)?;
    page.click("#ruletoggle")?;
    page.settle()?;
    page.assert_hidden("#block-a")?;
    page.assert_hidden("#block-b")?;

    page.click("#ruletoggle")?;
    page.settle()?;
    page.assert_visible("#block-a")?;
    page.assert_visible("#block-b")?;
    Ok(())
}

#[test]
fn each_block_toggles_from_its_own_state() -> Result<()> {
    let html = r#"
        <button id='ruletoggle'>rules</button>
        <div class='elements' id='shown'>visible block</div>
        <div class='elements' id='prehidden' style='display: none'>hidden block</div>
        "#;

    let mut page = toggler::open(html)?;
    page.click("#ruletoggle")?;
    page.settle()?;

    page.assert_hidden("#shown")?;
    page.assert_visible("#prehidden")?;
    Ok(())
}

#[test]
fn unrelated_elements_are_untouched() -> Result<()> {
    let html = r#"
        <button id='ruletoggle'>rules</button>
        <div class='elements' id='block'>rule</div>
        <p id='legend'>legend text</p>
        "#;

    let mut page = toggler::open(html)?;
    page.click("#ruletoggle")?;
    page.settle()?;

    page.assert_hidden("#block")?;
    page.assert_visible("#legend")?;
    page.assert_visible("#ruletoggle")?;
    Ok(())
}

#[test]
fn toggle_with_no_rule_blocks_is_a_noop() -> Result<()> {
    let html = "<button id='ruletoggle'>rules</button>";

    let mut page = toggler::open(html)?;
    page.click("#ruletoggle")?;
    page.settle()?;

    assert_eq!(page.pending_fades(), 0);
    page.assert_visible("#ruletoggle")?;
    Ok(())
}

#[test]
fn double_click_restores_the_original_state_of_all_blocks() -> Result<()> {
    let html = r#"
        <button id='ruletoggle'>rules</button>
        <div class='elements' id='a'>a</div>
        <div class='elements' id='b' style='display: none'>b</div>
        <div class='elements' id='c'>c</div>
        "#;

    let mut page = toggler::open(html)?;
    for _ in 0..2 {
        page.click("#ruletoggle")?;
        page.settle()?;
    }

    page.assert_visible("#a")?;
    page.assert_hidden("#b")?;
    page.assert_visible("#c")?;
    Ok(())
}

#[test]
fn fade_in_restores_a_custom_inline_display_value() -> Result<()> {
    let html = r#"
        <button id='ruletoggle'>rules</button>
        <div class='elements' id='inline-block' style='display: inline-block'>rule</div>
        "#;

    let mut page = toggler::open(html)?;
    page.click("#ruletoggle")?;
    page.settle()?;
    page.assert_hidden("#inline-block")?;

    page.click("#ruletoggle")?;
    page.settle()?;
    page.assert_visible("#inline-block")?;
    Ok(())
}
