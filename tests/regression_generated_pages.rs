use rrd_page::{toggler, Error, Page, Result};

#[test]
fn embedded_library_source_does_not_confuse_the_loader() -> Result<()> {
    // Generated pages inline their DOM library and wiring script; both are
    // data to this runtime and must not leak elements into the tree.
    let html = r##"
    <div class="grammarlisthead" data-ruleset="rule-a">a</div>
    <div id="rule-a" class="elements">diagram</div>
    <script type="text/javascript">
      jQuery.noConflict();
      jQuery( document ).ready(function() {
          jQuery("#ruletoggle").click( function(p_event) {
              jQuery(".elements").fadeToggle();
          });
      });
    </script>
    "##;

    let mut page = toggler::open(html)?;
    page.assert_exists(".elements")?;
    page.click(".grammarlisthead")?;
    page.settle()?;
    page.assert_hidden("#rule-a")?;
    Ok(())
}

#[test]
fn comments_containing_markup_are_skipped() -> Result<()> {
    let html = r#"
    <!-- <div class="elements" id="ghost">commented out</div> -->
    <button id="ruletoggle">rules</button>
    <div class="elements" id="real">diagram</div>
    "#;

    let mut page = toggler::open(html)?;
    assert!(page.assert_exists("#ghost").is_err());

    page.click("#ruletoggle")?;
    page.settle()?;
    page.assert_hidden("#real")?;
    Ok(())
}

#[test]
fn attribute_values_with_mixed_quotes_and_spaces_parse() -> Result<()> {
    let html = r#"
    <div class="grammarlisthead wide" data-ruleset='rule-a' title="the first rule">head</div>
    <div id="rule-a">diagram</div>
    "#;

    let mut page = toggler::open(html)?;
    page.click(".grammarlisthead")?;
    page.settle()?;
    page.assert_hidden("#rule-a")?;
    page.assert_visible(".grammarlisthead.wide")?;
    Ok(())
}

#[test]
fn unclosed_paragraphs_do_not_break_later_bindings() -> Result<()> {
    let html = r#"
    <p>intro text
    <p>more text
    <button id="ruletoggle">rules</button>
    <div class="elements" id="block">diagram</div>
    "#;

    let mut page = toggler::open(html)?;
    page.click("#ruletoggle")?;
    page.settle()?;
    page.assert_hidden("#block")?;
    Ok(())
}

#[test]
fn malformed_markup_is_reported_not_panicked() {
    for html in ["<div", "<!-- unclosed comment", "<div a='b>", "<script>var x = 1;"] {
        match Page::from_html(html) {
            Err(Error::HtmlParse(_)) => {}
            other => panic!("expected HtmlParse error for {html:?}, got {other:?}"),
        }
    }
}

#[test]
fn headers_added_by_hand_after_generation_follow_the_same_contract() -> Result<()> {
    // Authors sometimes append extra sections to the generated page; the
    // wiring binds whatever matches the class at ready time.
    let html = r#"
    <div class="grammarlisthead" data-ruleset="generated">generated</div>
    <div id="generated">diagram</div>
    <div class="grammarlisthead" data-ruleset="appendix">appendix</div>
    <div id="appendix" style="display: none">notes</div>
    "#;

    let mut page = toggler::open(html)?;
    page.click("div[data-ruleset=appendix]")?;
    page.settle()?;
    page.assert_visible("#appendix")?;
    page.assert_visible("#generated")?;
    Ok(())
}
