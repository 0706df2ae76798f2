use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};

use super::{Attrs, Exclude, HTML, HtmlBuilder, Unfinished, tag};
use crate::html::Literal;

#[test]
fn void_tags_self_close() {
    assert_eq!(tag("br", &[], &Attrs::new()).unwrap(), "<br />");
    assert_eq!(
        tag("img", &[], &Attrs::new().set("src", "/x.png")).unwrap(),
        "<img src=\"/x.png\" />"
    );
}

#[test]
fn void_tags_reject_content() {
    assert!(tag("br", &[&"text"], &Attrs::new()).is_err());
    assert!(tag("hr", &[], &Attrs::new().contents(&[&"x"])).is_err());
}

#[test]
fn content_is_escaped_and_attributes_sorted() {
    let attrs = Attrs::new().set("href", "http://example.com");
    assert_eq!(
        tag("a", &[&"Click Here"], &attrs).unwrap(),
        "<a href=\"http://example.com\">Click Here</a>"
    );

    let attrs = Attrs::new().set("title", "x").set("id", "a&b");
    assert_eq!(
        tag("span", &[&"1 < 2"], &attrs).unwrap(),
        "<span id=\"a&amp;b\" title=\"x\">1 &lt; 2</span>"
    );
}

#[test]
fn absent_values_drop_the_attribute() {
    let attrs = Attrs::new()
        .set("href", "url")
        .set("title", None::<&str>)
        .set("rel", Exclude);
    assert_eq!(tag("a", &[], &attrs).unwrap(), "<a href=\"url\"></a>");

    let attrs = Attrs::new().set("title", "shown").set("title", Exclude);
    assert!(!attrs.contains("title"));
}

#[test]
fn trailing_underscore_is_stripped() {
    let attrs = Attrs::new().set("class_", "show");
    assert_eq!(tag("p", &[], &attrs).unwrap(), "<p class=\"show\"></p>");
    assert_eq!(attrs.get("class"), Some("show"));
}

#[test]
fn flags_render_their_own_name() {
    let attrs = Attrs::new().flag("checked", true).flag("disabled", false);
    assert_eq!(
        tag("input", &[], &attrs).unwrap(),
        "<input checked=\"checked\" />"
    );
}

#[test]
fn contents_attribute_replaces_positional_content() {
    let attrs = Attrs::new().contents(&[&"a", &Literal::new("<b>b</b>")]);
    assert_eq!(tag("div", &[], &attrs).unwrap(), "<div>a<b>b</b></div>");
    assert!(tag("div", &[&"c"], &attrs).is_err());
}

#[test]
fn literal_content_is_not_escaped_again() {
    let inner = tag("em", &[&"x"], &Attrs::new()).unwrap();
    assert_eq!(
        tag("p", &[&inner, &" & more"], &Attrs::new()).unwrap(),
        "<p><em>x</em> &amp; more</p>"
    );
}

#[test]
fn pretty_builder_breaks_block_tags() {
    let pretty = HtmlBuilder::pretty();
    assert_eq!(pretty.tag("br", &[], &Attrs::new()).unwrap(), "<br />\n");
    assert_eq!(
        pretty.tag("p", &[&"hi"], &Attrs::new()).unwrap(),
        "<p>\nhi\n</p>\n"
    );
    assert_eq!(
        pretty.tag("span", &[&"hi"], &Attrs::new()).unwrap(),
        "<span>hi</span>"
    );
}

#[test]
fn get_resolves_special_names() {
    assert_eq!(HTML.get("comment").unwrap(), Unfinished::Comment);
    assert_eq!(HTML.get("Literal").unwrap(), Unfinished::Literal);
    assert_eq!(HTML.get("javascript").unwrap().name(), "script");
    assert_eq!(HTML.get("DIV").unwrap().name(), "div");
    assert!(HTML.get("_private").is_err());
}

#[test]
fn unfinished_tags_build_elements() {
    let a = HTML.get("a").unwrap();
    let out = a
        .call(&[&"home"], &Attrs::new().set("href", "/"))
        .unwrap();
    assert_eq!(out, "<a href=\"/\">home</a>");
}

#[test]
fn comments_and_literals_pass_text_raw() {
    let comment = HTML.get("comment").unwrap();
    assert_eq!(
        comment.call(&[&" a < b "], &Attrs::new()).unwrap(),
        "<!-- a < b -->"
    );
    assert!(
        comment
            .call(&[&"x"], &Attrs::new().set("id", "nope"))
            .is_err()
    );

    let literal = HTML.get("literal").unwrap();
    assert_eq!(
        literal.call(&[&"<b>", &"</b>"], &Attrs::new()).unwrap(),
        "<b></b>"
    );
}

#[test]
fn script_wraps_code_in_cdata() {
    let script = HTML.get("script").unwrap();
    assert_eq!(
        script.call(&[&"alert(1);"], &Attrs::new()).unwrap(),
        "<script type=\"text/javascript\">\n//<![CDATA[\nalert(1);\n//]]>\n</script>"
    );
    assert_eq!(
        script
            .call(&[], &Attrs::new().set("src", "/app.js"))
            .unwrap(),
        "<script src=\"/app.js\" type=\"text/javascript\"></script>"
    );
}

#[test]
fn concat_and_literal() {
    assert_eq!(
        HTML.concat(&[&"<", &Literal::new("<br />"), &1]),
        "&lt;<br />1"
    );
    assert_eq!(HTML.literal("<hr />"), "<hr />");
}

#[test]
fn attribute_values_never_break_out() {
    let mut runner = TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&".*", |value| {
            let out = tag("a", &[], &Attrs::new().set("title", value.as_str())).unwrap();
            let inner = out
                .as_str()
                .strip_prefix("<a title=\"")
                .and_then(|rest| rest.strip_suffix("\"></a>"))
                .unwrap();
            prop_assert!(!inner.contains('"'));
            prop_assert!(!inner.contains('<'));
            Ok(())
        })
        .unwrap();
}

#[test]
fn element_names_survive_any_text_content() {
    let mut runner = TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&"[a-z]{1,8}", |name| {
            prop_assume!(!crate::html::is_void(&name));
            let out = tag(&name, &[&"x"], &Attrs::new()).unwrap();
            let expected = format!("<{name}>x</{name}>");
            prop_assert_eq!(out.as_str(), expected.as_str());
            Ok(())
        })
        .unwrap();
}
