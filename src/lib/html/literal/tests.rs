use std::collections::BTreeMap;

use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};

use super::Literal;
use crate::html::{Render, escape};

#[test]
fn concatenation_escapes_plain_values() {
    let out = Literal::new("<b>ok</b>") + "<script>";
    assert_eq!(out, "<b>ok</b>&lt;script&gt;");

    let out = escape("\"") + Literal::new("<other>");
    assert_eq!(out, "&quot;<other>");

    let mut acc = Literal::new("<p>");
    acc += "a & b";
    acc += Literal::new("</p>");
    assert_eq!(acc, "<p>a &amp; b</p>");
}

#[test]
fn plain_string_addition_still_works() {
    let tail = "b".repeat(3);
    let joined = "a".repeat(2) + " needle " + &tail;
    assert_eq!(joined, "aa needle bbb");

    let mut owned = String::from("x");
    owned += &tail;
    assert_eq!(owned, "xbbb");
}

#[test]
fn join_escapes_items_but_not_separator() {
    let sep = Literal::new("<br />");
    assert_eq!(sep.join(["<a>", "b"]), "&lt;a&gt;<br />b");
    assert_eq!(sep.join(Vec::<&str>::new()), "");

    let sep = Literal::new(", ");
    let items = [Literal::new("<i>x</i>"), Literal::new("y")];
    assert_eq!(sep.join(items.iter()), "<i>x</i>, y");
}

#[test]
fn repeat_and_mul() {
    assert_eq!(Literal::new("<hr />") * 2, "<hr /><hr />");
    assert_eq!(Literal::new("-").repeat(0), "");
}

#[test]
fn format_escapes_operands() {
    let template = Literal::new("<%s>ello");
    assert_eq!(template.format(&[&"<H>"]).unwrap(), "<&lt;H&gt;>ello");

    let template = Literal::new("%s = %i%%");
    assert_eq!(template.format(&[&"ratio", &"42"]).unwrap(), "ratio = 42%");

    let template = Literal::new("%d items");
    assert_eq!(template.format(&[&3.9]).unwrap(), "3 items");
}

#[test]
fn format_passes_literal_operands_through() {
    let template = Literal::new("<p>%s</p>");
    let inner = Literal::new("<em>hi</em>");
    assert_eq!(template.format(&[&inner]).unwrap(), "<p><em>hi</em></p>");
}

#[test]
fn format_reports_argument_mismatches() {
    let template = Literal::new("%s and %s");
    assert!(template.format(&[&"one"]).is_err());
    assert!(Literal::new("%s").format(&[&"a", &"b"]).is_err());
    assert!(Literal::new("%d").format(&[&"abc"]).is_err());
    assert!(Literal::new("%x").format(&[&1]).is_err());
    assert!(Literal::new("100%").format(&[]).is_err());
}

#[test]
fn format_named_looks_up_keys() {
    let mut args: BTreeMap<&str, &dyn Render> = BTreeMap::new();
    args.insert("name", &"<Ann>");
    args.insert("count", &7);

    let template = Literal::new("%(name)s has %(count)d");
    assert_eq!(template.format_named(&args).unwrap(), "&lt;Ann&gt; has 7");
    assert!(Literal::new("%(missing)s").format_named(&args).is_err());
    assert!(Literal::new("%s").format_named(&args).is_err());
}

#[test]
fn collecting_literals_concatenates_markup() {
    let out: Literal = ["<a>", "</a>"].into_iter().map(Literal::new).collect();
    assert_eq!(out, "<a></a>");
}

#[test]
fn adding_text_never_leaks_markup() {
    let mut runner = TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&(".*", ".*"), |(safe, text)| {
            let base = escape(safe.as_str());
            let combined = base.clone() + text.as_str();
            let expected = format!("{}{}", base, escape(text.as_str()));
            prop_assert_eq!(combined.as_str(), expected.as_str());
            Ok(())
        })
        .unwrap();
}
