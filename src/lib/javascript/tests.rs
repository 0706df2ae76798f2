use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};

use super::*;

#[test]
fn escape_javascript_quotes_and_newlines() {
    assert_eq!(
        escape_javascript("This \"thing\" is really\n netos'"),
        "This \\\"thing\\\" is really\\n netos\\'"
    );
    assert_eq!(escape_javascript("a\r\nb\rc"), "a\\nb\\nc");
    assert_eq!(escape_javascript(r"C:\dir"), r"C:\\dir");
    assert_eq!(escape_javascript("</script>"), "<\\/script>");
    assert_eq!(escape_javascript(""), "");
}

#[test]
fn escaped_javascript_has_no_raw_breaks_or_quotes() {
    let mut runner = TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&".*", |code| {
            let out = escape_javascript(&code);
            prop_assert!(!out.contains('\n'));
            prop_assert!(!out.contains('\r'));
            prop_assert!(!out.contains("</"));
            // Every quote is preceded by an odd run of backslashes.
            let bytes = out.as_bytes();
            for (i, b) in bytes.iter().enumerate() {
                if *b == b'"' || *b == b'\'' {
                    let run = bytes[..i].iter().rev().take_while(|c| **c == b'\\').count();
                    prop_assert_eq!(run % 2, 1);
                }
            }
            Ok(())
        })
        .unwrap();
}

#[test]
fn javascript_tag_wraps_in_cdata() {
    assert_eq!(
        javascript_tag("alert('Hello')", &Attrs::new()),
        "<script type=\"text/javascript\">\n//<![CDATA[\nalert('Hello')\n//]]>\n</script>"
    );
    assert_eq!(
        javascript_cdata_section("x < y"),
        "\n//<![CDATA[\nx < y\n//]]>\n"
    );
}

#[test]
fn link_to_function_builds_anchor() {
    assert_eq!(
        link_to_function("Greeting", "alert('Hello World!')", Attrs::new()),
        "<a href=\"#\" onclick=\"alert('Hello World!'); return false;\">Greeting</a>"
    );
    assert_eq!(
        link_to_function("<b>", "go()", Attrs::new().set("href", "/fallback")),
        "<a href=\"/fallback\" onclick=\"go(); return false;\">&lt;b&gt;</a>"
    );
}

#[test]
fn button_to_function_builds_input() {
    assert_eq!(
        button_to_function("Greeting", "alert('Hello World!')", Attrs::new()),
        "<input onclick=\"alert('Hello World!'); \" type=\"button\" value=\"Greeting\" />"
    );
    assert_eq!(
        button_to_function("Go", "go()", Attrs::new().set("class_", "big")),
        "<input class=\"big\" onclick=\"go(); \" type=\"button\" value=\"Go\" />"
    );
}
