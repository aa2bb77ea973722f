use super::*;

#[test]
fn parses_nested_elements_with_depth() {
    let src = r#"<!doctype html>
<html>
  <body>
    <div data-enigma-id="hero" style="top: 1px">
      <img src="a.png">
      <p>Hello<br>world</p>
    </div>
  </body>
</html>"#;
    let doc = parse(src).unwrap();
    let tags: Vec<(&str, usize)> =
        doc.elements.iter().map(|el| (el.tag.as_str(), el.depth)).collect();
    assert_eq!(
        tags,
        vec![("html", 0), ("body", 1), ("div", 2), ("img", 3), ("p", 3), ("br", 4)]
    );
}

#[test]
fn attribute_forms() {
    let src = "<input type=text disabled value='a b' DATA-ENIGMA-ID=\"x\">";
    let doc = parse(src).unwrap();
    let el = &doc.elements[0];
    let attrs: Vec<(&str, Option<String>)> = el
        .attributes
        .iter()
        .map(|a| (a.name.as_str(), a.value.as_ref().and_then(|v| v.literal(src))))
        .collect();
    assert_eq!(
        attrs,
        vec![
            ("type", Some("text".to_owned())),
            ("disabled", None),
            ("value", Some("a b".to_owned())),
            ("DATA-ENIGMA-ID", Some("x".to_owned())),
        ]
    );
    assert_eq!(doc.find_by_attribute("data-enigma-id", "x").len(), 1);
}

#[test]
fn script_and_comment_contents_are_not_markup() {
    let src = r#"<script>if (a < b) document.write("<div data-enigma-id='x'>")</script>
<!-- <div data-enigma-id="x"> -->
<div data-enigma-id="x"></div>"#;
    let doc = parse(src).unwrap();
    assert_eq!(doc.find_by_attribute("data-enigma-id", "x").len(), 1);
}

#[test]
fn unterminated_comment_is_an_error() {
    let err = parse("<div>\n<!-- never closed").unwrap_err();
    assert_eq!(err.line, 2);
}

#[test]
fn unterminated_attribute_value_is_an_error() {
    assert!(parse("<div title=\"open>text</div>").is_err());
}

#[test]
fn stray_closing_tags_are_tolerated() {
    let doc = parse("<p>one</span></p><p>two").unwrap();
    assert_eq!(doc.elements.len(), 2);
    assert_eq!(doc.elements[1].depth, 0);
}
