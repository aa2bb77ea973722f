use super::*;

fn tags(source: &str) -> Vec<String> {
    parse(source).map(|doc| doc.elements.iter().map(|el| el.tag.clone()).collect()).unwrap()
}

#[test]
fn finds_nested_elements_in_document_order() {
    let src = r#"export default function Page() {
  return (
    <main className="page">
      <section>
        <Button data-enigma-id="b1" />
      </section>
    </main>
  );
}"#;
    assert_eq!(tags(src), vec!["main", "section", "Button"]);
    let doc = parse(src).unwrap();
    assert_eq!(doc.elements[0].depth, 0);
    assert_eq!(doc.elements[2].depth, 2);
    assert!(doc.elements[2].self_closing);
}

#[test]
fn records_attribute_spans() {
    let src = r#"const a = <div id="x" style={{ top: "1px" }} hidden />;"#;
    let doc = parse(src).unwrap();
    let el = &doc.elements[0];
    assert_eq!(el.name_span.slice(src), "div");
    let names: Vec<&str> = el.attributes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["id", "style", "hidden"]);
    let style = el.attributes[1].value.as_ref().unwrap();
    assert_eq!(style.kind, ValueKind::Expression);
    assert_eq!(style.inner.slice(src), r#"{ top: "1px" }"#);
    assert_eq!(el.attributes[2].value, None);
    assert_eq!(el.span.slice(src), r#"<div id="x" style={{ top: "1px" }} hidden />"#);
}

#[test]
fn comparisons_are_not_elements() {
    let src = "const ok = a < b && c > d;\nfor (let i = 0; i <n; i++) {}\n";
    assert!(tags(src).is_empty());
}

#[test]
fn strings_comments_and_regexes_hide_markup() {
    let src = r#"
// <Fake />
/* <Also fake> */
const s = "<div>";
const t = `<p>${"<q>"}</p>`;
const r = /<b>/g;
const real = <span />;
"#;
    assert_eq!(tags(src), vec!["span"]);
}

#[test]
fn fragments_and_expression_children() {
    let src = r#"const x = (
  <>
    {items.map((item) => <li key={item.id}>{item.label}</li>)}
    <p>{cond ? <b /> : null}</p>
  </>
);"#;
    assert_eq!(tags(src), vec!["li", "p", "b"]);
}

#[test]
fn spread_attributes_are_skipped() {
    let src = "const x = <Comp {...props} data-enigma-id=\"c\" />;";
    let doc = parse(src).unwrap();
    assert_eq!(doc.elements[0].attributes.len(), 1);
    assert_eq!(doc.find_by_attribute("data-enigma-id", "c").len(), 1);
}

#[test]
fn expression_string_literals_count_as_ids() {
    let src = "const x = <div data-enigma-id={'card'} />;";
    let doc = parse(src).unwrap();
    assert_eq!(doc.find_by_attribute("data-enigma-id", "card").len(), 1);
}

#[test]
fn mismatched_closing_tag_is_an_error() {
    let err = parse("const x = <div><span></div></span>;").unwrap_err();
    assert!(err.message.contains("expected </span>"), "{err}");
}

#[test]
fn unclosed_element_is_an_error() {
    let err = parse("const x = <div>\n  text\n").unwrap_err();
    assert_eq!(err.line, 1);
    assert!(err.message.contains("unclosed"), "{err}");
}

#[test]
fn unterminated_string_is_an_error() {
    let err = parse("const s = \"oops;\nconst t = 1;").unwrap_err();
    assert!(err.message.contains("unterminated string"));
}

#[test]
fn unbalanced_bracket_is_an_error() {
    assert!(parse("function f() { return 1; }}").is_err());
    assert!(parse("const a = [1, 2;").is_err());
}

#[test]
fn typescript_generics_are_not_elements() {
    let src = "const [v, setV] = useState<string>(\"\");\nconst m: Map<string, number> = new Map();\n";
    assert!(tags(src).is_empty());
}

#[test]
fn generic_arrow_type_parameters_are_not_elements() {
    let src = "const id = <T,>(x: T) => x;\nconst pick = <K extends string>(k: K) => k;\nexport default () => <div data-enigma-id=\"b1\" />;";
    assert_eq!(tags(src), vec!["div"]);
}

#[test]
fn element_with_extends_attribute_is_still_an_element() {
    let src = "const a = <Base extends=\"x\" data-enigma-id=\"b1\" />;";
    assert_eq!(tags(src), vec!["Base"]);
}

#[test]
fn unterminated_type_parameter_list_is_an_error() {
    let err = parse("const id = <T, U").unwrap_err();
    assert!(err.message.contains("type parameter"), "{err}");
}
