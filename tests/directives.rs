// Directive and decoration syntax tests.

use indoc::indoc;
use pretty_assertions::assert_eq;
use treemark::{parse, serialize};

#[test]
fn details_container_roundtrips() {
    let input = indoc! {r#"
        :::details{summary="Read more"}
        Hidden paragraph with a [link](https://example.com).

        - and
        - a list
        :::
    "#};

    let doc = parse(input).unwrap();
    let details = &doc.content[0];
    assert_eq!(details.type_name, "details");
    assert_eq!(details.attr_str("summary"), Some("Read more"));
    assert_eq!(details.content.len(), 2);
    assert_eq!(details.content[1].type_name, "bullet_list");

    assert_eq!(serialize(&doc), input);
}

#[test]
fn nested_containers_parse_recursively() {
    let input = indoc! {r#"
        :::details{summary="Outer"}
        :::details{summary="Inner"}
        deep
        :::
        :::
    "#};

    let doc = parse(input).unwrap();
    let outer = &doc.content[0];
    assert_eq!(outer.attr_str("summary"), Some("Outer"));
    let inner = &outer.content[0];
    assert_eq!(inner.type_name, "details");
    assert_eq!(inner.attr_str("summary"), Some("Inner"));
    assert_eq!(inner.content[0].text_content(), "deep");
}

#[test]
fn diagram_body_stays_verbatim() {
    // `A-->B` and `*emphasis*` must not be touched by Markdown escaping
    // or inline parsing.
    let input = indoc! {r#"
        :::diagram{type="mermaid"}
        graph TD
          A-->B
          B-->*not emphasis*
        :::
    "#};

    let doc = parse(input).unwrap();
    let diagram = &doc.content[0];
    assert_eq!(diagram.type_name, "diagram");
    assert_eq!(diagram.attr_str("kind"), Some("mermaid"));
    assert_eq!(
        diagram.attr_str("content"),
        Some("graph TD\n  A-->B\n  B-->*not emphasis*")
    );

    assert_eq!(serialize(&doc), input);
}

#[test]
fn unterminated_container_is_literal_text() {
    let doc = parse(":::details{summary=\"Oops\"}\nno closer here").unwrap();
    assert!(doc.content.iter().all(|n| n.type_name != "details"));
}

#[test]
fn embed_directive_becomes_block_node() {
    let doc = parse("before\n\n:embed{src=\"https://example.com/v\"}\n\nafter").unwrap();
    assert_eq!(doc.content.len(), 3);
    assert_eq!(doc.content[1].type_name, "embed");
    assert_eq!(doc.content[1].attr_str("src"), Some("https://example.com/v"));

    assert_eq!(
        serialize(&doc),
        "before\n\n:embed{src=\"https://example.com/v\"}\n\nafter\n"
    );
}

#[test]
fn embed_attributes_roundtrip() {
    let input = ":embed{src=\"https://example.com/v\" title=\"My Page\"}\n";
    let doc = parse(input).unwrap();
    let embed = &doc.content[0];
    assert_eq!(embed.type_name, "embed");
    assert_eq!(embed.attr_str("src"), Some("https://example.com/v"));
    assert_eq!(embed.attr_str("title"), Some("My Page"));

    assert_eq!(serialize(&doc), input);
}

#[test]
fn links_near_directives_stay_links() {
    let doc = parse("[docs](https://example.com) then :embed{src=\"https://example.com/v\"}")
        .unwrap();
    assert_eq!(doc.content[0].type_name, "paragraph");
    let linked = &doc.content[0].content[0];
    assert_eq!(linked.marks[0].type_name, "link");
    assert_eq!(doc.content[1].type_name, "embed");
}

#[test]
fn embed_inside_text_splits_the_paragraph() {
    let doc = parse("watch :embed{src=\"https://example.com/v\"} now").unwrap();
    assert_eq!(doc.content.len(), 3);
    assert_eq!(doc.content[0].type_name, "paragraph");
    assert_eq!(doc.content[1].type_name, "embed");
    assert_eq!(doc.content[2].type_name, "paragraph");
}

#[test]
fn urls_are_not_mistaken_for_directives() {
    let doc = parse("see https://example.com/a{b} ok").unwrap();
    assert_eq!(doc.content.len(), 1);
    assert!(doc
        .content[0]
        .content
        .iter()
        .all(|n| n.type_name != "embed"));
}

#[test]
fn highlight_flags_carry_color() {
    let doc = parse("mark ==v-red==this==v-red== and ==that==").unwrap();
    let para = &doc.content[0];

    let red = para
        .content
        .iter()
        .find(|n| n.text.as_deref() == Some("this"))
        .unwrap();
    let mark = &red.marks[0];
    assert_eq!(mark.type_name, "highlight");
    assert_eq!(mark.attr_str("color"), Some("red"));

    let plain = para
        .content
        .iter()
        .find(|n| n.text.as_deref() == Some("that"))
        .unwrap();
    assert_eq!(plain.marks[0].attr_str("color"), Some("yellow"));

    // Default color prints flagless; the rest roundtrips.
    assert_eq!(
        serialize(&doc),
        "mark ==v-red==this==v-red== and ==that==\n"
    );
}

#[test]
fn decoration_marks_roundtrip() {
    let input = "H~2~O, x^2^, +underlined+\n";
    let doc = parse(input).unwrap();
    let para = &doc.content[0];

    let sub = para
        .content
        .iter()
        .find(|n| n.text.as_deref() == Some("2") && !n.marks.is_empty())
        .unwrap();
    assert_eq!(sub.marks[0].type_name, "subscript");

    assert_eq!(serialize(&doc), input);
}

#[test]
fn malformed_decorations_stay_literal() {
    let doc = parse("a ==dangling open and ~lone tilde").unwrap();
    let para = &doc.content[0];
    assert_eq!(para.content.len(), 1);
    assert_eq!(
        para.content[0].text.as_deref(),
        Some("a ==dangling open and ~lone tilde")
    );
}

#[test]
fn code_fences_shield_directive_markers() {
    let input = indoc! {r#"
        ```
        :::details{summary="not a directive"}
        :::
        ```
    "#};

    let doc = parse(input).unwrap();
    assert_eq!(doc.content.len(), 1);
    assert_eq!(doc.content[0].type_name, "code_block");
    assert_eq!(
        doc.content[0].text_content(),
        ":::details{summary=\"not a directive\"}\n:::"
    );
}
