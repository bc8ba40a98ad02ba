use super::*;
use pretty_assertions::assert_eq;
use SyntaxKind::{
    AttributeName, AttributeValue, Bom, Comment, EndTagName, Equals, Error, Expression, GreaterThan,
    InterpolationEnd, InterpolationStart, LessThan, LessThanSlash, Quote, RawText, ReservedTagName,
    SelfClosingTagDelimiter, StartTagName, Text, Whitespace,
};

/// Non-trivia tokens with their text.
fn lex(source: &str) -> Vec<(SyntaxKind, &str)> {
    let out = parse(source);
    out.tokens
        .iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| (t.kind, out.text(t)))
        .collect()
}

fn errors(source: &str) -> Vec<ParseError> {
    parse(source).errors
}

fn assert_lossless(source: &str) {
    let out = parse(source);
    let mut expected_start = 0;
    let mut rebuilt = String::new();
    for tok in &out.tokens {
        assert_eq!(tok.span.start, expected_start, "gap before {tok:?} in {source:?}");
        assert!(!tok.span.is_empty(), "empty token {tok:?} in {source:?}");
        expected_start = tok.span.end;
        rebuilt.push_str(out.text(tok));
    }
    assert_eq!(rebuilt, source);
    for err in &out.errors {
        assert!(err.span().end as usize <= source.len(), "{err:?} out of range");
    }
}

// === Elements ===

#[test]
fn element_with_attribute_and_text() {
    let source = r#"<view class="a">hi</view>"#;
    assert_eq!(
        lex(source),
        vec![
            (LessThan, "<"),
            (StartTagName, "view"),
            (AttributeName, "class"),
            (Equals, "="),
            (Quote, "\""),
            (AttributeValue, "a"),
            (Quote, "\""),
            (GreaterThan, ">"),
            (Text, "hi"),
            (LessThanSlash, "</"),
            (EndTagName, "view"),
            (GreaterThan, ">"),
        ]
    );
    assert!(parse(source).is_ok());
    assert_lossless(source);
}

#[test]
fn self_closing_element() {
    let source = r#"<image src="a.png" />"#;
    assert_eq!(
        parse(source).tokens.significant_kinds(),
        vec![
            LessThan,
            StartTagName,
            AttributeName,
            Equals,
            Quote,
            AttributeValue,
            Quote,
            SelfClosingTagDelimiter,
        ]
    );
    assert!(parse(source).is_ok());
}

#[test]
fn boolean_and_unquoted_attributes() {
    assert_eq!(
        lex("<input disabled value=3/>"),
        vec![
            (LessThan, "<"),
            (StartTagName, "input"),
            (AttributeName, "disabled"),
            (AttributeName, "value"),
            (Equals, "="),
            (AttributeValue, "3/"),
            (GreaterThan, ">"),
        ]
    );
}

#[test]
fn attribute_value_with_interpolation() {
    assert_eq!(
        &lex(r#"<view hidden="{{x}} y"></view>"#)[2..10],
        &[
            (AttributeName, "hidden"),
            (Equals, "="),
            (Quote, "\""),
            (InterpolationStart, "{{"),
            (Expression, "x"),
            (InterpolationEnd, "}}"),
            (AttributeValue, " y"),
            (Quote, "\""),
        ]
    );
}

#[test]
fn single_quoted_value_may_contain_double_quote() {
    assert_eq!(
        &lex(r#"<a b='say "hi"'/>"#)[4..7],
        &[(Quote, "'"), (AttributeValue, "say \"hi\""), (Quote, "'")]
    );
}

#[test]
fn whitespace_is_trivia() {
    let out = parse("  <a >\n</a >");
    let ws: Vec<_> = out
        .tokens
        .iter()
        .filter(|t| t.kind == Whitespace)
        .map(|t| out.text(t))
        .collect();
    assert_eq!(ws, vec!["  ", " ", "\n", " "]);
}

// === Reserved element names ===

#[test]
fn reserved_names_are_literal_tokens() {
    let source = r#"<template name="x"><slot/></template>"#;
    assert_eq!(
        lex(source),
        vec![
            (LessThan, "<"),
            (ReservedTagName, "template"),
            (AttributeName, "name"),
            (Equals, "="),
            (Quote, "\""),
            (AttributeValue, "x"),
            (Quote, "\""),
            (GreaterThan, ">"),
            (LessThan, "<"),
            (ReservedTagName, "slot"),
            (SelfClosingTagDelimiter, "/>"),
            (LessThanSlash, "</"),
            (ReservedTagName, "template"),
            (GreaterThan, ">"),
        ]
    );
    assert!(parse(source).is_ok());
}

#[test]
fn reserved_prefix_is_an_ordinary_name() {
    assert_eq!(
        parse("<slots></slots>").tokens.significant_kinds(),
        vec![
            LessThan,
            StartTagName,
            GreaterThan,
            LessThanSlash,
            EndTagName,
            GreaterThan
        ]
    );
}

#[test]
fn reserved_words_are_case_sensitive() {
    assert_eq!(lex("<Block/>")[1], (StartTagName, "Block"));
    assert_eq!(lex("<block/>")[1], (ReservedTagName, "block"));
}

// === Raw text ===

#[test]
fn wxs_body_is_raw_text() {
    let source = r#"<wxs module="m">var a = 1 < 2;</wxs>"#;
    let tokens = lex(source);
    assert_eq!(tokens[1], (ReservedTagName, "wxs"));
    assert_eq!(tokens[8], (RawText, "var a = 1 < 2;"));
    assert_eq!(
        &tokens[9..],
        &[
            (LessThanSlash, "</"),
            (ReservedTagName, "wxs"),
            (GreaterThan, ">")
        ]
    );
    assert!(parse(source).is_ok());
}

#[test]
fn wxs_closer_is_case_insensitive() {
    let source = "<wxs>x</WXS>";
    assert_eq!(
        lex(source),
        vec![
            (LessThan, "<"),
            (ReservedTagName, "wxs"),
            (GreaterThan, ">"),
            (RawText, "x"),
            (LessThanSlash, "</"),
            (EndTagName, "WXS"),
            (GreaterThan, ">"),
        ]
    );
    assert!(parse(source).is_ok());
}

#[test]
fn empty_wxs_has_no_raw_text() {
    assert_eq!(
        parse("<wxs></wxs>").tokens.significant_kinds(),
        vec![
            LessThan,
            ReservedTagName,
            GreaterThan,
            LessThanSlash,
            ReservedTagName,
            GreaterThan
        ]
    );
}

#[test]
fn wxs_body_markup_is_not_parsed() {
    let tokens = lex("<wxs><view>{{a}}</view></wxs>");
    assert_eq!(tokens[3], (RawText, "<view>{{a}}</view>"));
    assert_eq!(tokens.len(), 7);
}

#[test]
fn unclosed_wxs_runs_to_eof() {
    let source = "<wxs>var x = 1;";
    assert_eq!(lex(source)[3], (RawText, "var x = 1;"));
    assert_eq!(
        errors(source),
        vec![ParseError::UnclosedElement {
            name: "wxs".into(),
            span: Span::new(0, 5),
        }]
    );
}

#[test]
fn self_closing_wxs_has_no_body() {
    assert_eq!(
        &parse(r#"<wxs src="a.wxs"/><view/>"#).tokens.significant_kinds()[8..],
        &[LessThan, StartTagName, SelfClosingTagDelimiter]
    );
}

// === Interpolation ===

#[test]
fn interpolation_in_content() {
    assert_eq!(
        &lex("<text>{{ a.b }}</text>")[3..6],
        &[
            (InterpolationStart, "{{"),
            (Expression, " a.b "),
            (InterpolationEnd, "}}"),
        ]
    );
}

#[test]
fn empty_interpolation() {
    assert_eq!(
        lex("{{}}"),
        vec![(InterpolationStart, "{{"), (InterpolationEnd, "}}")]
    );
}

#[test]
fn text_around_interpolation() {
    assert_eq!(
        lex("a { b {{c}} d }} e"),
        vec![
            (Text, "a { b "),
            (InterpolationStart, "{{"),
            (Expression, "c"),
            (InterpolationEnd, "}}"),
            (Text, "d }} e"),
        ]
    );
}

#[test]
fn unterminated_interpolation() {
    let source = "{{ a";
    assert_eq!(
        lex(source),
        vec![(InterpolationStart, "{{"), (Expression, " a")]
    );
    assert_eq!(
        errors(source),
        vec![ParseError::UnterminatedInterpolation {
            span: Span::new(0, 4)
        }]
    );
}

// === Comments ===

#[test]
fn comment_with_double_dash() {
    assert_eq!(
        lex("<!-- a -- b --><view/>"),
        vec![
            (Comment, "<!-- a -- b -->"),
            (LessThan, "<"),
            (StartTagName, "view"),
            (SelfClosingTagDelimiter, "/>"),
        ]
    );
}

#[test]
fn unterminated_comment_runs_to_eof() {
    let source = "<view><!-- open";
    assert_eq!(lex(source)[3], (Error, "<!-- open"));
    assert_eq!(
        errors(source),
        vec![
            ParseError::UnclosedElement {
                name: "view".into(),
                span: Span::new(0, 6),
            },
            ParseError::UnterminatedComment {
                span: Span::new(6, 15)
            },
        ]
    );
}

// === Structural errors ===

#[test]
fn mismatched_end_tag() {
    assert_eq!(
        errors("<view></text>"),
        vec![
            ParseError::UnclosedElement {
                name: "view".into(),
                span: Span::new(0, 6),
            },
            ParseError::MismatchedEndTag {
                expected: "view".into(),
                found: "text".into(),
                span: Span::new(6, 13),
            },
        ]
    );
}

#[test]
fn end_tag_closes_deeper_element() {
    assert_eq!(
        errors("<view><text></view>"),
        vec![ParseError::UnclosedElement {
            name: "text".into(),
            span: Span::new(6, 12),
        }]
    );
}

#[test]
fn unexpected_end_tag() {
    assert_eq!(
        errors("</view>"),
        vec![ParseError::UnexpectedEndTag {
            name: "view".into(),
            span: Span::new(0, 7),
        }]
    );
}

#[test]
fn unterminated_end_tag() {
    let errs = errors("<a></a");
    assert_eq!(
        errs,
        vec![ParseError::UnterminatedEndTag {
            span: Span::new(3, 6)
        }]
    );
}

#[test]
fn lone_less_than_is_text() {
    let source = "1 <2";
    assert_eq!(
        lex(source),
        vec![(Text, "1 "), (Text, "<"), (Text, "2")]
    );
    assert_eq!(
        errors(source),
        vec![ParseError::ExpectedTagName {
            span: Span::new(2, 3)
        }]
    );
}

#[test]
fn unterminated_start_tag() {
    assert_eq!(
        errors("<a b"),
        vec![ParseError::UnterminatedStartTag {
            name: "a".into(),
            span: Span::new(0, 4),
        }]
    );
    assert_eq!(
        &lex("<a <b/>")[2..],
        &[
            (LessThan, "<"),
            (StartTagName, "b"),
            (SelfClosingTagDelimiter, "/>")
        ]
    );
}

#[test]
fn unterminated_attribute_value() {
    assert_eq!(
        errors(r#"<a b="c"#),
        vec![
            ParseError::UnterminatedStartTag {
                name: "a".into(),
                span: Span::new(0, 7),
            },
            ParseError::UnterminatedAttributeValue {
                span: Span::new(5, 7)
            },
        ]
    );
}

#[test]
fn missing_attribute_value() {
    assert_eq!(
        errors("<a b=></a>"),
        vec![ParseError::ExpectedAttributeValue {
            span: Span::point(5)
        }]
    );
}

#[test]
fn unexpected_character_in_start_tag() {
    let source = "<a }/>";
    assert_eq!(lex(source)[2], (Error, "}"));
    assert_eq!(
        errors(source),
        vec![ParseError::UnexpectedCharacter {
            found: '}',
            span: Span::new(3, 4),
        }]
    );
}

// === Encoding ===

#[test]
fn leading_bom_is_trivia() {
    let out = parse("\u{FEFF}<a/>");
    assert_eq!(out.tokens.as_slice()[0].kind, Bom);
    assert_eq!(out.tokens.as_slice()[0].span, Span::new(0, 3));
    assert_eq!(
        out.tokens.significant_kinds(),
        vec![LessThan, StartTagName, SelfClosingTagDelimiter]
    );
    assert!(out.is_ok());
}

#[test]
fn interior_nul_is_reported() {
    let source = "a\0b";
    assert_eq!(lex(source), vec![(Text, "a\0b")]);
    assert_eq!(
        errors(source),
        vec![ParseError::InteriorNull {
            span: Span::new(1, 2)
        }]
    );
}

#[test]
fn empty_source() {
    let out = parse("");
    assert!(out.tokens.is_empty());
    assert!(out.is_ok());
}

#[test]
fn deep_nesting_does_not_recurse() {
    let source = "<a>".repeat(10_000);
    let out = parse(&source);
    assert_eq!(out.errors.len(), 10_000);
    assert_lossless(&source);
}

#[test]
fn realistic_page_is_lossless_and_clean() {
    let source = r#"<import src="./item.wxml"/>
<!-- list page -->
<view class="list" wx:for="{{items}}" wx:key="id">
  <template is="item" data="{{...item}}"/>
  <text bindtap="onTap">{{ item.title }} ({{ item.count }})</text>
  <block wx:if="{{ empty }}"><text>none</text></block>
</view>
<wxs module="fmt">
  module.exports.pad = function (n) { return n < 10 ? '0' + n : n; };
</wxs>
"#;
    let out = parse(source);
    assert_eq!(out.errors, vec![]);
    assert_lossless(source);
}

mod proptest_parse {
    use super::{assert_lossless, parse};
    use proptest::prelude::*;

    fn fragments() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                Just("<view>"),
                Just("</view>"),
                Just("<wxs>"),
                Just("</WXS>"),
                Just("<slot/>"),
                Just("<!--"),
                Just("-->"),
                Just("{{"),
                Just("}}"),
                Just("<"),
                Just("/>"),
                Just("\""),
                Just("="),
                Just(" "),
                Just("a"),
                Just("é"),
            ],
            0..32,
        )
        .prop_map(|parts| parts.concat())
    }

    proptest! {
        #[test]
        fn arbitrary_text_is_covered(source in "\\PC{0,64}") {
            assert_lossless(&source);
        }

        #[test]
        fn markup_fragments_are_covered(source in fragments()) {
            assert_lossless(&source);
        }

        #[test]
        fn errors_are_sorted(source in fragments()) {
            let out = parse(&source);
            let starts: Vec<u32> = out.errors.iter().map(|e| e.span().start).collect();
            let mut sorted = starts.clone();
            sorted.sort_unstable();
            prop_assert_eq!(starts, sorted);
        }
    }
}
