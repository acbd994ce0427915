//! Behavioural properties of the public parsing API.

use libznach::{
    parse, parse_with_filename, parse_with_options, AstNode, Context, DictionaryKey, Error,
    Location, Number, ParseOptions,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Direct children of a node, in source order.
fn children(node: &AstNode) -> Vec<&AstNode> {
    match node {
        AstNode::Object(object) => object.entries.iter().map(|entry| &entry.value).collect(),
        AstNode::Dictionary(dictionary) => {
            dictionary.entries.iter().map(|entry| &entry.value).collect()
        }
        AstNode::List(list) => list.entries.iter().collect(),
        _ => Vec::new(),
    }
}

fn assert_contexts_ordered(node: &AstNode) {
    if let AstNode::Dictionary(dictionary) = node {
        for entry in &dictionary.entries {
            assert_eq!(entry.key.context(), entry.context);
            assert!(entry.value.context() > entry.key.context());
        }
    }
    let mut previous = node.context();
    for child in children(node) {
        assert!(
            child.context() > previous,
            "{} starts at {:?}, not after {:?}",
            child,
            child.context(),
            previous
        );
        previous = child.context();
        assert_contexts_ordered(child);
    }
}

// ============================================================================
// Tree shapes
// ============================================================================

#[test]
fn test_empty_list() {
    init_tracing();
    let node = parse("[]").unwrap();
    assert_eq!(node.as_list(), Some(&[][..]));
    assert_eq!(node.to_string(), "ListNode([])");
}

#[test]
fn test_object_without_entries() {
    let node = parse("Point()").unwrap();
    let object = node.as_object().unwrap();
    assert_eq!(object.identifier, "Point");
    assert!(object.entries.is_empty());
}

#[test]
fn test_object_keeps_entry_order() {
    let node = parse("Point(x=1, y=2)").unwrap();
    let object = node.as_object().unwrap();
    let keys: Vec<&str> = object.entries.iter().map(|entry| entry.key.as_str()).collect();
    assert_eq!(keys, ["x", "y"]);
    assert_eq!(object.get("y").and_then(AstNode::as_number), Some(&Number::from(2i64)));
}

#[test]
fn test_text_escapes() {
    assert_eq!(parse("\"a\\nb\"").unwrap().as_text(), Some("a\nb"));
    assert_eq!(parse(r#""\"\t\\""#).unwrap().as_text(), Some("\"\t\\"));
}

#[test]
fn test_logical_keywords() {
    assert_eq!(parse("так").unwrap().as_bool(), Some(true));
    assert_eq!(parse("ні").unwrap().as_bool(), Some(false));
    assert!(parse("правда").is_err());
    assert!(parse("пусто").unwrap().is_empty());
}

#[test]
fn test_dictionary_key_kinds() {
    let node = parse(r#"(a="b")"#).unwrap();
    let entry = &node.as_dictionary().unwrap().entries[0];
    assert!(matches!(&entry.key, DictionaryKey::Text(key) if key.text == "a"));
    assert_eq!(entry.value.as_text(), Some("b"));

    let node = parse(r#"(1="x")"#).unwrap();
    let entry = &node.as_dictionary().unwrap().entries[0];
    assert!(matches!(&entry.key, DictionaryKey::Number(key) if key.value == Number::from(1i64)));
}

#[test]
fn test_duplicate_keys_preserved() {
    let node = parse("(a = 1, a = 2)").unwrap();
    let dictionary = node.as_dictionary().unwrap();
    let values: Vec<String> =
        dictionary.entries.iter().map(|entry| entry.value.to_string()).collect();
    assert_eq!(values, ["NumberNode(1)", "NumberNode(2)"]);
    let first = dictionary.get("a").map(ToString::to_string);
    assert_eq!(first, Some("NumberNode(1)".to_string()));
}

#[test]
fn test_numbers() {
    assert_eq!(parse("-7").unwrap().as_number(), Some(&Number::from(-7i64)));
    assert_eq!(parse("0.5").unwrap().as_number(), Some(&Number::Float(0.5)));
    let big = parse("18446744073709551616").unwrap();
    assert_eq!(big.as_number().and_then(Number::to_f64), Some(18446744073709551616.0));
}

// ============================================================================
// Rejections
// ============================================================================

#[test]
fn test_trailing_comma_rejected() {
    assert!(parse("[1,]").is_err());
    assert!(parse("(a = 1,)").is_err());
    assert!(parse("P(a = 1,)").is_err());
}

#[test]
fn test_prefixes_of_valid_documents_fail() {
    let source = r#"Точка(x = [1, "два"], y = (з = так))"#;
    assert!(parse(source).is_ok());
    let boundaries: Vec<usize> = source.char_indices().map(|(idx, _)| idx).skip(1).collect();
    for end in boundaries {
        let prefix = &source[..end];
        assert!(parse(prefix).is_err(), "prefix {:?} should not parse", prefix);
    }
}

#[test]
fn test_trailing_characters() {
    let err = parse("так extra").unwrap_err();
    assert!(matches!(&err, Error::TrailingCharacters { found, .. } if found == "\"extra\""));
    assert_eq!(err.location(), Some(Location { line: 0, column: 4 }));
    assert!(parse("так \n\t ").is_ok());
}

#[test]
fn test_trailing_unicode_whitespace() {
    assert!(parse("так\u{0C}").is_ok());
    assert!(parse("так \u{A0}").is_ok());
    assert!(parse("[1]\u{2028}").is_ok());

    let err = parse("так \u{A0}x").unwrap_err();
    assert!(matches!(&err, Error::TrailingCharacters { found, .. } if found == "\"x\""), "{}", err);
}

#[test]
fn test_empty_document_fails() {
    assert!(parse("").is_err());
    assert!(parse(" \n ").is_err());
}

// ============================================================================
// Contexts
// ============================================================================

#[test]
fn test_leading_whitespace_sets_root_context() {
    let node = parse("\n\n   [1]").unwrap();
    assert_eq!(node.context(), Context::new(2, 3));
    assert_eq!(node.as_list().unwrap()[0].context(), Context::new(2, 4));
}

#[test]
fn test_child_contexts_follow_parent() {
    let source = concat!(
        "Користувач(\n",
        "  ім_я = \"Тарас\",\n",
        "  теги = [\"а\", \"б\"],\n",
        "  дані = (1 = пусто, \"к\" = -2.5)\n",
        ")"
    );
    let node = parse(source).unwrap();
    assert_contexts_ordered(&node);
    let object = node.as_object().unwrap();
    assert_eq!(object.entries[0].context, Context::new(1, 2));
    assert_eq!(object.entries[0].value.context(), Context::new(1, 9));
    assert_eq!(object.entries[1].value.context(), Context::new(2, 9));
}

#[test]
fn test_whitespace_only_moves_contexts() {
    let compact = parse(r#"P(a=[1,2],b=(c="d"))"#).unwrap();
    let spaced = parse("P(\n  a = [ 1 ,\t2 ] ,\n  b = ( c = \"d\" )\n)\n").unwrap();
    assert_eq!(compact.to_string(), spaced.to_string());
    assert_ne!(compact, spaced);
}

// ============================================================================
// Diagnostics and options
// ============================================================================

#[test]
fn test_error_location_and_filename() {
    let err = parse_with_filename("[\n  1,\n  @\n]", Some("doc.zn")).unwrap_err();
    assert_eq!(err.location(), Some(Location { line: 2, column: 2 }));
    let message = err.to_string();
    assert!(message.starts_with("Expected a value at 1:1 of <doc.zn>"), "{}", message);
    assert!(
        message.contains("caused by: expected a list entry at 3:3 of <doc.zn>"),
        "{}",
        message
    );
}

#[test]
fn test_error_frames_follow_chain() {
    let err = parse("(a = 1, b)").unwrap_err();
    let Error::Syntax { frames, .. } = &err else {
        panic!("expected a syntax error, got {:?}", err);
    };
    let expected: Vec<&str> = frames
        .iter()
        .filter_map(|frame| match frame {
            libznach::Frame::Expected { expected, .. } => Some(expected.as_str()),
            libznach::Frame::Note(_) => None,
        })
        .collect();
    assert_eq!(
        expected,
        ["a value", "a dictionary", "a list entry", "a dictionary entry", "`=`"]
    );
}

#[test]
fn test_hints_when_nothing_matches() {
    let message = parse("@").unwrap_err().to_string();
    assert!(message.contains("no value starts here"), "{}", message);
    assert!(message.contains("Назва(ключ=\"значення\")"), "{}", message);
}

#[test]
fn test_depth_limit() {
    init_tracing();
    let options = ParseOptions::new().with_max_depth(4);
    assert!(parse_with_options("[[[1]]]", &options).is_ok());
    assert!(parse_with_options("[[[[1]]]]", &options).is_err());

    let err = parse_with_options("[0, [0, [0, [0, []]]]]", &options).unwrap_err();
    assert!(err.to_string().contains("a value nested at most 4 levels deep"), "{}", err);
}

#[test]
fn test_depth_limit_on_first_entry() {
    let options = ParseOptions::new().with_max_depth(2);
    let err = parse_with_options("[[1]]", &options).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("a value nested at most 2 levels deep"), "{}", message);
    assert!(!message.contains("`]`"), "{}", message);
    assert_eq!(err.location(), Some(Location { line: 0, column: 2 }));
}

#[test]
fn test_deep_nesting_fails_cleanly_by_default() {
    let source = format!("{}{}", "[".repeat(10_000), "]".repeat(10_000));
    let message = parse(&source).unwrap_err().to_string();
    assert!(message.contains("a value nested at most 64 levels deep"), "{}", message);

    let source = format!("{}{}", "[".repeat(100), "]".repeat(100));
    let message = parse(&source).unwrap_err().to_string();
    assert!(message.contains("a value nested at most 64 levels deep"), "{}", message);
    assert!(!message.contains("expected `]`"), "{}", message);
}

#[test]
fn test_options_filename() {
    let options = ParseOptions::new().with_filename("config.zn");
    let err = parse_with_options("так так", &options).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unexpected trailing characters \"так\" at 1:5 of <config.zn>"
    );
}
