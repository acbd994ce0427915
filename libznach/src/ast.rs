//! Syntax tree produced by the parser.
//!
//! Every node records the [`Context`] at which it starts. Nodes are built
//! bottom-up once their whole production has matched and are never changed
//! afterwards. The `Display` rendering is meant for tests and debugging; it
//! is not the znach notation.

use std::fmt;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::context::Context;

/// A parsed numeric literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// Numeral without a fractional part.
    Integer(BigInt),
    /// Numeral with a fractional part.
    Float(f64),
}

impl Number {
    /// Returns a reference to the integer if this is an `Integer`.
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Number::Integer(n) => Some(n),
            Number::Float(_) => None,
        }
    }

    /// Returns the float value if this is a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Number::Float(f) => Some(*f),
            Number::Integer(_) => None,
        }
    }

    /// Lossy conversion of either kind to `f64`.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Number::Integer(n) => n.to_f64(),
            Number::Float(f) => Some(*f),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            // Debug keeps the ".0" so floats never read as integers.
            Number::Float(n) => write!(f, "{:?}", n),
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Integer(BigInt::from(n))
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::Float(f)
    }
}

/// The `пусто` marker.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyNode {
    pub context: Context,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogicalNode {
    pub value: bool,
    pub context: Context,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberNode {
    pub value: Number,
    pub context: Context,
}

/// A quoted literal with its escapes resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub text: String,
    pub context: Context,
}

/// `Name(key=value, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode {
    pub identifier: String,
    pub entries: Vec<ObjectEntryNode>,
    pub context: Context,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectEntryNode {
    pub key: String,
    pub value: AstNode,
    pub context: Context,
}

/// `(key=value, ...)`. Entries keep source order and duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryNode {
    pub entries: Vec<DictionaryEntryNode>,
    pub context: Context,
}

/// Key of a dictionary entry. Bare identifiers are stored as text.
#[derive(Debug, Clone, PartialEq)]
pub enum DictionaryKey {
    Text(TextNode),
    Number(NumberNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryEntryNode {
    pub key: DictionaryKey,
    pub value: AstNode,
    pub context: Context,
}

/// `[value, ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListNode {
    pub entries: Vec<AstNode>,
    pub context: Context,
}

/// A znach value.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Empty(EmptyNode),
    Logical(LogicalNode),
    Number(NumberNode),
    Text(TextNode),
    Object(ObjectNode),
    Dictionary(DictionaryNode),
    List(ListNode),
}

impl AstNode {
    /// Position at which this node starts.
    pub fn context(&self) -> Context {
        match self {
            AstNode::Empty(node) => node.context,
            AstNode::Logical(node) => node.context,
            AstNode::Number(node) => node.context,
            AstNode::Text(node) => node.context,
            AstNode::Object(node) => node.context,
            AstNode::Dictionary(node) => node.context,
            AstNode::List(node) => node.context,
        }
    }

    pub fn kind_desc(&self) -> &'static str {
        match self {
            AstNode::Empty(_) => "empty",
            AstNode::Logical(_) => "logical",
            AstNode::Number(_) => "number",
            AstNode::Text(_) => "text",
            AstNode::Object(_) => "object",
            AstNode::Dictionary(_) => "dictionary",
            AstNode::List(_) => "list",
        }
    }

    /// Returns `true` if this is the `пусто` marker.
    pub fn is_empty(&self) -> bool {
        matches!(self, AstNode::Empty(_))
    }

    /// Returns the boolean value if this is a `Logical`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AstNode::Logical(node) => Some(node.value),
            _ => None,
        }
    }

    /// Returns a reference to the number if this is a `Number`.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            AstNode::Number(node) => Some(&node.value),
            _ => None,
        }
    }

    /// Returns the decoded text if this is a `Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AstNode::Text(node) => Some(&node.text),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            AstNode::Object(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&DictionaryNode> {
        match self {
            AstNode::Dictionary(node) => Some(node),
            _ => None,
        }
    }

    /// Returns the elements if this is a `List`.
    pub fn as_list(&self) -> Option<&[AstNode]> {
        match self {
            AstNode::List(node) => Some(&node.entries),
            _ => None,
        }
    }
}

impl ObjectNode {
    /// Value of the first entry named `key`.
    pub fn get(&self, key: &str) -> Option<&AstNode> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }
}

impl DictionaryKey {
    /// Position at which the key starts.
    pub fn context(&self) -> Context {
        match self {
            DictionaryKey::Text(node) => node.context,
            DictionaryKey::Number(node) => node.context,
        }
    }
}

impl DictionaryNode {
    /// Value of the first entry whose key is the text `key`.
    pub fn get(&self, key: &str) -> Option<&AstNode> {
        self.entries
            .iter()
            .find(|entry| matches!(&entry.key, DictionaryKey::Text(text) if text.text == key))
            .map(|entry| &entry.value)
    }
}

// ============================================================================
// Display
// ============================================================================

fn write_entries<T: fmt::Display>(f: &mut fmt::Formatter<'_>, entries: &[T]) -> fmt::Result {
    write!(f, "[")?;
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", entry)?;
    }
    write!(f, "]")
}

impl fmt::Display for EmptyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EmptyNode()")
    }
}

impl fmt::Display for LogicalNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogicalNode({})", self.value)
    }
}

impl fmt::Display for NumberNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NumberNode({})", self.value)
    }
}

impl fmt::Display for TextNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextNode({:?})", self.text)
    }
}

impl fmt::Display for ObjectNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectNode({:?}, ", self.identifier)?;
        write_entries(f, &self.entries)?;
        write!(f, ")")
    }
}

impl fmt::Display for ObjectEntryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectEntryNode({:?}, {})", self.key, self.value)
    }
}

impl fmt::Display for DictionaryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DictionaryNode(")?;
        write_entries(f, &self.entries)?;
        write!(f, ")")
    }
}

impl fmt::Display for DictionaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionaryKey::Text(node) => fmt::Display::fmt(node, f),
            DictionaryKey::Number(node) => fmt::Display::fmt(node, f),
        }
    }
}

impl fmt::Display for DictionaryEntryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DictionaryEntryNode({}, {})", self.key, self.value)
    }
}

impl fmt::Display for ListNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListNode(")?;
        write_entries(f, &self.entries)?;
        write!(f, ")")
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::Empty(node) => fmt::Display::fmt(node, f),
            AstNode::Logical(node) => fmt::Display::fmt(node, f),
            AstNode::Number(node) => fmt::Display::fmt(node, f),
            AstNode::Text(node) => fmt::Display::fmt(node, f),
            AstNode::Object(node) => fmt::Display::fmt(node, f),
            AstNode::Dictionary(node) => fmt::Display::fmt(node, f),
            AstNode::List(node) => fmt::Display::fmt(node, f),
        }
    }
}
