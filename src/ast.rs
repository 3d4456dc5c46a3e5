use std::fmt;

use crate::interpreter::value::SymbolType;

/// Unique identifier of a syntax tree node.
///
/// Ids are handed out by a [`NodeIdGenerator`] owned by a single parse, so
/// they are unique and strictly increasing within one tree. They carry no
/// semantic meaning beyond naming a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic source of [`NodeId`]s for one parse.
#[derive(Debug, Default)]
pub struct NodeIdGenerator {
    next: u32,
}

impl NodeIdGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Returns a fresh id and advances the counter.
    pub const fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

/// Prefix operators accepted by the factor rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `+x`, identity.
    Plus,
    /// `-x`, integer negation.
    Negate,
    /// `!x`, boolean negation.
    Not,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Plus => "+",
            Self::Negate => "-",
            Self::Not => "!",
        };
        f.write_str(symbol)
    }
}

/// Infix operators, from arithmetic up to boolean connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Equal,
    Greater,
    Less,
    And,
    Or,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Equal => "==",
            Self::Greater => ">",
            Self::Less => "<",
            Self::And => "&&",
            Self::Or => "||",
        };
        f.write_str(symbol)
    }
}

/// The three kinds of form input a field declaration can introduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FieldKind {
    /// `string_field`, a free text input.
    #[serde(rename = "string_field")]
    String,
    /// `select_field`, a choice among `options`.
    #[serde(rename = "select_field")]
    Select,
    /// `checkbox_field`, a boolean toggle.
    #[serde(rename = "checkbox_field")]
    Checkbox,
}

impl FieldKind {
    /// The keyword that introduces this kind of field in source code.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::String => "string_field",
            Self::Select => "select_field",
            Self::Checkbox => "checkbox_field",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Right-hand side of a `key: value` field property.
///
/// Scalars keep the literal node they were written as. Arrays hold string
/// literal and identifier nodes in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Scalar(Box<Node>),
    Array(Vec<Node>),
}

/// A node of the syntax tree.
///
/// Every node has an id that is unique within its tree and the line on
/// which it starts. Children are owned exclusively, so the tree never
/// shares or cycles.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id:   NodeId,
    pub line: usize,
    pub kind: NodeKind,
}

/// The node variants of the language.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Integer literal such as `42`.
    Int(i64),
    /// Double-quoted string literal.
    Str(String),
    /// `true` or `false`.
    Bool(bool),
    /// A variable reference.
    Identifier(String),
    /// Prefix operation applied to a factor.
    UnaryOp {
        op:      UnaryOperator,
        operand: Box<Node>,
    },
    /// Infix operation.
    BinaryOp {
        op:    BinaryOperator,
        left:  Box<Node>,
        right: Box<Node>,
    },
    /// `{ ... }`, a sequence of statements sharing the caller's scope.
    Block(Vec<Node>),
    /// `target = value`. The parser only ever produces identifier targets.
    Assignment {
        target: Box<Node>,
        value:  Box<Node>,
    },
    /// `var name type [= init]`.
    VarDeclaration {
        name: String,
        ty:   SymbolType,
        init: Option<Box<Node>>,
    },
    /// `if condition { ... } [else { ... }]`.
    If {
        condition:   Box<Node>,
        then_branch: Box<Node>,
        else_branch: Option<Box<Node>>,
    },
    /// `for condition { ... }`, which loops while the condition holds.
    While {
        condition: Box<Node>,
        body:      Box<Node>,
    },
    /// `Println(expr)`.
    Print(Box<Node>),
    /// `Scan()`. Input is not wired up, it always reads zero.
    Scan,
    /// `string_field name { ... }` and its siblings. The properties are
    /// [`NodeKind::FieldProperty`] nodes.
    FieldDeclaration {
        kind:       FieldKind,
        name:       String,
        properties: Vec<Node>,
    },
    /// `key: value` inside a field declaration.
    FieldProperty {
        key:   String,
        value: PropertyValue,
    },
    /// `form name { ... }`.
    FormDeclaration {
        name: String,
        body: Vec<Node>,
    },
    /// An empty line.
    NoOp,
}

impl Node {
    /// The direct children of this node, in source order.
    #[must_use]
    pub fn children(&self) -> Vec<&Self> {
        match &self.kind {
            NodeKind::Int(_)
            | NodeKind::Str(_)
            | NodeKind::Bool(_)
            | NodeKind::Identifier(_)
            | NodeKind::Scan
            | NodeKind::NoOp => Vec::new(),
            NodeKind::UnaryOp { operand, .. } => vec![operand.as_ref()],
            NodeKind::BinaryOp { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            NodeKind::Block(statements) | NodeKind::FormDeclaration { body: statements, .. } => {
                statements.iter().collect()
            },
            NodeKind::Assignment { target, value } => vec![target.as_ref(), value.as_ref()],
            NodeKind::VarDeclaration { init, .. } => init.as_deref().into_iter().collect(),
            NodeKind::If { condition,
                           then_branch,
                           else_branch, } => {
                let mut children = vec![condition.as_ref(), then_branch.as_ref()];
                children.extend(else_branch.as_deref());
                children
            },
            NodeKind::While { condition, body } => vec![condition.as_ref(), body.as_ref()],
            NodeKind::Print(expr) => vec![expr.as_ref()],
            NodeKind::FieldDeclaration { properties, .. } => properties.iter().collect(),
            NodeKind::FieldProperty { value, .. } => match value {
                PropertyValue::Scalar(node) => vec![node.as_ref()],
                PropertyValue::Array(nodes) => nodes.iter().collect(),
            },
        }
    }

    /// Calls `visit` on this node and every descendant, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Short human readable name of the node variant, used in diagnostics.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match &self.kind {
            NodeKind::Int(_) => "integer literal",
            NodeKind::Str(_) => "string literal",
            NodeKind::Bool(_) => "boolean literal",
            NodeKind::Identifier(_) => "identifier",
            NodeKind::UnaryOp { .. } => "unary operation",
            NodeKind::BinaryOp { .. } => "binary operation",
            NodeKind::Block(_) => "block",
            NodeKind::Assignment { .. } => "assignment",
            NodeKind::VarDeclaration { .. } => "variable declaration",
            NodeKind::If { .. } => "if statement",
            NodeKind::While { .. } => "for loop",
            NodeKind::Print(_) => "Println",
            NodeKind::Scan => "Scan",
            NodeKind::FieldDeclaration { .. } => "field declaration",
            NodeKind::FieldProperty { .. } => "field property",
            NodeKind::FormDeclaration { .. } => "form declaration",
            NodeKind::NoOp => "empty line",
        }
    }
}
