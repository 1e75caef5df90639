//! A small calculator language used by the integration tests.
//!
//! ```text
//! program   := statement (";" statement)* ";"?
//! statement := "let" name "=" expr | expr
//! expr      := term (("+" | "-") term)*
//! term      := factor (("*" | "/") factor)*
//! factor    := number | name | "(" expr ")"
//! ```

#![allow(dead_code)]

use arbor_parser::{Lexer, ParseError, Parser};
use arbor_token::{TokenStream, Tokenizer, TokenizerConfig};
use arbor_tree::{Node, NodeList, NodeRef, Slot, SlotAccessor, SlotTable, Slots};

pub const GRAMMAR: &str = r##"{
    "patterns": [
        { "name": "number", "pattern": "[0-9]+" },
        { "name": "name", "pattern": "[a-z_][a-z0-9_]*" },
        { "name": "op", "pattern": "[-+*/=();]" },
        { "name": "space", "pattern": "\\s+" },
        // line comments
        { "name": "comment", "pattern": "#[^\\n]*" },
    ],
    "refinements": {
        "name": [{ "name": "keyword", "pattern": "let$" }]
    },
    "skip": ["space", "comment"]
}"##;

#[derive(Debug)]
pub struct Number(pub i64);

impl Node for Number {
    fn kind(&self) -> &'static str {
        "number"
    }
}

#[derive(Debug)]
pub struct Name(pub String);

impl Node for Name {
    fn kind(&self) -> &'static str {
        "name"
    }
}

#[derive(Debug)]
pub struct Binary {
    pub op: char,
    pub left: Option<NodeRef>,
    pub right: Option<NodeRef>,
}

static BINARY_SLOTS: Slots<Binary> = Slots::new(&[
    SlotAccessor::new(
        "left",
        |node: &Binary| Slot::from(node.left.clone()),
        |node: &mut Binary, slot: Slot| node.left = slot.into_node(),
    ),
    SlotAccessor::new(
        "right",
        |node: &Binary| Slot::from(node.right.clone()),
        |node: &mut Binary, slot: Slot| node.right = slot.into_node(),
    ),
]);

impl Node for Binary {
    fn kind(&self) -> &'static str {
        "binary"
    }

    fn slots(&self) -> Option<&'static dyn SlotTable> {
        Some(&BINARY_SLOTS)
    }
}

#[derive(Debug)]
pub struct Let {
    pub name: String,
    pub value: Option<NodeRef>,
}

static LET_SLOTS: Slots<Let> = Slots::new(&[SlotAccessor::new(
    "value",
    |node: &Let| Slot::from(node.value.clone()),
    |node: &mut Let, slot: Slot| node.value = slot.into_node(),
)]);

impl Node for Let {
    fn kind(&self) -> &'static str {
        "let"
    }

    fn slots(&self) -> Option<&'static dyn SlotTable> {
        Some(&LET_SLOTS)
    }
}

#[derive(Debug)]
pub struct Program {
    pub body: NodeList,
}

static PROGRAM_SLOTS: Slots<Program> = Slots::new(&[SlotAccessor::new(
    "body",
    |node: &Program| Slot::list(&node.body),
    |_: &mut Program, _: Slot| {},
)]);

impl Node for Program {
    fn kind(&self) -> &'static str {
        "program"
    }

    fn slots(&self) -> Option<&'static dyn SlotTable> {
        Some(&PROGRAM_SLOTS)
    }
}

pub fn number(value: i64) -> NodeRef {
    NodeRef::new(Number(value))
}

pub fn binary(op: char, left: NodeRef, right: NodeRef) -> NodeRef {
    NodeRef::new(Binary {
        op,
        left: Some(left),
        right: Some(right),
    })
}

/// Recursive-descent lexer for the calculator language.
pub struct Calculator;

impl Calculator {
    fn statement(&self, stream: &mut TokenStream) -> Result<NodeRef, ParseError> {
        if stream.optional("keyword").is_none() {
            return self.expr(stream);
        }
        let name = stream.expect("name")?.value;
        stream.expect_value("op", "=")?;
        let value = self.expr(stream)?;
        Ok(NodeRef::new(Let {
            name,
            value: Some(value),
        }))
    }

    fn expr(&self, stream: &mut TokenStream) -> Result<NodeRef, ParseError> {
        let mut left = self.term(stream)?;
        while let Some(op) = stream.optional_value("op", &["+", "-"]) {
            let right = self.term(stream)?;
            left = binary(operator(&op.value), left, right);
        }
        Ok(left)
    }

    fn term(&self, stream: &mut TokenStream) -> Result<NodeRef, ParseError> {
        let mut left = self.factor(stream)?;
        while let Some(op) = stream.optional_value("op", &["*", "/"]) {
            let right = self.factor(stream)?;
            left = binary(operator(&op.value), left, right);
        }
        Ok(left)
    }

    fn factor(&self, stream: &mut TokenStream) -> Result<NodeRef, ParseError> {
        if stream.optional_value("op", "(").is_some() {
            let inner = self.expr(stream)?;
            stream.expect_value("op", ")")?;
            return Ok(inner);
        }
        if let Some(name) = stream.optional("name") {
            return Ok(NodeRef::new(Name(name.value)));
        }

        let token = stream.expect("number")?;
        match token.value.parse() {
            Ok(value) => Ok(number(value)),
            Err(_) => Err(ParseError::invalid_at("Number out of range", token)),
        }
    }
}

impl Lexer for Calculator {
    type Output = NodeRef;

    fn generate(&self, stream: &mut TokenStream) -> Result<NodeRef, ParseError> {
        let body = NodeList::new();
        body.push(self.statement(stream)?);
        while stream.optional_value("op", ";").is_some() {
            if stream.is_empty() {
                break;
            }
            body.push(self.statement(stream)?);
        }
        Ok(NodeRef::new(Program { body }))
    }
}

fn operator(value: &str) -> char {
    value.chars().next().unwrap_or('?')
}

pub fn parser() -> Parser<Calculator> {
    let config = TokenizerConfig::from_json(GRAMMAR).unwrap();
    Parser::new(Tokenizer::from_config(&config), Calculator)
}

pub fn parse(source: &str) -> NodeRef {
    parser().parse(source).unwrap()
}

/// Renders a tree back to fully parenthesized source.
pub fn render(node: &NodeRef) -> String {
    if let Some(number) = node.downcast_ref::<Number>() {
        number.0.to_string()
    } else if let Some(name) = node.downcast_ref::<Name>() {
        name.0.clone()
    } else if let Some(binary) = node.downcast_ref::<Binary>() {
        format!(
            "({} {} {})",
            render_slot(&binary.left),
            binary.op,
            render_slot(&binary.right)
        )
    } else if let Some(statement) = node.downcast_ref::<Let>() {
        format!("let {} = {}", statement.name, render_slot(&statement.value))
    } else if let Some(program) = node.downcast_ref::<Program>() {
        program
            .body
            .nodes()
            .iter()
            .map(render)
            .collect::<Vec<_>>()
            .join("; ")
    } else {
        format!("<{}>", node.kind())
    }
}

fn render_slot(slot: &Option<NodeRef>) -> String {
    slot.as_ref().map_or_else(|| "_".to_string(), render)
}
