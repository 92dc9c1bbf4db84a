//! The quest scripting language: whitespace-separated postfix tokens run
//! against a value stack.
//!
//! A token that parses as a finite number is a number literal. Otherwise it
//! is looked up in the instruction table, and anything else is a string
//! literal. Effects and [`evaluate`] run with write access to the journal
//! ledger; dialogue conditions only read it. The verdict of a script is the
//! final top of the stack.

pub mod interpreter;

use std::fmt;

pub use interpreter::{condition_holds, evaluate, execute_condition, execute_effect};

/// A stack value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Str(String),
    Bool(bool),
}

impl Value {
    /// `false`, `0` and `""` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    SetJournalStage,
    GetJournalStage,
    IsJournalStage,
    Swap,
    Equal,
    Less,
    Greater,
    And,
    Dup,
    Between,
}

string_enum!(Instruction {
    SetJournalStage => "set_journal_stage",
    GetJournalStage => "get_journal_stage",
    IsJournalStage => "is_journal_stage",
    Swap => "swp",
    Equal => "=",
    Less => "<",
    Greater => ">",
    And => "and",
    Dup => "dup",
    Between => "between",
});

impl Instruction {
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|i| i.as_str() == token)
    }

    /// Operands popped from the stack.
    pub fn arity(self) -> usize {
        match self {
            Instruction::GetJournalStage | Instruction::Dup => 1,
            Instruction::Between => 3,
            _ => 2,
        }
    }

    /// Whether the instruction writes to the journal ledger.
    pub fn mutates(self) -> bool {
        self == Instruction::SetJournalStage
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Literal(Value),
    Op(Instruction),
}

impl Token {
    pub fn parse(token: &str) -> Self {
        if let Some(n) = token.parse::<f64>().ok().filter(|n| n.is_finite()) {
            return Token::Literal(Value::Number(n));
        }
        match Instruction::from_token(token) {
            Some(op) => Token::Op(op),
            None => Token::Literal(Value::Str(token.to_string())),
        }
    }
}

/// A tokenized script.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub tokens: Vec<Token>,
}

impl Program {
    pub fn parse(source: &str) -> Self {
        Self {
            tokens: source.split_whitespace().map(Token::parse).collect(),
        }
    }

    /// Whether the script contains an instruction that writes the ledger.
    pub fn mutates(&self) -> bool {
        self.tokens
            .iter()
            .any(|t| matches!(t, Token::Op(op) if op.mutates()))
    }
}
