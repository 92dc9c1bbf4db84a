use std::cmp::Ordering;

use crate::error::DslError;
use crate::journal::{JournalLedger, JournalRecord};

use super::{Instruction, Program, Token, Value};

/// Ledger access granted to a run.
enum Journal<'a> {
    Read(&'a JournalLedger),
    Write(&'a mut JournalLedger),
}

impl Journal<'_> {
    fn ledger(&self) -> &JournalLedger {
        match self {
            Journal::Read(ledger) => ledger,
            Journal::Write(ledger) => ledger,
        }
    }
}

struct Machine<'a> {
    stack: Vec<Value>,
    journal: Journal<'a>,
}

/// Run a script with write access to the ledger and return the final top
/// of the stack.
pub fn evaluate(source: &str, ledger: &mut JournalLedger) -> Result<Option<Value>, DslError> {
    let mut machine = Machine {
        stack: Vec::new(),
        journal: Journal::Write(ledger),
    };
    machine.run(&Program::parse(source))?;
    Ok(machine.stack.pop())
}

/// Run an effect script for its ledger writes.
pub fn execute_effect(source: &str, ledger: &mut JournalLedger) -> Result<(), DslError> {
    evaluate(source, ledger).map(|_| ())
}

/// Run a condition script against a read-only ledger and return the final
/// top of the stack.
pub fn execute_condition(source: &str, ledger: &JournalLedger) -> Result<Option<Value>, DslError> {
    let mut machine = Machine {
        stack: Vec::new(),
        journal: Journal::Read(ledger),
    };
    machine.run(&Program::parse(source))?;
    Ok(machine.stack.pop())
}

/// Whether a condition script leaves a truthy value on top. An empty stack
/// is false.
pub fn condition_holds(source: &str, ledger: &JournalLedger) -> Result<bool, DslError> {
    Ok(execute_condition(source, ledger)?.is_some_and(|v| v.is_truthy()))
}

impl Machine<'_> {
    fn run(&mut self, program: &Program) -> Result<(), DslError> {
        for token in &program.tokens {
            match token {
                Token::Literal(value) => self.stack.push(value.clone()),
                Token::Op(op) => self.apply(*op)?,
            }
        }
        Ok(())
    }

    /// Pop the operands of `op`, deepest first.
    fn operands(&mut self, op: Instruction) -> Result<Vec<Value>, DslError> {
        let needed = op.arity();
        let available = self.stack.len();
        if available < needed {
            return Err(DslError::StackUnderflow {
                instruction: op.as_str(),
                needed,
                available,
            });
        }
        Ok(self.stack.split_off(available - needed))
    }

    fn apply(&mut self, op: Instruction) -> Result<(), DslError> {
        if op.mutates() && matches!(self.journal, Journal::Read(_)) {
            return Err(DslError::ReadOnly {
                instruction: op.as_str(),
            });
        }

        let mut args = self.operands(op)?.into_iter();
        let mut next = || args.next().unwrap_or(Value::Bool(false));

        match op {
            Instruction::SetJournalStage => {
                let id = quest_id(op, next())?;
                let stage = number(op, next())?;
                if let Journal::Write(ledger) = &mut self.journal {
                    if !ledger.has_record_stage(&id, stage) {
                        ledger.add_record(JournalRecord::new(id, stage));
                    }
                }
            }
            Instruction::GetJournalStage => {
                let id = quest_id(op, next())?;
                let stage = self.journal.ledger().current_stage(&id).unwrap_or(0.0);
                self.stack.push(Value::Number(stage));
            }
            Instruction::IsJournalStage => {
                let id = quest_id(op, next())?;
                let stage = number(op, next())?;
                let present = self.journal.ledger().has_record_stage(&id, stage);
                self.stack.push(Value::Bool(present));
            }
            Instruction::Swap => {
                let under = next();
                let top = next();
                self.stack.push(top);
                self.stack.push(under);
            }
            Instruction::Equal => {
                let left = next();
                let right = next();
                self.stack.push(Value::Bool(left == right));
            }
            Instruction::Less => {
                let left = next();
                let right = next();
                self.stack.push(Value::Bool(compare(op, &left, &right)? == Ordering::Less));
            }
            Instruction::Greater => {
                let left = next();
                let right = next();
                self.stack.push(Value::Bool(compare(op, &left, &right)? == Ordering::Greater));
            }
            Instruction::And => {
                let left = next();
                let right = next();
                self.stack.push(Value::Bool(left.is_truthy() && right.is_truthy()));
            }
            Instruction::Dup => {
                let a = next();
                self.stack.push(a.clone());
                self.stack.push(a);
            }
            Instruction::Between => {
                let value = next();
                let low = next();
                let high = next();
                let inside = compare(op, &low, &value)? != Ordering::Greater
                    && compare(op, &value, &high)? != Ordering::Greater;
                self.stack.push(Value::Bool(inside));
            }
        }
        Ok(())
    }
}

fn quest_id(op: Instruction, value: Value) -> Result<String, DslError> {
    match value {
        Value::Str(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(DslError::TypeMismatch {
            instruction: op.as_str(),
            expected: "quest id",
            found: other.kind().to_string(),
        }),
    }
}

fn number(op: Instruction, value: Value) -> Result<f64, DslError> {
    match value {
        Value::Number(n) => Ok(n),
        other => Err(DslError::TypeMismatch {
            instruction: op.as_str(),
            expected: "number",
            found: other.kind().to_string(),
        }),
    }
}

fn compare(op: Instruction, left: &Value, right: &Value) -> Result<Ordering, DslError> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => Ok(l.total_cmp(r)),
        (Value::Str(l), Value::Str(r)) => Ok(l.cmp(r)),
        _ => Err(DslError::TypeMismatch {
            instruction: op.as_str(),
            expected: "two numbers or two strings",
            found: format!("{} and {}", left.kind(), right.kind()),
        }),
    }
}
