//! Calculator session module.
//!
//! A `Session` is the headless form of the calculator's control layer: it
//! owns an engine and the pending input line, and turns each user action
//! (a `Command`) into engine calls. Front-ends render `stack()` and
//! `input()` after every command.
//!
//! Every error is logged with `log::warn!` and handed back to the caller,
//! which is expected to show [`Session::ERROR_MESSAGE`]. A failed command
//! leaves the stack, the undo snapshot and the pending input as they were,
//! so the user can correct the input and try again.

use log::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::engine::CalculatorEngine;
use crate::error::{CalcError, Result};
use crate::input::InputLine;
use crate::numeric::CalcValue;
use crate::operator::{BinaryOperator, UnaryOperator};

/// A single user action.
///
/// # Examples
///
/// ```rust
/// use upncalc::{BinaryOperator, Command};
///
/// assert_eq!(Command::from_key('7'), Some(Command::Char('7')));
/// assert_eq!(Command::from_key('+'), Some(Command::Binary(BinaryOperator::Add)));
/// assert_eq!(Command::from_key('\n'), Some(Command::Enter));
/// assert_eq!(Command::from_key('q'), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Type a digit or the decimal point.
    Char(char),
    /// Push the pending input onto the stack.
    Enter,
    /// Push the pending input, then apply a binary operator.
    Binary(BinaryOperator),
    /// Push the pending input, then apply a unary operator.
    Unary(UnaryOperator),
    /// Put π into the pending input.
    Pi,
    /// Negate the pending input.
    ToggleSign,
    /// Pop the top value back into the pending input ("ST").
    StackToInput,
    /// Copy the stack entry at `index` (bottom = 0) into the pending input.
    Recall(usize),
    /// Remove the top value ("CE").
    ClearEntry,
    /// Empty the stack ("C").
    Cancel,
    /// Discard the pending input.
    ClearInput,
    /// Delete the last typed character.
    Backspace,
    /// Undo the last stack change.
    Undo,
}

impl Command {
    /// Map a keyboard character to a command.
    ///
    /// Digits and `.` type, `+ - * /` apply operators, Enter pushes,
    /// Escape and Delete clear the input, Backspace edits it.
    pub fn from_key(key: char) -> Option<Command> {
        match key {
            '0'..='9' | '.' => Some(Command::Char(key)),
            '+' => Some(Command::Binary(BinaryOperator::Add)),
            '-' => Some(Command::Binary(BinaryOperator::Subtract)),
            '*' => Some(Command::Binary(BinaryOperator::Multiply)),
            '/' => Some(Command::Binary(BinaryOperator::Divide)),
            '\n' | '\r' => Some(Command::Enter),
            '\u{1b}' | '\u{7f}' => Some(Command::ClearInput),
            '\u{8}' => Some(Command::Backspace),
            _ => None,
        }
    }
}

/// A calculator session: engine plus pending input.
///
/// # Examples
///
/// ```rust
/// use upncalc::{BinaryOperator, Command, Session};
///
/// let mut session = Session::new();
/// session.type_text("3").unwrap();
/// session.execute(Command::Enter).unwrap();
/// session.type_text("4").unwrap();
/// let sum = session.execute(Command::Binary(BinaryOperator::Add)).unwrap();
///
/// assert_eq!(sum.unwrap().to_string(), "7");
/// assert_eq!(session.stack().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    engine: CalculatorEngine,
    input: InputLine,
}

impl Session {
    /// The single user-facing message for any failed command.
    pub const ERROR_MESSAGE: &'static str = "Wrong input";

    /// Create a session with the default engine configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session whose engine uses `config`.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        Ok(Self {
            engine: CalculatorEngine::with_config(config)?,
            input: InputLine::new(),
        })
    }

    /// The stack to render, bottom to top.
    pub fn stack(&self) -> &[CalcValue] {
        self.engine.peek_all()
    }

    /// The pending input text.
    pub fn input(&self) -> &str {
        self.input.as_str()
    }

    /// The underlying engine.
    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    /// Execute one command.
    ///
    /// Returns the value the command produced, if any: the result of an
    /// operator, the pushed value for `Enter`, or the removed value for
    /// `ClearEntry` and `StackToInput`.
    ///
    /// # Errors
    ///
    /// Any engine error, or `InvalidInput` when the pending text does not
    /// parse. The stack and the input are left unchanged in every case.
    pub fn execute(&mut self, command: Command) -> Result<Option<CalcValue>> {
        debug!("executing {:?}", command);
        let outcome = self.dispatch(command);
        if let Err(ref err) = outcome {
            warn!("{:?} failed: {}", command, err);
        }
        outcome
    }

    /// Type every character of `text`, ignoring the ones the input refuses.
    ///
    /// Characters that map to other commands (operators, Enter) are
    /// executed as such.
    pub fn type_text(&mut self, text: &str) -> Result<()> {
        for key in text.chars() {
            if let Some(command) = Command::from_key(key) {
                self.execute(command)?;
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> Result<Option<CalcValue>> {
        match command {
            Command::Char(c) => {
                if !self.input.push_char(c) {
                    trace!("ignored input character {:?}", c);
                }
                Ok(None)
            }
            Command::Enter => self.push_pending(),
            Command::Binary(op) => self.apply_to_pending(|engine| engine.apply_binary(op)),
            Command::Unary(op) => self.apply_to_pending(|engine| engine.apply_unary(op)),
            Command::Pi => {
                self.input.set_value(self.engine.pi());
                Ok(None)
            }
            Command::ToggleSign => {
                self.input.toggle_sign();
                Ok(None)
            }
            Command::StackToInput => {
                let value = self.engine.pop();
                if let Some(value) = value {
                    self.input.set_value(value);
                }
                Ok(value)
            }
            Command::Recall(index) => {
                let value = self.engine.peek_all().get(index).copied().ok_or_else(|| {
                    CalcError::InvalidInput(format!("no stack entry at position {}", index))
                })?;
                self.input.set_value(value);
                Ok(Some(value))
            }
            Command::ClearEntry => Ok(self.engine.clear_top()),
            Command::Cancel => {
                self.engine.clear_all();
                Ok(None)
            }
            Command::ClearInput => {
                self.input.clear();
                Ok(None)
            }
            Command::Backspace => {
                self.input.backspace();
                Ok(None)
            }
            Command::Undo => {
                if !self.engine.undo() {
                    trace!("nothing to undo");
                }
                Ok(None)
            }
        }
    }

    /// Push the pending input, then run `operator` on the engine.
    ///
    /// If the operator fails, the push is rolled back together with the
    /// snapshot it replaced, and the typed text is put back.
    fn apply_to_pending<F>(&mut self, operator: F) -> Result<Option<CalcValue>>
    where
        F: FnOnce(&mut CalculatorEngine) -> Result<CalcValue>,
    {
        let saved_engine = self.engine.clone();
        let saved_input = self.input.clone();
        self.push_pending()?;
        match operator(&mut self.engine) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                trace!("restoring stack and input {:?}", saved_input.as_str());
                self.engine = saved_engine;
                self.input = saved_input;
                Err(err)
            }
        }
    }

    /// Push the pending input, if any, onto the stack.
    fn push_pending(&mut self) -> Result<Option<CalcValue>> {
        let pending = self.input.take()?;
        if let Some(value) = pending {
            trace!("pushing {}", value);
            self.engine.push(value);
        }
        Ok(pending)
    }
}
