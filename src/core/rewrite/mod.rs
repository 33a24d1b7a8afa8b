// ─── Version Rewrite Engine ───
// A tiny stack machine used to coerce ad-hoc upstream version strings into
// something `VersionNumber` can parse.
//
// The input string starts as the only stack entry. Programs are read one
// code point at a time:
//   0-9      push the digit as a number
//   "text"   push `text` as a string
//   'c       push the single character `c` as a string
//   others   operators, see `Op::from_char`
// Whitespace outside literals is ignored. When the program ends the top of
// the stack must be a string; that string is the result.

mod op;
mod stack;
mod value;

pub use op::Op;
pub use stack::Stack;
pub use value::{Value, ValueKind};

use crate::core::error::{MatrixError, MatrixResult};

enum Mode {
    Code,
    Text(String),
    Char,
}

/// Run `program` over `input`. `identity` names the package in error messages.
pub fn apply(identity: &str, input: &str, program: &str) -> MatrixResult<String> {
    let mut stack = Stack::with_input(input);
    let mut mode = Mode::Code;

    for (i, c) in program.chars().enumerate() {
        let at = |message: String| MatrixError::Rewrite {
            context: format!("op {} ('{}') of '{}'", i + 1, c, identity),
            message,
        };

        mode = match mode {
            Mode::Text(mut acc) => {
                if c == '"' {
                    stack.push(Value::Str(acc));
                    Mode::Code
                } else {
                    acc.push(c);
                    Mode::Text(acc)
                }
            }
            Mode::Char => {
                stack.push(Value::Str(c.to_string()));
                Mode::Code
            }
            Mode::Code if c.is_whitespace() => Mode::Code,
            Mode::Code if c == '\'' => Mode::Char,
            Mode::Code if c == '"' => Mode::Text(String::new()),
            Mode::Code => {
                if let Some(digit) = c.to_digit(10) {
                    stack.push(Value::Number(digit as f64));
                } else {
                    let op = Op::from_char(c).ok_or_else(|| at(format!("invalid op '{}'", c)))?;
                    stack.expect(op.signature()).map_err(at)?;
                    op.apply(&mut stack).map_err(at)?;
                }
                Mode::Code
            }
        };
    }

    let end = |message: String| MatrixError::Rewrite {
        context: format!("end of eval of '{}'", identity),
        message,
    };

    match mode {
        Mode::Code => {}
        Mode::Text(_) => return Err(end("unterminated string literal".into())),
        Mode::Char => return Err(end("missing character after '''".into())),
    }

    match stack.pop().map_err(end)? {
        Value::Str(s) => Ok(s),
        other => Err(end(format!(
            "expected string, but found '{}' instead",
            other.kind()
        ))),
    }
}
