use std::fmt;

use super::value::{Value, ValueKind};

/// Untyped operand stack; the last element is the top.
#[derive(Debug, Default)]
pub struct Stack {
    items: Vec<Value>,
}

impl Stack {
    pub fn with_input(input: &str) -> Self {
        Self {
            items: vec![Value::Str(input.to_string())],
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    pub fn pop(&mut self) -> Result<Value, String> {
        self.items.pop().ok_or_else(|| "stack underflow".to_string())
    }

    /// Check the top of the stack against `kinds`, top first.
    pub fn expect(&self, kinds: &[ValueKind]) -> Result<(), String> {
        if kinds.len() > self.items.len() {
            return Err(format!(
                "expected {} items on the stack but found {} items instead",
                kinds.len(),
                self.items.len()
            ));
        }

        for (i, (expected, value)) in kinds.iter().zip(self.items.iter().rev()).enumerate() {
            let actual = value.kind();
            if !expected.accepts(actual) {
                return Err(format!(
                    "expected '{}' in position {} of the stack, but found '{}' instead",
                    expected, i, actual
                ));
            }
        }

        Ok(())
    }

    pub fn pop_number(&mut self) -> Result<f64, String> {
        match self.pop()? {
            Value::Number(n) => Ok(n),
            other => Err(mismatch(ValueKind::Number, &other)),
        }
    }

    pub fn pop_str(&mut self) -> Result<String, String> {
        match self.pop()? {
            Value::Str(s) => Ok(s),
            other => Err(mismatch(ValueKind::Str, &other)),
        }
    }

    pub fn pop_list(&mut self) -> Result<Vec<String>, String> {
        match self.pop()? {
            Value::List(l) => Ok(l),
            other => Err(mismatch(ValueKind::List, &other)),
        }
    }

    /// Empty the whole stack into a list, failing if any entry is not a string.
    pub fn drain_strings(&mut self) -> Result<Vec<String>, String> {
        if let Some(bad) = self.items.iter().find(|v| v.kind() != ValueKind::Str) {
            return Err(format!(
                "stack must contain only strings to be convertible to a list, found '{}'",
                bad.kind()
            ));
        }

        Ok(self
            .items
            .drain(..)
            .filter_map(|v| match v {
                Value::Str(s) => Some(s),
                _ => None,
            })
            .collect())
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match v {
                Value::Str(s) => write!(f, "{:?}", s)?,
                other => write!(f, "{}", other)?,
            }
        }
        f.write_str("]")
    }
}

fn mismatch(expected: ValueKind, found: &Value) -> String {
    format!("expected '{}', but found '{}' instead", expected, found.kind())
}
