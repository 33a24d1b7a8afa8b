use std::fmt;

/// A single stack entry of the rewrite engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Str(String),
    List(Vec<String>),
    Bool(bool),
}

/// Kind tag used by operator signatures. `Any` matches every value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    Str,
    List,
    Bool,
    Any,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Number(_) => ValueKind::Number,
            Value::Str(_) => ValueKind::Str,
            Value::List(_) => ValueKind::List,
            Value::Bool(_) => ValueKind::Bool,
        }
    }
}

impl ValueKind {
    pub fn accepts(self, actual: ValueKind) -> bool {
        self == ValueKind::Any || self == actual
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // f64's Display already drops a zero fraction: 3.0 -> "3"
            Value::Number(n) => write!(f, "{}", n),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => write!(f, "[{}]", items.join(" ")),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Number => "number",
            ValueKind::Str => "string",
            ValueKind::List => "list",
            ValueKind::Bool => "boolean",
            ValueKind::Any => "any",
        };
        f.write_str(name)
    }
}
