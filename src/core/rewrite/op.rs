use tracing::debug;

use super::stack::Stack;
use super::value::{Value, ValueKind};

use ValueKind::{Any, List, Number, Str};

/// Every operator the engine understands, keyed by its program character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Split,
    Index,
    CharCode,
    ListSuffix,
    StrSuffix,
    ListPrefix,
    StrPrefix,
    Dup,
    Swap,
    ListLen,
    StrLen,
    ListLast,
    StrLast,
    Join,
    FromCode,
    Concat,
    Format,
    MakeList,
    Eq,
    Ne,
    Debug,
}

impl Op {
    pub fn from_char(c: char) -> Option<Self> {
        let op = match c {
            '+' => Op::Add,
            '-' => Op::Sub,
            '×' => Op::Mul,
            '÷' => Op::Div,
            '|' => Op::Split,
            '[' => Op::Index,
            ']' => Op::CharCode,
            '⌈' => Op::ListSuffix,
            '⌊' => Op::StrSuffix,
            '⌉' => Op::ListPrefix,
            '⌋' => Op::StrPrefix,
            '.' => Op::Dup,
            ':' | '↦' => Op::Swap,
            '⑂' => Op::ListLen,
            '⑃' => Op::StrLen,
            '⎲' => Op::ListLast,
            '⎳' => Op::StrLast,
            'j' => Op::Join,
            's' => Op::FromCode,
            '␣' => Op::Concat,
            'f' => Op::Format,
            'm' => Op::MakeList,
            '=' => Op::Eq,
            '≠' => Op::Ne,
            'd' => Op::Debug,
            _ => return None,
        };
        Some(op)
    }

    /// Kinds the operator needs on the stack, top of stack first.
    pub fn signature(self) -> &'static [ValueKind] {
        match self {
            Op::Add | Op::Sub | Op::Mul | Op::Div => &[Number, Number],
            Op::Split => &[Str, Str],
            Op::Index | Op::ListSuffix | Op::ListPrefix => &[Number, List],
            Op::CharCode | Op::StrSuffix | Op::StrPrefix => &[Number, Str],
            Op::Dup | Op::Format => &[Any],
            Op::Swap | Op::Eq | Op::Ne => &[Any, Any],
            Op::ListLen | Op::ListLast | Op::Concat => &[List],
            Op::StrLen | Op::StrLast => &[Str],
            Op::Join => &[Str, List],
            Op::FromCode => &[Number],
            Op::MakeList | Op::Debug => &[],
        }
    }

    /// Run the operator. The signature has already been checked.
    pub fn apply(self, stack: &mut Stack) -> Result<(), String> {
        match self {
            Op::Add | Op::Sub | Op::Mul | Op::Div => {
                let b = stack.pop_number()?;
                let a = stack.pop_number()?;
                let result = match self {
                    Op::Add => a + b,
                    Op::Sub => a - b,
                    Op::Mul => a * b,
                    _ => a / b,
                };
                stack.push(Value::Number(result));
            }
            Op::Split => {
                let sep = stack.pop_str()?;
                let subject = stack.pop_str()?;
                let parts = if sep.is_empty() {
                    subject.chars().map(String::from).collect()
                } else {
                    subject.split(sep.as_str()).map(String::from).collect()
                };
                stack.push(Value::List(parts));
            }
            Op::Index => {
                let n = to_index(stack.pop_number()?)?;
                let mut list = stack.pop_list()?;
                if n >= list.len() {
                    return Err(out_of_range(n, list.len()));
                }
                stack.push(Value::Str(list.swap_remove(n)));
            }
            Op::CharCode => {
                let n = to_index(stack.pop_number()?)?;
                let s = stack.pop_str()?;
                let len = s.chars().count();
                let c = s.chars().nth(n).ok_or_else(|| out_of_range(n, len))?;
                stack.push(Value::Number(c as u32 as f64));
            }
            Op::ListSuffix | Op::ListPrefix => {
                let n = to_index(stack.pop_number()?)?;
                let mut list = stack.pop_list()?;
                if n > list.len() {
                    return Err(out_of_range(n, list.len()));
                }
                let suffix = list.split_off(n);
                stack.push(Value::List(if self == Op::ListSuffix {
                    suffix
                } else {
                    list
                }));
            }
            Op::StrSuffix | Op::StrPrefix => {
                let n = to_index(stack.pop_number()?)?;
                let s = stack.pop_str()?;
                let len = s.chars().count();
                if n > len {
                    return Err(out_of_range(n, len));
                }
                let part: String = if self == Op::StrSuffix {
                    s.chars().skip(n).collect()
                } else {
                    s.chars().take(n).collect()
                };
                stack.push(Value::Str(part));
            }
            Op::Dup => {
                let top = stack.pop()?;
                stack.push(top.clone());
                stack.push(top);
            }
            Op::Swap => {
                let b = stack.pop()?;
                let a = stack.pop()?;
                stack.push(b);
                stack.push(a);
            }
            Op::ListLen => {
                let list = stack.pop_list()?;
                stack.push(Value::Number(list.len() as f64));
            }
            Op::StrLen => {
                let s = stack.pop_str()?;
                stack.push(Value::Number(s.chars().count() as f64));
            }
            Op::ListLast => {
                let mut list = stack.pop_list()?;
                let last = list.pop().ok_or("cannot take the last element of an empty list")?;
                stack.push(Value::Str(last));
            }
            Op::StrLast => {
                let s = stack.pop_str()?;
                let last = s
                    .chars()
                    .last()
                    .ok_or("cannot take the last character of an empty string")?;
                stack.push(Value::Number(last as u32 as f64));
            }
            Op::Join => {
                let sep = stack.pop_str()?;
                let list = stack.pop_list()?;
                stack.push(Value::Str(list.join(&sep)));
            }
            Op::FromCode => {
                let n = stack.pop_number()?;
                let code = u32::try_from(to_index(n)?)
                    .map_err(|_| format!("'{}' is not a valid code point", n))?;
                let c = char::from_u32(code)
                    .ok_or_else(|| format!("'{}' is not a valid code point", n))?;
                stack.push(Value::Str(c.to_string()));
            }
            Op::Concat => {
                let list = stack.pop_list()?;
                stack.push(Value::Str(list.concat()));
            }
            Op::Format => {
                let top = stack.pop()?;
                stack.push(Value::Str(top.to_string()));
            }
            Op::MakeList => {
                let items = stack.drain_strings()?;
                stack.push(Value::List(items));
            }
            Op::Eq | Op::Ne => {
                let b = stack.pop()?;
                let a = stack.pop()?;
                let equal = a == b;
                stack.push(Value::Bool(if self == Op::Eq { equal } else { !equal }));
            }
            Op::Debug => {
                debug!("rewrite stack: {}", stack);
            }
        }
        Ok(())
    }
}

fn to_index(n: f64) -> Result<usize, String> {
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= usize::MAX as f64 {
        Ok(n as usize)
    } else {
        Err(format!("'{}' is not a valid index", n))
    }
}

fn out_of_range(n: usize, len: usize) -> String {
    format!("index {} out of range for length {}", n, len)
}
