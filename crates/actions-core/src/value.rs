// CommandValue: the closed set of scalars a command message or property
// value can carry, with one canonical text conversion.

use std::fmt;

/// A scalar value attached to a workflow command, either as the message or
/// as a property value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CommandValue {
    /// No value. Renders as the empty string.
    #[default]
    Absent,
    /// A boolean, rendered as `true` / `false`.
    Bool(bool),
    /// A number, rendered with Rust's standard float formatting
    /// (integral values render without a fractional part).
    Number(f64),
    /// A string, rendered verbatim (escaping happens at serialization).
    String(String),
}

impl CommandValue {
    /// The canonical textual form, before any wire escaping.
    pub fn to_text(&self) -> String {
        match self {
            CommandValue::Absent => String::new(),
            CommandValue::Bool(b) => b.to_string(),
            CommandValue::Number(n) => n.to_string(),
            CommandValue::String(s) => s.clone(),
        }
    }

    /// Whether this value is [`CommandValue::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, CommandValue::Absent)
    }
}

impl fmt::Display for CommandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandValue::Absent => Ok(()),
            CommandValue::Bool(b) => write!(f, "{}", b),
            CommandValue::Number(n) => write!(f, "{}", n),
            CommandValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CommandValue {
    fn from(s: &str) -> Self {
        CommandValue::String(s.to_string())
    }
}

impl From<String> for CommandValue {
    fn from(s: String) -> Self {
        CommandValue::String(s)
    }
}

impl From<bool> for CommandValue {
    fn from(b: bool) -> Self {
        CommandValue::Bool(b)
    }
}

impl From<f64> for CommandValue {
    fn from(n: f64) -> Self {
        CommandValue::Number(n)
    }
}

impl From<i32> for CommandValue {
    fn from(n: i32) -> Self {
        CommandValue::Number(n as f64)
    }
}

impl From<u32> for CommandValue {
    fn from(n: u32) -> Self {
        CommandValue::Number(n as f64)
    }
}

impl<T> From<Option<T>> for CommandValue
where
    T: Into<CommandValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CommandValue::Absent,
        }
    }
}
