// Command: the structured form of a workflow command and its serialization
// to the `::name key=value,key2=value2::message` wire format.

use std::fmt;

use crate::escape::escape_data;
use crate::properties::CommandProperties;
use crate::value::CommandValue;

/// The `::` token that both opens a command and separates the command info
/// from the message.
pub const COMMAND_SEPARATOR: &str = "::";

/// Placeholder substituted when a command is serialized with an empty name.
pub const MISSING_COMMAND_NAME: &str = "missing.command";

/// A workflow command issued to the runner over the output stream.
///
/// Serialization (via `Display`) is a pure function of the fields: the same
/// command always renders to byte-identical output.
///
/// ```
/// use actions_core::Command;
///
/// let cmd = Command::new("warning").message("disk is nearly full");
/// assert_eq!(cmd.to_string(), "::warning::disk is nearly full");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Command {
    /// The command name (e.g. "error", "add-mask", "group").
    pub name: String,
    /// The command message / body.
    pub message: CommandValue,
    /// Key-value properties attached to the command.
    pub properties: CommandProperties,
}

impl Command {
    /// Create a command with the given name and no message or properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: CommandValue::Absent,
            properties: CommandProperties::new(),
        }
    }

    /// Set the command message.
    pub fn message(mut self, message: impl Into<CommandValue>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the command properties.
    pub fn properties(mut self, properties: CommandProperties) -> Self {
        self.properties = properties;
        self
    }

    /// Add a single property.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<CommandValue>) -> Self {
        self.properties.insert(key, value);
        self
    }
}

impl fmt::Display for Command {
    /// Format: `::<name>[ <properties>]::<escaped message>`.
    ///
    /// An empty name is replaced with [`MISSING_COMMAND_NAME`]; the property
    /// segment (and its leading space) is omitted entirely when the bag is
    /// empty; an absent message leaves nothing after the final `::`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() {
            MISSING_COMMAND_NAME
        } else {
            &self.name
        };

        f.write_str(COMMAND_SEPARATOR)?;
        f.write_str(name)?;
        if !self.properties.is_empty() {
            f.write_str(" ")?;
            f.write_str(&self.properties.render())?;
        }
        f.write_str(COMMAND_SEPARATOR)?;
        f.write_str(&escape_data(&self.message.to_text()))
    }
}
