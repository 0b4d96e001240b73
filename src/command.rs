//! Command prefix matching.
//!
//! A message is a command when its content starts with the configured prefix,
//! immediately followed by the command name. Only prefix matching and whitespace
//! splitting are done here; interpreting arguments is left to the application.

/// The configured command prefix, e.g. `!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPrefix(String);

/// A command parsed from message content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command<'a> {
    /// Command name directly after the prefix.
    pub name: &'a str,
    /// Whitespace separated words following the name.
    pub args: Vec<&'a str>,
}

impl CommandPrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits message content into a command if it starts with this prefix.
    ///
    /// Returns `None` when the prefix is missing or when nothing but whitespace
    /// follows it. A space between prefix and name is not allowed.
    pub fn parse<'a>(&self, content: &'a str) -> Option<Command<'a>> {
        let rest = content.strip_prefix(self.0.as_str())?;
        if rest.starts_with(char::is_whitespace) {
            return None;
        }

        let mut words = rest.split_whitespace();
        let name = words.next()?;

        Some(Command {
            name,
            args: words.collect(),
        })
    }

    /// Returns whether the content invokes the named command.
    pub fn matches(&self, content: &str, name: &str) -> bool {
        self.parse(content)
            .is_some_and(|command| command.name == name)
    }
}
