//! Slash-command parsing for inbound texts.
//!
//! Recognized: `/report` and `/bot <question>`, each optionally addressed as
//! `/report@botname`. Any other `/x` is [`Command::Other`].

/// A recognized command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Report,
    /// `/bot`; `None` when no question follows the command.
    Ask { question: Option<String> },
    /// Any other slash command, by name.
    Other(String),
}

/// A command plus the bot it was addressed to (`/report@name`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub command: Command,
    pub mention: Option<String>,
}

impl ParsedCommand {
    /// True unless the command names a different bot. An unknown own username accepts
    /// every mention.
    pub fn is_addressed_to(&self, bot_username: Option<&str>) -> bool {
        match (self.mention.as_deref(), bot_username) {
            (Some(mention), Some(own)) => mention.eq_ignore_ascii_case(own.trim_start_matches('@')),
            _ => true,
        }
    }
}

/// Parses a leading slash command; `None` for texts that are not commands.
pub fn parse_command(text: &str) -> Option<ParsedCommand> {
    let text = text.trim_start();
    let rest = text.strip_prefix('/')?;

    let token_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let (token, args) = rest.split_at(token_end);
    let (name, mention) = match token.split_once('@') {
        Some((name, mention)) => (name, Some(mention.to_string()).filter(|m| !m.is_empty())),
        None => (token, None),
    };
    if name.is_empty() {
        return None;
    }

    let command = match name {
        "report" => Command::Report,
        "bot" => {
            let question = args.trim();
            Command::Ask {
                question: (!question.is_empty()).then(|| question.to_string()),
            }
        }
        other => Command::Other(other.to_string()),
    };

    Some(ParsedCommand { command, mention })
}
