//! Slash commands understood by the REPL.

use std::path::PathBuf;

/// Command names offered for completion and hints.
pub const COMMANDS: &[&str] = &[
    "/connect", "/interact", "/reveal", "/reset", "/status", "/save", "/help", "/quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Connect,
    Interact,
    Reset,
    Status,
    Save(PathBuf),
    Help,
    Quit,
}

impl Command {
    pub fn parse(input: &str) -> Result<Self, String> {
        let input = input.trim();
        let (name, arg) = match input.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (input, ""),
        };

        match name {
            "/connect" => Ok(Self::Connect),
            "/interact" | "/reveal" => Ok(Self::Interact),
            "/reset" => Ok(Self::Reset),
            "/status" => Ok(Self::Status),
            "/save" if arg.is_empty() => Err("Usage: /save <path>".to_string()),
            "/save" => Ok(Self::Save(PathBuf::from(arg))),
            "/help" => Ok(Self::Help),
            "/quit" | "/exit" | "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("Unknown command: {other}. Type /help for commands.")),
        }
    }
}

pub fn help_lines() -> Vec<(&'static str, &'static str)> {
    vec![
        ("/connect", "Connect your wallet and switch to the target network"),
        ("/interact", "Send the interaction transaction and reveal your identity (alias /reveal)"),
        ("/reset", "Clear the result or error and start over"),
        ("/status", "Show the current session"),
        ("/save <path>", "Write the revealed image to a file"),
        ("/help", "Show this help"),
        ("/quit", "Exit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_commands() {
        assert_eq!(Command::parse("/connect"), Ok(Command::Connect));
        assert_eq!(Command::parse("  /reveal "), Ok(Command::Interact));
        assert_eq!(Command::parse("/interact"), Ok(Command::Interact));
        assert_eq!(Command::parse("exit"), Ok(Command::Quit));
        assert_eq!(
            Command::parse("/save  out/me.png"),
            Ok(Command::Save(PathBuf::from("out/me.png")))
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Command::parse("/save").unwrap_err().starts_with("Usage"));
        assert!(Command::parse("/mint").unwrap_err().contains("/mint"));
    }

    #[test]
    fn test_every_completion_parses() {
        for name in COMMANDS {
            let input = if *name == "/save" { "/save x.png".to_string() } else { name.to_string() };
            assert!(Command::parse(&input).is_ok(), "{name}");
        }
    }
}
