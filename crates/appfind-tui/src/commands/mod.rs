// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use appfind_core::Entity;

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the app
    Quit,
    // Toggle the help popup
    Help,
    // Change theme
    Theme(String),
    // Run a search for the given term with the current filters
    Search(String),
    // Fetch one app by bundle id
    Lookup(String),
    // Set the storefront country filter; empty means the API default
    Country(String),
    // Set the entity filter
    Entity(Entity),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "quit!" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "s" | "search" => {
                if rest.is_empty() {
                    Err("usage: search <term>".to_string())
                } else {
                    Ok(Command::Search(rest.to_string()))
                }
            }
            "lookup" => {
                if rest.is_empty() || rest.contains(char::is_whitespace) {
                    Err("usage: lookup <bundle-id>".to_string())
                } else {
                    Ok(Command::Lookup(rest.to_string()))
                }
            }
            "country" => {
                if rest == "-" {
                    Ok(Command::Country(String::new()))
                } else if rest.len() == 2 && rest.chars().all(|c| c.is_ascii_alphabetic()) {
                    Ok(Command::Country(rest.to_ascii_lowercase()))
                } else {
                    Err("usage: country <two-letter code | ->".to_string())
                }
            }
            "entity" if rest.is_empty() => {
                Err("usage: entity <iphone|ipad|mac|all>".to_string())
            }
            "entity" => rest
                .parse::<Entity>()
                .map(Command::Entity)
                .map_err(|_| "usage: entity <iphone|ipad|mac|all>".to_string()),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
