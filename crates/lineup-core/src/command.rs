use crate::error::{LineupError, Result};
use regex::Regex;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// One parsed chat command: a name and an ordered argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
}

static BRACKET_ARGS: OnceLock<Regex> = OnceLock::new();

fn bracket_args() -> &'static Regex {
    // Square brackets rather than quotes: the game strips double quotes from
    // chat before the script ever sees them.
    BRACKET_ARGS.get_or_init(|| Regex::new(r"\[([^\]]*)\]").expect("valid regex"))
}

/// Parse one chat line into a command name and arguments.
///
/// The first whitespace-delimited token after the prefix is the name
/// (case-preserving, no normalization). The remainder is scanned for
/// bracketed arguments in left-to-right order with interior whitespace kept
/// verbatim; if none are found and the remainder is non-empty, the whole
/// remainder becomes a single argument.
pub fn parse_line(line: &str, prefix: char) -> Command {
    let mut text = line.trim();
    if let Some(stripped) = text.strip_prefix(prefix) {
        // Tolerate a stray space after the prefix (e.g. "/ add").
        text = stripped.trim();
    }

    let name = text.split_whitespace().next().unwrap_or("");
    let rest = text[name.len()..].trim();

    let mut args: Vec<String> = bracket_args()
        .captures_iter(rest)
        .map(|c| c[1].to_string())
        .collect();

    if args.is_empty() && !rest.is_empty() {
        args = vec![rest.to_string()];
    }

    Command {
        name: name.to_string(),
        args,
    }
}

/// Arity guard used by the dispatch layer; the parser itself never validates.
pub fn require_args(cmd: &Command, required: usize) -> Result<()> {
    if cmd.args.len() < required {
        return Err(LineupError::MissingParameter {
            command: cmd.name.clone(),
            required,
        });
    }
    Ok(())
}
