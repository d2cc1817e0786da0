/// A recognised chat command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Shutdown,
}

/// Parse `<prefix><namespace> search <keyword>` or `<prefix><namespace> shutdown`.
///
/// Anything else yields `None` and is ignored without a reply. Tokens are
/// split on single spaces; the keyword is the token right after `search`.
pub fn parse_command(prefix: &str, namespace: &str, content: &str) -> Option<Command> {
    let rest = content.strip_prefix(prefix)?;
    let mut tokens = rest.split(' ');

    if tokens.next()? != namespace {
        return None;
    }

    match tokens.next()? {
        "search" => match tokens.next() {
            Some(keyword) if !keyword.is_empty() => Some(Command::Search(keyword.to_string())),
            _ => {
                tracing::debug!("search command without keyword");
                None
            }
        },
        "shutdown" => Some(Command::Shutdown),
        _ => None,
    }
}
