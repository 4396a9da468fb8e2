//! Line-based command parsing for interactive runs.

use thiserror::Error;

use royale_core::cards::CardId;
use royale_core::commands::PlayerCommand;

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("empty command")]
    Empty,

    #[error("unknown command `{0}`")]
    Unknown(String),

    #[error("usage: {0} <card> <x> <y>")]
    Usage(&'static str),

    #[error("not a number: `{0}`")]
    Number(String),
}

/// Parse one line such as `deploy 1 9 5`, `pause` or `exit`.
pub fn parse_command(line: &str) -> Result<PlayerCommand, InputError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(InputError::Empty);
    };
    let args: Vec<&str> = words.collect();

    match verb.to_ascii_lowercase().as_str() {
        "deploy" | "d" => {
            let (card, x, y) = placement("deploy", &args)?;
            Ok(PlayerCommand::Deploy { card, x, y })
        }
        "preview" => {
            let (card, x, y) = placement("preview", &args)?;
            Ok(PlayerCommand::PreviewDeploy { card, x, y })
        }
        "pause" => Ok(PlayerCommand::Pause),
        "resume" => Ok(PlayerCommand::Resume),
        "restart" => Ok(PlayerCommand::Restart),
        "exit" | "quit" => Ok(PlayerCommand::Exit),
        other => Err(InputError::Unknown(other.to_string())),
    }
}

fn placement(verb: &'static str, args: &[&str]) -> Result<(CardId, f64, f64), InputError> {
    let [card, x, y] = args else {
        return Err(InputError::Usage(verb));
    };
    let card = card
        .parse::<u32>()
        .map_err(|_| InputError::Number(card.to_string()))?;
    let x = number(x)?;
    let y = number(y)?;
    Ok((CardId(card), x, y))
}

fn number(word: &str) -> Result<f64, InputError> {
    word.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| InputError::Number(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deploy() {
        assert_eq!(
            parse_command("deploy 3 9 4.5"),
            Ok(PlayerCommand::Deploy {
                card: CardId(3),
                x: 9.0,
                y: 4.5
            })
        );
        assert!(matches!(
            parse_command("  D 1 0 0 "),
            Ok(PlayerCommand::Deploy { .. })
        ));
    }

    #[test]
    fn test_parse_simple_verbs() {
        assert_eq!(parse_command("pause"), Ok(PlayerCommand::Pause));
        assert_eq!(parse_command("Resume"), Ok(PlayerCommand::Resume));
        assert_eq!(parse_command("restart"), Ok(PlayerCommand::Restart));
        assert_eq!(parse_command("quit"), Ok(PlayerCommand::Exit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_command("   "), Err(InputError::Empty));
        assert_eq!(parse_command("fly"), Err(InputError::Unknown("fly".into())));
        assert_eq!(parse_command("deploy 1 2"), Err(InputError::Usage("deploy")));
        assert_eq!(
            parse_command("preview x 1 2"),
            Err(InputError::Number("x".into()))
        );
        assert_eq!(
            parse_command("deploy 1 NaN 2"),
            Err(InputError::Number("NaN".into()))
        );
    }
}
