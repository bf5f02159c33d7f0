//! Line-based player commands.

use thiserror::Error;

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Next step, or the next chapter at the end.
    Next,
    /// Previous step, or the previous chapter at the start.
    Prev,
    /// The play/pause control.
    Toggle,
    Replay,
    /// Select a stage of the visible chapter.
    Jump(String),
    /// Scroll another chapter into view.
    Show(String),
    /// Answer a quiz question with a zero-based option index.
    Answer { quiz_id: String, option_index: usize },
    /// Forget the answer to a quiz question.
    Retry(String),
    /// Print the current view.
    View,
    Quit,
}

/// A line that is not a valid command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command `{0}`")]
    Unknown(String),

    #[error("`{command}` needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("`{0}` is not an option number")]
    InvalidOption(String),
}

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns `InputError` if the line is not a known command or lacks an
/// argument.
pub fn parse_line(line: &str) -> Result<Option<Input>, InputError> {
    let line = line.trim();
    let Some((word, rest)) = split_word(line) else {
        return Ok(None);
    };

    let input = match word {
        "n" | "next" => Input::Next,
        "p" | "prev" => Input::Prev,
        "t" | "toggle" | "play" | "pause" => Input::Toggle,
        "r" | "replay" => Input::Replay,
        "v" | "view" => Input::View,
        "q" | "quit" | "exit" => Input::Quit,
        "jump" => Input::Jump(required(rest, "jump", "a stage key")?.to_owned()),
        "show" => Input::Show(required(rest, "show", "a chapter key")?.to_owned()),
        "retry" => Input::Retry(required(rest, "retry", "a quiz id")?.to_owned()),
        "answer" => {
            const WHAT: &str = "a quiz id and an option number";
            let (quiz_id, option) =
                split_word(required(rest, "answer", WHAT)?).unwrap_or_default();
            let option = required(option, "answer", WHAT)?;
            let option_index = option
                .parse::<usize>()
                .map_err(|_| InputError::InvalidOption(option.to_owned()))?;
            Input::Answer {
                quiz_id: quiz_id.to_owned(),
                option_index,
            }
        }
        other => return Err(InputError::Unknown(other.to_owned())),
    };
    Ok(Some(input))
}

fn split_word(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    Some(text.split_once(char::is_whitespace).unwrap_or((text, "")))
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    what: &'static str,
) -> Result<&'a str, InputError> {
    let rest = rest.trim();
    if rest.is_empty() {
        Err(InputError::MissingArgument { command, what })
    } else {
        Ok(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_short_and_long_forms() {
        assert_eq!(parse_line("n"), Ok(Some(Input::Next)));
        assert_eq!(parse_line("  prev  "), Ok(Some(Input::Prev)));
        assert_eq!(parse_line("play"), Ok(Some(Input::Toggle)));
        assert_eq!(parse_line("q"), Ok(Some(Input::Quit)));
        assert_eq!(parse_line(""), Ok(None));
    }

    #[test]
    fn test_stage_keys_may_contain_spaces() {
        assert_eq!(
            parse_line("jump Question 2"),
            Ok(Some(Input::Jump("Question 2".to_owned())))
        );
    }

    #[test]
    fn test_answer_takes_quiz_and_option() {
        assert_eq!(
            parse_line("answer designSystem 1"),
            Ok(Some(Input::Answer {
                quiz_id: "designSystem".to_owned(),
                option_index: 1,
            }))
        );
        assert_eq!(
            parse_line("answer designSystem first"),
            Err(InputError::InvalidOption("first".to_owned()))
        );
        assert!(matches!(
            parse_line("answer designSystem"),
            Err(InputError::MissingArgument { command: "answer", .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_commands_and_missing_arguments() {
        assert_eq!(parse_line("dance"), Err(InputError::Unknown("dance".to_owned())));
        assert!(matches!(
            parse_line("show"),
            Err(InputError::MissingArgument { command: "show", .. })
        ));
    }
}
