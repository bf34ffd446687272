use crawler_admin_core::{ConfigField, Msg};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  show                          print all crawl targets
  add                           append a blank target
  edit <i> <field> [value...]   set a field (url, keywords, linkSelector, titleSelector,
                                dateSelector, contentSelector, urlPrefix)
  keywords <i> <kw>|<kw>...     set keywords, one per `|`
  remove <i>                    delete a target (asks for confirmation)
  save                          save all targets
  test <i>                      run one target's selectors on the backend
  scheduler                     toggle the crawl scheduler
  dismiss                       clear the headline message
  help                          show this text
  quit                          leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Add,
    Edit {
        index: usize,
        field: ConfigField,
        value: String,
    },
    Remove {
        index: usize,
    },
    Save,
    Test {
        index: usize,
    },
    Scheduler,
    Dismiss,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("`{0}` is not a record number")]
    BadIndex(String),
    #[error("`{0}` is not a field name")]
    BadField(String),
}

impl Command {
    /// The state-machine message for commands that change state.
    pub fn to_msg(&self) -> Option<Msg> {
        match self {
            Command::Add => Some(Msg::AddClicked),
            Command::Edit {
                index,
                field,
                value,
            } => Some(Msg::FieldEdited {
                index: *index,
                field: *field,
                value: value.clone(),
            }),
            Command::Remove { index } => Some(Msg::RemoveRequested { index: *index }),
            Command::Save => Some(Msg::SaveClicked),
            Command::Test { index } => Some(Msg::TestClicked { index: *index }),
            Command::Scheduler => Some(Msg::SchedulerToggled),
            Command::Dismiss => Some(Msg::HeadlineDismissed),
            Command::Show | Command::Help | Command::Quit => None,
        }
    }
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let (name, rest) = next_word(line);
    match name {
        "" => Err(CommandError::Empty),
        "show" | "ls" => Ok(Command::Show),
        "add" => Ok(Command::Add),
        "edit" => {
            let (index, rest) = parse_index(rest)?;
            let (field, rest) = next_word(rest);
            if field.is_empty() {
                return Err(CommandError::Missing("field name"));
            }
            let field = field
                .parse::<ConfigField>()
                .map_err(|_| CommandError::BadField(field.to_string()))?;
            Ok(Command::Edit {
                index,
                field,
                value: rest.trim().to_string(),
            })
        }
        "keywords" => {
            let (index, rest) = parse_index(rest)?;
            Ok(Command::Edit {
                index,
                field: ConfigField::Keywords,
                value: rest.trim().replace('|', "\n"),
            })
        }
        "remove" | "rm" => Ok(Command::Remove {
            index: parse_index(rest)?.0,
        }),
        "save" => Ok(Command::Save),
        "test" => Ok(Command::Test {
            index: parse_index(rest)?.0,
        }),
        "scheduler" => Ok(Command::Scheduler),
        "dismiss" => Ok(Command::Dismiss),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

/// Answer to a yes/no prompt; anything but an explicit yes cancels.
pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn next_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(end) => (&input[..end], &input[end..]),
        None => (input, ""),
    }
}

fn parse_index(input: &str) -> Result<(usize, &str), CommandError> {
    let (word, rest) = next_word(input);
    if word.is_empty() {
        return Err(CommandError::Missing("record number"));
    }
    let index = word
        .parse::<usize>()
        .map_err(|_| CommandError::BadIndex(word.to_string()))?;
    Ok((index, rest))
}

#[cfg(test)]
mod tests {
    use super::{is_confirmation, parse_command, Command, CommandError};
    use crawler_admin_core::{ConfigField, Msg};

    #[test]
    fn edit_keeps_inner_spaces_of_value() {
        assert_eq!(
            parse_command("edit 2 titleSelector  h1 .title ").unwrap(),
            Command::Edit {
                index: 2,
                field: ConfigField::TitleSelector,
                value: "h1 .title".to_string(),
            }
        );
    }

    #[test]
    fn edit_without_value_clears_field() {
        assert_eq!(
            parse_command("edit 0 url").unwrap(),
            Command::Edit {
                index: 0,
                field: ConfigField::Url,
                value: String::new(),
            }
        );
    }

    #[test]
    fn keywords_split_on_pipe() {
        let command = parse_command("keywords 1 rust| async |tokio").unwrap();
        assert_eq!(
            command.to_msg(),
            Some(Msg::FieldEdited {
                index: 1,
                field: ConfigField::Keywords,
                value: "rust\n async \ntokio".to_string(),
            })
        );
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
        assert_eq!(
            parse_command("frobnicate"),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
        assert_eq!(
            parse_command("remove x"),
            Err(CommandError::BadIndex("x".to_string()))
        );
        assert_eq!(parse_command("test"), Err(CommandError::Missing("record number")));
        assert_eq!(
            parse_command("edit 0 colour red"),
            Err(CommandError::BadField("colour".to_string()))
        );
    }

    #[test]
    fn read_only_commands_have_no_msg() {
        assert_eq!(parse_command("show").unwrap().to_msg(), None);
        assert_eq!(
            parse_command("scheduler").unwrap().to_msg(),
            Some(Msg::SchedulerToggled)
        );
    }

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_confirmation("y"));
        assert!(is_confirmation(" YES\n"));
        assert!(!is_confirmation(""));
        assert!(!is_confirmation("n"));
        assert!(!is_confirmation("sure"));
    }
}
