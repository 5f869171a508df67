//! Parsing of the line commands typed at the prompt.
use gallery_core::SortOrder;
use thiserror::Error;

/// One user command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CliCommand {
    /// Reveal the next page of results.
    More,
    Sort(SortOrder),
    Filter { category: String, value: String },
    Unfilter { category: String, value: String },
    ClearFilters,
    Add(String),
    Remove(String),
    ClearSelection,
    Show(String),
    /// Filter controls, optionally for one category with a search term.
    Traits {
        category: Option<String>,
        search: Option<String>,
    },
    Refresh,
    Url,
    Open(String),
    Back,
    Forward,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`; type `help` for a list")]
    Unknown(String),

    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("unknown sort order `{0}`; try latest, oldest, rarity, health, power, violence or harmony")]
    UnknownSort(String),
}

pub const HELP: &str = "\
Commands:
  more                      show the next page
  sort <order>              latest, oldest, rarity, health, power, violence, harmony
  filter <category> <value> toggle a trait filter
  unfilter <category> <value>
  clear-filters             remove every trait filter
  traits [category [search]] list trait values with counts
  show <id>                 show one Kamigotchi
  add <id> / remove <id>    pin or unpin a Kamigotchi for comparison
  clear-selection           empty the comparison tray
  refresh                   reload the collection data
  url                       print the current location
  open <location>           restore a location such as /?body=red&sort=rarity
  back / forward            move through the location history
  help / quit";

impl CliCommand {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    ///
    /// Trait values may contain spaces; everything after the category is the
    /// value.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        let Some((word, rest)) = split_word(line) else {
            return Ok(None);
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "more" | "m" | "next" => Self::More,
            "sort" => {
                let raw = required(rest, "sort", "an order")?;
                let order = raw
                    .parse::<SortOrder>()
                    .map_err(|_| CommandError::UnknownSort(raw.to_owned()))?;
                Self::Sort(order)
            }
            "filter" | "f" => {
                let (category, value) = trait_pair(rest, "filter")?;
                Self::Filter { category, value }
            }
            "unfilter" | "uf" => {
                let (category, value) = trait_pair(rest, "unfilter")?;
                Self::Unfilter { category, value }
            }
            "clear-filters" | "cf" => Self::ClearFilters,
            "add" => Self::Add(required(rest, "add", "an ID")?.to_owned()),
            "remove" | "rm" => Self::Remove(required(rest, "remove", "an ID")?.to_owned()),
            "clear-selection" | "cs" => Self::ClearSelection,
            "show" | "s" => Self::Show(required(rest, "show", "an ID")?.to_owned()),
            "traits" | "t" => match split_word(rest) {
                None => Self::Traits {
                    category: None,
                    search: None,
                },
                Some((category, search)) => Self::Traits {
                    category: Some(category.to_owned()),
                    search: (!search.is_empty()).then(|| search.to_owned()),
                },
            },
            "refresh" | "r" => Self::Refresh,
            "url" => Self::Url,
            "open" => Self::Open(required(rest, "open", "a location")?.to_owned()),
            "back" | "b" => Self::Back,
            "forward" | "fw" => Self::Forward,
            "help" | "h" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => return Err(CommandError::Unknown(word.to_owned())),
        };

        Ok(Some(command))
    }
}

fn split_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    Some(match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    })
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, argument })
    } else {
        Ok(rest)
    }
}

fn trait_pair(rest: &str, command: &'static str) -> Result<(String, String), CommandError> {
    match split_word(rest) {
        Some((category, value)) if !value.is_empty() => {
            Ok((category.to_owned(), value.to_owned()))
        }
        _ => Err(CommandError::MissingArgument {
            command,
            argument: "a category and a value",
        }),
    }
}
