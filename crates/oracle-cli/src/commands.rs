//! Interactive prompt commands.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    City(String),
    Region(String),
    Predict,
    Speak,
    Story,
    Next,
    Back,
    Skip,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  city <name>     change the city and re-run the forecast
  region <name>   change the region and re-run the forecast
  predict         re-run the forecast for the current place
  speak           read the narrative aloud (again to stop)
  story           start the walkthrough
  next | back     move through the walkthrough
  skip            close the walkthrough
  help            show this list
  quit            exit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "city" | "region" if rest.is_empty() => {
                return Err(format!("`{}` needs a name", word));
            }
            "city" => Self::City(rest.to_string()),
            "region" => Self::Region(rest.to_string()),
            "predict" | "refresh" => Self::Predict,
            "speak" => Self::Speak,
            "story" => Self::Story,
            "next" => Self::Next,
            "back" | "prev" => Self::Back,
            "skip" => Self::Skip,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            "" => return Err("Type `help` for commands".to_string()),
            other => return Err(format!("Unknown command `{}`. Type `help`.", other)),
        };
        Ok(command)
    }
}
