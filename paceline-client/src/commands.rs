use paceline_core::BibNumber;

/// One line of console input. A bare number checkpoints that bib,
/// mirroring ticking a box on the start-list board.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    NewRace(String),
    SelectRace(String),
    ListRaces,
    AddSome(u32),
    Start,
    Checkpoint(BibNumber),
    Undo(BibNumber),
    Track(BibNumber),
    Splits(BibNumber),
    ShowCsv,
    LoadCsv,
    Reset,
    Save,
    Quit,
    Help,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, String> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        if let Ok(number) = head.parse::<BibNumber>() {
            if rest.is_empty() {
                return Ok(Command::Checkpoint(number));
            }
            return Err(format!("unexpected input after bib number: {:?}", rest));
        }

        let bib = |rest: &str| -> Result<BibNumber, String> {
            rest.parse()
                .map_err(|_| format!("expected a bib number, got {:?}", rest))
        };

        match head {
            "new" if !rest.is_empty() => Ok(Command::NewRace(rest.to_string())),
            "race" if !rest.is_empty() => Ok(Command::SelectRace(rest.to_string())),
            "races" => Ok(Command::ListRaces),
            "add" => Ok(Command::AddSome(
                rest.parse()
                    .map_err(|_| format!("expected a count, got {:?}", rest))?,
            )),
            "start" => Ok(Command::Start),
            "undo" => Ok(Command::Undo(bib(rest)?)),
            "track" => Ok(Command::Track(bib(rest)?)),
            "splits" => Ok(Command::Splits(bib(rest)?)),
            "csv" => Ok(Command::ShowCsv),
            "load" => Ok(Command::LoadCsv),
            "reset" => Ok(Command::Reset),
            "save" => Ok(Command::Save),
            "quit" | "exit" => Ok(Command::Quit),
            "help" | "?" => Ok(Command::Help),
            other => Err(format!("unknown command {:?}, try `help`", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_numbers_checkpoint() {
        assert_eq!(Command::parse("12").unwrap(), Command::Checkpoint(12));
        assert_eq!(Command::parse("  7  ").unwrap(), Command::Checkpoint(7));
        assert!(Command::parse("12 extra").is_err());
    }

    #[test]
    fn race_names_keep_their_spaces() {
        assert_eq!(
            Command::parse("new tuesday night crit").unwrap(),
            Command::NewRace("tuesday night crit".to_string())
        );
        assert_eq!(
            Command::parse("race spring tt").unwrap(),
            Command::SelectRace("spring tt".to_string())
        );
        assert!(Command::parse("new").is_err());
    }

    #[test]
    fn bib_arguments_are_validated() {
        assert_eq!(Command::parse("undo 3").unwrap(), Command::Undo(3));
        assert_eq!(Command::parse("track 9").unwrap(), Command::Track(9));
        assert_eq!(Command::parse("splits 4").unwrap(), Command::Splits(4));
        assert!(Command::parse("undo x").is_err());
        assert!(Command::parse("splits").is_err());
    }

    #[test]
    fn bare_words_map_to_commands() {
        assert_eq!(Command::parse("start").unwrap(), Command::Start);
        assert_eq!(Command::parse("reset").unwrap(), Command::Reset);
        assert_eq!(Command::parse("csv").unwrap(), Command::ShowCsv);
        assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
        assert!(Command::parse("frobnicate").is_err());
        assert!(Command::parse("").is_err());
    }
}
