use std::fmt;

/// Machine-readable error codes shared by every trek error family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    EmptyLog,
    UndoAtStart,
    WorldParseError,
    WorldReadFailed,
    UnknownLocation,
    UnknownItem,
    DuplicateLocation,
    UnknownCommand,
    GameFinished,
    ConfigParseError,
    UnanswerablePuzzle,
    UnreachableCommand,
    UnreachablePuzzle,
    WalkthroughFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EmptyLog => "E1001",
            Self::UndoAtStart => "E1002",
            Self::WorldParseError => "E2001",
            Self::WorldReadFailed => "E2002",
            Self::UnknownLocation => "E2003",
            Self::UnknownItem => "E2004",
            Self::DuplicateLocation => "E2005",
            Self::UnanswerablePuzzle => "E2006",
            Self::UnreachableCommand => "E2007",
            Self::UnreachablePuzzle => "E2008",
            Self::UnknownCommand => "E3001",
            Self::GameFinished => "E3002",
            Self::ConfigParseError => "E4001",
            Self::WalkthroughFailed => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyLog => "No events recorded yet",
            Self::UndoAtStart => "Already at the first event",
            Self::WorldParseError => "World data parse error",
            Self::WorldReadFailed => "World data could not be read",
            Self::UnknownLocation => "Unknown location",
            Self::UnknownItem => "Unknown item",
            Self::DuplicateLocation => "Duplicate location id",
            Self::UnanswerablePuzzle => "Puzzle has no accepted answer",
            Self::UnreachableCommand => "Command can never be typed",
            Self::UnreachablePuzzle => "Puzzle command is not offered at its location",
            Self::UnknownCommand => "Command not available here",
            Self::GameFinished => "The game is over",
            Self::ConfigParseError => "Config file parse error",
            Self::WalkthroughFailed => "Walkthrough did not match expectations",
        }
    }

    /// Optional remediation hint that can be surfaced to players and scripts.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::EmptyLog => Some("Start a session before reading the log."),
            Self::UndoAtStart => None,
            Self::WorldParseError => Some("Fix the JSON syntax of the world file and retry."),
            Self::WorldReadFailed => Some("Check the --world path and its permissions."),
            Self::UnknownLocation | Self::UnknownItem | Self::DuplicateLocation => {
                Some("Make every id and item name in the world file refer to a defined entry.")
            }
            Self::UnanswerablePuzzle => Some("Give every answer-based puzzle a non-empty `answer` list."),
            Self::UnreachableCommand => Some("Write command and note keys in lower case."),
            Self::UnreachablePuzzle => {
                Some("Add the puzzle's command to `available_commands` of its location.")
            }
            Self::UnknownCommand => Some("Type one of the listed actions, or `look`."),
            Self::GameFinished => Some("Start a new game with `trek play`."),
            Self::ConfigParseError => Some("Fix syntax in trek.toml and retry."),
            Self::WalkthroughFailed => Some("Run `trek simulate` on the walkthrough to see the replay."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;
    use std::collections::HashSet;

    const ALL: [ErrorCode; 14] = [
        ErrorCode::EmptyLog,
        ErrorCode::UndoAtStart,
        ErrorCode::WorldParseError,
        ErrorCode::WorldReadFailed,
        ErrorCode::UnknownLocation,
        ErrorCode::UnknownItem,
        ErrorCode::DuplicateLocation,
        ErrorCode::UnanswerablePuzzle,
        ErrorCode::UnreachableCommand,
        ErrorCode::UnreachablePuzzle,
        ErrorCode::UnknownCommand,
        ErrorCode::GameFinished,
        ErrorCode::ConfigParseError,
        ErrorCode::WalkthroughFailed,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let s = code.code();
            assert_eq!(s.len(), 5);
            assert!(s.starts_with('E'));
            assert!(s.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn display_matches_code() {
        assert_eq!(ErrorCode::UndoAtStart.to_string(), "E1002");
    }
}
