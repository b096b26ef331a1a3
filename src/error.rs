use std::fmt;


#[macro_export]
macro_rules! internal_error_message {
    () => {
        format!("Internal error at {}:{}.", file!(), line!())
    };
    ($($arg:tt)+) => {
        format!("Internal error at {}:{}: {}.", file!(), line!(), format!($($arg)*))
    };
}

// Why a move or a drop was not applied. Callers get this instead of an exception; the board
// is left as it was.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveError {
    SameSquare,
    PieceMissing,
    WrongTurnOrder,
    DestinationNotAllowed,
    DestinationOccupied,
    CombinationForbidden,
    NotPremovable,
}

// Where and why a layout string stopped making sense. `index` is a char offset.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum LayoutError {
    UnknownPiece { index: usize, ch: char },
    TooManyRanks { index: usize },
    RankOverflow { index: usize, rank: u8 },
    UnbalancedStack { index: usize },
    NestedStack { index: usize },
    MixedStack { index: usize },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MoveError::SameSquare => "origin and destination coincide",
            MoveError::PieceMissing => "no piece at origin",
            MoveError::WrongTurnOrder => "piece cannot move now",
            MoveError::DestinationNotAllowed => "destination is not in the allowed list",
            MoveError::DestinationOccupied => "destination is occupied",
            MoveError::CombinationForbidden => "pieces cannot combine",
            MoveError::NotPremovable => "not a valid premove",
        };
        f.write_str(s)
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::UnknownPiece { index, ch } => write!(f, "unknown piece '{ch}' at {index}"),
            LayoutError::TooManyRanks { index } => write!(f, "too many ranks at {index}"),
            LayoutError::RankOverflow { index, rank } => {
                write!(f, "rank {rank} has too many files at {index}")
            }
            LayoutError::UnbalancedStack { index } => write!(f, "unbalanced stack at {index}"),
            LayoutError::NestedStack { index } => write!(f, "nested stack at {index}"),
            LayoutError::MixedStack { index } => write!(f, "stack mixes colors at {index}"),
        }
    }
}

impl std::error::Error for MoveError {}
impl std::error::Error for LayoutError {}
