// Three-state column sorting

use std::fmt;
use std::str::FromStr;

/// Sort direction as written to the URL
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Invalid sort direction: {}", s)),
        }
    }
}

/// Active sort: one column, one direction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: &str, direction: SortDirection) -> Self {
        Self {
            column: column.to_string(),
            direction,
        }
    }
}

/// Next sort after a click on `column`.
///
/// Same column cycles `asc -> desc -> none`; any other column starts at `asc`.
pub fn next_sort(current: Option<&SortState>, column: &str) -> Option<SortState> {
    match current {
        Some(state) if state.column == column => match state.direction {
            SortDirection::Asc => Some(SortState::new(column, SortDirection::Desc)),
            SortDirection::Desc => None,
        },
        _ => Some(SortState::new(column, SortDirection::Asc)),
    }
}
