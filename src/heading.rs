use std::str::FromStr;

use serde::Serialize;

use crate::error::HeadingParseError;
use crate::grid::Vector2i;

/// Canonical movement directions for the snake head.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the opposite heading.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step for one tick of movement. Screen coordinates: `y` grows downward.
    #[must_use]
    pub fn delta(self) -> Vector2i {
        match self {
            Self::Up => Vector2i::new(0, -1),
            Self::Down => Vector2i::new(0, 1),
            Self::Left => Vector2i::new(-1, 0),
            Self::Right => Vector2i::new(1, 0),
        }
    }
}

impl TryFrom<char> for Heading {
    type Error = HeadingParseError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase() {
            'u' => Ok(Self::Up),
            'd' => Ok(Self::Down),
            'l' => Ok(Self::Left),
            'r' => Ok(Self::Right),
            _ => Err(HeadingParseError {
                input: value.to_string(),
            }),
        }
    }
}

impl FromStr for Heading {
    type Err = HeadingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::try_from(c);
        }

        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(HeadingParseError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Returns the heading to apply this tick.
///
/// A request for the exact opposite of `last` is a reversal into the body and
/// is rejected by keeping `last`; every other request is applied as given.
#[must_use]
pub fn resolve(last: Heading, requested: Heading) -> Heading {
    if requested == last.opposite() {
        return last;
    }
    requested
}

/// Like [`resolve`], for raw input that may not have decoded to a heading.
///
/// `None` means the input was absent or unrecognized and resolves to `last`.
#[must_use]
pub fn resolve_input(last: Heading, requested: Option<Heading>) -> Heading {
    match requested {
        Some(heading) => resolve(last, heading),
        None => {
            tracing::trace!(?last, "no valid heading requested, holding course");
            last
        }
    }
}
