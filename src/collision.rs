use serde::Serialize;

use crate::grid::Vector2i;
use crate::snake::SnakeBody;

/// Classification of the cell the head lands on during one tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub enum Outcome {
    None,
    FoodEaten,
    SelfCollision,
}

/// Classifies a body that has already moved.
///
/// Food wins over a body hit; any segment behind the head counts as a hit.
#[must_use]
pub fn detect(body: &SnakeBody, food: Vector2i) -> Outcome {
    let head = body.head();
    if head == food {
        return Outcome::FoodEaten;
    }
    if body.cells().skip(1).any(|segment| *segment == head) {
        return Outcome::SelfCollision;
    }
    Outcome::None
}

/// Classifies a prospective head against the body before it moves.
///
/// Food is checked first. On a non-growth move the current tail is vacated as
/// the head enters, so it is excluded from the body hit test; every other
/// segment, the current head included, becomes part of the moved body.
#[must_use]
pub fn classify_move(body: &SnakeBody, next_head: Vector2i, food: Vector2i) -> Outcome {
    if next_head == food {
        return Outcome::FoodEaten;
    }

    let staying = body.len() - 1;
    if body.cells().take(staying).any(|segment| *segment == next_head) {
        return Outcome::SelfCollision;
    }
    Outcome::None
}
