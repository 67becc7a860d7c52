use colored::Colorize;

use super::{
    direction::Cardinal,
    goals::GoalSet,
    position::Position,
    walls::{WallMap, WallState},
};

fn horizontal(state: WallState) -> String {
    match state {
        WallState::Closed => "---".normal().to_string(),
        WallState::Open => "   ".to_string(),
        WallState::Unknown => " ? ".dimmed().to_string(),
    }
}

fn vertical(state: WallState) -> String {
    match state {
        WallState::Closed => "|".normal().to_string(),
        WallState::Open => " ".to_string(),
        WallState::Unknown => ":".dimmed().to_string(),
    }
}

fn body(cell: Position, map: &WallMap, goals: &GoalSet, mouse: Option<Position>) -> String {
    if mouse == Some(cell) {
        " @ ".cyan().bold().to_string()
    } else if goals.contains(cell) {
        " * ".green().bold().to_string()
    } else if map.known_directions(cell) == 4 {
        " . ".yellow().to_string()
    } else {
        "   ".to_string()
    }
}

/// top-down view of the discovered walls, north up
pub fn render(map: &WallMap, size: usize, goals: &GoalSet, mouse: Option<Position>) -> String {
    let size = size as isize;
    let mut lines = Vec::with_capacity(2 * size as usize + 1);

    for y in (0..size).rev() {
        let mut top = String::from("+");
        let mut row = String::new();
        for x in 0..size {
            let cell = Position::new(x, y);
            top.push_str(&horizontal(map.get(cell, Cardinal::North)));
            top.push('+');

            if x == 0 {
                row.push_str(&vertical(map.get(cell, Cardinal::West)));
            }
            row.push_str(&body(cell, map, goals, mouse));
            row.push_str(&vertical(map.get(cell, Cardinal::East)));
        }
        lines.push(top);
        lines.push(row);
    }

    let mut bottom = String::from("+");
    for x in 0..size {
        bottom.push_str(&horizontal(map.get(Position::new(x, 0), Cardinal::South)));
        bottom.push('+');
    }
    lines.push(bottom);

    lines.join("\n")
}
