use derive_more::Display;
use derive_new::new;
use log::debug;

use crate::Point;

#[derive(Debug, Display, PartialEq, Eq)]
pub enum FindPathError {
    #[display(
        fmt = "Invalid grid: {} cells for a {}x{} grid",
        cells,
        width,
        height
    )]
    InvalidGrid {
        width: usize,
        height: usize,
        cells: usize,
    },
    #[display(fmt = "Start out of bounds: {}", _0)]
    StartOutOfBounds(Point),
    #[display(fmt = "Target out of bounds: {}", _0)]
    TargetOutOfBounds(Point),
}

impl std::error::Error for FindPathError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

const N: Direction = Direction::new(0, 1);
const E: Direction = Direction::new(1, 0);
const S: Direction = Direction::new(0, -1);
const W: Direction = Direction::new(-1, 0);

/// Expansion order of a cell's neighbours. Among several shortest paths,
/// the one returned is decided by this order.
pub const DIRECTIONS: [Direction; 4] = [N, E, S, W];

/// A discovered cell and the arena index of the entry it was discovered from.
#[derive(Debug, new)]
struct FrontierEntry {
    point: Point,
    parent: Option<usize>,
}

/**
 * Returns a shortest 4-connected path inclusive of start and end.  Uses BFS.
 * None if no path is found.
 * Err if the grid is malformed or start or end is out of bounds.
 *
 * `cells` is row-major, the cell at (x, y) being `cells[y * width + x]`.
 * Cells for which `is_blocked` is true are never entered; the start cell
 * itself is not tested.
 */
pub fn find_path<T, F>(
    cells: &[T],
    width: usize,
    height: usize,
    is_blocked: F,
    start: Point,
    target: Point,
) -> Result<Option<Vec<Point>>, FindPathError>
where
    F: Fn(&T) -> bool,
{
    if width == 0 || height == 0 || width.checked_mul(height) != Some(cells.len()) {
        return Err(FindPathError::InvalidGrid {
            width,
            height,
            cells: cells.len(),
        });
    }

    let start_index = start
        .index(width, height)
        .ok_or(FindPathError::StartOutOfBounds(start))?;

    if target.index(width, height).is_none() {
        return Err(FindPathError::TargetOutOfBounds(target));
    }

    Ok(bfs(cells, width, height, is_blocked, start_index, start, target))
}

fn bfs<T, F>(
    cells: &[T],
    width: usize,
    height: usize,
    is_blocked: F,
    start_index: usize,
    start: Point,
    target: Point,
) -> Option<Vec<Point>>
where
    F: Fn(&T) -> bool,
{
    let mut visited = vec![false; cells.len()];

    // Entries are appended in discovery order, so the arena is also the queue.
    let mut frontier = vec![FrontierEntry::new(start, None)];
    visited[start_index] = true;
    let mut front = 0;

    while front < frontier.len() {
        let curr_index = front;
        let curr = frontier[curr_index].point;
        front += 1;

        if curr == target {
            debug!("found path after expanding {} cells", curr_index);
            return Some(reconstruct_path(&frontier, curr_index));
        }

        for dir in DIRECTIONS {
            let adj = Point::new(curr.x + dir.dx, curr.y + dir.dy);

            let Some(adj_index) = adj.index(width, height) else {
                continue;
            };

            if visited[adj_index] {
                continue;
            }

            if is_blocked(&cells[adj_index]) {
                continue;
            }

            visited[adj_index] = true;
            frontier.push(FrontierEntry::new(adj, Some(curr_index)));
        }
    }

    debug!("no path found after discovering {} cells", frontier.len());
    None
}

fn reconstruct_path(frontier: &[FrontierEntry], from: usize) -> Vec<Point> {
    let mut path = Vec::new();
    let mut curr = Some(from);
    while let Some(index) = curr {
        let entry = &frontier[index];
        path.push(entry.point);
        curr = entry.parent;
    }

    path.reverse();
    path
}
