//! Incremental tracking of maximal same-colour runs ("lines").
//!
//! Every cell stores, per canonical direction, an optional handle into an
//! arena of [`Line`] records. A handle is shared by all cells the line spans,
//! so counting each live arena entry once gives identity-based deduplication.

use super::board::{COLS, ROWS};
use super::player::Player;

/// Board coordinate as `(column, row)`; row 0 is the top row.
pub type Coord = (usize, usize);

/// One of the four canonical axes. Offsets are expressed as `(dcol, drow)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Vertical,
    Rising,
    Horizontal,
    Falling,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Vertical,
        Direction::Rising,
        Direction::Horizontal,
        Direction::Falling,
    ];

    /// Normalize a neighbor offset so a direction and its opposite collapse
    /// onto the same axis: the column component is made non-negative, and a
    /// zero column component forces a positive row component.
    pub fn from_offset(dcol: isize, drow: isize) -> Direction {
        let (dcol, drow) = if dcol < 0 {
            (-dcol, -drow)
        } else if dcol == 0 {
            (0, drow.abs())
        } else {
            (dcol, drow)
        };
        match (dcol, drow) {
            (0, 1) => Direction::Vertical,
            (1, -1) => Direction::Rising,
            (1, 0) => Direction::Horizontal,
            (1, 1) => Direction::Falling,
            other => panic!("not a unit neighbor offset: {other:?}"),
        }
    }

    /// Step between consecutive members of a line in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Vertical => (0, 1),
            Direction::Rising => (1, -1),
            Direction::Horizontal => (1, 0),
            Direction::Falling => (1, 1),
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::Vertical => 0,
            Direction::Rising => 1,
            Direction::Horizontal => 2,
            Direction::Falling => 3,
        }
    }
}

/// Stable handle to a line in the registry arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId(u32);

/// A maximal contiguous run of same-colour cells along one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    direction: Direction,
    owner: Player,
    /// Sorted by `(col, row)`, which is also the order along `direction`.
    members: Vec<Coord>,
}

impl Line {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn owner(&self) -> Player {
        self.owner
    }

    pub fn members(&self) -> &[Coord] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn insert(&mut self, coord: Coord) {
        if let Err(pos) = self.members.binary_search(&coord) {
            self.members.insert(pos, coord);
        }
    }
}

#[derive(Debug, Clone)]
pub struct LineRegistry {
    arena: Vec<Option<Line>>,
    free: Vec<u32>,
    slots: [[[Option<LineId>; 4]; ROWS]; COLS],
}

impl LineRegistry {
    pub fn new() -> Self {
        LineRegistry {
            arena: Vec::new(),
            free: Vec::new(),
            slots: [[[None; 4]; ROWS]; COLS],
        }
    }

    /// Line handle stored at `coord` for `direction`, if any.
    pub fn slot(&self, coord: Coord, direction: Direction) -> Option<LineId> {
        self.slots[coord.0][coord.1][direction.index()]
    }

    /// Resolve a handle. Panics on a stale handle, which means the registry
    /// invariant has been broken.
    pub fn line(&self, id: LineId) -> &Line {
        self.arena[id.0 as usize]
            .as_ref()
            .unwrap_or_else(|| panic!("stale line handle {id:?}"))
    }

    /// Members of the line covering `coord` in `direction`, if any.
    pub fn members_at(&self, coord: Coord, direction: Direction) -> Option<&[Coord]> {
        self.slot(coord, direction).map(|id| self.line(id).members())
    }

    /// All lines the cell at `coord` belongs to.
    pub fn lines_at(&self, coord: Coord) -> impl Iterator<Item = &Line> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.slot(coord, dir))
            .map(move |id| self.line(id))
    }

    /// Every live line, each exactly once.
    pub fn iter(&self) -> impl Iterator<Item = (LineId, &Line)> + '_ {
        self.arena
            .iter()
            .enumerate()
            .filter_map(|(i, line)| line.as_ref().map(|l| (LineId(i as u32), l)))
    }

    /// Number of live lines.
    pub fn len(&self) -> usize {
        self.arena.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Join `placed` with its same-coloured `neighbor` along `direction`.
    pub fn link(&mut self, placed: Coord, neighbor: Coord, direction: Direction, owner: Player) {
        match (self.slot(placed, direction), self.slot(neighbor, direction)) {
            (None, None) => {
                let mut members = vec![placed, neighbor];
                members.sort_unstable();
                let id = self.alloc(Line {
                    direction,
                    owner,
                    members,
                });
                self.set_slot(placed, direction, Some(id));
                self.set_slot(neighbor, direction, Some(id));
            }
            (None, Some(id)) => {
                self.line_mut(id).insert(placed);
                self.set_slot(placed, direction, Some(id));
            }
            (Some(id), None) => {
                self.line_mut(id).insert(neighbor);
                self.set_slot(neighbor, direction, Some(id));
            }
            (Some(keep), Some(absorbed)) if keep != absorbed => {
                let absorbed_line = self.release(absorbed);
                for &coord in &absorbed_line.members {
                    self.set_slot(coord, direction, Some(keep));
                }
                let line = self.line_mut(keep);
                line.members.extend(absorbed_line.members);
                line.members.sort_unstable();
            }
            (Some(_), Some(_)) => {}
        }
    }

    /// Detach `removed` from every line it belongs to, splitting each line
    /// into the remnants on either side of it.
    pub fn split(&mut self, removed: Coord) {
        for direction in Direction::ALL {
            let Some(id) = self.slot(removed, direction) else {
                continue;
            };
            let line = self.release(id);
            let idx = line.members.binary_search(&removed).unwrap_or_else(|_| {
                panic!("cell {removed:?} missing from its {direction:?} line {id:?}")
            });

            for remnant in [&line.members[..idx], &line.members[idx + 1..]] {
                match remnant.len() {
                    0 => {}
                    1 => self.set_slot(remnant[0], direction, None),
                    _ => {
                        let new_id = self.alloc(Line {
                            direction,
                            owner: line.owner,
                            members: remnant.to_vec(),
                        });
                        for &coord in remnant {
                            self.set_slot(coord, direction, Some(new_id));
                        }
                    }
                }
            }
            self.set_slot(removed, direction, None);
        }
    }

    /// Check the registry invariant: a coordinate is a member of a line iff
    /// that line's handle is stored at the coordinate for the line's
    /// direction, and every line is sorted, contiguous and at least two long.
    pub fn validate(&self) -> Result<(), String> {
        for (id, line) in self.iter() {
            if line.len() < 2 {
                return Err(format!("line {id:?} has {} members", line.len()));
            }
            let (dc, dr) = line.direction.delta();
            for pair in line.members.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if a.0 as isize + dc != b.0 as isize || a.1 as isize + dr != b.1 as isize {
                    return Err(format!("line {id:?} not contiguous at {a:?} -> {b:?}"));
                }
            }
            for &coord in &line.members {
                if self.slot(coord, line.direction) != Some(id) {
                    return Err(format!("{coord:?} is in line {id:?} but its slot disagrees"));
                }
            }
        }

        for col in 0..COLS {
            for row in 0..ROWS {
                for direction in Direction::ALL {
                    let Some(id) = self.slot((col, row), direction) else {
                        continue;
                    };
                    let Some(line) = self.arena.get(id.0 as usize).and_then(Option::as_ref)
                    else {
                        return Err(format!("({col}, {row}) points at dead line {id:?}"));
                    };
                    if line.direction != direction || !line.members.contains(&(col, row)) {
                        return Err(format!("({col}, {row}) points at foreign line {id:?}"));
                    }
                }
            }
        }
        Ok(())
    }

    fn alloc(&mut self, line: Line) -> LineId {
        match self.free.pop() {
            Some(idx) => {
                self.arena[idx as usize] = Some(line);
                LineId(idx)
            }
            None => {
                self.arena.push(Some(line));
                LineId((self.arena.len() - 1) as u32)
            }
        }
    }

    fn release(&mut self, id: LineId) -> Line {
        let line = self.arena[id.0 as usize]
            .take()
            .unwrap_or_else(|| panic!("double release of line {id:?}"));
        self.free.push(id.0);
        line
    }

    fn line_mut(&mut self, id: LineId) -> &mut Line {
        self.arena[id.0 as usize]
            .as_mut()
            .unwrap_or_else(|| panic!("stale line handle {id:?}"))
    }

    fn set_slot(&mut self, coord: Coord, direction: Direction, id: Option<LineId>) {
        self.slots[coord.0][coord.1][direction.index()] = id;
    }
}

impl Default for LineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Two registries are equal when every cell sees the same line membership in
/// every direction. Arena handles are not compared.
impl PartialEq for LineRegistry {
    fn eq(&self, other: &Self) -> bool {
        (0..COLS).all(|col| {
            (0..ROWS).all(|row| {
                Direction::ALL.into_iter().all(|dir| {
                    self.members_at((col, row), dir) == other.members_at((col, row), dir)
                })
            })
        })
    }
}

impl Eq for LineRegistry {}
