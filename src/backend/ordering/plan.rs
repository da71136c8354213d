/**
 * Position Planning
 *
 * Pure computation of the sibling shifts needed to insert, move or remove a
 * child while keeping the positions of a parent's children equal to
 * `{0, .., N-1}`. Nothing here touches storage; the executor applies the
 * resulting `Shift`s inside a transaction.
 *
 * # Range rules
 *
 * - moving later (`old < new`): siblings in `old+1 ..= new` move down by one
 * - moving earlier (`new < old`): siblings in `new ..= old-1` move up by one
 * - leaving a parent: siblings after `old` move down by one
 * - entering a parent at `new`: siblings from `new` onwards move up by one
 *
 * The moving child is never inside a planned range, so its own row is
 * written separately after the shifts.
 */

use uuid::Uuid;

use crate::backend::ordering::OrderingError;

/// The two kinds of ordered children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiblingKind {
    /// Lists, ordered within a board
    List,
    /// Tasks, ordered within a list
    Task,
}

impl SiblingKind {
    /// Table holding the children
    pub fn table(self) -> &'static str {
        match self {
            SiblingKind::List => "lists",
            SiblingKind::Task => "tasks",
        }
    }

    /// Table holding the parents
    pub fn parent_table(self) -> &'static str {
        match self {
            SiblingKind::List => "boards",
            SiblingKind::Task => "lists",
        }
    }

    /// Foreign key column on the child table
    pub fn parent_column(self) -> &'static str {
        match self {
            SiblingKind::List => "board_id",
            SiblingKind::Task => "list_id",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SiblingKind::List => "List",
            SiblingKind::Task => "Task",
        }
    }

    pub fn parent_name(self) -> &'static str {
        match self {
            SiblingKind::List => "Board",
            SiblingKind::Task => "List",
        }
    }
}

/// One contiguous position space: the children of `parent`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scope {
    pub kind: SiblingKind,
    pub parent: Uuid,
}

impl Scope {
    pub fn new(kind: SiblingKind, parent: Uuid) -> Self {
        Self { kind, parent }
    }
}

/// Where a child sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub parent: Uuid,
    pub position: i32,
}

/// Inclusive position range; `end: None` runs to the last sibling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionRange {
    pub start: i32,
    pub end: Option<i32>,
}

impl PositionRange {
    pub fn between(start: i32, end: i32) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub fn starting_at(start: i32) -> Self {
        Self { start, end: None }
    }

    pub fn contains(&self, position: i32) -> bool {
        position >= self.start && self.end.map_or(true, |end| position <= end)
    }
}

/// Bulk `position += delta` over the children of `scope` whose position is in `range`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    pub scope: Scope,
    pub range: PositionRange,
    pub delta: i32,
}

impl Shift {
    /// Close the hole left at `vacated`
    pub fn close_gap(scope: Scope, vacated: i32) -> Self {
        Self {
            scope,
            range: PositionRange::starting_at(vacated + 1),
            delta: -1,
        }
    }

    /// Make room at `at`
    pub fn open_gap(scope: Scope, at: i32) -> Self {
        Self {
            scope,
            range: PositionRange::starting_at(at),
            delta: 1,
        }
    }

    /// Whether a child of `parent` at `position` is moved by this shift
    pub fn applies_to(&self, parent: Uuid, position: i32) -> bool {
        parent == self.scope.parent && self.range.contains(position)
    }
}

/// Outcome of planning an insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertPlan {
    pub position: i32,
    pub shift: Option<Shift>,
}

/// Outcome of planning a move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub shifts: Vec<Shift>,
    pub target: Placement,
}

impl MovePlan {
    fn unchanged(current: Placement) -> Self {
        Self {
            shifts: Vec::new(),
            target: current,
        }
    }
}

/// Plan the position of a new child among `count` existing ones.
///
/// Without `desired` the child is appended and nothing else moves. With it,
/// the slot must lie in `0..=count` and later siblings shift up.
pub fn plan_insert(scope: Scope, count: i64, desired: Option<i32>) -> Result<InsertPlan, OrderingError> {
    match desired {
        None => {
            let position = i32::try_from(count).map_err(|_| OrderingError::OutOfRange {
                requested: i32::MAX,
                max: i64::from(i32::MAX),
            })?;
            Ok(InsertPlan {
                position,
                shift: None,
            })
        }
        Some(position) => {
            check_range(position, count)?;
            let shift = (i64::from(position) < count).then(|| Shift::open_gap(scope, position));
            Ok(InsertPlan { position, shift })
        }
    }
}

/// Plan moving a child from `current` to `new_position` under `target_parent`.
///
/// `source_count` counts the children of the current parent (including the
/// moving one); `dest_count` counts the children of `target_parent` and is
/// only consulted when the parent changes.
pub fn plan_move(
    kind: SiblingKind,
    current: Placement,
    target_parent: Uuid,
    new_position: i32,
    source_count: i64,
    dest_count: i64,
) -> Result<MovePlan, OrderingError> {
    let old = current.position;
    let target = Placement {
        parent: target_parent,
        position: new_position,
    };

    if target_parent != current.parent {
        check_range(new_position, dest_count)?;
        let mut shifts = vec![Shift::close_gap(Scope::new(kind, current.parent), old)];
        if i64::from(new_position) < dest_count {
            shifts.push(Shift::open_gap(Scope::new(kind, target_parent), new_position));
        }
        return Ok(MovePlan { shifts, target });
    }

    check_range(new_position, source_count - 1)?;
    let scope = Scope::new(kind, current.parent);
    let shift = match new_position.cmp(&old) {
        std::cmp::Ordering::Equal => return Ok(MovePlan::unchanged(current)),
        std::cmp::Ordering::Greater => Shift {
            scope,
            range: PositionRange::between(old + 1, new_position),
            delta: -1,
        },
        std::cmp::Ordering::Less => Shift {
            scope,
            range: PositionRange::between(new_position, old - 1),
            delta: 1,
        },
    };
    Ok(MovePlan {
        shifts: vec![shift],
        target,
    })
}

/// Plan the close-gap shift after removing the child at `removed`
pub fn plan_delete(kind: SiblingKind, removed: Placement) -> Shift {
    Shift::close_gap(Scope::new(kind, removed.parent), removed.position)
}

fn check_range(requested: i32, max: i64) -> Result<(), OrderingError> {
    if requested < 0 || i64::from(requested) > max {
        return Err(OrderingError::OutOfRange { requested, max });
    }
    Ok(())
}
