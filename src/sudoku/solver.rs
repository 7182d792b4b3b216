#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Maps the puzzle rules onto CNF clauses and models back onto grids.
//!
//! The variant solved here layers two extra rules on top of standard
//! Sudoku: both diagonals must hold every digit exactly once, and a cell
//! may never share its digit with a cell a knight's move away.

use crate::sat::cnf::{Clause, Cnf, Literal};
use crate::sat::solver::Solutions;
use itertools::Itertools;
use std::fmt;

/// Grid side length.
pub const SIZE: usize = 9;

/// Side length of one sub-box.
pub const BOX_SIZE: usize = 3;

const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
];

/// The proposition "cell `(row, col)` holds digit `num + 1`", with all
/// three coordinates in `[0, 9)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub num: usize,
}

impl Variable {
    #[must_use]
    pub const fn new(row: usize, col: usize, num: usize) -> Self {
        Self { row, col, num }
    }

    /// Maps the triple onto its literal: a bijection with `[1, 729]`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn encode(self) -> Literal {
        (self.row * SIZE * SIZE + self.col * SIZE + self.num + 1) as Literal
    }

    /// Exact inverse of [`Self::encode`], by base-9 positional
    /// decomposition of `lit - 1`. The literal's sign is ignored.
    #[must_use]
    pub const fn decode(lit: Literal) -> Self {
        let v = lit.unsigned_abs() as usize - 1;
        Self {
            row: v / (SIZE * SIZE),
            col: v / SIZE % SIZE,
            num: v % SIZE,
        }
    }
}

/// Knight-move targets from `(row, col)` that land strictly inside the
/// border, i.e. with both coordinates in the open interval `(0, 8)`.
///
/// The filter applies to the target only: cells in row or column 0 or 8
/// are never produced as neighbours, while any cell, border included, may
/// be the origin.
#[must_use]
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn knight_moves(row: usize, col: usize) -> Vec<(usize, usize)> {
    let (row, col) = (row as isize, col as isize);

    KNIGHT_DELTAS
        .iter()
        .map(|&(dr, dc)| (row + dr, col + dc))
        .filter(|&(r, c)| 0 < r && r < 8 && 0 < c && c < 8)
        .map(|(r, c)| (r as usize, c as usize))
        .collect()
}

/// Clauses forcing exactly one of the group to hold: the full positive
/// disjunction plus one binary exclusion per unordered pair, for
/// `1 + n(n-1)/2` clauses in total.
#[must_use]
pub fn exactly_one(variables: &[Literal]) -> Vec<Clause> {
    let mut clauses = vec![Clause::new(variables)];
    clauses.extend(
        variables
            .iter()
            .tuple_combinations()
            .map(|(&a, &b)| Clause::new(&[-a, -b])),
    );
    clauses
}

/// Clauses excluding the anchor (the **last** entry) against every other
/// literal of the group: `n - 1` binary clauses.
///
/// The non-anchor entries are not excluded against each other, and no
/// at-least-one clause is emitted; each origin cell anchors its own group,
/// so the pairwise coverage emerges across groups.
#[must_use]
pub fn knight_exclusion(variables: &[Literal]) -> Vec<Clause> {
    match variables.split_last() {
        Some((&anchor, rest)) => rest
            .iter()
            .map(|&other| Clause::new(&[-other, -anchor]))
            .collect(),
        None => Vec::new(),
    }
}

fn generate_knight_clauses() -> Vec<Clause> {
    let mut clauses = Vec::new();
    for num in 0..SIZE {
        for row in 0..SIZE {
            for col in 0..SIZE {
                // Origin appended last: it anchors the exclusions.
                let mut group = knight_moves(row, col);
                group.push((row, col));

                let variables = group
                    .iter()
                    .map(|&(r, c)| Variable::new(r, c, num).encode())
                    .collect_vec();

                clauses.extend(knight_exclusion(&variables));
            }
        }
    }
    clauses
}

fn generate_diagonal_clauses() -> Vec<Clause> {
    let mut clauses = Vec::new();
    for num in 0..SIZE {
        let anti = (0..SIZE)
            .map(|row| Variable::new(row, SIZE - row - 1, num).encode())
            .collect_vec();
        let main = (0..SIZE)
            .map(|row| Variable::new(row, row, num).encode())
            .collect_vec();

        clauses.extend(exactly_one(&anti));
        clauses.extend(exactly_one(&main));
    }
    clauses
}

fn generate_row_clauses() -> Vec<Clause> {
    let mut clauses = Vec::new();
    for row in 0..SIZE {
        for num in 0..SIZE {
            let variables = (0..SIZE)
                .map(|col| Variable::new(row, col, num).encode())
                .collect_vec();

            clauses.extend(exactly_one(&variables));
        }
    }
    clauses
}

fn generate_col_clauses() -> Vec<Clause> {
    let mut clauses = Vec::new();
    for col in 0..SIZE {
        for num in 0..SIZE {
            let variables = (0..SIZE)
                .map(|row| Variable::new(row, col, num).encode())
                .collect_vec();

            clauses.extend(exactly_one(&variables));
        }
    }
    clauses
}

fn generate_cell_clauses() -> Vec<Clause> {
    let mut clauses = Vec::new();
    for row in 0..SIZE {
        for col in 0..SIZE {
            let variables = (0..SIZE)
                .map(|num| Variable::new(row, col, num).encode())
                .collect_vec();

            clauses.extend(exactly_one(&variables));
        }
    }
    clauses
}

fn generate_block_clauses() -> Vec<Clause> {
    let mut clauses = Vec::new();
    for num in 0..SIZE {
        for band in 0..BOX_SIZE {
            for stack in 0..BOX_SIZE {
                let variables = (0..BOX_SIZE)
                    .cartesian_product(0..BOX_SIZE)
                    .map(|(r, c)| {
                        Variable::new(band * BOX_SIZE + r, stack * BOX_SIZE + c, num).encode()
                    })
                    .collect_vec();

                clauses.extend(exactly_one(&variables));
            }
        }
    }
    clauses
}

fn generate_clue_clauses(clues: &[Variable]) -> Vec<Clause> {
    clues
        .iter()
        .map(|clue| Clause::new(&[clue.encode()]))
        .collect()
}

/// Clues of the knight's-move, diagonal, magic-square puzzle. `num` is
/// the zero-based digit, so each clue's encoding is its unit literal.
pub const MAGIC_SQUARE_CLUES: [Variable; 10] = [
    Variable::new(8, 8, 1),
    Variable::new(3, 0, 2),
    Variable::new(3, 1, 7),
    Variable::new(3, 2, 3),
    // Two rows of the Lo Shu square, pinned in the centre box.
    Variable::new(3, 3, 5),
    Variable::new(3, 4, 6),
    Variable::new(3, 5, 1),
    Variable::new(4, 3, 0),
    Variable::new(4, 4, 4),
    Variable::new(4, 5, 8),
];

/// A variant Sudoku: standard rules plus diagonal and knight's-move
/// uniqueness, fixed by a set of clue cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sudoku {
    clues: Vec<Variable>,
}

impl Sudoku {
    #[must_use]
    pub const fn new(clues: Vec<Variable>) -> Self {
        Self { clues }
    }

    #[must_use]
    pub fn clues(&self) -> &[Variable] {
        &self.clues
    }

    /// Builds the full constraint formula over the 729 cell/digit
    /// variables.
    #[must_use]
    pub fn to_cnf(&self) -> Cnf {
        let mut cnf = Cnf::default();
        cnf.extend(generate_knight_clauses());
        cnf.extend(generate_diagonal_clauses());
        cnf.extend(generate_row_clauses());
        cnf.extend(generate_col_clauses());
        cnf.extend(generate_cell_clauses());
        cnf.extend(generate_block_clauses());
        cnf.extend(generate_clue_clauses(&self.clues));
        cnf
    }

    /// Reads a model back into a grid: every positive literal places its
    /// digit at its cell.
    #[must_use]
    pub fn decode(&self, solutions: &Solutions) -> Board {
        let mut grid = vec![vec![0; SIZE]; SIZE];
        for lit in solutions.positives() {
            let var = Variable::decode(lit);
            grid[var.row][var.col] = var.num + 1;
        }
        Board::new(grid)
    }
}

/// A 9x9 grid of digits; zero marks an unfilled cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board(Vec<Vec<usize>>);

impl Board {
    #[must_use]
    pub const fn new(grid: Vec<Vec<usize>>) -> Self {
        Self(grid)
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec<usize>> {
        self.0.iter()
    }
}

impl From<Vec<Vec<usize>>> for Board {
    fn from(grid: Vec<Vec<usize>>) -> Self {
        Self::new(grid)
    }
}

impl From<Board> for Vec<Vec<usize>> {
    fn from(board: Board) -> Self {
        board.0
    }
}

impl fmt::Display for Board {
    /// One row per line, digits space-separated, in row-major order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", row.iter().join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::solver::Solver;
    use std::collections::HashSet;

    #[test]
    fn test_encode_decode_round_trip() {
        for row in 0..SIZE {
            for col in 0..SIZE {
                for num in 0..SIZE {
                    let var = Variable::new(row, col, num);
                    assert_eq!(Variable::decode(var.encode()), var);
                }
            }
        }
    }

    #[test]
    fn test_encode_is_a_bijection_onto_range() {
        let literals: HashSet<Literal> = (0..SIZE)
            .flat_map(|row| {
                (0..SIZE).flat_map(move |col| {
                    (0..SIZE).map(move |num| Variable::new(row, col, num).encode())
                })
            })
            .collect();

        assert_eq!(literals.len(), 729);
        assert!(literals.iter().all(|&lit| (1..=729).contains(&lit)));
    }

    #[test]
    fn test_decode_ignores_sign() {
        let var = Variable::new(5, 2, 7);
        assert_eq!(Variable::decode(-var.encode()), var);
    }

    #[test]
    fn test_knight_moves_centre_has_all_eight() {
        assert_eq!(knight_moves(4, 4).len(), 8);
    }

    #[test]
    fn test_knight_moves_from_the_corners() {
        // Corners are valid origins; only the targets are filtered.
        assert_eq!(knight_moves(0, 0), vec![(2, 1), (1, 2)]);
        assert_eq!(knight_moves(8, 8), vec![(6, 7), (7, 6)]);
    }

    #[test]
    fn test_knight_moves_never_target_the_border() {
        for row in 0..SIZE {
            for col in 0..SIZE {
                for (r, c) in knight_moves(row, col) {
                    assert!(0 < r && r < 8, "({row},{col}) targets row {r}");
                    assert!(0 < c && c < 8, "({row},{col}) targets col {c}");
                }
            }
        }
    }

    #[test]
    fn test_exactly_one_clause_count() {
        let variables = (1..=9).collect_vec();
        let clauses = exactly_one(&variables);
        assert_eq!(clauses.len(), 1 + 9 * 8 / 2);
    }

    #[test]
    fn test_exactly_one_admits_exactly_one_true() {
        let clauses = exactly_one(&[1, 2, 3]);
        let satisfied = |solutions: &Solutions| {
            clauses
                .iter()
                .all(|clause| clause.iter().any(|&lit| solutions.check(lit)))
        };

        assert!(satisfied(&Solutions::new(&[-1, 2, -3])));
        assert!(!satisfied(&Solutions::new(&[-1, -2, -3])));
        assert!(!satisfied(&Solutions::new(&[1, 2, -3])));
    }

    #[test]
    fn test_knight_exclusion_counts_and_anchor() {
        let clauses = knight_exclusion(&[10, 20, 30, 40]);
        assert_eq!(clauses.len(), 3);
        for clause in &clauses {
            assert_eq!(clause.len(), 2);
            assert!(clause.contains(-40));
        }
    }

    #[test]
    fn test_knight_exclusion_is_anchor_only() {
        let clauses = knight_exclusion(&[1, 2, 3]);
        assert!(clauses.contains(&Clause::new(&[-1, -3])));
        assert!(clauses.contains(&Clause::new(&[-2, -3])));
        assert!(!clauses.contains(&Clause::new(&[-1, -2])));
    }

    #[test]
    fn test_knight_exclusion_of_empty_group() {
        assert!(knight_exclusion(&[]).is_empty());
    }

    #[test]
    fn test_to_cnf_covers_all_variables_and_clues() {
        let sudoku = Sudoku::new(MAGIC_SQUARE_CLUES.to_vec());
        let cnf = sudoku.to_cnf();

        assert_eq!(cnf.num_vars, 729);

        let units = cnf.iter().filter(|clause| clause.is_unit()).count();
        assert_eq!(units, MAGIC_SQUARE_CLUES.len());
        for clue in MAGIC_SQUARE_CLUES {
            assert!(cnf.clauses.contains(&Clause::new(&[clue.encode()])));
        }
    }

    #[test]
    fn test_decode_places_positive_literals() {
        let literals = (0..SIZE)
            .flat_map(|row| {
                (0..SIZE).map(move |col| Variable::new(row, col, (row + col) % SIZE).encode())
            })
            .collect_vec();

        let board = Sudoku::default().decode(&Solutions::new(&literals));
        for (row, digits) in board.iter().enumerate() {
            for (col, &digit) in digits.iter().enumerate() {
                assert_eq!(digit, (row + col) % SIZE + 1);
            }
        }
    }

    #[test]
    fn test_board_display() {
        let mut grid = vec![vec![9; SIZE]; SIZE];
        grid[0] = (1..=SIZE).collect_vec();

        let printed = Board::new(grid).to_string();
        let mut lines = printed.lines();
        assert_eq!(lines.next(), Some("1 2 3 4 5 6 7 8 9"));
        assert_eq!(lines.clone().count(), 8);
        assert!(lines.all(|line| line == "9 9 9 9 9 9 9 9 9"));
    }

    /// A canned-answer solver, standing in for the real backend.
    struct StubSolver {
        models: std::vec::IntoIter<Solutions>,
    }

    impl Solver for StubSolver {
        fn new(_: Cnf) -> Self {
            let literals = (0..SIZE)
                .flat_map(|row| {
                    (0..SIZE).map(move |col| Variable::new(row, col, row).encode())
                })
                .collect_vec();

            Self {
                models: vec![Solutions::new(&literals)].into_iter(),
            }
        }
    }

    impl Iterator for StubSolver {
        type Item = Solutions;

        fn next(&mut self) -> Option<Self::Item> {
            self.models.next()
        }
    }

    #[test]
    fn test_decode_through_a_stub_solver() {
        let sudoku = Sudoku::default();
        let mut solver = StubSolver::new(sudoku.to_cnf());

        let board = sudoku.decode(&solver.next().unwrap());
        for (row, digits) in board.iter().enumerate() {
            assert!(digits.iter().all(|&digit| digit == row + 1));
        }
        assert!(solver.next().is_none());
    }
}
