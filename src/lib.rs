//! SAT-based enumeration of variant Sudoku puzzles: the rules are
//! compiled to CNF, an external solver produces every satisfying
//! assignment, and each assignment is mapped back onto a grid.

/// The `sat` module provides the CNF data model and the solver contract.
pub mod sat;

/// The `sudoku` module maps puzzle rules onto clauses and models back
/// onto grids.
pub mod sudoku;
