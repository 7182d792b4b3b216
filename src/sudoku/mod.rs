#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module provides the encoding of variant Sudoku puzzles as CNF.

/// The `solver` module contains the clause encoder and model decoder.
pub mod solver;
