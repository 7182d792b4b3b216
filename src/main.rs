//! Enumerates every completion of a hardcoded knight's-move, diagonal,
//! magic-square Sudoku and prints the grids.
//!
//! The puzzle is compiled in; changing it means editing
//! [`sudoku::solver::MAGIC_SQUARE_CLUES`]. Each solution is printed as a
//! 9x9 grid of space-separated digits followed by a separator line of
//! dashes. An unsatisfiable puzzle prints nothing.

use crate::sat::solver::Solver;
use crate::sat::splr::SplrSolver;
use crate::sudoku::solver::{MAGIC_SQUARE_CLUES, Sudoku};

mod sat;
mod sudoku;

fn main() {
    let sudoku = Sudoku::new(MAGIC_SQUARE_CLUES.to_vec());
    let cnf = sudoku.to_cnf();

    for solutions in SplrSolver::new(cnf) {
        println!("{}", sudoku.decode(&solutions));
        println!("\n-----------------\n");
    }
}
