#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Backend adapter for the `splr` CDCL solver.

use crate::sat::cnf::Cnf;
use crate::sat::solver::{Solutions, Solver};
use splr::Certificate;

/// Enumerates the models of a formula through `splr`.
///
/// `splr`'s certificate API answers one query per call, so each pull
/// re-solves the formula together with a blocking clause for every model
/// already produced. Models are therefore pairwise distinct, and an UNSAT
/// certificate ends the stream.
#[derive(Debug, Clone, Default)]
pub struct SplrSolver {
    clauses: Vec<Vec<i32>>,
    exhausted: bool,
}

impl Solver for SplrSolver {
    fn new(cnf: Cnf) -> Self {
        let clauses = cnf
            .iter()
            .map(|clause| clause.iter().copied().collect())
            .collect();

        Self {
            clauses,
            exhausted: false,
        }
    }
}

impl Iterator for SplrSolver {
    type Item = Solutions;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        match Certificate::try_from(self.clauses.clone()) {
            Ok(Certificate::SAT(model)) => {
                // Block the exact model so the next pull must differ.
                self.clauses.push(model.iter().map(|&lit| -lit).collect());
                Some(model.into_iter().collect())
            }
            // UNSAT is the normal end of the stream. A load-time rejection
            // (e.g. an empty clause) likewise admits no models.
            Ok(Certificate::UNSAT) | Err(_) => {
                self.exhausted = true;
                None
            }
        }
    }
}
