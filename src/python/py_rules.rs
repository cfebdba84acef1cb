//! Rule and search functions over numpy boards.

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use super::py_core::PyMove;
use crate::core::{Board, BoardSnapshot, Side};
use crate::mcts::{self, MCTSConfig};
use crate::rules;

fn side_arg(player: i32) -> PyResult<Side> {
    Side::from_id(player)
        .ok_or_else(|| PyValueError::new_err(format!("player must be 0 or 1, got {}", player)))
}

fn board_arg(board: &PyReadonlyArray1<'_, i32>) -> PyResult<BoardSnapshot> {
    let cells = board
        .as_slice()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    BoardSnapshot::from_cells(cells).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// The starting position as a 64-cell array.
#[pyfunction]
pub fn initial_board(py: Python<'_>) -> Bound<'_, PyArray1<i32>> {
    let snapshot = Board::initial().snapshot();
    PyArray1::from_slice_bound(py, snapshot.as_slice())
}

/// All legal moves of `player`, pieces in row-major order.
#[pyfunction]
pub fn legal_moves(player: i32, board: PyReadonlyArray1<'_, i32>) -> PyResult<Vec<PyMove>> {
    let side = side_arg(player)?;
    let snapshot = board_arg(&board)?;
    Ok(rules::enumerate_moves(&snapshot, side)
        .into_iter()
        .map(PyMove)
        .collect())
}

/// Whether `player` may play `mv`.
#[pyfunction]
pub fn is_legal_move(player: i32, board: PyReadonlyArray1<'_, i32>, mv: PyMove) -> PyResult<bool> {
    let side = side_arg(player)?;
    let snapshot = board_arg(&board)?;
    Ok(rules::is_legal(&snapshot, side, mv.0))
}

/// Whether `player` has met the win condition.
#[pyfunction]
pub fn check_win(player: i32, board: PyReadonlyArray1<'_, i32>) -> PyResult<bool> {
    let side = side_arg(player)?;
    let snapshot = board_arg(&board)?;
    Ok(rules::check_win(&snapshot, side))
}

/// Best move for `player` by tree search; `Move.none()` if it has none.
///
/// The GIL is released while searching.
#[pyfunction]
#[pyo3(signature = (player, board, iterations=None, seed=None))]
pub fn plain_solution(
    py: Python<'_>,
    player: i32,
    board: PyReadonlyArray1<'_, i32>,
    iterations: Option<u32>,
    seed: Option<u64>,
) -> PyResult<PyMove> {
    let side = side_arg(player)?;
    let snapshot = board_arg(&board)?;

    let mut config = MCTSConfig::default();
    if let Some(iterations) = iterations {
        config = config.with_iterations(iterations);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let mv = py.allow_threads(|| mcts::plain_solution(side, &snapshot, &config));
    Ok(PyMove(mv))
}
