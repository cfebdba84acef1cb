//! Python bindings for the rule engine and the search bot.
//!
//! Boards cross the boundary as flat numpy `int32` arrays of 64 cells
//! (`-1` empty, `0` Black, `1` White, index `x + 8 * y`), the same layout
//! bots receive.
//!
//! # Quick Start
//!
//! ```python
//! import rust_loa as loa
//!
//! board = loa.initial_board()
//! moves = loa.legal_moves(0, board)
//! best = loa.plain_solution(0, board, iterations=2000)
//! print(best.x0, best.y0, best.x1, best.y1)
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_rules;

pub use py_core::*;
pub use py_rules::*;

/// rust-loa: line-of-capture rules and tree-search move selection.
#[pymodule]
fn rust_loa(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMove>()?;

    m.add_function(wrap_pyfunction!(initial_board, m)?)?;
    m.add_function(wrap_pyfunction!(legal_moves, m)?)?;
    m.add_function(wrap_pyfunction!(is_legal_move, m)?)?;
    m.add_function(wrap_pyfunction!(check_win, m)?)?;
    m.add_function(wrap_pyfunction!(plain_solution, m)?)?;

    Ok(())
}
