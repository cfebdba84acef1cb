//! Core type bindings for Python.

use pyo3::prelude::*;

use crate::core::Move;

/// Python wrapper for Move.
#[pyclass(name = "Move")]
#[derive(Clone, Copy, Debug)]
pub struct PyMove(pub Move);

#[pymethods]
impl PyMove {
    #[new]
    fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self(Move::new(x0, y0, x1, y1))
    }

    /// The "no move" sentinel, all four fields `-1`.
    #[staticmethod]
    fn none() -> Self {
        Self(Move::NONE)
    }

    #[getter]
    fn x0(&self) -> i32 {
        self.0.x0
    }

    #[getter]
    fn y0(&self) -> i32 {
        self.0.y0
    }

    #[getter]
    fn x1(&self) -> i32 {
        self.0.x1
    }

    #[getter]
    fn y1(&self) -> i32 {
        self.0.y1
    }

    fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// `(x0, y0, x1, y1)`.
    fn to_tuple(&self) -> (i32, i32, i32, i32) {
        (self.0.x0, self.0.y0, self.0.x1, self.0.y1)
    }

    fn __repr__(&self) -> String {
        format!(
            "Move({}, {}, {}, {})",
            self.0.x0, self.0.y0, self.0.x1, self.0.y1
        )
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let mut hasher = DefaultHasher::new();
        self.0.hash(&mut hasher);
        hasher.finish()
    }
}
