//! Quick-start plotting in [Rust][] with the [Matplotlib][] Python
//! visualization library.
//!
//! Usage
//! -----
//!
//! Figures and axes are created explicitly and plotted on through
//! methods, close to [Matplotlib][]'s object-oriented interface:
//!
//! ```
//! use quickplot as plt;
//! let (fig, [[mut ax]]) = plt::subplots()?;
//! ax.xy(&[1., 2., 3., 4.], &[1., 4., 2., 3.]).plot()?;
//! fig.save().to_file("target/Usage.pdf")?;
//! # Ok::<(), quickplot::Error>(())
//! ```
//!
//! The implicit "current figure" style lives in [`pyplot`].  The
//! function [`draw`] works on both styles: it forwards a dataset and
//! a set of [`StyleOptions`] to the line primitive of a [`Surface`].
//!
//! [Rust]: https://www.rust-lang.org/
//! [Matplotlib]: https://matplotlib.org/

use lazy_static::lazy_static;
use ndarray::{ArrayBase, Ix1};
use numpy::PyArray1;
use pyo3::{
    prelude::*,
    intern,
};

macro_rules! getattr {
    ($py: ident, $lib: expr, $f: literal) => {
        $lib.getattr($py, intern!($py, $f))
    };
}

macro_rules! meth {
    ($obj: expr, $m: ident, $args: expr) => {
        Python::with_gil(|py| {
            $obj.call_method1(py, intern!(py, stringify!($m)), $args)
        })
    };
}

/// Import and return a handle to the module `$m`.
macro_rules! pyimport { ($m: literal) => {
    Python::with_gil(|py|
        PyModule::import_bound(py, intern!(py, $m)).map(Bound::unbind))
}}

lazy_static! {
    // Import matplotlib modules.
    static ref FIGURE: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib.figure")
    };
    static ref PYPLOT: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib.pyplot")
    };
}

/// Return a handle to the module `$m`.
/// ⚠ This may try to lock Python's GIL.  Make sure it is executed
/// outside a call to `Python::with_gil`.
macro_rules! pymod { ($m: ident) => {
    $m.as_ref().map_err(|_| Error::NoMatplotlib)
}}

mod axes;
mod figure;
pub mod pyplot;
pub mod sample;
mod style;
mod surface;

pub use axes::{
    Annotation, Axes, Hist, Histogram, Line2D, PathCollection, Scatter,
    XY, XYFrom,
};
#[cfg(feature = "curve-sampling")]
pub use axes::Fun;
pub use figure::{Figure, FigureBuilder, Layout, Savefig};
pub use style::{StyleOptions, StyleValue};
pub use surface::{draw, Surface};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

/// Possible errors of the plotting functions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The Python library "matplotlib" was not found.
    #[error("The matplotlib library has not been found.\n\
             Please install it.  See https://matplotlib.org/\n\
             If you use Anaconda, see https://github.com/PyO3/pyo3/issues/1554")]
    NoMatplotlib,
    /// The path contains an element that is not a directory or does
    /// not exist.
    #[error("A path contains an element that is not a directory or \
             does not exist")]
    FileNotFoundError,
    /// Permission denied to access or create the filesystem path.
    #[error("Permission denied to access or create the filesystem path")]
    PermissionError,
    /// A column requested from a [`sample::Columns`] table is absent.
    #[error("No column named {0:?}")]
    UnknownColumn(String),
    /// Integer sampling was asked for the empty range `low .. high`.
    #[error("Empty sampling range {low} .. {high}")]
    InvalidRange { low: i64, high: i64 },
    /// Errors raised by Python, including Matplotlib's own, unchanged.
    #[error("Python error: {0}")]
    Python(#[from] PyErr),
}

/// Trait expressing that `Self` can be converted to a 1D
/// numpy.ndarray.  The data is copied so that the drawn artists never
/// refer to Rust memory.
pub trait Data {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>>;

    /// Number of values.
    fn len(&self) -> usize;
}

impl Data for [f64] {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice_bound(py, self)
    }

    fn len(&self) -> usize { <[f64]>::len(self) }
}

impl<const N: usize> Data for [f64; N] {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice_bound(py, self)
    }

    fn len(&self) -> usize { N }
}

impl Data for Vec<f64> {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice_bound(py, self)
    }

    fn len(&self) -> usize { Vec::len(self) }
}

impl<S> Data for ArrayBase<S, Ix1>
where S: ndarray::Data<Elem = f64> {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_array_bound(py, self)
    }

    fn len(&self) -> usize { ArrayBase::len(self) }
}

impl<D> Data for &D where D: Data + ?Sized {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        (**self).to_numpy(py)
    }

    fn len(&self) -> usize { (**self).len() }
}

/// Return a new figure managed by pyplot (so that [`show`] displays
/// it).  The figure has no axes.
pub fn figure() -> Result<Figure, Error> {
    let pyplot = pymod!(PYPLOT)?;
    Python::with_gil(|py| {
        let fig = getattr!(py, pyplot, "figure")?.call0(py)?;
        Ok(Figure::from_py(fig))
    })
}

/// Return a new figure together with a `R`×`C` grid of axes.
///
/// # Example
///
/// ```
/// use quickplot as plt;
/// let (fig, [[ax0, ax1], [ax2, ax3]]) = plt::subplots()?;
/// assert_eq!(fig.axes_count()?, 4);
/// # Ok::<(), quickplot::Error>(())
/// ```
pub fn subplots<const R: usize, const C: usize>(
) -> Result<(Figure, [[Axes; C]; R]), Error> {
    let fig = figure()?;
    let ax = fig.subplots()?;
    Ok((fig, ax))
}

/// Display all open figures.
pub fn show() -> Result<(), Error> {
    let pyplot = pymod!(PYPLOT)?;
    Python::with_gil(|py| {
        getattr!(py, pyplot, "show")?.call0(py)?;
        Ok(())
    })
}

/// Serialize the tests creating pyplot figures: the implicit "current
/// figure" is global.
#[cfg(test)]
pub(crate) fn pyplot_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|e| e.into_inner())
}
