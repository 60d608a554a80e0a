//! Implicit interface: pyplot keeps track of a *current* figure and
//! axes, and the functions of this module act on them.
//!
//! This style is convenient for quick interactive plots.  For larger
//! programs, prefer passing [`Axes`] around explicitly.
//!
//! ```
//! use quickplot::{pyplot as plt, sample::linspace, Figure, Layout,
//!                 StyleOptions};
//! let x = linspace(0., 2., 100);
//! plt::figure(Figure::builder().figsize(5., 2.7).layout(Layout::Constrained))?;
//! plt::plot(&x, &x, &[("label", "linear")].into())?;
//! plt::plot(&x, &x.mapv(|x| x.powi(2)), &[("label", "quadratic")].into())?;
//! plt::xlabel("x label")?;
//! plt::title("Simple Plot")?;
//! plt::legend()?;
//! plt::savefig("target/pyplot_style.pdf")?;
//! plt::close_all()?;
//! # Ok::<(), quickplot::Error>(())
//! ```

use std::path::Path;
use log::debug;
use pyo3::{
    prelude::*,
    intern,
    types::PyTuple,
};
use crate::{
    Axes, Data, Error, Figure, FigureBuilder, Line2D, StyleOptions,
    Surface, PYPLOT,
};

/// The axes pyplot currently draws on, as a [`Surface`].  They are
/// looked up at each call, and created if needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImplicitAxes;

impl Surface for ImplicitAxes {
    fn plot_styled<D>(&mut self, x: &D, y: &D, options: &StyleOptions)
                      -> Result<Line2D, Error>
    where D: Data + ?Sized {
        plot(x, y, options)
    }

    fn line_count(&self) -> Result<usize, Error> {
        gca()?.line_count()
    }
}

fn call<A>(name: &str, args: A) -> Result<PyObject, Error>
where A: IntoPy<Py<PyTuple>> {
    let pyplot = pymod!(PYPLOT)?;
    Python::with_gil(|py| Ok(pyplot.call_method1(py, name, args)?))
}

/// Create a new figure with the given options and make it current.
pub fn figure(options: &FigureBuilder) -> Result<Figure, Error> {
    options.build()
}

/// Plot `y` versus `x` on the current axes.
pub fn plot<D>(x: &D, y: &D, options: &StyleOptions) -> Result<Line2D, Error>
where D: Data + ?Sized {
    let pyplot = pymod!(PYPLOT)?;
    debug!("pyplot.plot: {} × {} points, {} style option(s)",
           x.len(), y.len(), options.len());
    Python::with_gil(|py| {
        let kwargs = options.to_kwargs(py)?;
        let lines = pyplot.bind(py).call_method(
            intern!(py, "plot"), (x.to_numpy(py), y.to_numpy(py)),
            Some(&kwargs))?;
        Ok(Line2D::from_py(lines.extract()?))
    })
}

pub fn xlabel(label: &str) -> Result<(), Error> {
    call("xlabel", (label,)).map(|_| ())
}

pub fn ylabel(label: &str) -> Result<(), Error> {
    call("ylabel", (label,)).map(|_| ())
}

pub fn title(label: &str) -> Result<(), Error> {
    call("title", (label,)).map(|_| ())
}

pub fn legend() -> Result<(), Error> {
    call("legend", ()).map(|_| ())
}

/// Get the current axes, creating them (and a figure) if needed.
pub fn gca() -> Result<Axes, Error> {
    call("gca", ()).map(Axes::from_py)
}

/// Get the current figure, creating it if needed.
pub fn gcf() -> Result<Figure, Error> {
    call("gcf", ()).map(Figure::from_py)
}

/// Save the current figure.
pub fn savefig(path: impl AsRef<Path>) -> Result<(), Error> {
    gcf()?.save().to_file(path)
}

/// Close all figures.
pub fn close_all() -> Result<(), Error> {
    call("close", ("all",)).map(|_| ())
}

/// Set the default parameters of `group`, e.g. `rc("lines",
/// &[("linewidth", 2.)].into())` sets `lines.linewidth`.
pub fn rc(group: &str, options: &StyleOptions) -> Result<(), Error> {
    let pyplot = pymod!(PYPLOT)?;
    Python::with_gil(|py| {
        let kwargs = options.to_kwargs(py)?;
        pyplot.bind(py).call_method(intern!(py, "rc"), (group,), Some(&kwargs))?;
        Ok(())
    })
}

/// The current value of the parameter `key` (e.g. "lines.linewidth"),
/// as a string.
pub fn rc_value(key: &str) -> Result<String, Error> {
    let pyplot = pymod!(PYPLOT)?;
    Python::with_gil(|py| {
        let params = pyplot.bind(py).getattr(intern!(py, "rcParams"))?;
        Ok(params.get_item(key)?.str()?.to_string())
    })
}

/// Restore Matplotlib's default parameters.
pub fn rc_defaults() -> Result<(), Error> {
    call("rcdefaults", ()).map(|_| ())
}
