use std::path::Path;
use log::{info, warn};
use pyo3::{
    prelude::*,
    intern,
    exceptions::{PyFileNotFoundError, PyPermissionError},
    types::PyDict,
};
use crate::{Axes, Error, FIGURE, PYPLOT};

/// The top level container for all the plot elements.
#[derive(Debug)]
pub struct Figure {
    fig: PyObject, // instance of matplotlib.figure.Figure
}

/// Layout engine positioning the axes of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Constrained,
    Compressed,
    Tight,
}

impl Layout {
    fn name(self) -> &'static str {
        match self {
            Layout::Constrained => "constrained",
            Layout::Compressed => "compressed",
            Layout::Tight => "tight",
        }
    }
}

impl Figure {
    pub(crate) fn from_py(fig: PyObject) -> Self {
        Figure { fig }
    }

    /// Return a new `Figure` not managed by pyplot.
    pub fn new() -> Result<Figure, Error> {
        let figure = pymod!(FIGURE)?;
        Python::with_gil(|py| {
            let fig = getattr!(py, figure, "Figure")?.call0(py)?;
            Ok(Self { fig })
        })
    }

    /// Configure a pyplot managed figure (size, resolution, layout).
    ///
    /// # Example
    ///
    /// ```
    /// use quickplot::{Figure, Layout};
    /// let (fig, [[ax]]) = Figure::builder()
    ///     .figsize(5., 2.7)
    ///     .layout(Layout::Constrained)
    ///     .subplots()?;
    /// # fig.close()?;
    /// # Ok::<(), quickplot::Error>(())
    /// ```
    pub fn builder() -> FigureBuilder {
        FigureBuilder { figsize: None, dpi: None, layout: None }
    }

    /// Add a `R`×`C` grid of axes to the figure and return them.
    ///
    /// Return an error if Matplotlib is not present on the system.
    pub fn subplots<const R: usize, const C: usize>(
        &self) -> Result<[[Axes; C]; R], Error> {
        Python::with_gil(|py| {
            let kwargs = PyDict::new_bound(py);
            kwargs.set_item("squeeze", false)?;
            let axs = self.fig.bind(py)
                .call_method(intern!(py, "subplots"), (R, C), Some(&kwargs))?;
            // With `squeeze=False`, `axs` is always a 2D numpy array.
            let mut err = None;
            let axes = grid(|r, c| match axs.get_item((r, c)) {
                Ok(ax) => Axes::from_py(ax.unbind()),
                Err(e) => {
                    err = Some(e);
                    Axes::from_py(py.None())
                }
            });
            match err {
                Some(e) => Err(Error::Python(e)),
                None => Ok(axes),
            }
        })
    }

    /// Number of axes in the figure.
    pub fn axes_count(&self) -> Result<usize, Error> {
        Python::with_gil(|py| {
            Ok(self.fig.bind(py).getattr(intern!(py, "axes"))?.len()?)
        })
    }

    /// If using a GUI backend with pyplot, display the figure window.
    ///
    /// ⚠ [This does not manage an GUI event loop][GUI]. Consequently,
    /// the figure may only be shown briefly or not shown at all if
    /// you or your environment are not managing an event loop.  Use
    /// [`quickplot::show()`][crate::show] for that.
    ///
    /// [GUI]: https://matplotlib.org/stable/api/figure_api.html#matplotlib.figure.Figure.show
    pub fn show(self) -> Result<(), Error> {
        Python::with_gil(|py| {
            self.fig.call_method0(py, intern!(py, "show"))?;
            Ok(())
        })
    }

    pub fn save(&self) -> Savefig {
        Savefig { fig: self.fig.clone(), dpi: None, transparent: false }
    }

    /// Release the figure from pyplot.  Does nothing for figures
    /// created with [`Figure::new`].
    pub fn close(self) -> Result<(), Error> {
        let pyplot = pymod!(PYPLOT)?;
        Python::with_gil(|py| {
            getattr!(py, pyplot, "close")?.call1(py, (self.fig.clone_ref(py),))?;
            Ok(())
        })
    }
}

#[inline(always)]
fn grid<const R: usize, const C: usize, U>(
    mut f: impl FnMut(usize, usize) -> U) -> [[U; C]; R] {
    std::array::from_fn(|r| std::array::from_fn(|c| f(r, c)))
}

/// Figure options, see [`Figure::builder`].
#[derive(Debug, Clone)]
#[must_use]
pub struct FigureBuilder {
    figsize: Option<(f64, f64)>,
    dpi: Option<f64>,
    layout: Option<Layout>,
}

impl FigureBuilder {
    /// Width and height in inches.
    pub fn figsize(&mut self, width: f64, height: f64) -> &mut Self {
        self.figsize = Some((width, height));
        self
    }

    pub fn dpi(&mut self, dpi: f64) -> &mut Self {
        self.dpi = Some(dpi);
        self
    }

    pub fn layout(&mut self, layout: Layout) -> &mut Self {
        self.layout = Some(layout);
        self
    }

    fn kwargs<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let kwargs = PyDict::new_bound(py);
        if let Some(size) = self.figsize {
            kwargs.set_item("figsize", size)?
        }
        if let Some(dpi) = self.dpi {
            kwargs.set_item("dpi", dpi)?
        }
        if let Some(layout) = self.layout {
            kwargs.set_item("layout", layout.name())?
        }
        Ok(kwargs)
    }

    /// Create the figure.  It becomes pyplot's current figure.
    pub fn build(&self) -> Result<Figure, Error> {
        let pyplot = pymod!(PYPLOT)?;
        Python::with_gil(|py| {
            let kwargs = self.kwargs(py)?;
            let fig = pyplot.bind(py)
                .getattr(intern!(py, "figure"))?
                .call((), Some(&kwargs))?;
            Ok(Figure { fig: fig.unbind() })
        })
    }

    /// Create the figure with a `R`×`C` grid of axes.
    pub fn subplots<const R: usize, const C: usize>(
        &self) -> Result<(Figure, [[Axes; C]; R]), Error> {
        let fig = self.build()?;
        let axes = fig.subplots()?;
        Ok((fig, axes))
    }
}

pub struct Savefig {
    fig: PyObject,
    dpi: Option<f64>,
    transparent: bool,
}

impl Savefig {
    /// Resolution in dots per inch.  A non-positive value resets it
    /// to the default.
    pub fn dpi(&mut self, dpi: f64) -> &mut Self {
        if dpi > 0. {
            self.dpi = Some(dpi);
        } else {
            warn!("Ignoring non-positive dpi {}", dpi);
            self.dpi = None;
        }
        self
    }

    pub fn transparent(&mut self, t: bool) -> &mut Self {
        self.transparent = t;
        self
    }

    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        Python::with_gil(|py| {
            let kwargs = PyDict::new_bound(py);
            if let Some(dpi) = self.dpi {
                kwargs.set_item("dpi", dpi)?
            }
            if self.transparent {
                kwargs.set_item("transparent", true)?
            }
            self.fig.bind(py).call_method(
                intern!(py, "savefig"), (path,), Some(&kwargs)
            ).map_err(|e| save_error(py, e)).map(|_| ())
        })?;
        info!("Saved figure to {}", path.display());
        Ok(())
    }
}

fn save_error(py: Python<'_>, e: PyErr) -> Error {
    if e.is_instance_of::<PyFileNotFoundError>(py) {
        Error::FileNotFoundError
    } else if e.is_instance_of::<PyPermissionError>(py) {
        Error::PermissionError
    } else {
        Error::Python(e)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::pyplot_lock;

    #[test]
    fn unmanaged_figure() -> Result<(), Error> {
        let fig = Figure::new()?;
        let [[mut ax]] = fig.subplots()?;
        ax.xy(&[0., 1.], &[1., 0.]).plot()?;
        assert_eq!(fig.axes_count()?, 1);
        fig.save().dpi(50.).to_file("target/unmanaged.png")?;
        Ok(())
    }

    #[test]
    fn column_of_axes() -> Result<(), Error> {
        let _lock = pyplot_lock();
        let (fig, [[mut ax0], [mut ax1]]) = crate::subplots()?;
        ax0.xy(&[1., 2., 3., 4.], &[1., 4., 2., 3.]).plot()?;
        ax1.xy(&[1., 2., 3., 4.], &[1., 4., 2., 3.]).fmt(".").plot()?;
        fig.save().to_file("target/a_basic_col.pdf")?;
        fig.close()
    }

    #[test]
    fn builder_size_and_layout() -> Result<(), Error> {
        let _lock = pyplot_lock();
        let fig = Figure::builder()
            .figsize(5., 2.7)
            .dpi(100.)
            .layout(Layout::Constrained)
            .build()?;
        Python::with_gil(|py| -> PyResult<()> {
            let size: [f64; 2] = fig.fig
                .call_method0(py, "get_size_inches")?
                .call_method0(py, "tolist")?
                .extract(py)?;
            assert_eq!(size, [5., 2.7]);
            let dpi: f64 = fig.fig.getattr(py, "dpi")?.extract(py)?;
            assert_eq!(dpi, 100.);
            Ok(())
        })?;
        fig.close()
    }

    fn layout_engine(fig: &Figure) -> PyResult<String> {
        Python::with_gil(|py| {
            fig.fig.bind(py)
                .call_method0("get_layout_engine")?
                .getattr("__class__")?
                .getattr("__name__")?
                .extract()
        })
    }

    #[test]
    fn layout_engines() -> Result<(), Error> {
        let _lock = pyplot_lock();
        for (layout, engine) in [
            (Layout::Constrained, "ConstrainedLayoutEngine"),
            (Layout::Compressed, "ConstrainedLayoutEngine"),
            (Layout::Tight, "TightLayoutEngine"),
        ] {
            let fig = Figure::builder().layout(layout).build()?;
            assert_eq!(layout_engine(&fig)?, engine, "{:?}", layout);
            fig.close()?;
        }
        Ok(())
    }

    #[test]
    fn non_positive_dpi_is_ignored() -> Result<(), Error> {
        let fig = Figure::new()?;
        let mut save = fig.save();
        save.dpi(72.);
        assert_eq!(save.dpi, Some(72.));
        save.dpi(-1.);
        assert_eq!(save.dpi, None);
        save.dpi(72.).dpi(0.);
        assert_eq!(save.dpi, None);
        save.to_file("target/default_dpi.png")
    }

    fn corner_alpha(path: &str) -> PyResult<f64> {
        Python::with_gil(|py| {
            PyModule::import_bound(py, "matplotlib.image")?
                .call_method1("imread", (path,))?
                .get_item((0, 0, 3))?
                .extract()
        })
    }

    #[test]
    fn transparent_background() -> Result<(), Error> {
        let fig = Figure::new()?;
        let [[mut ax]] = fig.subplots()?;
        ax.xy(&[0., 1.], &[1., 0.]).plot()?;
        fig.save().to_file("target/opaque.png")?;
        fig.save().transparent(true).to_file("target/transparent.png")?;
        assert_eq!(corner_alpha("target/opaque.png")?, 1.);
        assert_eq!(corner_alpha("target/transparent.png")?, 0.);
        Ok(())
    }

    #[test]
    fn permission_error_is_mapped() {
        Python::with_gil(|py| {
            let e = PyPermissionError::new_err("denied");
            assert!(matches!(save_error(py, e), Error::PermissionError));
            let e = PyFileNotFoundError::new_err("missing");
            assert!(matches!(save_error(py, e), Error::FileNotFoundError));
            let e = pyo3::exceptions::PyValueError::new_err("format");
            assert!(matches!(save_error(py, e), Error::Python(_)));
        })
    }

    #[cfg(unix)]
    #[test]
    fn read_only_directory() -> Result<(), Error> {
        use std::{fs, os::unix::fs::PermissionsExt};
        let dir = Path::new("target/read_only");
        fs::create_dir_all(dir).unwrap();
        fs::set_permissions(dir, fs::Permissions::from_mode(0o555)).unwrap();
        // Privileged users (root) write regardless of the mode.
        let check = dir.join("writable");
        if fs::write(&check, b"").is_ok() {
            let _ = fs::remove_file(&check);
            return Ok(())
        }
        let fig = Figure::new()?;
        let _ = fig.subplots::<1, 1>()?;
        match fig.save().to_file(dir.join("fig.png")) {
            Err(Error::PermissionError) => Ok(()),
            other => panic!("expected PermissionError, got {:?}", other),
        }
    }

    #[test]
    fn missing_directory() -> Result<(), Error> {
        let fig = Figure::new()?;
        let _ = fig.subplots::<1, 1>()?;
        match fig.save().to_file("target/no/such/dir/fig.png") {
            Err(Error::FileNotFoundError) => Ok(()),
            other => panic!("expected FileNotFoundError, got {:?}", other),
        }
    }
}
