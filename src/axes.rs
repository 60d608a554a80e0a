use std::borrow::Borrow;
use log::debug;
use pyo3::{
    prelude::*,
    intern,
    types::{PyDict, PyList},
};
#[cfg(feature = "curve-sampling")]
use curve_sampling::Sampling;
use crate::{Data, Error, StyleOptions, StyleValue};

/// A region of a [`Figure`][crate::Figure] holding the plotted data,
/// its axis, labels and legend.
#[derive(Debug, Clone)]
pub struct Axes {
    ax: PyObject,
}

/// Handle to the lines returned by one call to Matplotlib's `plot`.
pub struct Line2D {
    line2d: Py<PyList>,
}

impl Axes {
    pub(crate) fn from_py(ax: PyObject) -> Self {
        Axes { ax }
    }

    /// Call `Axes.plot` once.  `fmt` is the optional format string
    /// ("r.", "o-",...) placed after the data.
    pub(crate) fn plot_line<D>(
        &self, py: Python<'_>, x: &D, y: &D, fmt: Option<&str>,
        style: &StyleOptions,
    ) -> PyResult<Line2D>
    where D: Data + ?Sized {
        debug!("plot: {} × {} points, {} style option(s)",
               x.len(), y.len(), style.len());
        let xn = x.to_numpy(py);
        let yn = y.to_numpy(py);
        let kwargs = style.to_kwargs(py)?;
        let ax = self.ax.bind(py);
        let lines = match fmt {
            Some(fmt) => ax.call_method(
                intern!(py, "plot"), (xn, yn, fmt), Some(&kwargs))?,
            None => ax.call_method(
                intern!(py, "plot"), (xn, yn), Some(&kwargs))?,
        };
        Ok(Line2D { line2d: lines.extract()? })
    }

    fn plot_y<D>(&self, py: Python<'_>, y: &D, fmt: &str,
                 style: &StyleOptions) -> PyResult<Line2D>
    where D: Data + ?Sized {
        debug!("plot: {} points, {} style option(s)", y.len(), style.len());
        let yn = y.to_numpy(py);
        let kwargs = style.to_kwargs(py)?;
        let lines = self.ax.bind(py)
            .call_method(intern!(py, "plot"), (yn, fmt), Some(&kwargs))?;
        Ok(Line2D { line2d: lines.extract()? })
    }

    /// Plot `y` versus `x` as lines and/or markers.
    ///
    /// # Example
    ///
    /// ```
    /// use quickplot as plt;
    /// let (fig, [[mut ax]]) = plt::subplots()?;
    /// ax.xy(&[1., 2., 3., 4.], &[1., 4., 2., 3.]).plot()?;
    /// fig.save().to_file("target/XY_plot.pdf")?;
    /// # Ok::<(), quickplot::Error>(())
    /// ```
    #[must_use]
    pub fn xy<'a, D>(&'a mut self, x: &'a D, y: &'a D) -> XY<'a, D>
    where D: Data + ?Sized {
        // The chain leading to plot starts with the data (using this
        // function) so that additional data may be added, sharing
        // common options.  We also mutably borrow `self` to reflect that
        // the final `.plot()` will mutate the underlying Python object.
        XY { axes: self,
             options: PlotOptions::new(),
             data: PlotData::XY(x, y),
             prev_data: vec![] }
    }

    /// Plot `y` versus its indices as lines and/or markers.
    ///
    /// # Example
    ///
    /// ```
    /// use quickplot as plt;
    /// let (fig, [[mut ax]]) = plt::subplots()?;
    /// ax.y(&[1., 4., 2., 3.]).plot()?;
    /// fig.save().to_file("target/Y_plot.pdf")?;
    /// # Ok::<(), quickplot::Error>(())
    /// ```
    #[must_use]
    pub fn y<'a, D>(&'a mut self, y: &'a D) -> XY<'a, D>
    where D: Data + ?Sized {
        XY { axes: self,
             options: PlotOptions::new(),
             data: PlotData::Y(y),
             prev_data: vec![] }
    }

    /// Convenience function to plot X-Y coordinates coming from `xy`.
    ///
    /// # Example
    ///
    /// ```
    /// use quickplot as plt;
    /// let (fig, [[mut ax]]) = plt::subplots()?;
    /// ax.xy_from(&[(1., 2.), (4., 2.), (2., 3.), (3., 4.)]).plot()?;
    /// ax.xy_from([(1., 0.), (2., 3.), (3., 1.), (4., 3.)]).plot()?;
    /// fig.save().to_file("target/XY_from_plot.pdf")?;
    /// # Ok::<(), quickplot::Error>(())
    /// ```
    #[must_use]
    pub fn xy_from<'a, I>(&'a mut self, xy: I) -> XYFrom<'a, I>
    where I: IntoIterator,
          <I as IntoIterator>::Item: Borrow<(f64, f64)> {
        // (f64, f64) chosen for compatibility with `zip`.
        XYFrom { axes: self,
                 options: PlotOptions::new(),
                 data: xy }
    }

    #[cfg(feature = "curve-sampling")]
    /// Plot the graph of the function `f` on the interval \[`a`, `b`\].
    ///
    /// # Example
    /// ```
    /// use quickplot as plt;
    /// let (fig, [[mut ax]]) = plt::subplots()?;
    /// ax.fun(|x| x * x, 0., 2.).label("quadratic").plot()?;
    /// fig.save().to_file("target/Fun_plot.pdf")?;
    /// # Ok::<(), quickplot::Error>(())
    /// ```
    #[must_use]
    pub fn fun<'a, F>(&'a mut self, f: F, a: f64, b: f64) -> Fun<'a, F>
    where F: FnMut(f64) -> f64 {
        Fun { axes: self,
              options: PlotOptions::new(),
              f, a, b,
              n: 100 }
    }

    /// Scatter plot of `y` versus `x`, optionally with varying marker
    /// color ([`Scatter::c`]) and size ([`Scatter::s`]).
    #[must_use]
    pub fn scatter<'a, D>(&'a mut self, x: &'a D, y: &'a D) -> Scatter<'a, D>
    where D: Data + ?Sized {
        Scatter { axes: self, x, y, c: None, s: None,
                  style: StyleOptions::new() }
    }

    /// Histogram of the values `x`.
    #[must_use]
    pub fn hist<'a, D>(&'a mut self, x: &'a D) -> Hist<'a, D>
    where D: Data + ?Sized {
        Hist { axes: self, x, bins: None, density: false,
               style: StyleOptions::new() }
    }

    /// Annotate the point `xy` with `text`.
    #[must_use]
    pub fn annotate<'a>(&'a mut self, text: &'a str, xy: (f64, f64))
                        -> Annotation<'a> {
        Annotation { axes: self, text, xy, xytext: None, arrowprops: None,
                     style: StyleOptions::new() }
    }

    pub fn set_title(&mut self, v: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_title, (v,))?;
        Ok(self)
    }

    /// Set the yaxis' scale.  Possible values for `v` are "linear",
    /// "log", "symlog", "logit",...
    pub fn set_yscale(&mut self, v: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_yscale, (v,))?;
        Ok(self)
    }

    pub fn set_xlim(&mut self, left: f64, right: f64)
                    -> Result<&mut Self, Error> {
        meth!(self.ax, set_xlim, (left, right))?;
        Ok(self)
    }

    pub fn set_ylim(&mut self, bottom: f64, top: f64)
                    -> Result<&mut Self, Error> {
        meth!(self.ax, set_ylim, (bottom, top))?;
        Ok(self)
    }

    pub fn grid(&mut self) -> Result<&mut Self, Error> {
        meth!(self.ax, grid, (true,))?;
        Ok(self)
    }

    pub fn set_xlabel(&mut self, label: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_xlabel, (label,))?;
        Ok(self)
    }

    pub fn set_ylabel(&mut self, label: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_ylabel, (label,))?;
        Ok(self)
    }

    /// Place a legend listing the labelled artists.
    pub fn legend(&mut self) -> Result<&mut Self, Error> {
        meth!(self.ax, legend, ())?;
        Ok(self)
    }

    pub fn title(&self) -> Result<String, Error> {
        Python::with_gil(|py| {
            Ok(self.ax.call_method0(py, intern!(py, "get_title"))?
               .extract(py)?)
        })
    }

    pub fn xlabel(&self) -> Result<String, Error> {
        Python::with_gil(|py| {
            Ok(self.ax.call_method0(py, intern!(py, "get_xlabel"))?
               .extract(py)?)
        })
    }

    /// Texts of the legend, empty if there is no legend.
    pub fn legend_labels(&self) -> Result<Vec<String>, Error> {
        Python::with_gil(|py| {
            let legend = self.ax.bind(py)
                .call_method0(intern!(py, "get_legend"))?;
            if legend.is_none() {
                return Ok(vec![])
            }
            let mut labels = vec![];
            for t in legend.call_method0(intern!(py, "get_texts"))?.iter()? {
                labels.push(t?.call_method0(intern!(py, "get_text"))?
                            .extract()?);
            }
            Ok(labels)
        })
    }

    /// Number of lines drawn on these axes.
    pub fn line_count(&self) -> Result<usize, Error> {
        Python::with_gil(|py| {
            Ok(self.ax.bind(py).call_method0(intern!(py, "get_lines"))?
               .len()?)
        })
    }

    /// Number of collections (e.g. scatter plots) on these axes.
    pub fn collection_count(&self) -> Result<usize, Error> {
        Python::with_gil(|py| {
            Ok(self.ax.bind(py).getattr(intern!(py, "collections"))?
               .len()?)
        })
    }
}

enum PlotData<'a, D>
where D: ?Sized {
    XY(&'a D, &'a D),
    Y(&'a D),
}

#[derive(Clone)]
struct PlotOptions<'a> {
    fmt: &'a str,
    style: StyleOptions,
}

impl<'a> PlotOptions<'a> {
    fn new() -> PlotOptions<'static> {
        PlotOptions { fmt: "", style: StyleOptions::new() }
    }

    fn plot_data<D>(&self, py: Python<'_>, axes: &Axes,
                    data: &PlotData<'_, D>) -> PyResult<Line2D>
    where D: Data + ?Sized {
        match data {
            PlotData::XY(x, y) => {
                axes.plot_line(py, *x, *y, Some(self.fmt), &self.style) }
            PlotData::Y(y) => {
                axes.plot_y(py, *y, self.fmt, &self.style) }
        }
    }
}

/// Declare methods to set the options assuming `self.options` exists.
macro_rules! set_plotoptions { () => {
    /// Format string such as "r." or "o-".
    #[must_use]
    pub fn fmt(mut self, fmt: &'a str) -> Self {
        self.options.fmt = fmt;
        self
    }

    #[must_use]
    pub fn animated(mut self) -> Self {
        self.options.style.insert("animated", true);
        self
    }

    #[must_use]
    pub fn antialiased(mut self, b: bool) -> Self {
        self.options.style.insert("antialiased", b);
        self
    }

    #[must_use]
    pub fn label(mut self, label: &str) -> Self {
        self.options.style.insert("label", label);
        self
    }

    #[must_use]
    pub fn linewidth(mut self, w: f64) -> Self {
        self.options.style.insert("linewidth", w);
        self
    }

    #[must_use]
    pub fn color(mut self, color: impl Into<StyleValue>) -> Self {
        self.options.style.insert("color", color);
        self
    }

    #[must_use]
    pub fn marker(mut self, marker: &str) -> Self {
        self.options.style.insert("marker", marker);
        self
    }

    #[must_use]
    pub fn linestyle(mut self, ls: &str) -> Self {
        self.options.style.insert("linestyle", ls);
        self
    }

    /// Set any other `Line2D` property.
    #[must_use]
    pub fn option(mut self, key: &str, value: impl Into<StyleValue>) -> Self {
        self.options.style.insert(key, value);
        self
    }
}}

pub struct XY<'a, D>
where D: ?Sized {
    axes: &'a Axes,
    // Latest data and its setting.
    options: PlotOptions<'a>,
    data: PlotData<'a, D>,
    // Previous data with their settings.
    prev_data: Vec<(PlotOptions<'a>, PlotData<'a, D>)>,
}

impl<'a, D> XY<'a, D>
where D: Data + ?Sized {
    set_plotoptions!();

    /// Plot the data with the options specified in [`XY`].  Return
    /// one handle per dataset, in the order they were given.
    ///
    /// The datasets are drawn one after the other.  If one of them is
    /// rejected by Matplotlib, the error is returned and the datasets
    /// before it remain on the axes.
    pub fn plot(self) -> Result<Vec<Line2D>, Error> {
        Python::with_gil(|py| {
            let mut lines = Vec::with_capacity(self.prev_data.len() + 1);
            for (opt, data) in self.prev_data.iter() {
                lines.push(opt.plot_data(py, self.axes, data)?);
            }
            lines.push(self.options.plot_data(py, self.axes, &self.data)?);
            Ok(lines)
        })
    }

    /// Add the dataset (`x`, `y`).  The following options apply to
    /// it, starting from the current ones.
    #[must_use]
    pub fn xy(mut self, x: &'a D, y: &'a D) -> Self {
        let data = std::mem::replace(&mut self.data, PlotData::XY(x, y));
        self.prev_data.push((self.options.clone(), data));
        self
    }

    /// Add the dataset `y`.
    #[must_use]
    pub fn y(mut self, y: &'a D) -> Self {
        let data = std::mem::replace(&mut self.data, PlotData::Y(y));
        self.prev_data.push((self.options.clone(), data));
        self
    }
}

pub struct XYFrom<'a, I> {
    axes: &'a Axes,
    options: PlotOptions<'a>,
    data: I,
}

impl<'a, I> XYFrom<'a, I>
where I: IntoIterator,
      <I as IntoIterator>::Item: Borrow<(f64, f64)> {
    set_plotoptions!();

    /// Plot the data with the options specified in [`XYFrom`].
    pub fn plot(self) -> Result<Line2D, Error> {
        let data = self.data.into_iter();
        let n = data.size_hint().0;
        let mut x = Vec::with_capacity(n);
        let mut y = Vec::with_capacity(n);
        for di in data {
            let &(xi, yi) = di.borrow();
            x.push(xi);
            y.push(yi);
        }
        Python::with_gil(|py| {
            Ok(self.axes.plot_line(py, &x, &y, Some(self.options.fmt),
                                   &self.options.style)?)
        })
    }
}

/// Options to plot functions (require the library [curve-sampling][]).
///
/// [curve-sampling]: https://crates.io/crates/curve-sampling
#[cfg(feature = "curve-sampling")]
#[must_use]
pub struct Fun<'a, F> {
    axes: &'a Axes,
    options: PlotOptions<'a>,
    f: F,
    a: f64, // [a, b] is the interval on which we want to plot f.
    b: f64,
    n: usize,
}

#[cfg(feature = "curve-sampling")]
impl<'a, F> Fun<'a, F>
where F: FnMut(f64) -> f64 {
    set_plotoptions!();

    /// Plot the data with the options specified in [`Fun`].
    pub fn plot(mut self) -> Result<Line2D, Error> {
        let s = Sampling::fun(&mut self.f, self.a, self.b)
            .n(self.n).build();
        let x = s.x();
        let y = s.y();
        Python::with_gil(|py| {
            Ok(self.axes.plot_line(py, &x, &y, Some(self.options.fmt),
                                   &self.options.style)?)
        })
    }

    /// Set the maximum number of evaluations of the function to build
    /// the sampling.  Values below 2 are ignored.
    pub fn n(mut self, n: usize) -> Self {
        if n < 2 {
            log::warn!("Ignoring {} evaluation(s), at least two are required", n);
        } else {
            self.n = n;
        }
        self
    }
}


impl Line2D {
    pub(crate) fn from_py(line2d: Py<PyList>) -> Self {
        Line2D { line2d }
    }

    /// Number of `Line2D` artists held by the handle.
    pub fn count(&self) -> usize {
        Python::with_gil(|py| self.line2d.bind(py).len())
    }

    /// Set properties of all the lines.  Unknown properties are
    /// reported by Matplotlib.
    pub fn set(&self, options: &StyleOptions) -> Result<&Self, Error> {
        Python::with_gil(|py| -> PyResult<()> {
            let kwargs = options.to_kwargs(py)?;
            for l in self.line2d.bind(py).iter() {
                l.call_method(intern!(py, "set"), (), Some(&kwargs))?;
            }
            Ok(())
        })?;
        Ok(self)
    }

    pub fn label(&self, label: &str) -> Result<&Self, Error> {
        self.set(&StyleOptions::new().with("label", label))
    }

    /// The drawn points, line after line.
    pub fn xy_data(&self) -> Result<Vec<(f64, f64)>, Error> {
        Python::with_gil(|py| {
            let mut xy = vec![];
            for l in self.line2d.bind(py).iter() {
                let pts: Vec<[f64; 2]> = l
                    .call_method0(intern!(py, "get_xydata"))?
                    .call_method0(intern!(py, "tolist"))?
                    .extract()?;
                xy.extend(pts.into_iter().map(|[x, y]| (x, y)));
            }
            Ok(xy)
        })
    }

    /// Marker of the first line ("None" if there is none).
    pub fn marker(&self) -> Result<String, Error> {
        Python::with_gil(|py| {
            let l = self.line2d.bind(py).get_item(0)?;
            Ok(l.call_method0(intern!(py, "get_marker"))?.extract()?)
        })
    }
}

/// Scatter plot options, see [`Axes::scatter`].
#[must_use]
pub struct Scatter<'a, D>
where D: ?Sized {
    axes: &'a Axes,
    x: &'a D,
    y: &'a D,
    c: Option<&'a D>,
    s: Option<&'a D>,
    style: StyleOptions,
}

/// Handle to the marker collection drawn by [`Scatter::draw`].
pub struct PathCollection {
    coll: PyObject,
}

impl<'a, D> Scatter<'a, D>
where D: Data + ?Sized {
    /// Values mapped to colors, one per point.
    pub fn c(mut self, c: &'a D) -> Self {
        self.c = Some(c);
        self
    }

    /// Marker areas in points², one per point.
    pub fn s(mut self, s: &'a D) -> Self {
        self.s = Some(s);
        self
    }

    pub fn option(mut self, key: &str, value: impl Into<StyleValue>) -> Self {
        self.style.insert(key, value);
        self
    }

    pub fn draw(self) -> Result<PathCollection, Error> {
        debug!("scatter: {} points", self.x.len());
        Python::with_gil(|py| {
            let kwargs = self.style.to_kwargs(py)?;
            if let Some(c) = self.c {
                kwargs.set_item("c", c.to_numpy(py))?;
            }
            if let Some(s) = self.s {
                kwargs.set_item("s", s.to_numpy(py))?;
            }
            let coll = self.axes.ax.bind(py).call_method(
                intern!(py, "scatter"),
                (self.x.to_numpy(py), self.y.to_numpy(py)),
                Some(&kwargs))?;
            Ok(PathCollection { coll: coll.unbind() })
        })
    }
}

impl PathCollection {
    /// Positions of the markers.
    pub fn offsets(&self) -> Result<Vec<(f64, f64)>, Error> {
        Python::with_gil(|py| {
            let pts: Vec<[f64; 2]> = self.coll.bind(py)
                .call_method0(intern!(py, "get_offsets"))?
                .call_method0(intern!(py, "tolist"))?
                .extract()?;
            Ok(pts.into_iter().map(|[x, y]| (x, y)).collect())
        })
    }

    /// Marker sizes (a single value when they are all equal).
    pub fn sizes(&self) -> Result<Vec<f64>, Error> {
        Python::with_gil(|py| {
            Ok(self.coll.bind(py)
               .call_method0(intern!(py, "get_sizes"))?
               .call_method0(intern!(py, "tolist"))?
               .extract()?)
        })
    }
}

/// Histogram options, see [`Axes::hist`].
#[must_use]
pub struct Hist<'a, D>
where D: ?Sized {
    axes: &'a Axes,
    x: &'a D,
    bins: Option<usize>,
    density: bool,
    style: StyleOptions,
}

/// Bin values and edges computed by [`Hist::draw`].
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub counts: Vec<f64>,
    /// `counts.len() + 1` bin edges.
    pub edges: Vec<f64>,
}

impl<'a, D> Hist<'a, D>
where D: Data + ?Sized {
    pub fn bins(mut self, n: usize) -> Self {
        self.bins = Some(n);
        self
    }

    /// Normalize so that the histogram integrates to 1.
    pub fn density(mut self) -> Self {
        self.density = true;
        self
    }

    pub fn option(mut self, key: &str, value: impl Into<StyleValue>) -> Self {
        self.style.insert(key, value);
        self
    }

    pub fn draw(self) -> Result<Histogram, Error> {
        debug!("hist: {} values", self.x.len());
        Python::with_gil(|py| {
            let kwargs = self.style.to_kwargs(py)?;
            if let Some(n) = self.bins {
                kwargs.set_item("bins", n)?;
            }
            if self.density {
                kwargs.set_item("density", true)?;
            }
            // Returns (n, bins, patches).
            let h = self.axes.ax.bind(py).call_method(
                intern!(py, "hist"), (self.x.to_numpy(py),), Some(&kwargs))?;
            let counts = h.get_item(0)?
                .call_method0(intern!(py, "tolist"))?.extract()?;
            let edges = h.get_item(1)?
                .call_method0(intern!(py, "tolist"))?.extract()?;
            Ok(Histogram { counts, edges })
        })
    }
}

/// Annotation options, see [`Axes::annotate`].
#[must_use]
pub struct Annotation<'a> {
    axes: &'a Axes,
    text: &'a str,
    xy: (f64, f64),
    xytext: Option<(f64, f64)>,
    arrowprops: Option<StyleOptions>,
    style: StyleOptions,
}

impl<'a> Annotation<'a> {
    /// Position of the text (defaults to the annotated point).
    pub fn xytext(mut self, x: f64, y: f64) -> Self {
        self.xytext = Some((x, y));
        self
    }

    /// Draw an arrow from the text to the point, e.g. with
    /// `facecolor` and `shrink` properties.
    pub fn arrowprops(mut self, props: StyleOptions) -> Self {
        self.arrowprops = Some(props);
        self
    }

    pub fn option(mut self, key: &str, value: impl Into<StyleValue>) -> Self {
        self.style.insert(key, value);
        self
    }

    pub fn draw(self) -> Result<(), Error> {
        Python::with_gil(|py| {
            let kwargs: Bound<'_, PyDict> = self.style.to_kwargs(py)?;
            if let Some(xytext) = self.xytext {
                kwargs.set_item("xytext", xytext)?;
            }
            if let Some(props) = &self.arrowprops {
                kwargs.set_item("arrowprops", props.to_kwargs(py)?)?;
            }
            self.axes.ax.bind(py).call_method(
                intern!(py, "annotate"), (self.text, self.xy), Some(&kwargs))?;
            Ok(())
        })
    }
}
