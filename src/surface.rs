//! Reusable plotting helper.

use log::debug;
use pyo3::prelude::*;
use crate::{Axes, Data, Error, Line2D, StyleOptions};

/// Something lines can be drawn on: explicit [`Axes`] or pyplot's
/// current axes ([`pyplot::ImplicitAxes`][crate::pyplot::ImplicitAxes]).
pub trait Surface {
    /// Call the line primitive with `x`, `y` and `options` as keyword
    /// arguments.  Lengths are not checked here.
    fn plot_styled<D>(&mut self, x: &D, y: &D, options: &StyleOptions)
                      -> Result<Line2D, Error>
    where D: Data + ?Sized;

    /// Number of lines drawn so far.
    fn line_count(&self) -> Result<usize, Error>;
}

impl Surface for Axes {
    fn plot_styled<D>(&mut self, x: &D, y: &D, options: &StyleOptions)
                      -> Result<Line2D, Error>
    where D: Data + ?Sized {
        Python::with_gil(|py| Ok(self.plot_line(py, x, y, None, options)?))
    }

    fn line_count(&self) -> Result<usize, Error> {
        Axes::line_count(self)
    }
}

/// Draw `ys` versus `xs` on `surface` with the style `options` and
/// return what the line primitive returned.
///
/// Errors of the primitive (unknown option, lengths of `xs` and `ys`
/// that differ,...) are returned unchanged as [`Error::Python`].
///
/// # Example
///
/// ```
/// use quickplot::{self as plt, draw, StyleOptions};
/// let (fig, [[mut ax1, mut ax2]]) = plt::subplots()?;
/// let data = plt::sample::Sampler::seeded(19680801).randn_sets(4, 100);
/// draw(&mut ax1, &data[0], &data[1], &[("marker", "x")].into())?;
/// draw(&mut ax2, &data[2], &data[3], &[("marker", "o")].into())?;
/// # fig.close()?;
/// # Ok::<(), plt::Error>(())
/// ```
pub fn draw<S, D>(surface: &mut S, xs: &D, ys: &D, options: &StyleOptions)
                  -> Result<Line2D, Error>
where S: Surface + ?Sized,
      D: Data + ?Sized {
    debug!("draw: {} option(s)", options.len());
    surface.plot_styled(xs, ys, options)
}


#[cfg(test)]
mod tests {
    use super::*;
    use pyo3::exceptions::{PyAttributeError, PyValueError};
    use crate::Figure;

    fn fresh_axes() -> Result<(Figure, Axes), Error> {
        let fig = Figure::new()?;
        let [[ax]] = fig.subplots()?;
        Ok((fig, ax))
    }

    fn python_error_is<T: pyo3::PyTypeInfo>(r: Result<Line2D, Error>) -> bool {
        match r {
            Err(Error::Python(e)) => Python::with_gil(|py| e.is_instance_of::<T>(py)),
            _ => false,
        }
    }

    #[test]
    fn adds_exactly_one_line() -> Result<(), Error> {
        let (_fig, mut ax) = fresh_axes()?;
        assert_eq!(ax.line_count()?, 0);
        let l = draw(&mut ax, &[1., 2., 3., 4.], &[1., 4., 2., 3.],
                     &StyleOptions::new())?;
        assert_eq!(l.count(), 1);
        assert_eq!(Surface::line_count(&ax)?, 1);
        assert_eq!(l.xy_data()?, [(1., 1.), (2., 4.), (3., 2.), (4., 3.)]);
        draw(&mut ax, &[0., 1.], &[1., 0.], &StyleOptions::new())?;
        assert_eq!(ax.line_count()?, 2);
        Ok(())
    }

    #[test]
    fn options_are_applied() -> Result<(), Error> {
        let (_fig, mut ax) = fresh_axes()?;
        let opts = StyleOptions::new().with("marker", "x").with("color", "red");
        let l = draw(&mut ax, &[0., 1.], &[0., 1.], &opts)?;
        assert_eq!(l.marker()?, "x");
        Ok(())
    }

    #[test]
    fn unknown_option_comes_from_matplotlib() -> Result<(), Error> {
        let (_fig, mut ax) = fresh_axes()?;
        let opts = StyleOptions::new().with("not_a_line_property", 1_i64);
        let r = draw(&mut ax, &[1., 2.], &[1., 2.], &opts);
        assert!(python_error_is::<PyAttributeError>(r));
        Ok(())
    }

    #[test]
    fn shape_mismatch_comes_from_matplotlib() -> Result<(), Error> {
        let (_fig, mut ax) = fresh_axes()?;
        let r = draw(&mut ax, &[1., 2., 3.][..], &[1., 2.][..],
                     &StyleOptions::new());
        assert!(python_error_is::<PyValueError>(r));
        assert_eq!(ax.line_count()?, 0);
        Ok(())
    }

    #[test]
    fn same_content_on_fresh_surfaces() -> Result<(), Error> {
        let opts = StyleOptions::new().with("marker", "o");
        let x = vec![0.5, 1.5, 2.5];
        let y = vec![2., -1., 4.];
        let (_f1, mut ax1) = fresh_axes()?;
        let (_f2, mut ax2) = fresh_axes()?;
        let l1 = draw(&mut ax1, &x, &y, &opts)?;
        let l2 = draw(&mut ax2, &x, &y, &opts)?;
        assert_eq!(l1.xy_data()?, l2.xy_data()?);
        assert_eq!(l1.marker()?, l2.marker()?);
        Ok(())
    }

    #[test]
    fn artifact_outlives_the_data() -> Result<(), Error> {
        let (_fig, mut ax) = fresh_axes()?;
        let l = {
            let x = vec![1., 2.];
            let y = vec![3., 4.];
            draw(&mut ax, &x, &y, &StyleOptions::new())?
        };
        assert_eq!(l.xy_data()?, [(1., 3.), (2., 4.)]);
        Ok(())
    }
}
