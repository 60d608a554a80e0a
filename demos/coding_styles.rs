/// https://matplotlib.org/stable/tutorials/introductory/quick_start.html#coding-styles
///
/// The same plot in the explicit (object-oriented) style, then in the
/// implicit pyplot style.  The former suits larger programs, the
/// latter quick interactive work.  Set `QUICKPLOT_SHOW` to also
/// display the figures.

use std::error::Error;
use quickplot::{self as plt, pyplot, sample::linspace, Figure, Layout};

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let x = linspace(0., 2., 100);
    let x2 = x.mapv(|x| x.powi(2));
    let x3 = x.mapv(|x| x.powi(3));

    // Explicit style.
    let (fig, [[mut ax]]) = Figure::builder()
        .figsize(5., 2.7)
        .layout(Layout::Constrained)
        .subplots()?;
    ax.xy(&x, &x).label("linear")
        .xy(&x, &x2).label("quadratic")
        .xy(&x, &x3).label("cubic")
        .plot()?;
    ax.set_xlabel("x label")?
        .set_ylabel("y label")?
        .set_title("Simple Plot")?
        .legend()?;
    fig.save().to_file("target/coding_styles_oo.svg")?;

    // Implicit style.
    pyplot::figure(Figure::builder().figsize(5., 2.7)
                   .layout(Layout::Constrained))?;
    pyplot::plot(&x, &x, &[("label", "linear")].into())?;
    pyplot::plot(&x, &x2, &[("label", "quadratic")].into())?;
    pyplot::plot(&x, &x3, &[("label", "cubic")].into())?;
    pyplot::xlabel("x label")?;
    pyplot::ylabel("y label")?;
    pyplot::title("Simple Plot")?;
    pyplot::legend()?;
    pyplot::savefig("target/coding_styles_pyplot.svg")?;

    if std::env::var_os("QUICKPLOT_SHOW").is_some() {
        plt::show()?;
    }
    Ok(())
}
