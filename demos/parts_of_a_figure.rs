/// https://matplotlib.org/stable/tutorials/introductory/quick_start.html#parts-of-a-figure

use std::error::Error;
use log::info;
use quickplot as plt;

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    // An empty figure with no axes.
    let fig = plt::figure()?;
    info!("empty figure: {} axes", fig.axes_count()?);
    // A figure with a single axes.
    let (fig1, [[_ax]]) = plt::subplots()?;
    info!("single: {} axes", fig1.axes_count()?);
    // A figure with a 2×2 grid of axes.
    let (fig4, [[mut ax0, mut ax1], [mut ax2, mut ax3]]) = plt::subplots()?;
    for (ax, name) in [(&mut ax0, "top left"), (&mut ax1, "top right"),
                       (&mut ax2, "bottom left"), (&mut ax3, "bottom right")] {
        ax.set_title(name)?;
    }
    info!("grid: {} axes", fig4.axes_count()?);
    fig4.save().to_file("target/parts_of_a_figure.svg")?;
    plt::pyplot::close_all()?;
    Ok(())
}
