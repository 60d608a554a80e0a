/// https://matplotlib.org/stable/tutorials/introductory/quick_start.html#making-a-helper-functions

use std::error::Error;
use quickplot::{self as plt, draw, sample::Sampler, StyleOptions};

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let data = Sampler::seeded(19680801).randn_sets(4, 100);
    let (fig, [[mut ax1, mut ax2]]) = plt::Figure::builder()
        .figsize(5., 2.7)
        .subplots()?;
    draw(&mut ax1, &data[0], &data[1], &[("marker", "x")].into())?;
    draw(&mut ax2, &data[2], &data[3],
         &StyleOptions::new().with("marker", "o").with("linestyle", "none"))?;
    fig.save().to_file("target/helper_functions.svg")?;
    Ok(())
}
