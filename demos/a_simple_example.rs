/// https://matplotlib.org/stable/tutorials/introductory/quick_start.html#a-simple-example

use std::error::Error;
use log::info;
use quickplot as plt;

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let (fig, [[mut ax]]) = plt::subplots()?;
    ax.xy(&[1., 2., 3., 4.], &[1., 4., 2., 3.]).plot()?;
    fig.save().to_file("target/a_simple_example.svg")?;
    info!("wrote target/a_simple_example.svg");
    Ok(())
}
