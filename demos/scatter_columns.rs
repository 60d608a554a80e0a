/// https://matplotlib.org/stable/tutorials/introductory/quick_start.html#types-of-inputs-to-plotting-functions

use std::error::Error;
use quickplot::{
    self as plt,
    sample::{arange, Columns, Sampler},
    Layout,
};

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let mut rng = Sampler::seeded(19680801);
    let mut data = Columns::new();
    data.insert("a", arange(50))
        .insert("c", rng.randint(0, 50, 50)?)
        .insert("d", rng.randn(50));
    let b = data.column("a")? + &(10. * &rng.randn(50));
    let d = data.column("d")?.mapv(|v| v.abs() * 100.);
    data.insert("b", b).insert("d", d);

    let (fig, [[mut ax]]) = plt::Figure::builder()
        .figsize(5., 2.7)
        .layout(Layout::Constrained)
        .subplots()?;
    ax.scatter(data.column("a")?, data.column("b")?)
        .c(data.column("c")?)
        .s(data.column("d")?)
        .draw()?;
    ax.set_xlabel("entry a")?.set_ylabel("entry b")?;
    fig.save().to_file("target/scatter_columns.svg")?;
    Ok(())
}
