use bench_plot::plot::parse_cli;
use bench_plot::{show_plot, BenchSeries};

fn main() {
    let (txtin, plotout) = parse_cli();
    println!(
        "read data from {} and plot to {}",
        txtin.to_str().unwrap(),
        plotout.to_str().unwrap()
    );
    let series = BenchSeries::from_txt(txtin).unwrap();
    println!("parsed {} samples", series.len());
    series.plot_line(&plotout).unwrap();
    show_plot(&plotout);
}
