use super::VERSION;
use clap::App;
use std::path::PathBuf;

pub const TXT_IN: &str = "plot.txt";
pub const PLOT_OUT: &str = "src/plot.jpg";

/// Takes the CLI arguments for the plotting app.
/// The app defines no options, input and output paths are fixed;
/// clap still provides --help and --version and rejects stray arguments.
pub fn parse_cli() -> (PathBuf, PathBuf) {
    App::new("bench_plot")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to plot benchmark times against hash table load factor")
        .get_matches();
    (PathBuf::from(TXT_IN), PathBuf::from(PLOT_OUT))
}
