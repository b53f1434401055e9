use plotters::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
pub mod plot;

pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

#[cfg(target_os = "macos")]
const IMAGE_VIEWER: &str = "open";
#[cfg(target_os = "windows")]
const IMAGE_VIEWER: &str = "explorer";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const IMAGE_VIEWER: &str = "xdg-open";

/// The main struct for the benchmark series:
/// hash table load factor and the associated lookup time.
#[derive(Debug, Clone)]
pub struct BenchSeries {
    pub load_factor: Vec<f64>,
    pub time_ms: Vec<i64>,
}

impl BenchSeries {
    pub fn new(capacity: usize) -> BenchSeries {
        let load_factor: Vec<f64> = Vec::with_capacity(capacity);
        let time_ms: Vec<i64> = Vec::with_capacity(capacity);
        BenchSeries {
            load_factor,
            time_ms,
        }
    }

    /// Init a BenchSeries from a whitespace-delimited text file,
    /// first column load factor, second column time in ms.
    /// Lines with fewer than two fields are skipped,
    /// extra fields past the second are ignored,
    /// a field that does not parse aborts with the line number.
    pub fn from_txt(fin: PathBuf) -> Result<BenchSeries, Box<dyn std::error::Error>> {
        let file =
            File::open(&fin).map_err(|e| format!("could not open {}: {}", fin.display(), e))?;
        let buf = BufReader::new(file);
        let mut series = BenchSeries::new(1000);
        for (n, l) in buf.lines().enumerate() {
            let l = l?;
            let mut fields = l.split_whitespace();
            let (first, second) = match (fields.next(), fields.next()) {
                (Some(f), Some(s)) => (f, s),
                _ => continue,
            };
            let lf: f64 = first
                .parse()
                .map_err(|_| format!("line {}: invalid load factor {:?}", n + 1, first))?;
            let ms: i64 = second
                .parse()
                .map_err(|_| format!("line {}: invalid time {:?}", n + 1, second))?;
            series.load_factor.push(lf);
            series.time_ms.push(ms);
        }
        Ok(series)
    }

    pub fn len(&self) -> usize {
        self.load_factor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.load_factor.is_empty()
    }

    /// plots the time vs load factor line chart to a raster image,
    /// the format follows the file extension
    pub fn plot_line(&self, fout: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let (xmin, xmax) = padded_range(&self.load_factor, 20.);
        let times: Vec<f64> = self.time_ms.iter().map(|&t| t as f64).collect();
        let (ymin, ymax) = padded_range(&times, 10.);
        let root = BitMapBackend::new(fout, (1280, 720)).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100)
            .build_cartesian_2d(xmin..xmax, ymin..ymax)?;
        chart
            .configure_mesh()
            .light_line_style(&TRANSPARENT)
            .bold_line_style(RGBColor(150, 150, 150).stroke_width(2))
            .set_all_tick_mark_size(2)
            .label_style(("sans-serif", 24))
            .x_labels(14) // max number of labels
            .y_label_formatter(&|y: &f64| format!("{:5.0}", y))
            .x_desc("LoadFactor")
            .y_desc("Time, ms")
            .draw()?;
        let line = LineSeries::new(
            self.load_factor
                .iter()
                .zip(times.iter())
                .map(|(&x, &y)| (x, y)),
            RGBColor(30, 30, 180).stroke_width(3),
        );
        chart.draw_series(line)?;
        root.present()?;
        Ok(())
    }
}

impl std::fmt::Display for BenchSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "load_factor, time [ms]\n")?;
        for (lf, ms) in self.load_factor.iter().zip(self.time_ms.iter()) {
            write!(f, "{},{}\n", lf, ms)?
        }
        Ok(())
    }
}

/// opens the saved plot with the platform image viewer, non blocking;
/// a viewer that fails to launch is reported but not fatal
pub fn show_plot(fout: &Path) {
    match std::process::Command::new(IMAGE_VIEWER).arg(fout).spawn() {
        Ok(_) => (),
        Err(e) => println!(
            "could not show {} with {}: {}",
            fout.display(),
            IMAGE_VIEWER,
            e
        ),
    }
}

pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

/// axis range with a span/pad_div margin on both sides;
/// empty and single-point series get a fixed margin
/// to keep the chart axes valid
pub fn padded_range(values: &[f64], pad_div: f64) -> (f64, f64) {
    let (min, max) = match min_and_max(values) {
        Some(mm) => mm,
        None => return (0., 1.),
    };
    let margin = (max - min) / pad_div;
    if margin == 0. {
        (min - 0.5, max + 0.5)
    } else {
        (min - margin, max + margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("bench_plot_{}_{}", std::process::id(), name))
    }

    fn write_tmp(name: &str, contents: &str) -> PathBuf {
        let path = tmp_path(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parses_samples_in_order() {
        let path = write_tmp("in_order.txt", "1.0 5\n2.0 7\n\n3.5 2\n");
        let series = BenchSeries::from_txt(path).unwrap();
        assert_eq!(series.load_factor, vec![1.0, 2.0, 3.5]);
        assert_eq!(series.time_ms, vec![5, 7, 2]);
    }

    #[test]
    fn skips_short_lines_without_shifting() {
        let path = write_tmp("short_lines.txt", "0.5 10\nlonely\n\n0.75 20 trailing fields\n");
        let series = BenchSeries::from_txt(path).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.load_factor, vec![0.5, 0.75]);
        assert_eq!(series.time_ms, vec![10, 20]);
    }

    #[test]
    fn fails_on_malformed_time() {
        let path = write_tmp("bad_time.txt", "1 notanint\n");
        let err = BenchSeries::from_txt(path).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn fails_on_malformed_load_factor() {
        let path = write_tmp("bad_lf.txt", "0.5 10\nxyz 10\n");
        let err = BenchSeries::from_txt(path).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn fails_on_missing_file() {
        assert!(BenchSeries::from_txt(tmp_path("does_not_exist.txt")).is_err());
    }

    #[test]
    fn empty_file_gives_empty_series_and_still_plots() {
        let path = write_tmp("empty.txt", "");
        let series = BenchSeries::from_txt(path).unwrap();
        assert!(series.is_empty());
        let plot = tmp_path("empty.jpg");
        series.plot_line(&plot).unwrap();
        assert!(plot.exists());
    }

    #[test]
    fn parsing_is_idempotent() {
        let path = write_tmp("twice.txt", "0.1 1\n0.2 2\n0.3 3\n");
        let a = BenchSeries::from_txt(path.clone()).unwrap();
        let b = BenchSeries::from_txt(path).unwrap();
        assert_eq!(a.load_factor, b.load_factor);
        assert_eq!(a.time_ms, b.time_ms);
    }

    #[test]
    fn plots_a_line_chart() {
        let path = write_tmp("chart.txt", "0.25 3\n0.50 4\n0.75 9\n1.00 30\n");
        let series = BenchSeries::from_txt(path).unwrap();
        let plot = tmp_path("chart.jpg");
        series.plot_line(&plot).unwrap();
        assert!(plot.exists());
    }

    #[test]
    fn min_and_max_finds_extremes() {
        assert_eq!(min_and_max(&[3.0, 1.0, 2.0]), Some((1.0, 3.0)));
        assert_eq!(min_and_max(&[7]), Some((7, 7)));
        assert_eq!(min_and_max::<i64>(&[]), None);
    }

    #[test]
    fn padded_range_handles_degenerate_spans() {
        let (lo, hi) = padded_range(&[], 20.);
        assert!(lo < hi);
        let (lo, hi) = padded_range(&[2.0], 20.);
        assert!(lo < 2.0 && hi > 2.0);
        let (lo, hi) = padded_range(&[0.0, 10.0], 10.);
        assert_eq!((lo, hi), (-1.0, 11.0));
    }
}
