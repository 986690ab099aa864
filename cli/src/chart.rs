//! Text chart renderer
//!
//! Scatter rendering of sampled curves on a character grid: membership
//! runs left to right, the universe bottom to top. One symbol per curve.

use xmu::{Plotter, Sample, Universe};

const SYMBOLS: [char; 6] = ['*', '+', 'o', 'x', '#', '@'];

pub struct TextChart {
    width: usize,
    height: usize,
    title: String,
    universe: Option<Universe>,
    series: Vec<(String, Vec<Sample>)>,
}

impl TextChart {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(11),
            height: height.max(5),
            title: String::new(),
            universe: None,
            series: Vec::new(),
        }
    }

    fn render(&self) -> String {
        let Some(universe) = self.universe else {
            return String::from("nothing to plot\n");
        };
        let mut grid = vec![vec![' '; self.width]; self.height];

        for (index, (_, points)) in self.series.iter().enumerate() {
            let symbol = SYMBOLS[index % SYMBOLS.len()];
            for point in points {
                let col = (point.mu * (self.width - 1) as f64).round() as isize;
                let row = ((universe.hi() - point.x) / universe.width()
                    * (self.height - 1) as f64)
                    .round() as isize;
                if col < 0 || row < 0 {
                    continue;
                }
                let (col, row) = (col as usize, row as usize);
                if col < self.width && row < self.height {
                    grid[row][col] = symbol;
                }
            }
        }

        let mut out = String::new();
        out.push_str(&format!("{}\n", self.title));
        for (index, row) in grid.iter().enumerate() {
            let x_label = universe.hi() - universe.width() * index as f64 / (self.height - 1) as f64;
            out.push_str(&format!("{:>8.2} |{}\n", x_label, row.iter().collect::<String>()));
        }
        out.push_str(&format!("{:>8} +{}\n", "", "-".repeat(self.width)));
        out.push_str(&format!("{:>8}  0{:>width$}\n", "mu:", "1", width = self.width - 1));
        for (index, (label, _)) in self.series.iter().enumerate() {
            out.push_str(&format!("  {} {}\n", SYMBOLS[index % SYMBOLS.len()], label));
        }
        out
    }
}

impl Plotter for TextChart {
    fn prepare_plot(&mut self, title: &str, universe: &Universe) {
        self.title = title.to_string();
        self.universe = Some(*universe);
    }

    fn add_plot(&mut self, label: &str, points: &[Sample]) {
        self.series.push((label.to_string(), points.to_vec()));
    }

    fn show_plot(&mut self) {
        print!("{}", self.render());
    }
}
