//! Rendering interface
//!
//! The algebraic core stops at sampled (x, μ) pairs; anything that draws
//! them implements this trait. The protocol matches the usual charting
//! flow: prepare once, overlay any number of curves, then show.

use crate::sampling::Sample;
use crate::universe::Universe;

/// A chart sink for sampled membership curves
pub trait Plotter {
    /// Establish axes and title for a new chart
    fn prepare_plot(&mut self, title: &str, universe: &Universe);

    /// Overlay one labelled curve
    fn add_plot(&mut self, label: &str, points: &[Sample]);

    /// Render everything added so far
    fn show_plot(&mut self);
}
