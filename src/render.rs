use crate::simulation::PlotBounds;
use crate::vector::Vector;
use log::{debug, info};
use ordered_float::OrderedFloat;
use std::io::{self, Write};

/// Screen-independent coordinates of one animation frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl Frame {
    pub fn from_positions(positions: &[Vector]) -> Frame {
        Frame {
            xs: positions.iter().map(|p| p.x).collect(),
            ys: positions.iter().map(|p| p.y).collect(),
        }
    }

    pub fn single(position: &Vector) -> Frame {
        Frame {
            xs: vec![position.x],
            ys: vec![position.y],
        }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

/// Per-axis limits; `None` leaves the axis to the renderer default.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisLimits {
    pub x: Option<(f64, f64)>,
    pub y: Option<(f64, f64)>,
}

impl AxisLimits {
    pub fn resolve(&self, fallback: PlotBounds) -> PlotBounds {
        PlotBounds {
            x: self.x.unwrap_or(fallback.x),
            y: self.y.unwrap_or(fallback.y),
            ..fallback
        }
    }
}

fn span<I: Iterator<Item = f64> + Clone>(values: I) -> Option<(f64, f64)> {
    let lo = values.clone().map(OrderedFloat).min()?.0;
    let hi = values.map(OrderedFloat).max()?.0;
    if lo == hi {
        None
    } else {
        Some((lo, hi))
    }
}

/// Tight limits around a single body's path. Degenerate axes are left unset.
pub fn trajectory_bounds(positions: &[Vector]) -> AxisLimits {
    AxisLimits {
        x: span(positions.iter().map(|p| p.x)),
        y: span(positions.iter().map(|p| p.y)),
    }
}

/// Caller-owned drawing surface: build it, feed it frames, then close it.
pub trait Renderer {
    fn update(&mut self, frame: &Frame) -> io::Result<()>;
    fn close(self) -> io::Result<()>
    where
        Self: Sized;
}

/// Draws frames as character grids.
pub struct TextRenderer<W: Write> {
    out: W,
    bounds: PlotBounds,
    width: usize,
    height: usize,
    frames_drawn: usize,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, bounds: PlotBounds, width: usize, height: usize) -> TextRenderer<W> {
        TextRenderer {
            out,
            bounds,
            width: width.max(1),
            height: height.max(1),
            frames_drawn: 0,
        }
    }

    pub fn frames_drawn(&self) -> usize {
        self.frames_drawn
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn cell(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let (x0, x1) = self.bounds.x;
        let (y0, y1) = self.bounds.y;
        if !(x >= x0 && x <= x1 && y >= y0 && y <= y1) {
            return None;
        }
        let col = ((x - x0) / (x1 - x0) * (self.width - 1) as f64).round() as usize;
        let row = ((y1 - y) / (y1 - y0) * (self.height - 1) as f64).round() as usize;
        Some((row.min(self.height - 1), col.min(self.width - 1)))
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn update(&mut self, frame: &Frame) -> io::Result<()> {
        let mut grid = vec![vec![' '; self.width]; self.height];
        let mut hidden = 0;
        for (x, y) in frame.xs.iter().zip(frame.ys.iter()) {
            match self.cell(*x, *y) {
                Some((row, col)) => grid[row][col] = 'o',
                None => hidden += 1,
            }
        }
        if hidden > 0 {
            debug!("{} points outside the plot bounds", hidden);
        }

        let border: String = std::iter::repeat('-').take(self.width).collect();
        writeln!(self.out, "frame {}", self.frames_drawn)?;
        writeln!(self.out, "+{}+", border)?;
        for row in grid {
            writeln!(self.out, "|{}|", row.into_iter().collect::<String>())?;
        }
        writeln!(self.out, "+{}+", border)?;
        self.frames_drawn += 1;
        Ok(())
    }

    fn close(mut self) -> io::Result<()> {
        info!("Renderer closed after {} frames", self.frames_drawn);
        self.out.flush()
    }
}

/// Plays the trajectory through `renderer` `repeats` times, returning the
/// number of frames drawn.
pub fn animate<R: Renderer>(
    renderer: &mut R,
    trajectory: &[Vec<Vector>],
    repeats: usize,
) -> io::Result<usize> {
    let mut drawn = 0;
    for _ in 0..repeats {
        for snapshot in trajectory {
            renderer.update(&Frame::from_positions(snapshot))?;
            drawn += 1;
        }
    }
    Ok(drawn)
}

/// Plays a single body's path one point per frame.
pub fn animate_path<R: Renderer>(renderer: &mut R, path: &[Vector]) -> io::Result<usize> {
    for position in path {
        renderer.update(&Frame::single(position))?;
    }
    Ok(path.len())
}
