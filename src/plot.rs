//! Scatter plot of a clustering, written as a PNG.
//!
//! Samples are projected onto two feature columns. Each cluster gets a
//! color sampled from the Spectral colormap, noise is drawn black, and core
//! samples get larger markers than border samples.

use crate::cluster::ClusterAssignment;
use crate::error::{Error, Result};
use crate::{Matrix, NOISE};
use image::{Rgb, RgbImage};
use std::path::Path;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const EDGE: Rgb<u8> = Rgb([0, 0, 0]);
const NOISE_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

const CORE_RADIUS: i64 = 7;
const BORDER_RADIUS: i64 = 3;
const MARGIN: f64 = 20.0;

// ColorBrewer Spectral, the anchors of matplotlib's `Spectral` map.
const SPECTRAL: [[u8; 3]; 11] = [
    [0x9e, 0x01, 0x42],
    [0xd5, 0x3e, 0x4f],
    [0xf4, 0x6d, 0x43],
    [0xfd, 0xae, 0x61],
    [0xfe, 0xe0, 0x8b],
    [0xff, 0xff, 0xbf],
    [0xe6, 0xf5, 0x98],
    [0xab, 0xdd, 0xa4],
    [0x66, 0xc2, 0xa5],
    [0x32, 0x88, 0xbd],
    [0x5e, 0x4f, 0xa2],
];

#[derive(Clone, Debug)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
    pub x_feature: usize,
    pub y_feature: usize,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            x_feature: 0,
            y_feature: 1,
        }
    }
}

/// Sample the Spectral colormap at `t` in `[0, 1]`.
pub fn spectral(t: f64) -> Rgb<u8> {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let pos = t * (SPECTRAL.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(SPECTRAL.len() - 1);
    let frac = pos - lo as f64;

    let mut out = [0u8; 3];
    for (c, channel) in out.iter_mut().enumerate() {
        let a = SPECTRAL[lo][c] as f64;
        let b = SPECTRAL[hi][c] as f64;
        *channel = (a + (b - a) * frac).round() as u8;
    }
    Rgb(out)
}

/// Color of every cluster id, spread evenly over the colormap the way the
/// distinct labels (noise included) are spread.
pub fn cluster_colors(assignment: &ClusterAssignment) -> Vec<Rgb<u8>> {
    let n_clusters = assignment.n_clusters();
    let n_labels = n_clusters + usize::from(assignment.n_noise() > 0);
    (0..n_clusters)
        .map(|c| {
            if n_labels > 1 {
                spectral(c as f64 / (n_labels - 1) as f64)
            } else {
                spectral(0.0)
            }
        })
        .collect()
}

pub fn render_scatter(
    x: &Matrix,
    assignment: &ClusterAssignment,
    options: &PlotOptions,
) -> Result<RgbImage> {
    if x.nrows() != assignment.n_samples() {
        return Err(Error::invalid(
            "assignment",
            format!("has {} labels for {} samples", assignment.n_samples(), x.nrows()),
        ));
    }
    for (name, feature) in [("plot_x", options.x_feature), ("plot_y", options.y_feature)] {
        if feature >= x.ncols() {
            return Err(Error::invalid(
                name,
                format!("feature {} out of range for {} features", feature, x.ncols()),
            ));
        }
    }
    if options.width as f64 <= 2.0 * MARGIN || options.height as f64 <= 2.0 * MARGIN {
        return Err(Error::invalid(
            "plot size",
            format!("{}x{} leaves no room to draw", options.width, options.height),
        ));
    }

    let xs = x.column(options.x_feature);
    let ys = x.column(options.y_feature);
    let project = Projection::fit(
        xs.iter().copied(),
        ys.iter().copied(),
        options.width,
        options.height,
    );

    let mut img = RgbImage::from_pixel(options.width, options.height, BACKGROUND);
    let colors = cluster_colors(assignment);
    let labels = assignment.labels();

    let draw_order = (0..colors.len() as i32).chain(std::iter::once(NOISE));
    for label in draw_order {
        let fill = if label == NOISE {
            NOISE_COLOR
        } else {
            colors[label as usize]
        };
        let members = assignment.members(label);

        for core_pass in [true, false] {
            let radius = if core_pass { CORE_RADIUS } else { BORDER_RADIUS };
            for &i in members.iter().filter(|&&i| assignment.is_core(i) == core_pass) {
                let (cx, cy) = project.apply(xs[i], ys[i]);
                draw_marker(&mut img, cx, cy, radius, fill);
            }
        }
    }

    log::debug!(
        "rendered {} samples in {} colors ({} labels)",
        labels.len(),
        colors.len(),
        colors.len() + usize::from(assignment.n_noise() > 0)
    );
    Ok(img)
}

pub fn save_scatter<P: AsRef<Path>>(
    path: P,
    x: &Matrix,
    assignment: &ClusterAssignment,
    options: &PlotOptions,
) -> Result<()> {
    let img = render_scatter(x, assignment, options)?;
    img.save(path.as_ref())?;
    log::info!(
        "Wrote scatter plot to {}: estimated number of clusters: {}",
        path.as_ref().display(),
        assignment.n_clusters()
    );
    Ok(())
}

struct Projection {
    x_min: f64,
    x_span: f64,
    y_min: f64,
    y_span: f64,
    width: f64,
    height: f64,
}

impl Projection {
    fn fit<I, J>(xs: I, ys: J, width: u32, height: u32) -> Self
    where
        I: Iterator<Item = f64>,
        J: Iterator<Item = f64>,
    {
        let (x_min, x_max) = bounds(xs);
        let (y_min, y_max) = bounds(ys);

        let span = |lo: f64, hi: f64| if hi > lo { hi - lo } else { 1.0 };
        Self {
            x_min,
            x_span: span(x_min, x_max),
            y_min,
            y_span: span(y_min, y_max),
            width: width as f64,
            height: height as f64,
        }
    }

    fn apply(&self, x: f64, y: f64) -> (i64, i64) {
        let px = MARGIN + (x - self.x_min) / self.x_span * (self.width - 2.0 * MARGIN);
        let py =
            self.height - MARGIN - (y - self.y_min) / self.y_span * (self.height - 2.0 * MARGIN);
        (px.round() as i64, py.round() as i64)
    }
}

fn bounds<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Filled disc with a one pixel black outline.
fn draw_marker(img: &mut RgbImage, cx: i64, cy: i64, radius: i64, fill: Rgb<u8>) {
    let outer = radius + 1;
    for dy in -outer..=outer {
        for dx in -outer..=outer {
            let (px, py) = (cx + dx, cy + dy);
            if px < 0 || py < 0 || px >= img.width() as i64 || py >= img.height() as i64 {
                continue;
            }

            let d2 = dx * dx + dy * dy;
            if d2 <= radius * radius {
                img.put_pixel(px as u32, py as u32, fill);
            } else if d2 <= outer * outer {
                img.put_pixel(px as u32, py as u32, EDGE);
            }
        }
    }
}
