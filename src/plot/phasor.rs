//! Voltage and current vector diagram

use super::{colors, draw_error, ensure_dir, Result};
use crate::phasor::PhasorSummary;
use plotters::{
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};
use std::{f64::consts::PI, path::Path};

const N_CIRCLES: usize = 8;
const N_SPOKES: usize = 8;

pub const VOLTAGE_COLOR: RGBColor = colors::GREEN;
pub const CURRENT_COLOR: RGBColor = colors::BLUE;

/// Points of the diagram in data coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct PhasorGeometry {
    /// largest vector magnitude
    pub radius: f64,
    /// voltage reference tip, on the 0° axis
    pub voltage: (f64, f64),
    /// current tip, at θ from the voltage
    pub current: (f64, f64),
    /// radii of the grid circles, up to 1.2 `radius`
    pub circles: Vec<f64>,
    /// directions of the radial grid lines [rad], `radius` long
    pub spokes: Vec<f64>,
    /// radius of the angle arc
    pub arc_radius: f64,
    /// θ [rad]
    pub angle: f64,
}
impl PhasorGeometry {
    pub fn new(summary: &PhasorSummary) -> Self {
        let pf = &summary.power_factor;
        let radius = pf.active.max(pf.apparent);
        let angle = pf.angle_rad();
        let outer = 1.2 * radius;
        Self {
            radius,
            voltage: (pf.active, 0.),
            current: (pf.apparent * angle.cos(), pf.apparent * angle.sin()),
            circles: (0..N_CIRCLES)
                .map(|k| outer * k as f64 / (N_CIRCLES - 1) as f64)
                .collect(),
            spokes: (0..N_SPOKES)
                .map(|k| 2. * PI * k as f64 / N_SPOKES as f64)
                .collect(),
            arc_radius: 0.5 * radius,
            angle,
        }
    }
    /// Segments of the radial grid lines, from the origin to the boundary circle
    pub fn spoke_segments(&self) -> Vec<[(f64, f64); 2]> {
        self.spokes
            .iter()
            .map(|&a| [(0., 0.), (self.radius * a.cos(), self.radius * a.sin())])
            .collect()
    }
    /// Half width of the square view
    pub fn extent(&self) -> f64 {
        1.5 * self.radius
    }
    /// Polyline of a circle of radius `r`
    pub fn circle(r: f64) -> Vec<(f64, f64)> {
        (0..=120)
            .map(|k| 2. * PI * k as f64 / 120.)
            .map(|a| (r * a.cos(), r * a.sin()))
            .collect()
    }
    /// Polyline of the θ arc, from the voltage to the current
    pub fn arc(&self) -> Vec<(f64, f64)> {
        (0..=60)
            .map(|k| self.angle * k as f64 / 60.)
            .map(|a| (self.arc_radius * a.cos(), self.arc_radius * a.sin()))
            .collect()
    }
}

fn arrow(tip: (f64, f64), head: f64) -> Vec<Vec<(f64, f64)>> {
    let direction = tip.1.atan2(tip.0);
    let barb = |side: f64| {
        let a = direction + PI - side * PI / 8.;
        (tip.0 + head * a.cos(), tip.1 + head * a.sin())
    };
    vec![vec![(0., 0.), tip], vec![barb(1.), tip, barb(-1.)]]
}

/// Draws the vector diagram of `summary` into the PNG file at `path`, creating its folder
pub fn render_phasor<P: AsRef<Path>>(summary: &PhasorSummary, title: &str, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        ensure_dir(dir)?;
    }
    let geometry = PhasorGeometry::new(summary);
    let r = geometry.radius;
    if !(r > 0.) {
        return Err(super::PlotError::NoData(title.to_string()));
    }
    let extent = geometry.extent();

    let root = BitMapBackend::new(path, (800, 860)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;
    let (title_area, plot_area) = root.split_vertically(60);
    title_area
        .draw(&Text::new(
            format!("{}: Voltage & Current - Angle: {:.2}°", title, summary.angle_deg()),
            (400, 20),
            TextStyle::from(("sans-serif", 20).into_font()).pos(Pos::new(HPos::Center, VPos::Top)),
        ))
        .map_err(draw_error)?;

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(20)
        .build_cartesian_2d(-extent..extent, -extent..extent)
        .map_err(draw_error)?;

    let grid = colors::GRAY.mix(0.4).stroke_width(1);
    chart
        .draw_series(
            geometry
                .circles
                .iter()
                .skip(1)
                .map(|&radius| PathElement::new(PhasorGeometry::circle(radius), grid)),
        )
        .map_err(draw_error)?;
    chart
        .draw_series(
            geometry
                .spoke_segments()
                .into_iter()
                .map(|segment| PathElement::new(segment.to_vec(), grid)),
        )
        .map_err(draw_error)?;
    chart
        .draw_series(std::iter::once(PathElement::new(
            PhasorGeometry::circle(r),
            BLACK.stroke_width(1),
        )))
        .map_err(draw_error)?;

    let head = 0.06 * r;
    chart
        .draw_series(
            arrow(geometry.voltage, head)
                .into_iter()
                .map(|line| PathElement::new(line, VOLTAGE_COLOR.stroke_width(3))),
        )
        .map_err(draw_error)?
        .label("Voltage")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], VOLTAGE_COLOR.stroke_width(3)));
    chart
        .draw_series(
            arrow(geometry.current, head)
                .into_iter()
                .map(|line| PathElement::new(line, CURRENT_COLOR.stroke_width(3))),
        )
        .map_err(draw_error)?
        .label("Current")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CURRENT_COLOR.stroke_width(3)));
    chart
        .draw_series(DashedLineSeries::new(
            geometry.arc(),
            6,
            4,
            colors::RED.stroke_width(2),
        ))
        .map_err(draw_error)?
        .label("θ")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], colors::RED.stroke_width(2)));

    let text = |text: String, at: (f64, f64), color: RGBColor, size: u32| {
        Text::new(text, at, ("sans-serif", size).into_font().color(&color))
    };
    let pf = summary.power_factor.cos_theta;
    chart
        .draw_series([
            text(format!("FP = {:.4}", pf), (1.3 * r, 1.4 * r), colors::PURPLE, 16),
            text(
                format!("THD = {:.2}%", summary.thd),
                (1.3 * r, 1.3 * r),
                colors::ORANGE,
                16,
            ),
            text(
                format!("{:.2}°", summary.angle_deg()),
                (0.25 * r, 0.25 * r),
                colors::RED,
                14,
            ),
            text("90°".into(), (0.02 * r, 1.25 * r), colors::BLACK, 14),
            text("180°".into(), (-1.4 * r, 0.03 * r), colors::BLACK, 14),
            text("270°".into(), (0.02 * r, -1.22 * r), colors::BLACK, 14),
            text("Real axis".into(), (1.05 * r, -0.08 * r), colors::BLACK, 14),
            text("Imaginary axis".into(), (-0.25 * r, 1.42 * r), colors::BLACK, 14),
        ])
        .map_err(draw_error)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(draw_error)?;
    root.present().map_err(draw_error)?;
    log::info!("Saved {:?}", path);
    Ok(())
}
