use super::{colors, draw_error, ensure_dir, tick_label, PlotError, Result};
use plotters::{
    chart::{DualCoordChartContext, SeriesAnno, SeriesLabelPosition},
    coord::{types::RangedCoordf64, Shift},
    element::{Drawable, PointCollection},
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};
use std::{borrow::Borrow, path::Path};

/// Y axis a series is drawn against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    Primary,
    Secondary,
}

/// Axis limits policy
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Limits {
    /// data range with a 5% margin
    #[default]
    Auto,
    /// fixed by domain knowledge
    Fixed(f64, f64),
    /// data range extended on both sides by a fraction of the span
    SpanMargin(f64),
    /// data range extended on both sides by a fraction of max(|min|, |max|)
    PeakMargin(f64),
}
impl Limits {
    /// Axis range for data spanning `[min, max]`, never empty
    pub fn resolve(&self, min: f64, max: f64) -> (f64, f64) {
        let (lo, hi) = match *self {
            Limits::Fixed(lo, hi) => (lo, hi),
            Limits::Auto => {
                let margin = 0.05 * (max - min);
                (min - margin, max + margin)
            }
            Limits::SpanMargin(fraction) => {
                let margin = fraction * (max - min);
                (min - margin, max + margin)
            }
            Limits::PeakMargin(fraction) => {
                let margin = fraction * min.abs().max(max.abs());
                (min - margin, max + margin)
            }
        };
        if hi > lo {
            (lo, hi)
        } else {
            let pad = if lo.abs() > 0. { 0.1 * lo.abs() } else { 1. };
            (lo - pad, hi + pad)
        }
    }
}

/// How the samples of a series are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mark {
    #[default]
    Line,
    LineMarkers,
    DashedMarkers,
    Points,
}

/// A sample drawn apart from its series as a non-connected marker
#[derive(Debug, Clone, PartialEq)]
pub struct DetachedSample {
    pub index: usize,
    pub color: RGBColor,
    pub label: String,
}

/// A named sequence of `(x, y)` samples, `y` may be missing
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, Option<f64>)>,
    pub axis: Axis,
    pub color: RGBColor,
    pub mark: Mark,
    pub detached: Option<DetachedSample>,
}
impl Series {
    pub fn new<S: Into<String>>(label: S, x: &[f64], y: &[f64]) -> Self {
        Self::from_points(
            label,
            x.iter().zip(y).map(|(&x, &y)| (x, Some(y))).collect(),
        )
    }
    pub fn sparse<S: Into<String>>(label: S, x: &[f64], y: &[Option<f64>]) -> Self {
        Self::from_points(label, x.iter().copied().zip(y.iter().copied()).collect())
    }
    fn from_points<S: Into<String>>(label: S, points: Vec<(f64, Option<f64>)>) -> Self {
        Self {
            label: label.into(),
            points,
            axis: Axis::Primary,
            color: colors::BLUE,
            mark: Mark::Line,
            detached: None,
        }
    }
    pub fn color(self, color: RGBColor) -> Self {
        Self { color, ..self }
    }
    pub fn secondary(self) -> Self {
        Self {
            axis: Axis::Secondary,
            ..self
        }
    }
    pub fn mark(self, mark: Mark) -> Self {
        Self { mark, ..self }
    }
    pub fn detach(self, detached: DetachedSample) -> Self {
        Self {
            detached: Some(detached),
            ..self
        }
    }
    /// The detached sample, if it exists and is present
    pub fn detached_point(&self) -> Option<(f64, f64)> {
        let detached = self.detached.as_ref()?;
        self.points
            .get(detached.index)
            .and_then(|&(x, y)| y.map(|y| (x, y)))
    }
    /// Runs of consecutive present samples, the detached sample excluded
    ///
    /// The detached sample is skipped rather than splitting the line.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let skip = self.detached.as_ref().map(|d| d.index);
        let mut segments = vec![];
        let mut current = vec![];
        for (k, &(x, y)) in self.points.iter().enumerate() {
            if Some(k) == skip {
                continue;
            }
            match y {
                Some(y) => current.push((x, y)),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => (),
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
    fn y_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().filter_map(|&(_, y)| y)
    }
}

/// Axis description
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    pub label: String,
    pub limits: Limits,
    pub label_color: RGBColor,
    /// number of tick labels
    pub ticks: Option<usize>,
    pub show_tick_labels: bool,
}
impl AxisSpec {
    pub fn new<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
            limits: Limits::Auto,
            label_color: colors::BLACK,
            ticks: None,
            show_tick_labels: true,
        }
    }
    pub fn limits(self, limits: Limits) -> Self {
        Self { limits, ..self }
    }
    pub fn label_color(self, label_color: RGBColor) -> Self {
        Self {
            label_color,
            ..self
        }
    }
    pub fn ticks(self, ticks: usize) -> Self {
        Self {
            ticks: Some(ticks),
            ..self
        }
    }
    /// Ticks every `step` over fixed limits
    pub fn tick_step(self, step: f64) -> Self {
        let ticks = match self.limits {
            Limits::Fixed(lo, hi) if step > 0. => ((hi - lo) / step).round() as usize + 1,
            _ => return self,
        };
        self.ticks(ticks)
    }
    pub fn hide_tick_labels(self) -> Self {
        Self {
            show_tick_labels: false,
            ..self
        }
    }
}

/// Text placed at data coordinates of the primary axes
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub text: String,
    pub at: (f64, f64),
    pub color: RGBColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotesPlacement {
    /// below the chart, centered
    Footer,
    /// boxed in the lower left corner of the plotting area
    InsetLowerLeft,
}

/// Lines of text with computed statistics
#[derive(Debug, Clone, PartialEq)]
pub struct Notes {
    pub lines: Vec<String>,
    pub placement: NotesPlacement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Legend {
    UpperLeft,
    #[default]
    UpperRight,
    LowerLeft,
    LowerRight,
    Hidden,
}
impl Legend {
    fn position(&self) -> Option<SeriesLabelPosition> {
        match self {
            Legend::UpperLeft => Some(SeriesLabelPosition::UpperLeft),
            Legend::UpperRight => Some(SeriesLabelPosition::UpperRight),
            Legend::LowerLeft => Some(SeriesLabelPosition::LowerLeft),
            Legend::LowerRight => Some(SeriesLabelPosition::LowerRight),
            Legend::Hidden => None,
        }
    }
}

/// Description of one chart image
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// title lines
    pub title: Vec<String>,
    /// image size in pixels
    pub size: (u32, u32),
    pub x: AxisSpec,
    pub y: AxisSpec,
    /// secondary Y axis
    pub y2: Option<AxisSpec>,
    pub series: Vec<Series>,
    /// tick labels of a categorical X axis, series abscissas are the category indices
    pub categories: Option<Vec<String>>,
    /// X tick labels rounded to integers
    pub integer_x: bool,
    pub annotations: Vec<Annotation>,
    pub notes: Option<Notes>,
    pub legend: Legend,
    /// horizontal line at y = 0
    pub zero_line: bool,
    pub grid: bool,
}
impl ChartSpec {
    pub fn new<S: Into<String>>(title: S, size: (u32, u32)) -> Self {
        let title: String = title.into();
        Self {
            title: title.lines().map(|l| l.to_string()).collect(),
            size,
            x: AxisSpec::new("Time (s)"),
            y: AxisSpec::new(""),
            y2: None,
            series: vec![],
            categories: None,
            integer_x: false,
            annotations: vec![],
            notes: None,
            legend: Legend::default(),
            zero_line: false,
            grid: true,
        }
    }
    pub fn x_axis(self, x: AxisSpec) -> Self {
        Self { x, ..self }
    }
    pub fn y_axis(self, y: AxisSpec) -> Self {
        Self { y, ..self }
    }
    pub fn secondary_axis(self, y2: AxisSpec) -> Self {
        Self {
            y2: Some(y2),
            ..self
        }
    }
    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }
    pub fn categories(self, categories: Vec<String>) -> Self {
        Self {
            categories: Some(categories),
            ..self
        }
    }
    pub fn integer_x(self) -> Self {
        Self {
            integer_x: true,
            ..self
        }
    }
    pub fn annotate<S: Into<String>>(mut self, text: S, at: (f64, f64), color: RGBColor) -> Self {
        self.annotations.push(Annotation {
            text: text.into(),
            at,
            color,
        });
        self
    }
    pub fn notes(self, lines: Vec<String>, placement: NotesPlacement) -> Self {
        Self {
            notes: Some(Notes { lines, placement }),
            ..self
        }
    }
    pub fn legend(self, legend: Legend) -> Self {
        Self { legend, ..self }
    }
    pub fn zero_line(self) -> Self {
        Self {
            zero_line: true,
            ..self
        }
    }
    pub fn no_grid(self) -> Self {
        Self {
            grid: false,
            ..self
        }
    }
    /// Range of the X axis
    pub fn x_range(&self) -> Option<(f64, f64)> {
        if let Some(categories) = &self.categories {
            return Some((-0.5, categories.len() as f64 - 0.5));
        }
        let (min, max) = min_max(self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0)))?;
        Some(self.x.limits.resolve(min, max))
    }
    /// Range of the primary (`Axis::Primary`) or secondary Y axis
    pub fn y_range(&self, axis: Axis) -> Option<(f64, f64)> {
        let spec = match axis {
            Axis::Primary => &self.y,
            Axis::Secondary => self.y2.as_ref()?,
        };
        if let Limits::Fixed(lo, hi) = spec.limits {
            return Some(spec.limits.resolve(lo, hi));
        }
        let mut values: Vec<f64> = self
            .series
            .iter()
            .filter(|s| s.axis == axis)
            .flat_map(|s| s.y_values())
            .collect();
        if axis == Axis::Primary {
            values.extend(self.annotations.iter().map(|a| a.at.1));
        }
        let (min, max) = min_max(values.into_iter())?;
        Some(spec.limits.resolve(min, max))
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|x| x.is_finite())
        .fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((f64::min(lo, x), f64::max(hi, x))),
        })
}

type Cartesian = Cartesian2d<RangedCoordf64, RangedCoordf64>;
type DualChart<'a, DB> = DualCoordChartContext<'a, DB, Cartesian, Cartesian>;

fn draw_on<'a, 'c, DB, E, R, S>(
    chart: &'c mut DualChart<'a, DB>,
    axis: Axis,
    series: S,
) -> Result<&'c mut SeriesAnno<'a, DB>>
where
    DB: DrawingBackend + 'a,
    for<'b> &'b E: PointCollection<'b, (f64, f64)>,
    E: Drawable<DB>,
    R: Borrow<E>,
    S: IntoIterator<Item = R>,
{
    match axis {
        Axis::Primary => chart.draw_series(series),
        Axis::Secondary => chart.draw_secondary_series(series),
    }
    .map_err(draw_error)
}

fn draw_series<'a, DB: DrawingBackend + 'a>(chart: &mut DualChart<'a, DB>, series: &Series) -> Result<()> {
    let color = series.color;
    let line = color.stroke_width(2);
    let segments = series.segments();
    let markers = || {
        segments
            .iter()
            .flatten()
            .map(move |&p| Circle::new(p, 3, color.filled()))
            .collect::<Vec<_>>()
    };
    let mut labelled = false;
    let mut label = |anno: &mut SeriesAnno<'a, DB>, mark: Mark| {
        if labelled || series.label.is_empty() {
            return;
        }
        labelled = true;
        match mark {
            Mark::Points => anno
                .label(series.label.as_str())
                .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled())),
            _ => anno
                .label(series.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))),
        };
    };
    match series.mark {
        Mark::Line | Mark::LineMarkers => {
            for segment in &segments {
                let anno = draw_on(
                    chart,
                    series.axis,
                    std::iter::once(PathElement::new(segment.clone(), line)),
                )?;
                label(anno, series.mark);
            }
            if series.mark == Mark::LineMarkers {
                draw_on(chart, series.axis, markers())?;
            }
        }
        Mark::DashedMarkers => {
            for segment in &segments {
                let anno = draw_on(
                    chart,
                    series.axis,
                    DashedLineSeries::new(segment.clone(), 8, 6, line),
                )?;
                label(anno, series.mark);
            }
            draw_on(chart, series.axis, markers())?;
        }
        Mark::Points => {
            let anno = draw_on(chart, series.axis, markers())?;
            label(anno, series.mark);
        }
    }
    if let (Some(detached), Some(point)) = (&series.detached, series.detached_point()) {
        let detached_color = detached.color;
        draw_on(
            chart,
            series.axis,
            std::iter::once(Circle::new(point, 7, detached_color.filled())),
        )?
        .label(detached.label.as_str())
        .legend(move |(x, y)| Circle::new((x + 10, y), 5, detached_color.filled()));
    }
    Ok(())
}

fn draw_title<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, lines: &[String]) -> Result<()> {
    let (width, _) = area.dim_in_pixel();
    let style = TextStyle::from(("sans-serif", 18).into_font()).pos(Pos::new(HPos::Center, VPos::Top));
    for (k, line) in lines.iter().enumerate() {
        area.draw(&Text::new(
            line.clone(),
            (width as i32 / 2, 6 + 22 * k as i32),
            style.clone(),
        ))
        .map_err(draw_error)?;
    }
    Ok(())
}

fn draw_footer<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, lines: &[String]) -> Result<()> {
    let (width, _) = area.dim_in_pixel();
    let style = TextStyle::from(("sans-serif", 15).into_font()).pos(Pos::new(HPos::Center, VPos::Top));
    for (k, line) in lines.iter().enumerate() {
        area.draw(&Text::new(
            line.clone(),
            (width as i32 / 2, 4 + 20 * k as i32),
            style.clone(),
        ))
        .map_err(draw_error)?;
    }
    Ok(())
}

fn draw_inset<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plotting: (std::ops::Range<i32>, std::ops::Range<i32>),
    lines: &[String],
) -> Result<()> {
    let (px, py) = plotting;
    let line_height = 15;
    let width = 8 + 7 * lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
    let height = 8 + line_height * lines.len() as i32;
    let (x0, y1) = (px.start + 10, py.end - 10);
    let y0 = y1 - height;
    root.draw(&Rectangle::new(
        [(x0, y0), (x0 + width, y1)],
        colors::WHEAT.mix(0.5).filled(),
    ))
    .map_err(draw_error)?;
    root.draw(&Rectangle::new([(x0, y0), (x0 + width, y1)], colors::GRAY.stroke_width(1)))
        .map_err(draw_error)?;
    for (k, line) in lines.iter().enumerate() {
        root.draw(&Text::new(
            line.clone(),
            (x0 + 4, y0 + 4 + line_height * k as i32),
            ("sans-serif", 12).into_font(),
        ))
        .map_err(draw_error)?;
    }
    Ok(())
}

/// Draws `spec` into the PNG file at `path`, creating its folder
pub fn render<P: AsRef<Path>>(spec: &ChartSpec, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        ensure_dir(dir)?;
    }
    let title = spec.title.join(" ");
    let (x0, x1) = spec.x_range().ok_or_else(|| PlotError::NoData(title.clone()))?;
    let (y0, y1) = spec
        .y_range(Axis::Primary)
        .ok_or_else(|| PlotError::NoData(title.clone()))?;
    let (s0, s1) = spec.y_range(Axis::Secondary).unwrap_or((y0, y1));

    let root = BitMapBackend::new(path, spec.size).into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;

    let title_height = if spec.title.is_empty() {
        0
    } else {
        12 + 22 * spec.title.len() as u32
    };
    let footer_height = match &spec.notes {
        Some(Notes {
            lines,
            placement: NotesPlacement::Footer,
        }) => 12 + 20 * lines.len() as u32,
        _ => 0,
    };
    let (title_area, rest) = root.split_vertically(title_height);
    let (plot_area, footer_area) =
        rest.split_vertically(spec.size.1.saturating_sub(title_height + footer_height));
    draw_title(&title_area, &spec.title)?;

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .right_y_label_area_size(if spec.y2.is_some() { 70 } else { 10 })
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(draw_error)?
        .set_secondary_coord(x0..x1, s0..s1);

    let x_formatter = |x: &f64| -> String {
        if !spec.x.show_tick_labels {
            return String::new();
        }
        if let Some(categories) = &spec.categories {
            let i = x.round();
            return if (x - i).abs() < 1e-6 && i >= 0. && (i as usize) < categories.len() {
                categories[i as usize].clone()
            } else {
                String::new()
            };
        }
        if spec.integer_x {
            format!("{}", x.round() as i64)
        } else {
            tick_label(*x)
        }
    };
    let y_formatter = |y: &f64| tick_label(*y);
    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(spec.x.label.as_str())
            .y_desc(spec.y.label.as_str())
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .y_label_style(("sans-serif", 12).into_font().color(&spec.y.label_color))
            .axis_desc_style(("sans-serif", 15))
            .light_line_style(WHITE);
        if let Some(n) = spec.categories.as_ref().map(|c| c.len()).or(spec.x.ticks) {
            mesh.x_labels(n);
        }
        if let Some(n) = spec.y.ticks {
            mesh.y_labels(n);
        }
        if !spec.grid {
            mesh.disable_mesh();
        }
        mesh.draw().map_err(draw_error)?;
    }
    if let Some(y2) = &spec.y2 {
        let mut axes = chart.configure_secondary_axes();
        axes.y_desc(y2.label.as_str())
            .y_label_formatter(&y_formatter)
            .label_style(("sans-serif", 12).into_font().color(&y2.label_color))
            .axis_desc_style(("sans-serif", 15));
        if let Some(n) = y2.ticks {
            axes.y_labels(n);
        }
        axes.draw().map_err(draw_error)?;
    }

    if spec.zero_line {
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x0, 0.), (x1, 0.)],
                BLACK.stroke_width(1),
            )))
            .map_err(draw_error)?;
    }
    for series in &spec.series {
        draw_series(&mut chart, series)?;
    }
    for annotation in &spec.annotations {
        chart
            .draw_series(std::iter::once(Text::new(
                annotation.text.clone(),
                annotation.at,
                ("sans-serif", 14).into_font().color(&annotation.color),
            )))
            .map_err(draw_error)?;
    }
    let labelled = spec.series.iter().any(|s| !s.label.is_empty());
    if let (true, Some(position)) = (labelled, spec.legend.position()) {
        chart
            .configure_series_labels()
            .position(position)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_error)?;
    }
    match &spec.notes {
        Some(Notes {
            lines,
            placement: NotesPlacement::Footer,
        }) => draw_footer(&footer_area, lines)?,
        Some(Notes {
            lines,
            placement: NotesPlacement::InsetLowerLeft,
        }) => draw_inset(&root, chart.plotting_area().get_pixel_range(), lines)?,
        None => (),
    }
    root.present().map_err(draw_error)?;
    log::info!("Saved {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits() {
        assert_eq!(Limits::Fixed(0., 240.).resolve(5., 10.), (0., 240.));
        let (lo, hi) = Limits::SpanMargin(0.1).resolve(10., 20.);
        assert!((lo - 9.).abs() < 1e-12 && (hi - 21.).abs() < 1e-12);
        let (lo, hi) = Limits::PeakMargin(0.9).resolve(-100., 50.);
        assert!((lo + 190.).abs() < 1e-12 && (hi - 140.).abs() < 1e-12);
        let (lo, hi) = Limits::Auto.resolve(0., 0.);
        assert!(lo < 0. && hi > 0.);
    }

    #[test]
    fn single_value_fixed_range() {
        let (lo, hi) = Limits::Fixed(0.1, 0.1).resolve(0.1, 0.1);
        assert!(lo < 0.1 && hi > 0.1);
        let spec = ChartSpec::new("Comparison", (800, 400))
            .x_axis(AxisSpec::new("Power (kW)").limits(Limits::Fixed(0.1, 0.1)))
            .y_axis(AxisSpec::new("Efficiency (%)").limits(Limits::Fixed(50., 50.)))
            .series(Series::new("A", &[0.1], &[50.]));
        let (x0, x1) = spec.x_range().unwrap();
        assert!(x1 > x0);
        let (y0, y1) = spec.y_range(Axis::Primary).unwrap();
        assert!(y0 < 50. && y1 > 50.);
    }

    #[test]
    fn render_creates_the_folder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Run1").join("chart_1.png");
        let spec = ChartSpec::new("Graph", (400, 300)).series(Series::new("U", &[0., 1.], &[1., 2.]));
        render(&spec, &path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn tick_step() {
        let axis = AxisSpec::new("Voltage (V)")
            .limits(Limits::Fixed(0., 240.))
            .tick_step(60.);
        assert_eq!(axis.ticks, Some(5));
        assert_eq!(AxisSpec::new("").tick_step(60.).ticks, None);
    }

    #[test]
    fn segments_skip_missing_and_detached() {
        let x = [0., 1., 2., 3., 4., 5.];
        let y = [Some(1.), None, Some(2.), Some(3.), Some(9.), Some(4.)];
        let series = Series::sparse("G", &x, &y).detach(DetachedSample {
            index: 4,
            color: colors::RED,
            label: "G row 4".into(),
        });
        assert_eq!(
            series.segments(),
            vec![vec![(0., 1.)], vec![(2., 2.), (3., 3.), (5., 4.)]]
        );
        assert_eq!(series.detached_point(), Some((4., 9.)));
    }

    #[test]
    fn detached_missing_sample() {
        let series = Series::sparse("H", &[0., 1.], &[Some(1.), None]).detach(DetachedSample {
            index: 1,
            color: colors::RED,
            label: "H row 4".into(),
        });
        assert_eq!(series.detached_point(), None);
    }

    #[test]
    fn ranges_per_axis() {
        let t = [0., 10.];
        let spec = ChartSpec::new("Graph", (800, 400))
            .y_axis(AxisSpec::new("Voltage").limits(Limits::Fixed(0., 240.)))
            .secondary_axis(AxisSpec::new("Current").limits(Limits::SpanMargin(0.1)))
            .series(Series::new("U", &t, &[230., 231.]))
            .series(Series::new("I", &t, &[10., 20.]).secondary());
        assert_eq!(spec.y_range(Axis::Primary), Some((0., 240.)));
        assert_eq!(spec.y_range(Axis::Secondary), Some((9., 21.)));
        let (x0, x1) = spec.x_range().unwrap();
        assert!(x0 < 0. && x1 > 10.);
        assert_eq!(spec.title, vec!["Graph"]);
    }

    #[test]
    fn categorical_range() {
        let spec = ChartSpec::new("Efficiency Curve", (800, 400))
            .categories(vec!["100W".into(), "500W".into(), "1000W".into()]);
        assert_eq!(spec.x_range(), Some((-0.5, 2.5)));
    }

    #[test]
    fn empty_chart_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let spec = ChartSpec::new("Nothing", (400, 300));
        assert!(matches!(
            render(&spec, dir.path().join("nothing.png")),
            Err(PlotError::NoData(_))
        ));
    }
}
