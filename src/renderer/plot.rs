use crate::renderer::color::{Rgb, series_color};
use crate::renderer::raster::{RenderError, Rasterizer};
use crate::renderer::scene::Scene;
use crate::renderer::text::{self, Anchor, Label};
use ab_glyph::FontRef;
use glam::{DVec2, Vec2};
use image::RgbaImage;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_PATH: &str = "electron_trajectories.png";
pub const FIGURE_TITLE: &str = "Electron Trajectories in Magnetic Fields";

const POINTS_PER_INCH: f32 = 72.0;
const SERIES_LINE_PT: f32 = 2.0;
const FRAME_LINE_PT: f32 = 0.8;
const GRID_LINE_PT: f32 = 0.8;
const TICK_LENGTH_PT: f32 = 3.5;
const DASH_PT: f32 = 2.96;
const DASH_GAP_PT: f32 = 1.28;
const LEGEND_SWATCH_PT: f32 = 20.0;
const LEGEND_ROW_PT: f32 = 14.0;
const MAX_GRID_LINES: usize = 100;

const TITLE_PT: f32 = 16.0;
const PANEL_TITLE_PT: f32 = 12.0;
const AXIS_LABEL_PT: f32 = 10.0;
const TICK_LABEL_PT: f32 = 9.0;
const LEGEND_TEXT_PT: f32 = 9.0;
const TEXT_PAD_PT: f32 = 3.0;

// margins around each panel's plotting area
const TITLE_BAND_PT: f32 = 32.0;
const TITLE_TOP_PT: f32 = 8.0;
const PANEL_TOP_PT: f32 = 24.0;
const PANEL_BOTTOM_PT: f32 = 44.0;
const PANEL_LEFT_PT: f32 = 56.0;
const LEGEND_GAP_PT: f32 = 8.0;

/// Receives finished trajectories from the sweep.
pub trait VisualizationSink {
    fn style_panel(&mut self, panel: usize, style: PanelStyle);

    /// `points` are (x, y) in centimetres, in drawing order. `color: None`
    /// lets the sink pick one.
    fn add_series(&mut self, panel: usize, points: &[DVec2], label: &str, color: Option<Rgb>);
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridStyle {
    pub dashed: bool,
    pub alpha: f32,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            dashed: true,
            alpha: 0.6,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanelStyle {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub grid: GridStyle,
    pub equal_aspect: bool,
    /// Major tick spacing in data units (cm).
    pub tick_spacing: f64,
}

impl PanelStyle {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_label: "x position (cm)".to_owned(),
            y_label: "y position (cm)".to_owned(),
            grid: GridStyle::default(),
            equal_aspect: true,
            tick_spacing: 5.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<DVec2>,
    pub color: Rgb,
}

#[derive(Clone, Debug, Default)]
pub struct Panel {
    pub style: PanelStyle,
    series: Vec<Series>,
}

impl Panel {
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Smallest box holding every finite point, if there are any.
    pub fn data_bounds(&self) -> Option<(DVec2, DVec2)> {
        self.series
            .iter()
            .flat_map(|series| series.points.iter())
            .filter(|point| point.is_finite())
            .fold(None, |bounds, &point| match bounds {
                None => Some((point, point)),
                Some((min, max)) => Some((min.min(point), max.max(point))),
            })
    }

    /// Map from data space onto the pixel rectangle `rect_min..rect_max`.
    pub fn viewport(&self, rect_min: Vec2, rect_max: Vec2) -> Viewport {
        let tick = self.style.tick_spacing.max(f64::EPSILON);
        let (mut min, mut max) = self
            .data_bounds()
            .unwrap_or((DVec2::splat(-tick), DVec2::splat(tick)));

        // 5% margin, and never a zero-width range
        let pad = ((max - min) * 0.05).max(DVec2::splat(tick * 0.1));
        min -= pad;
        max += pad;

        let span = max - min;
        let rect_size = (rect_max - rect_min).as_dvec2();
        let mut scale = rect_size / span;

        if self.style.equal_aspect {
            let uniform = scale.min_element();
            scale = DVec2::splat(uniform);
            // center the data inside the wider dimension
            let visible = rect_size / scale;
            let center = (min + max) / 2.0;
            min = center - visible / 2.0;
            max = center + visible / 2.0;
        }

        Viewport {
            rect_min,
            rect_max,
            view_min: min,
            view_max: max,
            scale,
        }
    }
}

/// Data-to-pixel transform for one panel. Pixel y grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub rect_min: Vec2,
    pub rect_max: Vec2,
    pub view_min: DVec2,
    pub view_max: DVec2,
    /// Pixels per data unit along x and y.
    pub scale: DVec2,
}

impl Viewport {
    pub fn to_pixel(&self, point: DVec2) -> Vec2 {
        let offset = (point - self.view_min) * self.scale;
        Vec2::new(
            self.rect_min.x + offset.x as f32,
            self.rect_max.y - offset.y as f32,
        )
    }

    /// Multiples of `spacing` inside `[lo, hi]`, widened until there are at most
    /// `MAX_GRID_LINES` of them. Empty for a non-positive or non-finite spacing.
    fn ticks(lo: f64, hi: f64, spacing: f64) -> Vec<f64> {
        if !(spacing > 0.0 && spacing.is_finite() && lo.is_finite() && hi.is_finite()) {
            return Vec::new();
        }
        let mut spacing = spacing;
        while ((hi - lo) / spacing) as usize > MAX_GRID_LINES {
            spacing *= 2.0;
        }
        let first = (lo / spacing).ceil() as i64;
        let last = (hi / spacing).floor() as i64;
        (first..=last).map(|k| k as f64 * spacing).collect()
    }

    pub fn x_ticks(&self, spacing: f64) -> Vec<f64> {
        Self::ticks(self.view_min.x, self.view_max.x, spacing)
    }

    pub fn y_ticks(&self, spacing: f64) -> Vec<f64> {
        Self::ticks(self.view_min.y, self.view_max.y, spacing)
    }
}

/// Physical figure size and output location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FigureConfig {
    pub width_in: f32,
    pub height_in: f32,
    pub dpi: u32,
    pub output_path: PathBuf,
}

impl FigureConfig {
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f32;
        (
            (self.width_in * dpi).round() as u32,
            (self.height_in * dpi).round() as u32,
        )
    }

    fn points_to_pixels(&self, points: f32) -> f32 {
        points * self.dpi as f32 / POINTS_PER_INCH
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width_in: 14.0,
            height_in: 12.0,
            dpi: 300,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

/// Geometry and text for one figure, in pixel space.
///
/// The scene goes through a [`Rasterizer`]; the labels are drawn on top of the
/// resulting image.
#[derive(Clone, Debug)]
pub struct Layout {
    pub scene: Scene,
    pub labels: Vec<Label>,
}

/// A grid of panels that collects series and lays them out for rendering.
#[derive(Clone, Debug)]
pub struct Figure {
    pub title: String,
    pub config: FigureConfig,
    rows: usize,
    cols: usize,
    panels: Vec<Panel>,
}

impl Figure {
    pub fn grid(rows: usize, cols: usize, title: impl Into<String>, config: FigureConfig) -> Self {
        Self {
            title: title.into(),
            config,
            rows,
            cols,
            panels: vec![Panel::default(); rows * cols],
        }
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub fn series_count(&self) -> usize {
        self.panels.iter().map(|panel| panel.series.len()).sum()
    }

    fn panel_mut(&mut self, index: usize) -> Option<&mut Panel> {
        let panel = self.panels.get_mut(index);
        if panel.is_none() {
            warn!(
                "figure has {} panels; ignoring panel index {}",
                self.rows * self.cols,
                index
            );
        }
        panel
    }

    fn px(&self, points: f32) -> f32 {
        self.config.points_to_pixels(points)
    }

    /// Width of a panel's legend box, sized to its longest label.
    fn legend_width(&self, panel: &Panel, font: &FontRef<'_>) -> f32 {
        if panel.series.is_empty() {
            return 0.0;
        }
        let widest = panel
            .series
            .iter()
            .map(|series| {
                Label::new(&series.label, Vec2::ZERO, self.px(LEGEND_TEXT_PT), Anchor::MiddleLeft)
                    .measure(font)
                    .x
            })
            .fold(0.0, f32::max);
        let pad = self.px(LEGEND_ROW_PT) * 0.5;
        3.0 * pad + self.px(LEGEND_SWATCH_PT) + widest
    }

    /// Pixel rectangle of a panel's plotting area, leaving room for its
    /// title, tick values, axis labels and a legend of `legend_width`.
    fn plot_rect(&self, index: usize, width: f32, height: f32, legend_width: f32) -> (Vec2, Vec2) {
        let title_band = self.px(TITLE_BAND_PT);
        let cell = Vec2::new(
            width / self.cols as f32,
            (height - title_band) / self.rows as f32,
        );
        let origin = Vec2::new(
            (index % self.cols) as f32 * cell.x,
            title_band + (index / self.cols) as f32 * cell.y,
        );

        let min = origin + Vec2::new(self.px(PANEL_LEFT_PT), self.px(PANEL_TOP_PT));
        let right = legend_width + 2.0 * self.px(LEGEND_GAP_PT);
        let max = origin + cell - Vec2::new(right, self.px(PANEL_BOTTOM_PT));
        (min, max.max(min + Vec2::ONE))
    }

    pub fn layout(&self) -> Result<Layout, RenderError> {
        let (width, height) = self.config.pixel_size();
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSize { width, height });
        }
        if self.series_count() == 0 {
            return Err(RenderError::EmptyFigure);
        }
        for (panel, spacing) in self.panels.iter().map(|p| p.style.tick_spacing).enumerate() {
            if !(spacing > 0.0 && spacing.is_finite()) {
                return Err(RenderError::InvalidTickSpacing { panel, spacing });
            }
        }

        let font = text::font()?;
        let mut layout = Layout {
            scene: Scene::new(width, height, Rgb::WHITE),
            labels: vec![Label::new(
                &self.title,
                Vec2::new(width as f32 / 2.0, self.px(TITLE_TOP_PT)),
                self.px(TITLE_PT),
                Anchor::TopCenter,
            )],
        };
        for (index, panel) in self.panels.iter().enumerate() {
            let legend_width = self.legend_width(panel, &font);
            let (rect_min, rect_max) =
                self.plot_rect(index, width as f32, height as f32, legend_width);
            self.layout_panel(&mut layout, &font, panel, rect_min, rect_max);
        }

        debug!(
            "laid out {}x{} figure: {} triangles, {} labels",
            width,
            height,
            layout.scene.triangle_count(),
            layout.labels.len()
        );
        Ok(layout)
    }

    fn layout_panel(
        &self,
        layout: &mut Layout,
        font: &FontRef<'_>,
        panel: &Panel,
        rect_min: Vec2,
        rect_max: Vec2,
    ) {
        let Layout { scene, labels } = layout;
        let px = |pt: f32| self.px(pt);
        let viewport = panel.viewport(rect_min, rect_max);
        let style = &panel.style;

        let grid_color = Rgb::GRID_GREY.over(scene.background, style.grid.alpha);
        let (dash, gap) = if style.grid.dashed {
            (px(DASH_PT), px(DASH_GAP_PT))
        } else {
            (f32::MAX, 0.0)
        };
        let tick_length = px(TICK_LENGTH_PT);
        let text_pad = px(TEXT_PAD_PT);
        let tick_size = px(TICK_LABEL_PT);

        let mut tick_height: f32 = 0.0;
        for x in viewport.x_ticks(style.tick_spacing) {
            let top = viewport.to_pixel(DVec2::new(x, viewport.view_max.y));
            let bottom = viewport.to_pixel(DVec2::new(x, viewport.view_min.y));
            scene.dashed_segment(top, bottom, px(GRID_LINE_PT), dash, gap, grid_color);
            scene.segment(
                bottom,
                bottom + Vec2::new(0.0, tick_length),
                px(FRAME_LINE_PT),
                Rgb::BLACK,
            );

            let value = Label::new(
                tick_text(x),
                bottom + Vec2::new(0.0, tick_length + text_pad),
                tick_size,
                Anchor::TopCenter,
            );
            tick_height = tick_height.max(value.measure(font).y);
            labels.push(value);
        }

        let mut tick_width: f32 = 0.0;
        for y in viewport.y_ticks(style.tick_spacing) {
            let left = viewport.to_pixel(DVec2::new(viewport.view_min.x, y));
            let right = viewport.to_pixel(DVec2::new(viewport.view_max.x, y));
            scene.dashed_segment(left, right, px(GRID_LINE_PT), dash, gap, grid_color);
            scene.segment(
                left,
                left - Vec2::new(tick_length, 0.0),
                px(FRAME_LINE_PT),
                Rgb::BLACK,
            );

            let value = Label::new(
                tick_text(y),
                left - Vec2::new(tick_length + text_pad, 0.0),
                tick_size,
                Anchor::MiddleRight,
            );
            tick_width = tick_width.max(value.measure(font).x);
            labels.push(value);
        }

        for series in &panel.series {
            let points: Vec<Vec2> = series.points.iter().map(|p| viewport.to_pixel(*p)).collect();
            scene.polyline(&points, px(SERIES_LINE_PT), series.color);
        }

        scene.stroke_rect(rect_min, rect_max, px(FRAME_LINE_PT), Rgb::BLACK);

        let center = (rect_min + rect_max) / 2.0;
        labels.push(Label::new(
            &style.title,
            Vec2::new(center.x, rect_min.y - 2.0 * text_pad),
            px(PANEL_TITLE_PT),
            Anchor::BottomCenter,
        ));
        labels.push(Label::new(
            &style.x_label,
            Vec2::new(center.x, rect_max.y + tick_length + tick_height + 3.0 * text_pad),
            px(AXIS_LABEL_PT),
            Anchor::TopCenter,
        ));
        labels.push(
            Label::new(
                &style.y_label,
                Vec2::new(rect_min.x - tick_length - tick_width - 3.0 * text_pad, center.y),
                px(AXIS_LABEL_PT),
                Anchor::MiddleRight,
            )
            .rotated(),
        );

        // legend outside the upper right corner
        if !panel.series.is_empty() {
            let row = px(LEGEND_ROW_PT);
            let pad = row * 0.5;
            let legend_min = Vec2::new(rect_max.x + px(LEGEND_GAP_PT), rect_min.y);
            let legend_max = legend_min
                + Vec2::new(
                    self.legend_width(panel, font),
                    row * panel.series.len() as f32 + row,
                );
            scene.fill_rect(legend_min, legend_max, scene.background);
            for (i, series) in panel.series.iter().enumerate() {
                let y = legend_min.y + row * (i as f32 + 1.0);
                let start = Vec2::new(legend_min.x + pad, y);
                let end = start + Vec2::new(px(LEGEND_SWATCH_PT), 0.0);
                scene.segment(start, end, px(SERIES_LINE_PT), series.color);
                labels.push(Label::new(
                    &series.label,
                    end + Vec2::new(pad, 0.0),
                    px(LEGEND_TEXT_PT),
                    Anchor::MiddleLeft,
                ));
            }
            scene.stroke_rect(legend_min, legend_max, px(FRAME_LINE_PT), Rgb::GRID_GREY);
        }
    }

    pub fn render<R: Rasterizer + ?Sized>(&self, rasterizer: &mut R) -> Result<RgbaImage, RenderError> {
        let Layout { scene, labels } = self.layout()?;
        info!(
            "rendering \"{}\": {} series in {} panels",
            self.title,
            self.series_count(),
            self.panels.len()
        );
        let mut image = rasterizer.rasterize(&scene)?;
        text::draw_labels(&mut image, &labels)?;
        Ok(image)
    }

    /// Render and write a PNG to `config.output_path`. Returns the path written.
    pub fn save<R: Rasterizer + ?Sized>(&self, rasterizer: &mut R) -> Result<&Path, RenderError> {
        let image = self.render(rasterizer)?;
        image.save(&self.config.output_path)?;
        Ok(&self.config.output_path)
    }
}

/// Tick value as printed on the axis: no float noise, no negative zero.
fn tick_text(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6 + 0.0;
    format!("{rounded}")
}

impl VisualizationSink for Figure {
    fn style_panel(&mut self, panel: usize, style: PanelStyle) {
        if let Some(panel) = self.panel_mut(panel) {
            panel.style = style;
        }
    }

    fn add_series(&mut self, panel: usize, points: &[DVec2], label: &str, color: Option<Rgb>) {
        if let Some(panel) = self.panel_mut(panel) {
            let color = color.unwrap_or_else(|| series_color(panel.series.len()));
            panel.series.push(Series {
                label: label.to_owned(),
                points: points.to_vec(),
                color,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::raster::CpuRasterizer;
    use approx::assert_relative_eq;

    fn small_config() -> FigureConfig {
        FigureConfig {
            width_in: 4.0,
            height_in: 3.0,
            dpi: 50,
            output_path: PathBuf::from("unused.png"),
        }
    }

    fn circle(radius: f64, center: DVec2, n: usize) -> Vec<DVec2> {
        (0..=n)
            .map(|i| {
                let angle = std::f64::consts::TAU * i as f64 / n as f64;
                center + DVec2::new(angle.cos(), angle.sin()) * radius
            })
            .collect()
    }

    #[test]
    fn default_figure_is_14_by_12_inches_at_300_dpi() {
        assert_eq!(FigureConfig::default().pixel_size(), (4200, 3600));
    }

    #[test]
    fn sink_assigns_palette_colors_when_unhinted() {
        let mut figure = Figure::grid(2, 2, FIGURE_TITLE, small_config());
        figure.add_series(0, &[DVec2::ZERO], "a", None);
        figure.add_series(0, &[DVec2::ONE], "b", None);
        figure.add_series(1, &[DVec2::ONE], "c", Some(Rgb::RED));

        let first = figure.panel(0).unwrap().series();
        assert_eq!(first[0].color, series_color(0));
        assert_eq!(first[1].color, series_color(1));
        assert_eq!(figure.panel(1).unwrap().series()[0].color, Rgb::RED);
    }

    #[test]
    fn out_of_range_panel_is_ignored() {
        let mut figure = Figure::grid(2, 2, FIGURE_TITLE, small_config());
        figure.add_series(7, &[DVec2::ZERO], "lost", None);
        assert_eq!(figure.series_count(), 0);
    }

    #[test]
    fn data_bounds_skip_non_finite_points() {
        let mut figure = Figure::grid(1, 1, "", small_config());
        figure.add_series(
            0,
            &[DVec2::new(-1.0, 2.0), DVec2::new(f64::NAN, 0.0), DVec2::new(3.0, -4.0)],
            "s",
            None,
        );
        let (min, max) = figure.panel(0).unwrap().data_bounds().unwrap();
        assert_eq!(min, DVec2::new(-1.0, -4.0));
        assert_eq!(max, DVec2::new(3.0, 2.0));
    }

    #[test]
    fn equal_aspect_viewport_keeps_circles_round() {
        let mut figure = Figure::grid(1, 1, "", small_config());
        figure.add_series(0, &circle(1.5, DVec2::new(0.0, 1.5), 64), "orbit", None);

        let rect_min = Vec2::new(10.0, 10.0);
        let rect_max = Vec2::new(210.0, 110.0);
        let viewport = figure.panel(0).unwrap().viewport(rect_min, rect_max);
        assert_relative_eq!(viewport.scale.x, viewport.scale.y);

        for point in circle(1.5, DVec2::new(0.0, 1.5), 64) {
            let pixel = viewport.to_pixel(point);
            assert!(pixel.x >= rect_min.x && pixel.x <= rect_max.x);
            assert!(pixel.y >= rect_min.y && pixel.y <= rect_max.y);
        }

        // data y up, pixel y down
        let low = viewport.to_pixel(DVec2::new(0.0, 0.0));
        let high = viewport.to_pixel(DVec2::new(0.0, 3.0));
        assert!(high.y < low.y);
    }

    #[test]
    fn ticks_fall_on_multiples_of_the_spacing() {
        let mut figure = Figure::grid(1, 1, "", small_config());
        figure.add_series(0, &[DVec2::new(-12.0, -3.0), DVec2::new(12.0, 3.0)], "s", None);
        let viewport = figure
            .panel(0)
            .unwrap()
            .viewport(Vec2::ZERO, Vec2::new(400.0, 400.0));

        let ticks = viewport.x_ticks(5.0);
        assert!(ticks.contains(&-10.0) && ticks.contains(&0.0) && ticks.contains(&10.0));
        assert!(ticks.iter().all(|t| (t / 5.0).fract() == 0.0));
    }

    #[test]
    fn huge_ranges_thin_out_the_grid() {
        let ticks = Viewport::ticks(-2000.0, 2000.0, 5.0);
        assert!(ticks.len() <= MAX_GRID_LINES + 1);
    }

    #[test]
    fn empty_figure_refuses_to_lay_out() {
        let figure = Figure::grid(2, 2, FIGURE_TITLE, small_config());
        assert!(matches!(figure.layout(), Err(RenderError::EmptyFigure)));
    }

    #[test]
    fn layout_produces_geometry_for_every_series() {
        let mut figure = Figure::grid(2, 2, FIGURE_TITLE, small_config());
        figure.style_panel(0, PanelStyle::titled("Varying Magnetic Field Strength"));
        figure.add_series(0, &circle(1.5, DVec2::new(0.0, 1.5), 64), "B = 1.0 mT", None);
        figure.add_series(3, &circle(0.7, DVec2::new(0.0, -0.7), 64), "Positron (q=+e)", Some(Rgb::RED));

        let Layout { scene, labels } = figure.layout().unwrap();
        assert_eq!((scene.width, scene.height), (200, 150));
        assert_eq!(figure.panel(0).unwrap().style.title, "Varying Magnetic Field Strength");

        let red = Rgb::RED.to_array();
        assert!(scene.vertices().iter().any(|v| v.color == red));

        let texts: Vec<&str> = labels.iter().map(|label| label.text.as_str()).collect();
        for expected in [
            FIGURE_TITLE,
            "Varying Magnetic Field Strength",
            "B = 1.0 mT",
            "Positron (q=+e)",
            "x position (cm)",
            "y position (cm)",
        ] {
            assert!(texts.contains(&expected), "missing label {expected:?}");
        }
        assert!(labels.iter().any(|label| label.vertical && label.text == "y position (cm)"));
    }

    #[test]
    fn tick_values_are_labelled() {
        let mut figure = Figure::grid(1, 1, "", small_config());
        figure.add_series(0, &[DVec2::new(-12.0, -3.0), DVec2::new(12.0, 3.0)], "s", None);

        let labels = figure.layout().unwrap().labels;
        let texts: Vec<&str> = labels.iter().map(|label| label.text.as_str()).collect();
        assert!(texts.contains(&"-10") && texts.contains(&"0") && texts.contains(&"10"));
        assert_eq!(tick_text(0.1 + 0.2), "0.3");
        assert_eq!(tick_text(-0.0), "0");
    }

    #[test]
    fn legend_labels_are_inked_after_rendering() {
        let config = FigureConfig {
            width_in: 6.0,
            height_in: 5.0,
            dpi: 100,
            output_path: PathBuf::from("unused.png"),
        };
        let mut figure = Figure::grid(1, 1, FIGURE_TITLE, config);
        figure.add_series(0, &circle(1.5, DVec2::new(0.0, 1.5), 64), "Electron (q=-e)", Some(Rgb::BLUE));

        let labels = figure.layout().unwrap().labels;
        let image = figure.render(&mut CpuRasterizer).unwrap();
        let font = text::font().unwrap();

        for wanted in ["Electron (q=-e)", FIGURE_TITLE, "x position (cm)"] {
            let label = labels.iter().find(|label| label.text == wanted).unwrap();
            let (min, max) = label.bounds(&font);
            assert!(min.x >= 0.0 && min.y >= 0.0);
            assert!(max.x <= image.width() as f32 && max.y <= image.height() as f32);

            let inked = (min.y as u32..max.y.ceil() as u32)
                .flat_map(|y| (min.x as u32..max.x.ceil() as u32).map(move |x| (x, y)))
                .filter(|&(x, y)| image.get_pixel(x, y).0 != [255, 255, 255, 255])
                .count();
            assert!(inked > 0, "{wanted:?} left no ink");
        }
    }

    #[test]
    fn zero_tick_spacing_yields_no_ticks() {
        assert!(Viewport::ticks(-10.0, 10.0, 0.0).is_empty());
        assert!(Viewport::ticks(-10.0, 10.0, -5.0).is_empty());
        assert!(Viewport::ticks(-10.0, 10.0, f64::NAN).is_empty());
        assert!(Viewport::ticks(f64::NEG_INFINITY, 10.0, 5.0).is_empty());
    }

    #[test]
    fn layout_rejects_a_zero_tick_spacing() {
        let mut figure = Figure::grid(1, 2, "", small_config());
        figure.add_series(0, &circle(1.0, DVec2::ZERO, 16), "s", None);
        figure.style_panel(
            1,
            PanelStyle {
                tick_spacing: 0.0,
                ..PanelStyle::default()
            },
        );

        assert!(matches!(
            figure.layout(),
            Err(RenderError::InvalidTickSpacing { panel: 1, spacing }) if spacing == 0.0
        ));
    }
}
