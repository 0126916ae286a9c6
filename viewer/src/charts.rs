//! Canvas programs that draw the HUD and report charts from normalized data.

use iced::{
    mouse,
    widget::canvas::{self, path::Arc, Frame, Geometry, Path, Stroke},
    Color, Pixels, Point, Radians, Rectangle, Renderer, Size, Theme,
};
use pulsecore::report::{AiSplit, BarRow, ColorTag, HybridEntry};
use pulsecore::scan::{ScanState, PHASE_LABELS};
use std::f32::consts::PI;

const BACKGROUND: Color = Color::from_rgb(0.05, 0.06, 0.09);
const GRID: Color = Color::from_rgb(0.25, 0.25, 0.3);
const LABEL: Color = Color::from_rgb(0.7, 0.72, 0.78);
const ACCENT: Color = Color::from_rgb(0.0, 0.48, 1.0);
const CYAN: Color = Color::from_rgb(0.02, 0.71, 0.83);

pub fn color_of(tag: ColorTag) -> Color {
    let (r, g, b) = tag.rgb();
    Color::from_rgb8(r, g, b)
}

fn label(frame: &mut Frame, content: impl Into<String>, position: Point, size: f32, color: Color) {
    frame.fill_text(canvas::Text {
        content: content.into(),
        position,
        color,
        size: Pixels(size),
        ..Default::default()
    });
}

fn ring_segment(center: Point, radius: f32, from: f32, sweep: f32) -> Path {
    Path::new(|builder| {
        builder.arc(Arc {
            center,
            radius,
            start_angle: Radians(from),
            end_angle: Radians(from + sweep),
        })
    })
}

fn background(renderer: &Renderer, bounds: Rectangle) -> Frame {
    let mut frame = Frame::new(renderer, bounds.size());
    frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKGROUND);
    frame
}

/// Scan overlay: progress ring with the current phase and the phase list.
#[derive(Clone)]
pub struct ScanHud {
    pub state: ScanState,
}

impl<Message> canvas::Program<Message> for ScanHud {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = background(renderer, bounds);
        let radius = (bounds.height / 2.0 - 16.0).max(8.0);
        let center = Point::new(radius + 16.0, bounds.height / 2.0);
        let progress = self.state.progress.clamp(0.0, 100.0) as f32;

        frame.stroke(
            &Path::circle(center, radius),
            Stroke::default().with_width(8.0).with_color(GRID),
        );
        if progress > 0.0 {
            frame.stroke(
                &ring_segment(center, radius, -PI / 2.0, 2.0 * PI * progress / 100.0),
                Stroke::default().with_width(8.0).with_color(ACCENT),
            );
        }
        label(
            &mut frame,
            format!("{}%", progress.round() as u32),
            Point::new(center.x - 22.0, center.y - 16.0),
            24.0,
            Color::WHITE,
        );
        label(
            &mut frame,
            self.state.phase_label(),
            Point::new(center.x - radius + 10.0, center.y + 14.0),
            11.0,
            LABEL,
        );

        let list_x = center.x + radius + 28.0;
        let row_height = (bounds.height - 16.0) / PHASE_LABELS.len() as f32;
        for (index, phase) in PHASE_LABELS.iter().enumerate() {
            let y = 8.0 + row_height * index as f32;
            let active = index <= self.state.phase_index;
            let marker = Path::circle(Point::new(list_x, y + row_height / 2.0), 4.0);
            if active {
                frame.fill(&marker, ACCENT);
            } else {
                frame.stroke(&marker, Stroke::default().with_color(GRID));
            }
            label(
                &mut frame,
                *phase,
                Point::new(list_x + 12.0, y + row_height / 2.0 - 7.0),
                13.0,
                if active { Color::WHITE } else { LABEL },
            );
        }

        vec![frame.into_geometry()]
    }
}

/// AI vs. human donut.
#[derive(Clone)]
pub struct Donut {
    pub split: AiSplit,
}

impl<Message> canvas::Program<Message> for Donut {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = background(renderer, bounds);
        let center = frame.center();
        let radius = bounds.width.min(bounds.height) / 2.0 - 20.0;
        let ai_sweep = 2.0 * PI * self.split.ai as f32 / 100.0;
        let start = -PI / 2.0;

        frame.stroke(
            &ring_segment(center, radius, start + ai_sweep, 2.0 * PI - ai_sweep),
            Stroke::default()
                .with_width(18.0)
                .with_color(color_of(ColorTag::EMERALD)),
        );
        if self.split.ai > 0 {
            frame.stroke(
                &ring_segment(center, radius, start, ai_sweep),
                Stroke::default()
                    .with_width(18.0)
                    .with_color(color_of(ColorTag::RED)),
            );
        }
        label(
            &mut frame,
            format!("{}%", self.split.ai),
            Point::new(center.x - 20.0, center.y - 14.0),
            22.0,
            Color::WHITE,
        );
        label(
            &mut frame,
            "AI",
            Point::new(center.x - 7.0, center.y + 12.0),
            12.0,
            LABEL,
        );

        vec![frame.into_geometry()]
    }
}

/// Vertical bars on a fixed 0–100 axis.
#[derive(Clone)]
pub struct BarChart {
    pub entries: Vec<(String, u8)>,
    pub color: Color,
}

impl<Message> canvas::Program<Message> for BarChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = background(renderer, bounds);
        let left = 34.0;
        let bottom = bounds.height - 24.0;
        let plot_height = bottom - 12.0;
        let plot_width = bounds.width - left - 8.0;

        for tick in (0..=100).step_by(25) {
            let y = bottom - plot_height * tick as f32 / 100.0;
            frame.stroke(
                &Path::line(Point::new(left, y), Point::new(left + plot_width, y)),
                Stroke::default().with_color(GRID),
            );
            label(&mut frame, tick.to_string(), Point::new(4.0, y - 7.0), 11.0, LABEL);
        }

        if self.entries.is_empty() {
            label(&mut frame, "No data", Point::new(left + 8.0, bottom - 20.0), 13.0, LABEL);
            return vec![frame.into_geometry()];
        }

        let slot = plot_width / self.entries.len() as f32;
        let bar_width = (slot * 0.6).max(2.0);
        for (index, (name, percent)) in self.entries.iter().enumerate() {
            let height = plot_height * *percent as f32 / 100.0;
            let x = left + slot * index as f32 + (slot - bar_width) / 2.0;
            frame.fill_rectangle(
                Point::new(x, bottom - height),
                Size::new(bar_width, height),
                self.color,
            );
            label(&mut frame, name.clone(), Point::new(x, bottom + 6.0), 11.0, LABEL);
        }

        vec![frame.into_geometry()]
    }
}

/// Polygon over one spoke per entry.
#[derive(Clone)]
pub struct Radar {
    pub entries: Vec<(String, u8)>,
}

impl<Message> canvas::Program<Message> for Radar {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = background(renderer, bounds);
        let center = frame.center();
        let radius = bounds.width.min(bounds.height) / 2.0 - 36.0;

        if self.entries.is_empty() {
            label(&mut frame, "No data", Point::new(center.x - 24.0, center.y - 7.0), 13.0, LABEL);
            return vec![frame.into_geometry()];
        }

        let spoke = |index: usize, scale: f32| {
            let angle = 2.0 * PI * index as f32 / self.entries.len() as f32 - PI / 2.0;
            Point::new(
                center.x + radius * scale * angle.cos(),
                center.y + radius * scale * angle.sin(),
            )
        };

        for ring in 1..=4 {
            frame.stroke(
                &Path::circle(center, radius * ring as f32 / 4.0),
                Stroke::default().with_color(GRID),
            );
        }
        for (index, (name, _)) in self.entries.iter().enumerate() {
            let tip = spoke(index, 1.0);
            frame.stroke(&Path::line(center, tip), Stroke::default().with_color(GRID));
            let anchor = spoke(index, 1.15);
            label(&mut frame, name.clone(), Point::new(anchor.x - 24.0, anchor.y - 7.0), 11.0, LABEL);
        }

        let outline = Path::new(|builder| {
            for (index, (_, percent)) in self.entries.iter().enumerate() {
                let point = spoke(index, *percent as f32 / 100.0);
                if index == 0 {
                    builder.move_to(point);
                } else {
                    builder.line_to(point);
                }
            }
            builder.close();
        });
        frame.fill(&outline, Color { a: 0.4, ..CYAN });
        frame.stroke(&outline, Stroke::default().with_width(2.0).with_color(CYAN));

        vec![frame.into_geometry()]
    }
}

/// Concentric arcs, one per hybrid entry, in the entry's own color.
#[derive(Clone)]
pub struct RadialBars {
    pub entries: Vec<HybridEntry>,
}

impl<Message> canvas::Program<Message> for RadialBars {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = background(renderer, bounds);
        let center = Point::new(bounds.width * 0.35, bounds.height / 2.0);
        let outer = (bounds.width * 0.35).min(bounds.height / 2.0) - 12.0;
        let inner = outer * 0.2;

        if self.entries.is_empty() {
            label(&mut frame, "No data", Point::new(center.x - 24.0, center.y - 7.0), 13.0, LABEL);
            return vec![frame.into_geometry()];
        }

        let band = (outer - inner) / self.entries.len() as f32;
        for (index, entry) in self.entries.iter().enumerate() {
            let radius = inner + band * (index as f32 + 0.5);
            let width = (band * 0.7).max(2.0);
            frame.stroke(
                &Path::circle(center, radius),
                Stroke::default().with_width(width).with_color(GRID),
            );
            frame.stroke(
                &ring_segment(center, radius, -PI / 2.0, 2.0 * PI * entry.percent as f32 / 100.0),
                Stroke::default()
                    .with_width(width)
                    .with_color(color_of(entry.color)),
            );

            let legend = Point::new(bounds.width * 0.72, 16.0 + 22.0 * index as f32);
            frame.fill(&Path::circle(legend, 5.0), color_of(entry.color));
            label(
                &mut frame,
                format!("{} {}%", entry.label, entry.percent),
                Point::new(legend.x + 10.0, legend.y - 7.0),
                12.0,
                LABEL,
            );
        }

        vec![frame.into_geometry()]
    }
}

/// Horizontal breakdown rows with a palette color per row.
#[derive(Clone)]
pub struct BarRows {
    pub rows: Vec<BarRow>,
}

impl BarRows {
    pub const ROW_HEIGHT: f32 = 26.0;

    pub fn height(&self) -> f32 {
        (self.rows.len().max(1) as f32) * Self::ROW_HEIGHT + 8.0
    }
}

impl<Message> canvas::Program<Message> for BarRows {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = background(renderer, bounds);
        let label_width = 150.0;
        let track_width = (bounds.width - label_width - 56.0).max(10.0);

        if self.rows.is_empty() {
            label(&mut frame, "No breakdown metrics", Point::new(8.0, 8.0), 13.0, LABEL);
            return vec![frame.into_geometry()];
        }

        for (slot, row) in self.rows.iter().enumerate() {
            let y = 4.0 + Self::ROW_HEIGHT * slot as f32;
            label(&mut frame, row.label.clone(), Point::new(8.0, y + 4.0), 13.0, Color::WHITE);
            let track = Point::new(label_width, y + 8.0);
            frame.fill_rectangle(track, Size::new(track_width, 8.0), GRID);
            frame.fill_rectangle(
                track,
                Size::new(track_width * row.percent as f32 / 100.0, 8.0),
                color_of(row.color),
            );
            label(
                &mut frame,
                format!("{}%", row.percent),
                Point::new(label_width + track_width + 8.0, y + 4.0),
                12.0,
                LABEL,
            );
        }

        vec![frame.into_geometry()]
    }
}
