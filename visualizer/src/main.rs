use iced::{
    mouse, time,
    widget::{
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        column, text, Container,
    },
    Color, Element, Length, Pixels, Point, Rectangle, Renderer, Subscription, Task, Theme,
};
use serde::Deserialize;
use std::time::Duration;
use turbinecore::CurvePoint;

const CURVE_ENDPOINT: &str = "http://127.0.0.1:9000/curve";
const GRID_GRAY: Color = Color::from_rgb(0.827, 0.827, 0.827);
const MARGIN_LEFT: f32 = 64.0;
const MARGIN_RIGHT: f32 = 24.0;
const MARGIN_TOP: f32 = 16.0;
const MARGIN_BOTTOM: f32 = 36.0;

fn main() -> iced::Result {
    iced::application(Visualizer::boot, Visualizer::update, Visualizer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(state: &Visualizer) -> String {
    state
        .payload
        .as_ref()
        .map(|payload| payload.title.clone())
        .unwrap_or_else(|| "Power Curve Visualizer".into())
}

fn application_subscription(_: &Visualizer) -> Subscription<Message> {
    time::every(Duration::from_secs(1)).map(|_| Message::Tick)
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Light
}

#[derive(Debug)]
struct Visualizer {
    payload: Option<CurvePayload>,
    status: String,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    PayloadFetched(Result<CurvePayload, String>),
}

impl Visualizer {
    fn boot() -> (Self, Task<Message>) {
        (
            Visualizer {
                payload: None,
                status: "Waiting for curve...".into(),
            },
            Task::perform(fetch_payload(), Message::PayloadFetched),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => Task::perform(fetch_payload(), Message::PayloadFetched),
            Message::PayloadFetched(Ok(payload)) => {
                state.status = format!(
                    "{} samples, rated power {:.0} kW",
                    payload.points.len(),
                    payload.rated_power
                );
                state.payload = Some(payload);
                Task::none()
            }
            Message::PayloadFetched(Err(err)) => {
                state.status = format!("Curve unavailable: {err}");
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let (title, x_label, y_label, points) = match &state.payload {
            Some(payload) => (
                payload.title.clone(),
                payload.x_label.clone(),
                payload.y_label.clone(),
                payload.points.clone(),
            ),
            None => (
                "Power Curve".to_string(),
                String::new(),
                String::new(),
                Vec::new(),
            ),
        };

        let chart = Canvas::new(PowerChart::new(points))
            .width(Length::Fill)
            .height(Length::Fill);

        let layout = column![
            Container::new(text(title).size(24)).center_x(Length::Fill),
            text(y_label).size(14),
            chart,
            Container::new(text(x_label).size(14)).center_x(Length::Fill),
            text(&state.status).size(12),
        ]
        .spacing(8)
        .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

async fn fetch_payload() -> Result<CurvePayload, String> {
    let response = reqwest::get(CURVE_ENDPOINT)
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<CurvePayload>()
        .await
        .map_err(|e| e.to_string())
}

#[derive(Debug, Clone, Deserialize)]
struct CurvePayload {
    #[serde(default)]
    title: String,
    #[serde(default)]
    x_label: String,
    #[serde(default)]
    y_label: String,
    #[serde(default)]
    rated_power: f64,
    #[serde(default)]
    points: Vec<CurvePoint>,
}

/// Tick spacing of roughly `span / 6`, snapped to 1, 2 or 5 times a power of ten.
fn tick_step(span: f64) -> f64 {
    if span <= 0.0 || !span.is_finite() {
        return 1.0;
    }
    let raw = span / 6.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn grid_stroke() -> Stroke<'static> {
    Stroke::default().with_width(1.0).with_color(GRID_GRAY)
}

#[derive(Clone)]
struct PowerChart {
    points: Vec<CurvePoint>,
    x_max: f64,
    y_max: f64,
}

impl PowerChart {
    fn new(points: Vec<CurvePoint>) -> Self {
        let x_max = points
            .iter()
            .map(|p| p.wind_speed)
            .fold(0.0, f64::max)
            .max(1.0);
        let y_max = points.iter().map(|p| p.power).fold(0.0, f64::max).max(1.0) * 1.1;
        Self {
            points,
            x_max,
            y_max,
        }
    }
}

impl canvas::Program<Message> for PowerChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::WHITE);

        let plot_width = (bounds.width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
        let plot_height = (bounds.height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);
        let to_screen = |x: f64, y: f64| {
            Point::new(
                MARGIN_LEFT + (x / self.x_max) as f32 * plot_width,
                MARGIN_TOP + plot_height - (y / self.y_max) as f32 * plot_height,
            )
        };

        let x_step = tick_step(self.x_max);
        let mut tick = 0.0;
        while tick <= self.x_max + 1e-9 {
            frame.stroke(
                &Path::line(to_screen(tick, 0.0), to_screen(tick, self.y_max)),
                grid_stroke(),
            );
            let anchor = to_screen(tick, 0.0);
            frame.fill_text(canvas::Text {
                content: format!("{:.0}", tick),
                position: Point::new(anchor.x - 6.0, anchor.y + 8.0),
                color: Color::BLACK,
                size: Pixels(12.0),
                ..Default::default()
            });
            tick += x_step;
        }

        let y_step = tick_step(self.y_max);
        let mut tick = 0.0;
        while tick <= self.y_max + 1e-9 {
            frame.stroke(
                &Path::line(to_screen(0.0, tick), to_screen(self.x_max, tick)),
                grid_stroke(),
            );
            let anchor = to_screen(0.0, tick);
            frame.fill_text(canvas::Text {
                content: format!("{:.0}", tick),
                position: Point::new(anchor.x - MARGIN_LEFT + 8.0, anchor.y - 7.0),
                color: Color::BLACK,
                size: Pixels(12.0),
                ..Default::default()
            });
            tick += y_step;
        }

        let axes = Path::new(|builder| {
            builder.move_to(to_screen(0.0, self.y_max));
            builder.line_to(to_screen(0.0, 0.0));
            builder.line_to(to_screen(self.x_max, 0.0));
        });
        frame.stroke(
            &axes,
            Stroke::default().with_width(1.0).with_color(Color::BLACK),
        );

        if self.points.len() > 1 {
            let curve = Path::new(|builder| {
                for (i, point) in self.points.iter().enumerate() {
                    let position = to_screen(point.wind_speed, point.power);
                    if i == 0 {
                        builder.move_to(position);
                    } else {
                        builder.line_to(position);
                    }
                }
            });
            frame.stroke(
                &curve,
                Stroke::default().with_width(2.0).with_color(Color::BLACK),
            );
        }

        vec![frame.into_geometry()]
    }
}
