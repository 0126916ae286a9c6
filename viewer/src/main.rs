use charts::{color_of, BarChart, BarRows, Donut, Radar, RadialBars, ScanHud};
use iced::{
    task,
    widget::{
        button, canvas::Canvas, column, container, row, scrollable, text, text_input, Column,
        Container,
    },
    window, Alignment, Color, Element, Length, Subscription, Task, Theme,
};
use log::info;
use pulsecore::prelude::ServiceResult;
use pulsecore::report::{ColorTag, NormalizedReport};
use pulsecore::scan::{RequestId, Resolution, SubmissionController};
use pulsecore::service::{AnalysisResponse, ImagePayload, ServiceClient, ServiceConfig};

mod charts;

fn main() -> iced::Result {
    env_logger::init();
    iced::application(Viewer::boot, Viewer::update, Viewer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Viewer) -> String {
    "ProofPulse".into()
}

/// Frame events exist only while a request is in flight; dropping the
/// subscription is what stops the scan animation loop.
fn application_subscription(state: &Viewer) -> Subscription<Message> {
    if state.submission.is_in_flight() {
        window::frames().map(|_| Message::Frame)
    } else {
        Subscription::none()
    }
}

fn application_theme(_: &Viewer) -> Theme {
    Theme::Dark
}

const ERROR_COLOR: Color = Color::from_rgb(0.94, 0.27, 0.27);
const MUTED: Color = Color::from_rgb(0.6, 0.62, 0.68);

#[derive(Debug)]
struct Viewer {
    client: ServiceClient,
    image_path: String,
    submission: SubmissionController,
    /// Abort handle of the pending analysis request, if any.
    analysis: Option<task::Handle>,
    contact: ContactForm,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    ImagePathChanged(String),
    Analyze,
    Clear,
    Frame,
    AnalysisFinished(RequestId, ServiceResult<AnalysisResponse>),
    ToggleContact,
    ContactFieldChanged(ContactField, String),
    SendFeedback,
    FeedbackSent(ServiceResult<()>),
}

#[derive(Debug, Clone, Copy)]
enum ContactField {
    Name,
    Message,
}

#[derive(Debug, Default)]
struct ContactForm {
    open: bool,
    name: String,
    message: String,
    sending: bool,
    error: Option<String>,
    sent: bool,
}

impl Viewer {
    fn boot() -> (Self, Task<Message>) {
        let config = ServiceConfig::default().with_env_override();
        info!("analysis endpoint {}", config.analyze_url());
        (Viewer::new(config), Task::none())
    }

    fn new(config: ServiceConfig) -> Self {
        Viewer {
            client: ServiceClient::new(config),
            image_path: String::new(),
            submission: SubmissionController::new(),
            analysis: None,
            contact: ContactForm::default(),
            history: Vec::new(),
        }
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::ImagePathChanged(path) => {
                state.image_path = path;
                Task::none()
            }
            Message::Analyze => {
                let path = state.image_path.trim().to_string();
                if path.is_empty() {
                    return Task::none();
                }
                let Some(id) = state.submission.try_begin() else {
                    return Task::none();
                };
                state.push_history(format!("Submitted {path}"));
                let client = state.client.clone();
                let (request, handle) = Task::perform(
                    async move {
                        let image = ImagePayload::load(&path).await?;
                        client.analyze(image).await
                    },
                    move |outcome| Message::AnalysisFinished(id, outcome),
                )
                .abortable();
                state.analysis = Some(handle);
                request
            }
            Message::Clear => {
                // The request is dropped before Analyze is enabled again.
                if let Some(handle) = state.analysis.take() {
                    handle.abort();
                }
                state.submission.abandon();
                state.image_path.clear();
                Task::none()
            }
            Message::Frame => {
                state.submission.on_frame();
                Task::none()
            }
            Message::AnalysisFinished(id, outcome) => {
                let entry = match &outcome {
                    Ok(AnalysisResponse::Json(_)) => "Report received".to_string(),
                    Ok(AnalysisResponse::Text(_)) => "Text response received".to_string(),
                    Err(err) => format!("Analysis error: {err}"),
                };
                if state.submission.resolve(id, outcome) != Resolution::Stale {
                    state.analysis = None;
                }
                state.push_history(entry);
                Task::none()
            }
            Message::ToggleContact => {
                state.contact.open = !state.contact.open;
                state.contact.sent = false;
                Task::none()
            }
            Message::ContactFieldChanged(field, value) => {
                match field {
                    ContactField::Name => state.contact.name = value,
                    ContactField::Message => state.contact.message = value,
                }
                Task::none()
            }
            Message::SendFeedback => {
                if state.contact.sending {
                    return Task::none();
                }
                state.contact.sending = true;
                state.contact.error = None;
                let client = state.client.clone();
                let name = state.contact.name.clone();
                let body = state.contact.message.clone();
                Task::perform(
                    async move { client.send_feedback(&name, &body).await },
                    Message::FeedbackSent,
                )
            }
            Message::FeedbackSent(Ok(())) => {
                state.contact = ContactForm {
                    sent: true,
                    ..ContactForm::default()
                };
                state.push_history("Feedback sent".into());
                Task::none()
            }
            Message::FeedbackSent(Err(err)) => {
                state.contact.sending = false;
                state.contact.error = Some(err.to_string());
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let in_flight = state.submission.is_in_flight();

        let mut submit_column = column![
            text("ProofPulse").size(30),
            text("Detect AI-generated images. Submit an image to receive a forensic report.")
                .size(14)
                .color(MUTED),
            text_input("Path to png, jpg, jpeg, webp or bmp", &state.image_path)
                .on_input(Message::ImagePathChanged)
                .on_submit(Message::Analyze)
                .padding(8),
            row![
                button(if in_flight { "Scanning..." } else { "Analyze" })
                    .on_press_maybe((!in_flight).then_some(Message::Analyze))
                    .padding(10),
                button("Clear").on_press(Message::Clear).padding(10),
            ]
            .spacing(10),
        ]
        .spacing(12)
        .padding(16)
        .width(Length::Fixed(420.0));

        if in_flight {
            submit_column = submit_column.push(
                Canvas::new(ScanHud {
                    state: state.submission.scan_state(),
                })
                .width(Length::Fill)
                .height(Length::Fixed(200.0)),
            );
        }
        if let Some(error) = state.submission.error() {
            submit_column = submit_column.push(text(error.to_string()).size(14).color(ERROR_COLOR));
        }

        submit_column = submit_column
            .push(button("Contact").on_press(Message::ToggleContact).padding(8))
            .push(contact_panel(&state.contact))
            .push(text("Activity log").size(16))
            .push(
                Container::new(scrollable(history_list(&state.history)).height(Length::Fixed(90.0)))
                    .padding(6),
            );

        let report_column = match state.submission.report() {
            Some(report) => report_panel(report, state.submission.raw_body()),
            None => match state.submission.raw_body() {
                Some(raw) => column![
                    text("Response").size(22),
                    scrollable(text(raw.to_string()).size(12)).height(Length::Fixed(420.0)),
                ]
                .spacing(10),
                None => column![text("No report yet").size(18).color(MUTED)],
            },
        }
        .padding(16)
        .width(Length::Fill);

        let layout = row![submit_column, scrollable(report_column)]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

fn history_list(history: &[String]) -> Column<'_, Message> {
    if history.is_empty() {
        return Column::new().push(text("No activity yet").size(12));
    }
    history
        .iter()
        .rev()
        .fold(Column::new().spacing(4), |col, entry| {
            col.push(text(entry.clone()).size(12))
        })
}

fn contact_panel(contact: &ContactForm) -> Column<'_, Message> {
    if !contact.open {
        return if contact.sent {
            column![text("Thanks for your feedback!").size(12).color(MUTED)]
        } else {
            Column::new()
        };
    }

    let mut panel = column![
        text("Send us a message").size(16),
        text_input("Your name", &contact.name)
            .on_input(|value| Message::ContactFieldChanged(ContactField::Name, value))
            .padding(6),
        text_input("Message", &contact.message)
            .on_input(|value| Message::ContactFieldChanged(ContactField::Message, value))
            .padding(6),
        button(if contact.sending { "Sending..." } else { "Send" })
            .on_press_maybe((!contact.sending).then_some(Message::SendFeedback))
            .padding(8),
    ]
    .spacing(8);
    if let Some(error) = &contact.error {
        panel = panel.push(text(error.clone()).size(12).color(ERROR_COLOR));
    }
    panel
}

fn report_panel<'a>(report: &'a NormalizedReport, raw: Option<&'a str>) -> Column<'a, Message> {
    let summary = &report.summary;
    let verdict_color = if report.verdict.is_ai() {
        color_of(ColorTag::RED)
    } else {
        color_of(ColorTag::EMERALD)
    };

    let header = row![
        Canvas::new(Donut {
            split: report.ai_split,
        })
        .width(Length::Fixed(220.0))
        .height(Length::Fixed(220.0)),
        column![
            text("Verdict").size(14).color(MUTED),
            text(report.verdict.label()).size(24).color(verdict_color),
            text(format!("Final AI score: {}", summary.final_ai_score_text)).size(14),
            text(format!("Forensic score: {}", summary.forensic_score_text)).size(14),
            text(format!("Sightengine ops: {}", summary.operations_count)).size(14),
            text(format!(
                "EXIF present: {}",
                if summary.exif_present { "Yes" } else { "No" }
            ))
            .size(14),
        ]
        .spacing(6),
    ]
    .spacing(20)
    .align_y(Alignment::Center);

    let cards = row![
        card("AI generated", format!("{}%", summary.ai_generated_percent)),
        card("Final AI score", format!("{}%", summary.final_ai_percent)),
        card("Forensic AI %", format!("{}%", summary.forensic_ai_percent)),
        card(
            "Metadata adjustment",
            format!("{}%", summary.metadata_adjustment_percent)
        ),
        card("Image size", summary.image_size_label.clone()),
    ]
    .spacing(10);

    let breakdown_chart = BarChart {
        entries: report
            .breakdown_series
            .iter()
            .map(|entry| (entry.label.clone(), entry.percent))
            .collect(),
        color: color_of(ColorTag::INDIGO),
    };
    let local_radar = Radar {
        entries: report
            .local_series
            .iter()
            .map(|entry| (entry.label.clone(), entry.percent))
            .collect(),
    };
    let bar_rows = BarRows {
        rows: report.breakdown_bars.clone(),
    };
    let bar_rows_height = bar_rows.height();

    let mut panel = column![
        header,
        cards,
        text("Breakdown Scores").size(16),
        Canvas::new(breakdown_chart)
            .width(Length::Fill)
            .height(Length::Fixed(260.0)),
        row![
            column![
                text("Local Forensics").size(16),
                Canvas::new(local_radar)
                    .width(Length::Fill)
                    .height(Length::Fixed(300.0)),
            ]
            .spacing(6)
            .width(Length::FillPortion(1)),
            column![
                text("Hybrid Summary").size(16),
                Canvas::new(RadialBars {
                    entries: report.hybrid_series.clone(),
                })
                .width(Length::Fill)
                .height(Length::Fixed(300.0)),
            ]
            .spacing(6)
            .width(Length::FillPortion(1)),
        ]
        .spacing(12),
        text("Breakdown").size(16),
        Canvas::new(bar_rows)
            .width(Length::Fill)
            .height(Length::Fixed(bar_rows_height)),
    ]
    .spacing(12);

    if let Some(raw) = raw {
        panel = panel.push(text("Raw response").size(16)).push(
            Container::new(scrollable(text(raw).size(11)).height(Length::Fixed(180.0))).padding(6),
        );
    }
    panel
}

fn card<'a>(title: &'a str, value: String) -> Element<'a, Message> {
    container(column![text(title).size(11).color(MUTED), text(value).size(16)].spacing(4))
        .padding(10)
        .width(Length::FillPortion(1))
        .into()
}
