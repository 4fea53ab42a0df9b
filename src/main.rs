use iced::widget::image as picture;
use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;

use leaf_scan::analysis::{self, Analysis};
use leaf_scan::api::{PredictClient, Prediction};
use leaf_scan::ui::markup;
use leaf_scan::{capture, report, ui};

/// The two screens of the app
enum Screen {
    /// Pick or photograph a leaf
    Capture,
    /// Upload the normalized image and show the diagnosis
    Result,
}

/// Main application state
struct LeafScan {
    /// Which screen is showing
    screen: Screen,
    /// Inference API client, shared across uploads
    client: PredictClient,
    /// The image reference picked or captured by the user
    picked: Option<PathBuf>,
    /// Transient notice on the capture screen
    status: String,
    /// Report markup on the result screen
    report: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the "Gallery" button
    PickFromGallery,
    /// User clicked the "Camera" button
    OpenCamera,
    /// Background camera capture finished
    CameraFinished(Result<PathBuf, String>),
    /// The inference response arrived
    PredictionFinished(Result<Prediction, String>),
    /// User clicked "Back" on the result screen
    BackToCapture,
}

impl LeafScan {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // Fire-and-forget availability check; the app proceeds regardless
        capture::probe();

        (
            LeafScan {
                screen: Screen::Capture,
                client: PredictClient::new(),
                picked: None,
                status: "Pick or photograph a leaf to get started.".to_string(),
                report: String::new(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFromGallery => {
                // Show the native image picker dialog
                let file = FileDialog::new()
                    .set_title("Select a Leaf Photo")
                    .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "webp"])
                    .pick_file();

                if let Some(path) = file {
                    self.picked = Some(path);
                    return self.open_result();
                }

                Task::none()
            }
            Message::OpenCamera => match capture::create_capture_file() {
                Ok(target) => {
                    self.status = "📷 Waiting for the camera...".to_string();
                    Task::perform(capture::capture_to(target), Message::CameraFinished)
                }
                Err(reason) => {
                    self.status = format!("❌ {}", reason);
                    Task::none()
                }
            },
            Message::CameraFinished(Ok(path)) => {
                self.picked = Some(path);
                self.open_result()
            }
            Message::CameraFinished(Err(reason)) => {
                self.status = format!("❌ {}", reason);
                Task::none()
            }
            Message::PredictionFinished(result) => {
                self.report = match result {
                    Ok(prediction) => {
                        println!(
                            "🌿 Prediction: {} ({:.4})",
                            prediction.predicted_class, prediction.confidence
                        );
                        report::prediction_report(&prediction)
                    }
                    Err(reason) => format!("❌ {}", reason),
                };
                println!("📋 Report:\n{}", markup::plain_text(&self.report));
                Task::none()
            }
            Message::BackToCapture => {
                // The picked image is retained so the preview survives
                self.screen = Screen::Capture;
                self.report.clear();
                self.status = "Pick or photograph a leaf to get started.".to_string();
                Task::none()
            }
        }
    }

    /// Transition to the result screen: normalize the picked image and, if
    /// the upload file is confirmed on disk, launch the single upload.
    fn open_result(&mut self) -> Task<Message> {
        if self.picked.is_none() {
            self.status = "Pick or take a photo first!".to_string();
            return Task::none();
        }

        self.screen = Screen::Result;

        // Normalization runs synchronously here; the source images are
        // small and local
        match analysis::begin(self.picked.as_deref()) {
            Analysis::MissingImage => {
                self.report = report::IMAGE_NOT_FOUND.to_string();
                Task::none()
            }
            Analysis::Failed(reason) => {
                self.report = format!("❌ {}", reason);
                Task::none()
            }
            Analysis::Ready(upload) => {
                self.report = report::PROCESSING.to_string();
                let client = self.client.clone();
                Task::perform(
                    async move { client.predict(&upload).await.map_err(|e| e.to_string()) },
                    Message::PredictionFinished,
                )
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let content = match self.screen {
            Screen::Capture => self.capture_view(),
            Screen::Result => self.result_view(),
        };

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    /// Capture/select screen: title, the two acquisition buttons, an
    /// optional preview, and the status line
    fn capture_view(&self) -> Element<Message> {
        let mut content = column![
            text("Leaf Scan").size(48),
            row![
                button("📁 Gallery")
                    .on_press(Message::PickFromGallery)
                    .padding(10),
                button("📷 Camera").on_press(Message::OpenCamera).padding(10),
            ]
            .spacing(20),
        ]
        .spacing(20)
        .align_x(Alignment::Center);

        if let Some(path) = &self.picked {
            content =
                content.push(picture(picture::Handle::from_path(path)).width(Length::Fixed(320.0)));
        }

        content = content.push(text(&self.status).size(16));

        content.into()
    }

    /// Result screen: preview of the source image, the rendered report,
    /// and a way back
    fn result_view(&self) -> Element<Message> {
        let mut content = column![text("Diagnosis").size(32)]
            .spacing(20)
            .align_x(Alignment::Center);

        if let Some(path) = &self.picked {
            content =
                content.push(picture(picture::Handle::from_path(path)).width(Length::Fixed(320.0)));
        }

        content = content.push(ui::markup_view(&self.report));
        content = content.push(button("⬅ Back").on_press(Message::BackToCapture).padding(10));

        content.into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application("Leaf Scan", LeafScan::update, LeafScan::view)
        .theme(LeafScan::theme)
        .centered()
        .run_with(LeafScan::new)
}
