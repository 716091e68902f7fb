use clap::Parser;
use iced::keyboard::{self, key, Key};
use iced::widget::stack;
use iced::{Element, Subscription, Task, Theme};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing_subscriber::EnvFilter;

mod assets;
mod config;
mod error;
mod geometry;
mod state;
mod ui;

use assets::loader::{load_image, load_image_bounded, LoadedImage, CARD_FETCH_LIMIT};
use assets::manifest::{fetch_manifest_guarded, FetchGuard};
use assets::shrink::shrink_all;
use assets::source::{asset_path, AssetSource};
use config::{Cli, GalleryConfig};
use error::GalleryError;
use state::data::Manifest;
use state::gallery::{Gallery, GalleryLoad};
use state::scroll_lock::PageScroll;
use state::viewer::{Transition, Viewer, ViewerInput};

/// Main application state
struct WhiteboardGallery {
    config: GalleryConfig,
    source: AssetSource,
    client: reqwest::Client,
    /// Loading, failed, or the grouped gallery
    load: GalleryLoad,
    /// Card assets by file name
    card_images: HashMap<String, LoadedImage>,
    /// Caps card asset fetches in flight
    card_permits: Arc<Semaphore>,
    viewer: Viewer,
    /// Full asset for the open viewer
    viewer_image: Option<LoadedImage>,
    page_scroll: PageScroll,
    /// Dropped with the app, silencing a manifest fetch still in flight
    _fetch_guard: FetchGuard,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Manifest fetch finished; `None` when the result was discarded
    ManifestLoaded(Option<Result<Manifest, String>>),
    /// A card asset finished loading (file name, result)
    CardImageLoaded(String, Result<LoadedImage, String>),
    /// User activated the card for a room
    OpenBoard(String),
    /// The viewer's full asset finished loading (room id, result)
    ViewerImageLoaded(String, Result<LoadedImage, String>),
    /// Input for the open viewer
    Viewer(ViewerInput),
}

impl WhiteboardGallery {
    /// Create the application and start fetching the manifest
    fn new(config: GalleryConfig, source: AssetSource) -> (Self, Task<Message>) {
        let client = reqwest::Client::new();
        let fetch_guard = FetchGuard::new();

        tracing::info!("🎨 Loading gallery from {}", source.locate(&config.manifest));

        let task = Task::perform(
            fetch_manifest_guarded(
                client.clone(),
                source.clone(),
                config.manifest.clone(),
                fetch_guard.token(),
            ),
            Message::ManifestLoaded,
        );

        (
            WhiteboardGallery {
                config,
                source,
                client,
                load: GalleryLoad::Loading,
                card_images: HashMap::new(),
                card_permits: Arc::new(Semaphore::new(CARD_FETCH_LIMIT)),
                viewer: Viewer::default(),
                viewer_image: None,
                page_scroll: PageScroll::new(),
                _fetch_guard: fetch_guard,
            },
            task,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ManifestLoaded(None) => Task::none(),
            Message::ManifestLoaded(Some(Err(error))) => {
                tracing::error!("❌ {}", error);
                self.load = GalleryLoad::Failed(error);
                Task::none()
            }
            Message::ManifestLoaded(Some(Ok(manifest))) => {
                let gallery = Gallery::build(&manifest);
                tracing::info!(
                    floors = gallery.groups.len(),
                    shown = gallery.board_count(),
                    skipped = manifest.len() - gallery.board_count(),
                    "📊 Gallery built"
                );

                let task = self.load_card_images(&gallery);
                self.load = GalleryLoad::Ready(gallery);
                task
            }
            Message::CardImageLoaded(file, result) => {
                match result {
                    Ok(image) => {
                        self.card_images.insert(file, image);
                    }
                    Err(error) => tracing::warn!("⚠️  Card image {} unavailable: {}", file, error),
                }
                Task::none()
            }
            Message::OpenBoard(room_id) => {
                let GalleryLoad::Ready(gallery) = &self.load else {
                    return Task::none();
                };
                let Some(board) = gallery.find(&room_id).cloned() else {
                    return Task::none();
                };

                tracing::info!("🔍 Opening {}", room_id);
                let rel = asset_path(&self.config.full_dir, &board.file);
                self.viewer.open(board, &self.page_scroll);
                self.viewer_image = None;

                Task::perform(
                    load_image(self.client.clone(), self.source.clone(), rel),
                    move |result| {
                        Message::ViewerImageLoaded(room_id.clone(), result.map_err(|e| e.to_string()))
                    },
                )
            }
            Message::ViewerImageLoaded(room_id, result) => {
                if !self.viewer.is_showing(&room_id) {
                    return Task::none();
                }
                match result {
                    Ok(image) => self.viewer_image = Some(image),
                    Err(error) => tracing::warn!("⚠️  Image for {} unavailable: {}", room_id, error),
                }
                Task::none()
            }
            Message::Viewer(input) => {
                if self.viewer.apply(input) == Transition::Closed {
                    tracing::info!("Viewer closed");
                    self.viewer_image = None;
                }
                Task::none()
            }
        }
    }

    /// Start loading every card asset the gallery shows
    fn load_card_images(&self, gallery: &Gallery) -> Task<Message> {
        let files: HashSet<&str> = gallery.boards().map(|b| b.file.as_str()).collect();

        Task::batch(files.into_iter().map(|file| {
            let file = file.to_string();
            let rel = asset_path(self.config.card_dir(), &file);
            Task::perform(
                load_image_bounded(
                    Arc::clone(&self.card_permits),
                    self.client.clone(),
                    self.source.clone(),
                    rel,
                ),
                move |result| Message::CardImageLoaded(file.clone(), result.map_err(|e| e.to_string())),
            )
        }))
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let page = ui::gallery::page(
            &self.load,
            &self.card_images,
            self.config.card_scale(),
            &self.page_scroll,
        );

        match self.viewer.session() {
            Some(session) => stack![
                page,
                ui::viewer::overlay(session, self.viewer_image.as_ref())
            ]
            .into(),
            None => page,
        }
    }

    /// Escape closes the viewer
    fn subscription(&self) -> Subscription<Message> {
        if !self.viewer.is_open() {
            return Subscription::none();
        }
        keyboard::on_key_press(|key, _modifiers| match key {
            Key::Named(key::Named::Escape) => Some(Message::Viewer(ViewerInput::Escape)),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Install the tracing subscriber; `RUST_LOG` overrides the default filter
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wgpu_core=warn,wgpu_hal=warn,naga=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_gallery(config: GalleryConfig) -> Result<(), GalleryError> {
    let source = AssetSource::parse(&config.base)?;

    iced::application(
        ui::gallery::TITLE,
        WhiteboardGallery::update,
        WhiteboardGallery::view,
    )
    .subscription(WhiteboardGallery::subscription)
    .theme(WhiteboardGallery::theme)
    .centered()
    .run_with(move || WhiteboardGallery::new(config, source))?;

    Ok(())
}

fn run_shrink(options: assets::shrink::ShrinkOptions) -> Result<(), GalleryError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| GalleryError::io("tokio runtime", e))?;

    let report = runtime.block_on(shrink_all(&options))?;
    if report.failed > 0 {
        tracing::warn!("⚠️  {} images could not be converted", report.failed);
    }
    Ok(())
}

fn main() -> Result<(), GalleryError> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Some(command) => run_shrink(command.shrink_options()),
        None => run_gallery(cli.gallery),
    }
}
