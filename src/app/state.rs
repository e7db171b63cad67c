//! Application state management
//!
//! This module holds the current pipeline snapshot, the text of the two
//! coordinate fields, UI settings and the background road fetcher.

use crate::app::settings::Settings;
use crate::data::{
    BoundingBox, Coordinate, CoordinateError, DataError, Effect, Event, GeoElement, OverpassClient,
    Snapshot,
};
use egui::Color32;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Main application state
pub struct AppState {
    /// Current pipeline snapshot (coordinates, bbox, segments, reveal)
    pub snapshot: Snapshot,

    /// Start coordinate text field
    pub start_field: CoordinateField,

    /// End coordinate text field
    pub end_field: CoordinateField,

    /// Current UI settings
    pub ui_settings: UiSettings,

    /// Background Overpass requests
    pub fetcher: RoadFetcher,

    /// Statistics about the last fetch
    pub stats: Stats,

    /// The segment list was replaced or replayed since the last tick, so
    /// the time spent before it must not count towards the reveal
    reveal_restarted: bool,
}

/// UI-specific settings that can be adjusted at runtime
#[derive(Clone)]
pub struct UiSettings {
    /// Road line color
    pub line_color: Color32,

    /// Road line width in pixels
    pub line_width: f32,

    /// Map tiles provider
    pub tiles_provider: TilesProvider,

    /// Draw the padded query box and start/end markers
    pub show_query_bounds: bool,

    /// Apply edits without validation
    pub lenient_input: bool,

    /// Whether the status panel is open
    pub sidebar_open: bool,
}

/// Available map tile providers
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum TilesProvider {
    #[value(name = "carto")]
    CartoPositron,
    #[value(name = "osm")]
    OpenStreetMap,
    #[value(name = "topo")]
    OpenTopoMap,
}

impl TilesProvider {
    pub fn all() -> &'static [Self] {
        &[Self::CartoPositron, Self::OpenStreetMap, Self::OpenTopoMap]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CartoPositron => "CARTO Positron",
            Self::OpenStreetMap => "OpenStreetMap",
            Self::OpenTopoMap => "OpenTopoMap",
        }
    }
}

/// Text of one coordinate input and the reason it was last rejected
#[derive(Clone, Debug)]
pub struct CoordinateField {
    pub text: String,
    pub error: Option<CoordinateError>,
}

impl CoordinateField {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            text: coordinate.to_string(),
            error: None,
        }
    }

    /// Interpret the current text.
    ///
    /// Lenient mode always yields a coordinate (possibly NaN). Strict mode
    /// yields one only for valid text and records the error otherwise.
    pub fn interpret(&mut self, lenient: bool) -> Option<Coordinate> {
        if lenient {
            self.error = None;
            return Some(Coordinate::parse_lenient(&self.text));
        }
        match Coordinate::parse(&self.text) {
            Ok(coordinate) => {
                self.error = None;
                Some(coordinate)
            }
            Err(e) => {
                tracing::debug!("Rejected coordinate {:?}: {}", self.text, e);
                self.error = Some(e);
                None
            }
        }
    }
}

/// Which of the two coordinate fields an edit targets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

/// Outcome of a finished fetch task
#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: u64,
    pub elapsed: Duration,
    pub result: Result<Vec<GeoElement>, DataError>,
}

impl FetchOutcome {
    fn into_event(self) -> Event {
        match self.result {
            Ok(elements) => Event::FetchSucceeded {
                generation: self.generation,
                elements,
            },
            Err(e) => Event::FetchFailed {
                generation: self.generation,
                error: e.to_string(),
            },
        }
    }
}

/// Runs Overpass requests on the async runtime, one at a time.
///
/// Starting a request aborts the one in flight. Results come back through a
/// channel drained by [`RoadFetcher::poll`].
pub struct RoadFetcher {
    client: OverpassClient,
    sender: mpsc::UnboundedSender<FetchOutcome>,
    receiver: mpsc::UnboundedReceiver<FetchOutcome>,
    in_flight: Option<JoinHandle<()>>,
}

impl RoadFetcher {
    pub fn new(client: OverpassClient) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            client,
            sender,
            receiver,
            in_flight: None,
        }
    }

    /// Start fetching `bbox`, aborting any previous request.
    ///
    /// `ctx` is woken up when the result is ready.
    pub fn start(&mut self, generation: u64, bbox: BoundingBox, ctx: egui::Context) {
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }

        tracing::info!("Fetching roads in {} (generation {})", bbox, generation);

        let client = self.client.clone();
        let sender = self.sender.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let started = instant::Instant::now();
            let result = client.fetch_highways(&bbox).await;
            let outcome = FetchOutcome {
                generation,
                elapsed: started.elapsed(),
                result,
            };
            // The receiver only goes away together with the app
            let _ = sender.send(outcome);
            ctx.request_repaint();
        }));
    }

    /// Finished fetches since the last call
    pub fn poll(&mut self) -> Vec<FetchOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.receiver.try_recv() {
            outcomes.push(outcome);
        }
        if self.in_flight.as_ref().is_some_and(JoinHandle::is_finished) {
            self.in_flight = None;
        }
        outcomes
    }

    pub fn endpoint(&self) -> &str {
        self.client.url()
    }
}

impl Drop for RoadFetcher {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

/// Statistics about loaded data
#[derive(Default)]
pub struct Stats {
    /// Duration of the last accepted or failed fetch
    pub last_fetch_time_ms: f64,

    /// Number of fetches issued
    pub fetches_started: usize,

    /// Number of fetches that failed
    pub fetches_failed: usize,

    /// Segments drawn in the last frame
    pub segments_rendered: usize,
}

impl AppState {
    /// Create new application state from CLI settings.
    ///
    /// Returns the state together with the initial fetch to run.
    pub fn new(settings: &Settings, client: OverpassClient) -> (Self, Effect) {
        let (snapshot, effect) = Snapshot::new(
            settings.start,
            settings.end,
            Duration::from_millis(settings.tick_ms),
        );

        let ui_settings = UiSettings {
            line_color: settings.line_color,
            line_width: settings.line_width,
            tiles_provider: settings.tiles,
            show_query_bounds: false,
            lenient_input: settings.lenient_input,
            sidebar_open: true,
        };

        let state = Self {
            start_field: CoordinateField::new(snapshot.start),
            end_field: CoordinateField::new(snapshot.end),
            snapshot,
            ui_settings,
            fetcher: RoadFetcher::new(client),
            stats: Stats::default(),
            reveal_restarted: false,
        };
        (state, effect)
    }

    /// Feed an event through the pipeline and return the requested effect
    pub fn apply(&mut self, event: Event) -> Option<Effect> {
        let replay = matches!(event, Event::RestartReveal);
        let (next, effect) = self.snapshot.update(event);
        if replay || !Arc::ptr_eq(&next.segments, &self.snapshot.segments) {
            self.reveal_restarted = true;
        }
        self.snapshot = next;
        effect
    }

    /// Run an effect returned by [`AppState::apply`]
    pub fn run_effect(&mut self, effect: Effect, ctx: &egui::Context) {
        match effect {
            Effect::Fetch { generation, bbox } => {
                self.stats.fetches_started += 1;
                self.fetcher.start(generation, bbox, ctx.clone());
            }
        }
    }

    /// Re-read the text of a coordinate field after the user edited it
    pub fn field_edited(&mut self, endpoint: Endpoint, ctx: &egui::Context) {
        let lenient = self.ui_settings.lenient_input;
        let (field, make_event): (&mut CoordinateField, fn(Coordinate) -> Event) = match endpoint {
            Endpoint::Start => (&mut self.start_field, Event::SetStart),
            Endpoint::End => (&mut self.end_field, Event::SetEnd),
        };

        if let Some(coordinate) = field.interpret(lenient)
            && let Some(effect) = self.apply(make_event(coordinate))
        {
            self.run_effect(effect, ctx);
        }
    }

    /// Apply finished fetches to the snapshot.
    ///
    /// Only outcomes of the current generation count in the stats; older
    /// ones are dropped by the pipeline anyway.
    pub fn process_fetch_results(&mut self) {
        for outcome in self.fetcher.poll() {
            if outcome.generation == self.snapshot.generation {
                self.stats.last_fetch_time_ms = outcome.elapsed.as_secs_f64() * 1000.0;
                if outcome.result.is_err() {
                    self.stats.fetches_failed += 1;
                }
            }
            let event = outcome.into_event();
            if let Some(effect) = self.apply(event) {
                tracing::warn!("Unexpected effect from a fetch result: {:?}", effect);
            }
        }
    }

    /// Advance the reveal animation by `elapsed`.
    ///
    /// The first tick after a restart only marks its starting point.
    pub fn tick(&mut self, elapsed: Duration) {
        let elapsed = if std::mem::take(&mut self.reveal_restarted) {
            Duration::ZERO
        } else {
            elapsed
        };
        self.apply(Event::Tick(elapsed));
    }

    pub fn restart_reveal(&mut self) {
        self.apply(Event::RestartReveal);
    }

    /// Put both fields back to the coordinates currently in use
    pub fn reset_fields(&mut self) {
        self.start_field = CoordinateField::new(self.snapshot.start);
        self.end_field = CoordinateField::new(self.snapshot.end);
    }
}

impl Stats {
    /// Format the last fetch latency
    pub fn format_fetch_time(&self) -> String {
        if self.last_fetch_time_ms < 1000.0 {
            format!("{:.0} ms", self.last_fetch_time_ms)
        } else {
            format!("{:.1} s", self.last_fetch_time_ms / 1000.0)
        }
    }
}

/// Digits of `n` in groups of three, e.g. `12,345`
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.char_indices() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
