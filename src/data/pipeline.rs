//! Immutable view snapshot and its update function
//!
//! All derived state (bounding box, segments, reveal progress) lives in a
//! [`Snapshot`] that is only ever replaced through [`Snapshot::update`].
//! Side effects are returned as [`Effect`]s for the caller to run.

use super::{BoundingBox, Coordinate, GeoElement, RevealAnimator, Segment, extract_segments};
use std::sync::Arc;
use std::time::Duration;

/// Input to [`Snapshot::update`]
#[derive(Debug, Clone)]
pub enum Event {
    SetStart(Coordinate),
    SetEnd(Coordinate),
    FetchSucceeded {
        generation: u64,
        elements: Vec<GeoElement>,
    },
    FetchFailed {
        generation: u64,
        error: String,
    },
    /// Wall time elapsed since the previous tick
    Tick(Duration),
    /// Replay the reveal animation from the first segment
    RestartReveal,
}

/// Work requested by an update
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch roads in `bbox`; the result must be reported with the same `generation`
    Fetch { generation: u64, bbox: BoundingBox },
}

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub start: Coordinate,
    pub end: Coordinate,
    pub bbox: BoundingBox,
    /// Last accepted fetch result
    pub elements: Arc<[GeoElement]>,
    /// Edges of `elements`, sorted by start point
    pub segments: Arc<[Segment]>,
    pub reveal: RevealAnimator,
    /// Generation of the most recently issued fetch
    pub generation: u64,
    /// Generation still awaiting a result, if any
    pub pending: Option<u64>,
}

impl Snapshot {
    /// Initial snapshot and the fetch for its bounding box
    pub fn new(start: Coordinate, end: Coordinate, tick: Duration) -> (Self, Effect) {
        let bbox = BoundingBox::padded(start, end);
        let snapshot = Self {
            start,
            end,
            bbox,
            elements: Arc::from(Vec::new()),
            segments: Arc::from(Vec::new()),
            reveal: RevealAnimator::new(tick),
            generation: 1,
            pending: Some(1),
        };
        let effect = Effect::Fetch {
            generation: 1,
            bbox,
        };
        (snapshot, effect)
    }

    /// Apply `event`, returning the next snapshot and any requested effect.
    pub fn update(&self, event: Event) -> (Self, Option<Effect>) {
        let mut next = self.clone();
        let effect = match event {
            Event::SetStart(start) => {
                next.start = start;
                next.refresh_bbox()
            }
            Event::SetEnd(end) => {
                next.end = end;
                next.refresh_bbox()
            }
            Event::FetchSucceeded {
                generation,
                elements,
            } => {
                if generation == self.generation {
                    next.pending = None;
                    next.install_elements(elements);
                } else {
                    tracing::debug!(
                        "Discarding stale fetch result (generation {}, current {})",
                        generation,
                        self.generation
                    );
                }
                None
            }
            Event::FetchFailed { generation, error } => {
                if generation == self.generation {
                    tracing::warn!("Error fetching road data: {}", error);
                    next.pending = None;
                } else {
                    tracing::debug!(
                        "Ignoring failure of superseded fetch (generation {}): {}",
                        generation,
                        error
                    );
                }
                None
            }
            Event::Tick(elapsed) => {
                next.reveal.advance(elapsed);
                None
            }
            Event::RestartReveal => {
                next.reveal.restart(next.segments.len());
                None
            }
        };
        (next, effect)
    }

    /// The prefix of `segments` that is currently revealed
    pub fn visible_segments(&self) -> &[Segment] {
        let len = self.reveal.visible_len().min(self.segments.len());
        &self.segments[..len]
    }

    pub fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }

    pub fn way_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, GeoElement::Way(_)))
            .count()
    }

    pub fn node_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, GeoElement::Node(_)))
            .count()
    }

    fn refresh_bbox(&mut self) -> Option<Effect> {
        let bbox = BoundingBox::padded(self.start, self.end);
        if bbox.same_region(&self.bbox) {
            return None;
        }
        self.bbox = bbox;
        self.generation += 1;
        self.pending = Some(self.generation);
        Some(Effect::Fetch {
            generation: self.generation,
            bbox,
        })
    }

    fn install_elements(&mut self, elements: Vec<GeoElement>) {
        let segments = extract_segments(&elements);
        tracing::info!(
            "Loaded {} elements, {} segments",
            elements.len(),
            segments.len()
        );
        self.reveal.restart(segments.len());
        self.elements = Arc::from(elements);
        self.segments = Arc::from(segments);
    }
}
