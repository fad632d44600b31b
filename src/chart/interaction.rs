/// Committed interaction state: at most one segment is active.
///
/// The geometry pipeline knows nothing about pointer events; a UI layer owns
/// a `Selection` and folds `ChartEvent`s into it through [`reduce`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub active_segment_id: Option<String>,
}

/// Pointer events forwarded from the rendering surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartEvent {
    Click(String),
    HoverEnter(String),
    HoverLeave,
}

/// How a segment should be drawn given the current interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Neutral,
    Active,
    Dimmed,
}

/// Fold one event into the selection.
///
/// Clicking the active segment clears it, clicking any other makes it the
/// active one. Hover events leave the committed state untouched.
pub fn reduce(selection: &Selection, event: &ChartEvent) -> Selection {
    match event {
        ChartEvent::Click(id) => {
            let active = selection.active_segment_id.as_deref() == Some(id.as_str());
            Selection {
                active_segment_id: if active { None } else { Some(id.clone()) },
            }
        }
        ChartEvent::HoverEnter(_) | ChartEvent::HoverLeave => selection.clone(),
    }
}

/// Derive a segment's rendering emphasis.
///
/// A committed selection wins: everything except the active segment renders
/// dimmed. Without one, the hovered segment (if any) is emphasized and the
/// rest stay neutral.
pub fn emphasis(selection: &Selection, hover: Option<&str>, segment_id: &str) -> Emphasis {
    if let Some(active) = selection.active_segment_id.as_deref() {
        if active == segment_id {
            Emphasis::Active
        } else {
            Emphasis::Dimmed
        }
    } else if hover == Some(segment_id) {
        Emphasis::Active
    } else {
        Emphasis::Neutral
    }
}

/// Generation tags for discarding stale asynchronous layout results.
///
/// A consumer that recomputes layouts off the UI path tags each request via
/// [`begin`](GenerationCounter::begin) and drops any finished result whose
/// tag is no longer [`current`](GenerationCounter::is_current), instead of
/// racing two results against each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationCounter {
    latest: u64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new computation; returns its generation tag
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Whether a finished computation is still the latest one requested
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.latest
    }
}
