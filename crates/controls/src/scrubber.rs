//! Scrubber facade: archive refreshes and input in, render frames out

use serde::{Deserialize, Serialize};
use timeline_axis::{
    hover_label_placement, hover_text, interval_spans, pointer_percent, progress_percent,
    select_unit, ChronoFormatter, HoverLabelPlacement, IntervalSpan, TickGenerator, TickMark,
    TimeFormatter, TimeUnit,
};
use timeline_config::TimelineConfig;
use timeline_shared::events::{InputEvent, PointerEvent, TrackRect, WheelEvent};
use timeline_shared::{
    ArchiveId, ArchiveInfo, InteractionConfig, LabelConfig, TimelineError, TimelineResult,
    Timestamp,
};
use timeline_viewport::{Viewport, ViewportStateMachine};

use crate::gesture::{GestureEvent, GestureInterpreter};
use crate::player::PlayerHost;

/// What a wheel event did
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelOutcome {
    /// The host should cancel default page scrolling
    pub suppress_default: bool,
    pub gesture: Option<GestureEvent>,
    /// The viewport moved
    pub changed: bool,
}

/// Everything a renderer needs for one paint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrubberFrame {
    pub viewport: Viewport,
    pub ticks: Vec<TickMark>,
    pub unit: TimeUnit,
    pub seconds_per_pixel: f64,
    pub hover: Option<Timestamp>,
    pub hover_text: Option<String>,
    pub hover_percent: Option<f64>,
    /// `None` while the playback position is outside the window
    pub pointer_percent: Option<f64>,
    pub progress_percent: f64,
}

pub struct Scrubber {
    machine: ViewportStateMachine,
    gestures: GestureInterpreter,
    formatter: Box<dyn TimeFormatter>,
    labels: LabelConfig,
    archive_id: Option<ArchiveId>,
    /// Hover position as a track offset, so it follows the window
    hover_px: Option<f64>,
}

impl Scrubber {
    pub fn new(
        interaction: &InteractionConfig,
        labels: LabelConfig,
        formatter: Box<dyn TimeFormatter>,
        track: TrackRect,
    ) -> TimelineResult<Self> {
        check_track(&track)?;
        Ok(Self {
            machine: ViewportStateMachine::new(interaction),
            gestures: GestureInterpreter::new(track),
            formatter,
            labels,
            archive_id: None,
            hover_px: None,
        })
    }

    pub fn from_config(config: &TimelineConfig, track: TrackRect) -> TimelineResult<Self> {
        let formatter = Box::new(ChronoFormatter::from_config(&config.labels));
        Self::new(&config.interaction, config.labels.clone(), formatter, track)
    }

    /// Track resized or moved
    pub fn set_track(&mut self, track: TrackRect) -> TimelineResult<()> {
        check_track(&track)?;
        log::debug!("[Scrubber] Track set to {track:?}");
        self.gestures.set_track(track);
        self.hover_px = None;
        Ok(())
    }

    pub fn track(&self) -> TrackRect {
        self.gestures.track()
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.machine.viewport()
    }

    pub fn machine(&self) -> &ViewportStateMachine {
        &self.machine
    }

    pub fn archive_id(&self) -> Option<ArchiveId> {
        self.archive_id
    }

    /// Timestamp under the pointer, if it is over the track
    pub fn hover(&self) -> Option<Timestamp> {
        let window = self.machine.viewport()?.window();
        self.gestures.timestamp_at_offset(self.hover_px?, window)
    }

    /// Apply a host refresh. A different archive starts over from full view.
    pub fn update_archive(&mut self, info: ArchiveInfo) -> bool {
        let mut changed = false;
        if self.archive_id.is_some_and(|id| id != info.id) {
            let id = info.id.0;
            log::info!("[Scrubber] Archive switched to {id}, resetting viewport");
            changed |= self.machine.reset();
            self.hover_px = None;
        }
        self.archive_id = Some(info.id);
        changed | self.machine.update_archive(info.bounds)
    }

    pub fn handle_wheel(&mut self, event: &WheelEvent) -> WheelOutcome {
        self.hover_px = self.gestures.track().offset_of(event.client_x);
        let gesture = self.gestures.interpret_wheel(event);
        let changed = match gesture {
            Some(gesture) => self.apply_gesture(gesture),
            None => false,
        };
        WheelOutcome {
            suppress_default: GestureInterpreter::suppress_default_scroll(event),
            gesture,
            changed,
        }
    }

    /// Track hover and clicks; returns the seek target if the event seeked
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        player: &mut dyn PlayerHost,
    ) -> Option<Timestamp> {
        match *event {
            PointerEvent::Moved { client_x } => {
                self.hover_px = self.gestures.track().offset_of(client_x);
            }
            PointerEvent::Left => {
                self.hover_px = None;
            }
            _ => {}
        }

        let Some(GestureEvent::Seek { position_px }) = self.gestures.handle_pointer(event) else {
            return None;
        };
        let window = self.machine.viewport()?.window();
        let target = self.gestures.timestamp_at_offset(position_px, window)?;
        log::debug!("[Scrubber] Seek to {target}");
        player.seek(target);
        Some(target)
    }

    /// One refresh tick: the archive snapshot is applied before the input
    /// queued during the same tick.
    pub fn tick<I>(
        &mut self,
        archive: Option<ArchiveInfo>,
        inputs: I,
        player: &mut dyn PlayerHost,
    ) -> bool
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let mut changed = match archive {
            Some(info) => self.update_archive(info),
            None => false,
        };
        for input in inputs {
            match input {
                InputEvent::Wheel(wheel) => changed |= self.handle_wheel(&wheel).changed,
                InputEvent::Pointer(pointer) => {
                    self.handle_pointer(&pointer, player);
                }
            }
        }
        changed
    }

    /// Buffered ranges or gaps positioned over the archive
    pub fn interval_spans(&self, intervals: &[(Timestamp, Timestamp)]) -> Vec<IntervalSpan> {
        match self.machine.bounds() {
            Some(bounds) => interval_spans(intervals, bounds),
            None => Vec::new(),
        }
    }

    /// Where to draw a hover label of `label_width_px`
    pub fn hover_label(&self, label_width_px: f64) -> Option<HoverLabelPlacement> {
        let track = self.gestures.track();
        let percent = 100.0 * self.hover_px? / track.width;
        Some(hover_label_placement(percent, label_width_px, track.width))
    }

    pub fn frame(&self, player: &dyn PlayerHost) -> Option<ScrubberFrame> {
        let viewport = self.machine.viewport()?;
        let window = viewport.window();
        let track = self.gestures.track();
        let seconds_per_pixel = window.seconds_per_pixel(track.width)?;
        let unit = select_unit(seconds_per_pixel);
        let formatter = self.formatter.as_ref();
        let ticks = TickGenerator::new(formatter, &self.labels).generate(window, unit);

        let hover = self.hover();
        let position = player.playback_position();
        let frame = ScrubberFrame {
            viewport,
            ticks,
            unit,
            seconds_per_pixel,
            hover,
            hover_text: hover.map(|ts| hover_text(formatter, &self.labels, ts)),
            hover_percent: self.hover_px.map(|px| 100.0 * px / track.width),
            pointer_percent: pointer_percent(position, window),
            progress_percent: progress_percent(position, player.is_live(), window),
        };
        log::debug!(
            "[Scrubber] left {} right {} spp {:.3} visible {:.1}s, {} ticks",
            window.t0,
            window.tn,
            seconds_per_pixel,
            window.width_seconds(),
            frame.ticks.len()
        );
        Some(frame)
    }

    fn apply_gesture(&mut self, gesture: GestureEvent) -> bool {
        let Some(window) = self.machine.viewport().map(|v| v.window()) else {
            return false;
        };
        let anchor_at = |px| self.gestures.timestamp_at_offset(px, window);
        match gesture {
            GestureEvent::ZoomIn { anchor_px } => match anchor_at(anchor_px) {
                Some(anchor) => self.machine.zoom_in(anchor),
                None => false,
            },
            GestureEvent::ZoomOut { anchor_px } => match anchor_at(anchor_px) {
                Some(anchor) => self.machine.zoom_out(anchor),
                None => false,
            },
            GestureEvent::PanLeft => self.machine.pan_left(),
            GestureEvent::PanRight => self.machine.pan_right(),
            // Seeking moves the player, not the viewport
            GestureEvent::Seek { .. } => false,
        }
    }
}

fn check_track(track: &TrackRect) -> TimelineResult<()> {
    if !track.width.is_finite() || track.width <= 0.0 || !track.left.is_finite() {
        return Err(TimelineError::InvalidTrack { width: track.width });
    }
    Ok(())
}
