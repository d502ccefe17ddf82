//! Rolling archive demonstration
//!
//! A three day archive advances one second per tick while a live player
//! follows its end. A few scripted wheel gestures and a click show how the
//! window re-anchors.

use timeline_config::TimelineConfig;
use timeline_controls::{PlayerState, Scrubber, ScrubberFrame};
use timeline_shared::events::{
    InputEvent, Modifiers, PointerEvent, ScrollMetrics, TrackRect, WheelEvent,
};
use timeline_shared::{ArchiveBounds, ArchiveId, ArchiveInfo};

const ARCHIVE_START: i64 = 1_569_956_112_000;
const ARCHIVE_END: i64 = 1_570_215_312_000;
const TRACK_WIDTH: f64 = 1200.0;

fn wheel(client_x: f64, delta_y: f64, ctrl: bool) -> InputEvent {
    InputEvent::Wheel(WheelEvent {
        client_x,
        delta_y,
        modifiers: Modifiers { ctrl, meta: false },
        scroll: ScrollMetrics::default(),
    })
}

fn click(client_x: f64) -> Vec<InputEvent> {
    vec![
        InputEvent::Pointer(PointerEvent::Pressed { client_x }),
        InputEvent::Pointer(PointerEvent::Released {
            client_x,
            modifiers: Modifiers::NONE,
        }),
    ]
}

fn print_frame(step: i64, frame: &ScrubberFrame) {
    let viewport = &frame.viewport;
    let ticks = &frame.ticks;
    let labels: Vec<&str> = ticks.iter().filter_map(|t| t.label.as_deref()).collect();
    println!(
        "tick {step:>2}: [{}, {}] left={} right={} zoomed={} spp={:.3}",
        viewport.t0,
        viewport.tn,
        viewport.attached_to_left,
        viewport.attached_to_right,
        viewport.zoomed,
        frame.seconds_per_pixel
    );
    println!(
        "         unit {}s/{}s, {} marks, labels {:?}",
        frame.unit.major, frame.unit.minor, ticks.len(), labels
    );
    println!(
        "         pointer {:?} progress {:.1}% hover {:?}",
        frame.pointer_percent, frame.progress_percent, frame.hover_text
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Timeline Scrubber Rolling Archive Demo\n");

    let mut config = TimelineConfig::default();
    config.labels.utc_offset_minutes = Some(180);
    let poll_interval = config.refresh.archive_poll_interval_ms as i64;

    let mut scrubber = Scrubber::from_config(&config, TrackRect::new(0.0, TRACK_WIDTH))?;
    let mut player = PlayerState::live(ARCHIVE_END);
    let archive = ArchiveId::new();

    for step in 0..12 {
        let drift = step * poll_interval;
        let bounds = ArchiveBounds::try_new(ARCHIVE_START + drift, ARCHIVE_END + drift)?;
        player.follow(bounds.end);

        let inputs = match step {
            2 | 3 | 4 => vec![wheel(TRACK_WIDTH, -120.0, false)],
            6 => vec![wheel(TRACK_WIDTH / 2.0, 120.0, true)],
            8 => vec![wheel(TRACK_WIDTH / 3.0, -120.0, false)],
            10 => click(TRACK_WIDTH / 4.0),
            _ => Vec::new(),
        };

        scrubber.tick(Some(ArchiveInfo::new(archive, bounds)), inputs, &mut player);
        if let Some(frame) = scrubber.frame(&player) {
            print_frame(step, &frame);
        }
    }

    println!("\nPlayer after click: {player:?}");
    Ok(())
}
