//! End-to-end replays against the simulated media element
//!
//! Time is paused, so scripted delays and the idle timer advance
//! deterministically.

use devreel_player::{ListenerId, PlaybackState, PlayerEvent, PlayerInput};
use devreel_player_sim::{run_session, Script, ScriptStep, SimConfig};

fn step(delay_ms: u64, input: PlayerInput) -> ScriptStep {
    ScriptStep { delay_ms, input }
}

fn script(duration: Option<f64>, steps: Vec<ScriptStep>, hold_ms: u64) -> Script {
    Script {
        source: "https://cdn.devreel.dev/clips/demo.mp4".to_string(),
        poster: Some("https://cdn.devreel.dev/clips/demo.jpg".to_string()),
        duration,
        steps,
        hold_ms,
    }
}

fn count(events: &[PlayerEvent], wanted: &PlayerEvent) -> usize {
    events.iter().filter(|event| *event == wanted).count()
}

// =============================================================================
// Playback
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_playback_advances_time() {
    let script = script(
        Some(120.0),
        vec![
            step(0, PlayerInput::TogglePlayPause),
            step(2_000, PlayerInput::PointerMove),
        ],
        100,
    );

    let report = run_session(&script, &SimConfig::default()).await.unwrap();
    let view = report.view;

    assert!(!view.mounted);
    assert_eq!(view.state, PlaybackState::Playing);
    assert!(view.current_time >= 1.75 && view.current_time <= 2.25);
    assert_eq!(view.duration, Some(120.0));
    assert!(view.controls_visible);
    assert_eq!(
        view.poster.as_deref(),
        Some("https://cdn.devreel.dev/clips/demo.jpg")
    );

    assert!(report.events.contains(&PlayerEvent::StateChanged {
        state: PlaybackState::Loading
    }));
    assert!(report.events.contains(&PlayerEvent::StateChanged {
        state: PlaybackState::Playing
    }));
}

#[tokio::test(start_paused = true)]
async fn test_clip_end_returns_to_paused() {
    let script = script(Some(1.0), vec![step(0, PlayerInput::TogglePlayPause)], 2_000);

    let view = run_session(&script, &SimConfig::default())
        .await
        .unwrap()
        .view;

    assert_eq!(view.state, PlaybackState::Paused);
    assert_eq!(view.current_time, 1.0);
    assert_eq!(view.progress_percent, 100.0);
    assert_eq!(view.time_label, "0:01 / 0:01");
    assert!(view.controls_visible);
}

#[tokio::test(start_paused = true)]
async fn test_double_speed_doubles_progress() {
    let script = script(
        Some(60.0),
        vec![
            step(0, PlayerInput::SetSpeed(2.0)),
            step(0, PlayerInput::TogglePlayPause),
        ],
        1_000,
    );

    let report = run_session(&script, &SimConfig::default()).await.unwrap();

    assert_eq!(report.view.speed, 2.0);
    assert!(report.view.current_time >= 1.5 && report.view.current_time <= 2.5);
    assert!(report
        .events
        .contains(&PlayerEvent::SpeedChanged { multiplier: 2.0 }));
}

#[tokio::test(start_paused = true)]
async fn test_autoplay_block_settles_paused() {
    let mut config = SimConfig::default();
    config.media.autoplay_blocked = true;

    let script = script(Some(30.0), vec![step(0, PlayerInput::TogglePlayPause)], 500);
    let report = run_session(&script, &config).await.unwrap();

    assert_eq!(report.view.state, PlaybackState::Paused);
    assert_eq!(report.view.current_time, 0.0);
    assert!(report
        .events
        .iter()
        .any(|event| matches!(event, PlayerEvent::Error { message } if message.starts_with("Play rejected"))));
}

#[tokio::test(start_paused = true)]
async fn test_seek_is_clamped_to_duration() {
    let script = script(Some(120.0), vec![step(0, PlayerInput::Seek(150.0))], 100);

    let view = run_session(&script, &SimConfig::default())
        .await
        .unwrap()
        .view;

    assert_eq!(view.state, PlaybackState::Idle);
    assert_eq!(view.current_time, 120.0);
    assert_eq!(view.time_label, "2:00 / 2:00");
}

// =============================================================================
// Controls
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_controls_hide_once_while_playing() {
    let script = script(Some(600.0), vec![step(0, PlayerInput::TogglePlayPause)], 7_000);

    let report = run_session(&script, &SimConfig::default()).await.unwrap();

    assert_eq!(report.view.state, PlaybackState::Playing);
    assert!(!report.view.controls_visible);
    assert_eq!(
        count(
            &report.events,
            &PlayerEvent::ControlsVisibilityChanged { visible: false }
        ),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn test_configured_hide_delay() {
    let mut config = SimConfig::default();
    config.player.idle_hide_delay_ms = 10_000;

    let script = script(Some(600.0), vec![step(0, PlayerInput::TogglePlayPause)], 5_000);
    let report = run_session(&script, &config).await.unwrap();

    assert!(report.view.controls_visible);
}

#[tokio::test(start_paused = true)]
async fn test_outside_press_closes_settings() {
    let script = script(
        Some(60.0),
        vec![
            step(0, PlayerInput::ToggleSettings),
            step(
                200,
                PlayerInput::DocumentPointerDown {
                    listener: ListenerId(1),
                    inside_panel: false,
                },
            ),
        ],
        100,
    );

    let report = run_session(&script, &SimConfig::default()).await.unwrap();

    assert_eq!(
        report.events,
        vec![
            PlayerEvent::SettingsToggled { open: true },
            PlayerEvent::SettingsToggled { open: false },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_volume_and_fullscreen_survive_to_report() {
    let script = script(
        Some(60.0),
        vec![
            step(0, PlayerInput::SetVolume(0.3)),
            step(0, PlayerInput::ToggleFullscreen),
            step(0, PlayerInput::ToggleMute),
        ],
        100,
    );

    let view = run_session(&script, &SimConfig::default())
        .await
        .unwrap()
        .view;

    assert_eq!(view.volume_level, 0.3);
    assert!(view.muted);
    assert!(view.fullscreen);
}
