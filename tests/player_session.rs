//! Player session integration tests
//!
//! Drive a full screen session through the public API with a silent,
//! manually clocked engine.

use std::path::PathBuf;
use std::sync::Arc;

use dialogo::player::{AudioSource, EngineStatus, NullEngine, PlaybackController, PlayerError, Transport};
use dialogo::transcript::{load_transcript, parse_transcript, Language, Timeline};
use dialogo::view::TextRenderer;
use dialogo::{PlayerScreen, UserAction};

const DATASET: &str = r#"{
    "pause": 500,
    "speakers": [
        { "name": "A", "phrases": [ { "words": { "en": "one", "es": "uno" }, "time": 2000 } ] },
        { "name": "B", "phrases": [
            { "words": { "en": "two", "es": "dos" }, "time": 1000 },
            { "words": { "en": "three", "es": "tres" }, "time": 1500 }
        ] }
    ]
}"#;

fn timeline() -> Arc<Timeline> {
    Arc::new(Timeline::build(&parse_transcript(DATASET).unwrap()))
}

fn session() -> PlayerScreen<NullEngine> {
    let mut screen = PlayerScreen::new(
        timeline(),
        Language::En,
        Transport::new(),
        TextRenderer::new(48, 10),
    );
    screen
        .mount(NullEngine::manual(), &AudioSource::Silence(6000))
        .unwrap();
    screen
}

fn advance(screen: &mut PlayerScreen<NullEngine>, ms: u64) {
    screen.engine().unwrap().advance(ms);
    screen.tick();
}

#[test]
fn test_interleaved_timeline_from_json() {
    let timeline = timeline();
    let windows: Vec<(&str, u64, u64)> = timeline
        .phrases()
        .iter()
        .map(|p| (p.speaker.as_str(), p.start_time, p.end_time))
        .collect();
    assert_eq!(
        windows,
        vec![("A", 0, 2000), ("B", 2500, 3500), ("B", 4000, 5500)]
    );
}

#[test]
fn test_bundled_dialog_loads() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/dialog.json");
    let data = load_transcript(&path).unwrap();
    let timeline = Timeline::build(&data);
    assert_eq!(timeline.len(), 6);
    assert_eq!(timeline.phrases()[1].speaker, "Maria");
    assert_eq!(timeline.phrases()[1].start_time, 2900);
}

#[test]
fn test_play_through_to_end_and_replay() {
    let mut screen = session();
    screen.handle(UserAction::TogglePlay);
    assert!(screen.state().is_playing);

    advance(&mut screen, 3000);
    assert_eq!(screen.state().current_phrase_index, 1);

    advance(&mut screen, 4000);
    assert_eq!(screen.state().current_time, 6000);
    assert!(!screen.state().is_playing);
    assert!(screen.state().is_at_end());

    // Replay from the end starts over at phrase 0
    screen.handle(UserAction::TogglePlay);
    assert!(screen.state().is_playing);
    assert_eq!(screen.state().current_time, 0);
    assert_eq!(screen.state().current_phrase_index, 0);
    advance(&mut screen, 100);
    assert_eq!(screen.state().current_time, 100);
}

#[test]
fn test_navigation() {
    let mut screen = session();
    screen.handle(UserAction::TogglePlay);

    // Forward from the last phrase wraps to the first
    screen.handle(UserAction::TapPhrase(2));
    advance(&mut screen, 200);
    screen.handle(UserAction::Forward);
    assert_eq!(screen.state().current_phrase_index, 0);
    assert_eq!(screen.state().current_time, 0);

    // Within the first second of phrase 1, rewind goes back to phrase 0
    screen.handle(UserAction::TapPhrase(1));
    advance(&mut screen, 500);
    screen.handle(UserAction::Rewind);
    assert_eq!(screen.state().current_phrase_index, 0);
    assert_eq!(screen.state().current_time, 0);

    // In a silence gap rewind returns to the start
    advance(&mut screen, 2200);
    assert_eq!(screen.state().current_time, 2200);
    screen.handle(UserAction::Rewind);
    assert_eq!(screen.state().current_time, 0);
    assert_eq!(screen.notice(), None);
}

#[test]
fn test_status_after_teardown_is_ignored() {
    let mut controller: PlaybackController<NullEngine> = PlaybackController::new(timeline());
    controller
        .load(NullEngine::manual(), &AudioSource::Silence(6000))
        .unwrap();
    let liveness = controller.liveness();

    controller.teardown().unwrap();
    assert!(!liveness.is_alive());

    let late = EngineStatus {
        position_ms: 3000,
        duration_ms: 6000,
        is_playing: true,
        did_just_finish: false,
    };
    assert!(!controller.on_status(&late));
    assert_eq!(controller.state().current_time, 0);
    assert_eq!(controller.state().current_phrase_index, 0);
    assert_eq!(controller.play(), Err(PlayerError::NotReady));
}

#[test]
fn test_failed_load_leaves_inert_screen() {
    let mut screen: PlayerScreen<NullEngine> = PlayerScreen::new(
        timeline(),
        Language::Es,
        Transport::new(),
        TextRenderer::new(48, 10),
    );
    assert!(screen
        .mount(NullEngine::manual(), &AudioSource::file("/missing/dialog.ogg"))
        .is_err());

    for action in [UserAction::TogglePlay, UserAction::Rewind, UserAction::Forward] {
        assert!(screen.handle(action));
        assert_eq!(screen.notice(), Some(PlayerError::NotReady.to_string().as_str()));
    }
    assert!(!screen.tick());

    let frame = screen.frame();
    assert!(frame.contains("es: uno"));
    assert!(frame.contains("0:00"));
}
