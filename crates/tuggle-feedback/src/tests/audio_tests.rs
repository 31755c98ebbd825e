use super::*;
use tuggle_foundation::ManualClock;

fn controller(clock: &ManualClock) -> AudioController {
    let mut audio = AudioController::new(Box::new(SilentAudio::new(Rc::new(clock.clone()))));
    audio.register_sound("oof", Sound::new("sounds/oof.ogg", Duration::from_millis(500)));
    audio
}

#[test]
fn unknown_key_fails_to_play() {
    let clock = ManualClock::new();
    let mut audio = controller(&clock);
    assert!(!audio.play("missing", false, true));
    assert!(!audio.is_playing("missing"));
}

#[test]
fn sound_plays_for_its_duration() {
    let clock = ManualClock::new();
    let mut audio = controller(&clock);

    assert!(audio.play("oof", false, true));
    assert!(audio.is_playing("oof"));

    clock.advance_millis(499);
    assert!(audio.is_playing("oof"));
    clock.advance_millis(1);
    assert!(!audio.is_playing("oof"));
}

#[test]
fn replay_restarts_from_the_beginning() {
    let clock = ManualClock::new();
    let mut audio = controller(&clock);
    audio.play("oof", false, true);
    clock.advance_millis(400);
    audio.play("oof", false, true);
    clock.advance_millis(400);
    assert!(audio.is_playing("oof"));
}

#[test]
fn looping_sound_plays_until_stopped() {
    let clock = ManualClock::new();
    let mut audio = controller(&clock);
    audio.play("oof", true, true);
    clock.advance_millis(5_000);
    assert!(audio.is_playing("oof"));

    audio.stop_sound("oof");
    assert!(!audio.is_playing("oof"));
    audio.clear("oof");
}

#[test]
fn volume_is_clamped() {
    let clock = ManualClock::new();
    let mut audio = controller(&clock);
    audio.set_volume(3.0);
    assert_eq!(audio.volume(), 1.0);
    audio.set_volume(-1.0);
    assert_eq!(audio.volume(), 0.0);
}

#[test]
fn keys_keep_registration_order() {
    let clock = ManualClock::new();
    let mut audio = controller(&clock);
    audio.register_sound("sans", Sound::new("sounds/sans.ogg", Duration::from_secs(1)));
    assert_eq!(audio.sound_keys().collect::<Vec<_>>(), vec!["oof", "sans"]);

    audio.play("oof", true, true);
    audio.play("sans", true, true);
    audio.stop_all();
    assert!(!audio.is_playing("oof") && !audio.is_playing("sans"));
}
