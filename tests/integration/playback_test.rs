//! End-to-end playback on a virtual clock

use super::helpers::{ms, recording_writer, run_until};
use typewrite::{
    Color, FontSize, LineHandle, Phase, PlaybackOptions, RenderSurface, StyleRecord,
    TypewriterError,
};

fn looping_backspace() -> PlaybackOptions {
    PlaybackOptions {
        continuous: true,
        backspace: true,
        new_line: true,
    }
}

#[test]
fn nate_plus_types_two_stacked_lines() {
    let (mut writer, clock) = recording_writer(250, 125);
    writer
        .add_text(
            "Nate",
            Some(StyleRecord::new().bold(true).italic(true).underline(true)),
        )
        .unwrap();
    writer
        .add_text(
            "+",
            Some(
                StyleRecord::new()
                    .font_size(FontSize::px(24.0))
                    .color(Color::Red)
                    .font_family("Arial"),
            ),
        )
        .unwrap();

    writer.play(PlaybackOptions::default()).unwrap();
    run_until(&mut writer, &clock, ms(5000));

    let surface = writer.surface();
    assert_eq!(surface.line_count(), 2);
    assert_eq!(surface.canvas().line_text(LineHandle::new(0)), "Nate");
    assert_eq!(surface.canvas().line_text(LineHandle::new(1)), "+");
    assert_eq!(
        surface.append_times(),
        vec![ms(0), ms(250), ms(500), ms(750), ms(1250)]
    );
    assert_eq!(surface.removals(), 0);
    assert_eq!(writer.state().phase, Phase::Stopped);
    assert_eq!(writer.state().current_index, 2);
    assert_eq!(writer.pending_actions(), 0);

    let plus = &surface.canvas().line(LineHandle::new(1)).unwrap().glyphs()[0];
    assert_eq!(plus.style.font_size, FontSize::px(24.0));
    assert_eq!(plus.style.color, Some(Color::Red));
    assert!(!plus.style.bold);

    insta::assert_snapshot!(surface.trace().trim_end(), @r"
    [    0ms] layout stacked
    [    0ms] open line 0 for fragment 0 [64px bold italic underline]
    [    0ms] caret on line 0 64px paused
    [    0ms] type 'N' on line 0
    [  250ms] type 'a' on line 0
    [  500ms] type 't' on line 0
    [  750ms] type 'e' on line 0
    [ 1000ms] caret on line 0 64px blinking
    [ 1250ms] open line 1 for fragment 1 [24px red Arial]
    [ 1250ms] caret on line 1 24px paused
    [ 1250ms] type '+' on line 1
    [ 1500ms] caret on line 1 24px blinking
    ");
}

#[test]
fn hi_loops_with_backspace() {
    let (mut writer, clock) = recording_writer(100, 50);
    writer.add_text("Hi", None).unwrap();
    writer.play(looping_backspace()).unwrap();

    run_until(&mut writer, &clock, ms(360));
    assert_eq!(writer.surface().glyph_count(LineHandle::new(0)), 0);
    assert_eq!(writer.state().phase, Phase::Backspacing);

    run_until(&mut writer, &clock, ms(800));
    let surface = writer.surface();
    assert_eq!(
        surface.append_times(),
        vec![ms(0), ms(100), ms(400), ms(500), ms(800)]
    );
    assert_eq!(
        surface.removal_times(),
        vec![ms(300), ms(350), ms(700), ms(750)]
    );
    assert_eq!(surface.line_count(), 1);
    assert_eq!(writer.state().cycles, 2);
    assert_eq!(writer.state().current_index, 0);
    assert_ne!(writer.state().phase, Phase::Stopped);

    insta::assert_snapshot!(surface.trace().trim_end(), @r"
    [    0ms] layout stacked
    [    0ms] open line 0 for fragment 0 [64px]
    [    0ms] caret on line 0 64px paused
    [    0ms] type 'H' on line 0
    [  100ms] type 'i' on line 0
    [  200ms] caret on line 0 64px blinking
    [  300ms] erase 'i' on line 0
    [  350ms] erase 'H' on line 0
    [  400ms] open line 0 for fragment 0 [64px]
    [  400ms] caret on line 0 64px paused
    [  400ms] type 'H' on line 0
    [  500ms] type 'i' on line 0
    [  600ms] caret on line 0 64px blinking
    [  700ms] erase 'i' on line 0
    [  750ms] erase 'H' on line 0
    [  800ms] open line 0 for fragment 0 [64px]
    [  800ms] caret on line 0 64px paused
    [  800ms] type 'H' on line 0
    ");
}

#[test]
fn without_backspace_every_char_is_appended_once() {
    let (mut writer, clock) = recording_writer(10, 10);
    for text in ["one", "", "three", "✓"] {
        writer.add_text(text, None).unwrap();
    }
    writer.play(PlaybackOptions::default()).unwrap();
    run_until(&mut writer, &clock, ms(10_000));

    assert_eq!(writer.surface().appends(), writer.queue().total_chars());
    assert_eq!(writer.surface().removals(), 0);
    assert_eq!(writer.state().fragments_completed, 4);
    assert!(writer.is_finished());
}

#[test]
fn backspacing_removes_what_was_typed() {
    let (mut writer, clock) = recording_writer(10, 5);
    writer.add_text("abc", None).unwrap();
    writer.add_text("de", None).unwrap();
    writer
        .play(PlaybackOptions {
            backspace: true,
            ..Default::default()
        })
        .unwrap();
    run_until(&mut writer, &clock, ms(10_000));

    let surface = writer.surface();
    assert_eq!(surface.appends(), 5);
    assert_eq!(surface.removals(), 5);
    assert_eq!(surface.glyph_count(LineHandle::new(0)), 0);
    assert_eq!(surface.glyph_count(LineHandle::new(1)), 0);
}

#[test]
fn looping_never_stops_on_its_own() {
    let (mut writer, clock) = recording_writer(10, 10);
    writer.add_text("ab", None).unwrap();
    writer.add_text("c", None).unwrap();
    writer
        .play(PlaybackOptions {
            continuous: true,
            ..Default::default()
        })
        .unwrap();

    let cycle = writer.cycle_duration(&PlaybackOptions::default());
    run_until(&mut writer, &clock, cycle * 5);

    assert!(writer.state().is_active());
    assert_eq!(writer.state().cycles, 5);
    assert_eq!(writer.state().fragments_completed, 10);
    // stacked lines are reused on every pass
    assert_eq!(writer.surface().line_count(), 2);
    // the sixth pass has just typed its first glyph
    assert_eq!(
        writer.surface().canvas().line_text(LineHandle::new(0)),
        "abababababa"
    );
}

#[test]
fn nothing_fires_after_the_last_fragment() {
    let (mut writer, clock) = recording_writer(10, 10);
    writer.add_text("x", None).unwrap();
    writer.play(PlaybackOptions::default()).unwrap();
    run_until(&mut writer, &clock, ms(100));
    let events = writer.surface().events().len();

    run_until(&mut writer, &clock, ms(60_000));
    assert_eq!(writer.surface().events().len(), events);
    assert_eq!(writer.pending_actions(), 0);
}

#[test]
fn inline_layout_shares_one_line() {
    let (mut writer, clock) = recording_writer(10, 10);
    writer.add_text("Hello ", None).unwrap();
    writer
        .add_text("world", Some(StyleRecord::new().bold(true)))
        .unwrap();
    writer
        .play(PlaybackOptions {
            new_line: false,
            ..Default::default()
        })
        .unwrap();
    run_until(&mut writer, &clock, ms(1000));

    let canvas = writer.surface().canvas();
    assert_eq!(canvas.line_count(), 1);
    assert_eq!(canvas.line_text(LineHandle::new(0)), "Hello world");
    let glyphs = canvas.line(LineHandle::new(0)).unwrap().glyphs();
    assert!(!glyphs[0].style.bold);
    assert!(glyphs[6].style.bold);
}

#[test]
fn explicit_false_overrides_global_flag() {
    let (mut writer, clock) = recording_writer(10, 10);
    writer.bold();
    writer.add_text("a", None).unwrap();
    writer
        .add_text("b", Some(StyleRecord::new().bold(false)))
        .unwrap();
    writer.play(PlaybackOptions::default()).unwrap();
    run_until(&mut writer, &clock, ms(1000));

    let canvas = writer.surface().canvas();
    assert!(canvas.line(LineHandle::new(0)).unwrap().glyphs()[0].style.bold);
    assert!(!canvas.line(LineHandle::new(1)).unwrap().glyphs()[0].style.bold);
}

#[test]
fn empty_queue_is_reported_and_harmless() {
    let (mut writer, clock) = recording_writer(10, 10);
    assert_eq!(
        writer.play(PlaybackOptions::default()),
        Err(TypewriterError::EmptyQueue)
    );
    run_until(&mut writer, &clock, ms(1000));
    assert!(writer.surface().events().is_empty());
}

#[test]
fn stop_then_play_resumes_from_current_fragment() {
    let (mut writer, clock) = recording_writer(100, 100);
    writer.add_text("ab", None).unwrap();
    writer.add_text("cd", None).unwrap();
    writer.play(PlaybackOptions::default()).unwrap();
    run_until(&mut writer, &clock, ms(350));
    assert_eq!(writer.state().current_index, 1);

    writer.stop();
    writer.play(PlaybackOptions::default()).unwrap();
    run_until(&mut writer, &clock, ms(2000));

    let canvas = writer.surface().canvas();
    assert_eq!(canvas.line_text(LineHandle::new(0)), "ab");
    // the half-typed "c" was cleared before fragment 1 was typed again
    assert_eq!(canvas.line_text(LineHandle::new(1)), "cd");
    assert!(writer.is_finished());
}

#[test]
fn restarted_backspace_fragment_leaves_an_empty_line() {
    let (mut writer, clock) = recording_writer(100, 100);
    writer.add_text("abc", None).unwrap();
    let options = PlaybackOptions {
        backspace: true,
        ..Default::default()
    };
    writer.play(options).unwrap();
    run_until(&mut writer, &clock, ms(150));
    assert_eq!(writer.surface().canvas().line_text(LineHandle::new(0)), "ab");

    writer.stop();
    writer.play(options).unwrap();
    run_until(&mut writer, &clock, ms(5000));

    let surface = writer.surface();
    assert_eq!(surface.canvas().line_text(LineHandle::new(0)), "");
    assert_eq!(surface.appends(), 5);
    assert_eq!(surface.removals(), 5);
    assert!(writer.is_finished());
}

#[test]
fn replay_during_a_session_does_not_duplicate_glyphs() {
    let (mut writer, clock) = recording_writer(100, 100);
    writer.add_text("hello", None).unwrap();
    writer.play(PlaybackOptions::default()).unwrap();
    run_until(&mut writer, &clock, ms(250));

    writer.play(PlaybackOptions::default()).unwrap();
    run_until(&mut writer, &clock, ms(5000));

    assert_eq!(writer.surface().canvas().line_text(LineHandle::new(0)), "hello");
}

#[test]
fn speed_changes_apply_to_the_next_fragment() {
    let (mut writer, clock) = recording_writer(100, 100);
    writer.add_text("ab", None).unwrap();
    writer.add_text("cd", None).unwrap();
    writer.play(PlaybackOptions::default()).unwrap();
    run_until(&mut writer, &clock, ms(50));

    writer.set_typing_speed(ms(10));
    run_until(&mut writer, &clock, ms(1000));

    assert_eq!(
        writer.surface().append_times(),
        vec![ms(0), ms(100), ms(300), ms(310)]
    );
}

#[test]
fn position_is_forwarded_to_the_surface() {
    let (mut writer, _clock) = recording_writer(10, 10);
    writer.position(typewrite::Align::CENTER, typewrite::Justify::RIGHT);

    let canvas = writer.surface().canvas();
    assert_eq!(canvas.align(), typewrite::Align::CENTER);
    assert_eq!(canvas.justify(), typewrite::Justify::RIGHT);
}
