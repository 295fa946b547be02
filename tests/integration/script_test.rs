//! Integration tests for TOML scripts

use super::helpers::{demos_dir, ms, run_until, temp_script};
use typewrite::script::Script;
use typewrite::{
    Color, Config, FontSize, Justify, LineHandle, ManualClock, PlaybackOptions,
    RecordingSurface, RenderSurface,
};

#[test]
fn nate_demo_loads_and_summarizes() {
    let script = Script::load(&demos_dir().join("nate.toml")).unwrap();
    let summary = script.summary(&Config::default());

    assert_eq!(summary.fragments, 5);
    assert_eq!(summary.characters, 14);
    // every fragment: len·250 + 250
    assert_eq!(summary.cycle_ms, 14 * 250 + 5 * 250);
    assert_eq!(summary.options, PlaybackOptions::default());
}

#[test]
fn nate_demo_plays_to_the_end() {
    let script = Script::load(&demos_dir().join("nate.toml")).unwrap();
    let clock = ManualClock::new();
    let mut writer = script
        .build(RecordingSurface::new(clock.clone()), clock.clone(), &Config::default())
        .unwrap();
    writer.play(script.options).unwrap();
    run_until(&mut writer, &clock, ms(10_000));

    assert!(writer.is_finished());
    let canvas = writer.surface().canvas();
    assert_eq!(canvas.justify(), Justify::RIGHT);
    assert_eq!(canvas.line_count(), 5);
    let texts: Vec<String> = canvas.lines().iter().map(|line| line.text()).collect();
    assert_eq!(texts, ["Nate", "+", "Bridge", "=", "<3"]);

    let heart = &canvas.line(LineHandle::new(4)).unwrap().glyphs()[0];
    assert_eq!(heart.style.font_size, FontSize::px(48.0));
    assert_eq!(heart.style.color, Some(Color::Rgb(255, 192, 203)));
    let bridge = &canvas.line(LineHandle::new(2)).unwrap().glyphs()[0];
    assert_eq!(bridge.style.font_size, FontSize::DEFAULT);
    assert_eq!(bridge.style.color, None);
}

#[test]
fn loop_demo_uses_script_timing_and_inline_layout() {
    let script = Script::load(&demos_dir().join("loop.toml")).unwrap();
    let clock = ManualClock::new();
    let mut writer = script
        .build(RecordingSurface::new(clock.clone()), clock.clone(), &Config::default())
        .unwrap();
    assert_eq!(writer.timing().typing_speed(), ms(120));
    assert_eq!(writer.timing().backspace_speed(), ms(60));

    writer.play(script.options).unwrap();
    // "Hello": 5·120 + 5·60 + 120
    run_until(&mut writer, &clock, ms(1020));
    assert_eq!(writer.surface().line_count(), 1);
    assert_eq!(writer.surface().glyph_count(LineHandle::new(0)), 1);
    assert_eq!(writer.surface().canvas().line_text(LineHandle::new(0)), "w");
}

#[test]
fn trace_of_one_backspacing_pass() {
    let (_dir, path) = temp_script(
        r##"
[position]
align = "left"
justify = "left"

[options]
backspace = true
new_line = false

[timing]
typing_speed_ms = 100
backspace_speed_ms = 50

[[fragment]]
text = "ok"
color = "#ff8800"
"##,
    );
    let trace = Script::load(&path).unwrap().trace(&Config::default()).unwrap();

    insta::assert_snapshot!(trace.trim_end(), @r"
    [    0ms] position align=left justify=left
    [    0ms] layout inline
    [    0ms] open line 0 for fragment 0 [64px #ff8800]
    [    0ms] caret on line 0 64px paused
    [    0ms] type 'o' on line 0
    [  100ms] type 'k' on line 0
    [  200ms] caret on line 0 64px blinking
    [  300ms] erase 'k' on line 0
    [  350ms] erase 'o' on line 0
    ");
}

#[test]
fn config_timing_applies_when_script_has_none() {
    let (_dir, path) = temp_script("[[fragment]]\ntext = \"abc\"\n");
    let mut config = Config::default();
    config.timing.typing_speed_ms = 40;

    let summary = Script::load(&path).unwrap().summary(&config);
    assert_eq!(summary.typing_speed_ms, 40);
    assert_eq!(summary.cycle_ms, 3 * 40 + 40);
}

#[test]
fn missing_script_reports_the_path() {
    let err = Script::load(&demos_dir().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn bad_font_size_is_rejected() {
    let (_dir, path) = temp_script("[[fragment]]\ntext = \"a\"\nfont_size = \"12furlongs\"\n");
    let err = Script::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("12furlongs"), "{:#}", err);
}

#[test]
fn misspelled_style_key_names_the_fragment() {
    let (_dir, path) =
        temp_script("[[fragment]]\ntext = \"a\"\n\n[[fragment]]\ntext = \"b\"\ncolour = \"red\"\n");
    let err = Script::load(&path).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("fragment 1"), "{}", message);
    assert!(message.contains("colour"), "{}", message);
}
