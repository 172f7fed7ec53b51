use std::io::Write;

use penwriter::config::Config;
use penwriter::{
    FontError, FontTable, LayoutError, LayoutParams, MalformedReason, Session, SessionError,
    WriterSink, render, render_text, scale,
};
use tempfile::NamedTempFile;

const TICK_FONT: &str = "\
999 32 1
18 0 0
999 65 3
0 0 0
9 18 1
18 0 0
";

fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

fn gcode(session: Session<WriterSink<Vec<u8>>>) -> String {
    String::from_utf8(session.into_sink().into_inner()).expect("utf8")
}

#[test]
fn font_file_to_gcode() {
    let file = temp_file(TICK_FONT);
    let font = scale(&FontTable::load(file.path()).expect("font loads"), 9.0).expect("height");

    let mut session = Session::new(WriterSink::new(Vec::new()));
    session.draw(render_text("A A", &font)).expect("fits");

    assert_eq!(
        gcode(session),
        "G1 X0 Y0 F1000\nM3\nS0\n\
         G0 X0 Y-9\nS1000\nG1 X4 Y0\nS0\nG0 X9 Y-9\n\
         G0 X18 Y-9\nS1000\nG1 X22 Y0\nS0\nG0 X27 Y-9\n\
         G0 X0 Y0\n"
    );
}

#[test]
fn one_font_serves_many_texts() {
    let font = scale(&FontTable::parse(TICK_FONT).expect("font parses"), 5.0).expect("height");
    let first: Vec<_> = render_text("AA", &font).collect();
    let second: Vec<_> = render_text("AA", &font).collect();
    assert_eq!(first, second);
}

#[test]
fn malformed_font_file() {
    let file = temp_file("999 65 2\n0 0 0\n");
    let err = FontTable::load(file.path()).unwrap_err();
    assert!(!err.is_load_error());
    assert!(matches!(
        err,
        FontError::Malformed {
            line: 1,
            reason: MalformedReason::StrokeCountMismatch { code: 65, expected: 2, found: 1 },
        }
    ));
}

#[test]
fn text_too_long_for_the_page_keeps_partial_output() {
    let font = scale(&FontTable::parse(TICK_FONT).expect("font parses"), 10.0).expect("height");
    let text = "A ".repeat(60);

    let mut session = Session::new(WriterSink::new(Vec::new()));
    let err = session
        .draw(render(text.as_str(), &font, LayoutParams::new(10.0)))
        .unwrap_err();

    match &err {
        SessionError::Layout {
            source: LayoutError::VerticalLimitExceeded { limit, .. },
            ..
        } => assert_eq!(*limit, -100),
        other => panic!("unexpected error {other:?}"),
    }

    let sent = err.sent();
    let out = gcode(session);
    assert_eq!(out.lines().count(), sent);
    assert!(out.contains("G0 X0 Y-100\n"));
    assert!(!out.ends_with("G0 X0 Y0\n"));
}

#[test]
fn config_file_drives_layout() {
    let font_file = temp_file(TICK_FONT);
    let config_file = temp_file(&format!(
        "[font]\npath = {:?}\n\n[page]\nmax_line_width = 30\n",
        font_file.path()
    ));

    let config = Config::load(config_file.path()).expect("config loads");
    let font = scale(&config.load_font().expect("font loads"), 10.0).expect("height");
    let out: Vec<_> = render("AA AA", &font, config.layout_params(10.0))
        .collect::<Result<_, _>>()
        .expect("fits");

    assert!(out.contains(&penwriter::MotionInstruction::MoveTo { x: 0, y: -25 }));
}

#[test]
fn missing_config_file() {
    assert!(Config::load("/no/such/penwriter.toml").is_err());
}
