use super::*;
use crate::foundation::core::Rgba8;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 1,
        palette: Palette::new(vec![
            Rgba8::opaque(255, 255, 255),
            Rgba8::opaque(0, 0, 0),
            Rgba8::transparent(),
        ])
        .unwrap(),
        frame_delay_ms: 40,
    }
}

#[test]
fn in_memory_sink_captures_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    let f = Frame::from_pixels(2, 1, vec![0, 1]).unwrap();
    sink.push_frame(FrameIndex(0), &f).unwrap();
    sink.push_frame(FrameIndex(1), &f).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.config().map(|c| c.frame_delay_ms), Some(40));
    assert!(sink.is_ended());
}

#[test]
fn out_of_order_frames_are_rejected() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    let f = Frame::from_pixels(2, 1, vec![0, 1]).unwrap();
    sink.push_frame(FrameIndex(3), &f).unwrap();
    assert!(sink.push_frame(FrameIndex(3), &f).is_err());
    assert!(sink.push_frame(FrameIndex(1), &f).is_err());
}

#[test]
fn zero_sized_config_is_rejected() {
    let mut sink = InMemorySink::new();
    let bad = SinkConfig { width: 0, ..cfg() };
    assert!(matches!(
        sink.begin(bad),
        Err(RoadsError::CanvasSizeInvalid(_))
    ));
}

#[test]
fn ensure_parent_dir_creates_nested_dirs() {
    let path = std::path::PathBuf::from("target")
        .join("unit_sink")
        .join("a")
        .join("b")
        .join("out.gif");
    ensure_parent_dir(&path).unwrap();
    assert!(path.parent().unwrap().is_dir());
    ensure_parent_dir(std::path::Path::new("bare.gif")).unwrap();
}
