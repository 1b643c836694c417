use super::*;

#[test]
fn parses_hex_and_named_colors() {
    assert_eq!(parse_color("#fff").unwrap(), Rgba8::opaque(255, 255, 255));
    assert_eq!(parse_color("#ff8800").unwrap(), Rgba8::opaque(255, 136, 0));
    assert_eq!(
        parse_color("#0000ff80").unwrap(),
        Rgba8 {
            r: 0,
            g: 0,
            b: 255,
            a: 128
        }
    );
    assert_eq!(parse_color("Yellow").unwrap(), Rgba8::opaque(255, 255, 0));
    assert!(parse_color("#12345").is_err());
    assert!(parse_color("#ggg").is_err());
    assert!(parse_color("octarine").is_err());
}

#[test]
fn positions_default_to_ends_and_spread_evenly() {
    let scheme: ColorScheme = "red,yellow@10%,green,blue".parse().unwrap();
    let pos: Vec<f64> = scheme.stops.iter().map(|s| s.1).collect();
    assert_eq!(pos[0], 0.0);
    assert!((pos[1] - 0.1).abs() < 1e-12);
    assert!((pos[2] - 0.55).abs() < 1e-12);
    assert_eq!(pos[3], 1.0);
}

#[test]
fn positions_never_go_backwards() {
    let scheme: ColorScheme = "red@.5,blue@.2".parse().unwrap();
    assert_eq!(scheme.stops[1].1, 0.5);
    assert_eq!(scheme.sample(0.7), Rgba8::opaque(0, 0, 255));
    assert_eq!(scheme.sample(0.1), Rgba8::opaque(255, 0, 0));
}

#[test]
fn sampling_interpolates_linearly() {
    let scheme: ColorScheme = "#000,#fff".parse().unwrap();
    assert_eq!(scheme.sample(0.0), Rgba8::opaque(0, 0, 0));
    assert_eq!(scheme.sample(0.5), Rgba8::opaque(128, 128, 128));
    assert_eq!(scheme.sample(1.0), Rgba8::opaque(255, 255, 255));
    assert_eq!(scheme.sample(2.0), Rgba8::opaque(255, 255, 255));
}

#[test]
fn rejects_malformed_schemes() {
    assert!("".parse::<ColorScheme>().is_err());
    assert!("red@x".parse::<ColorScheme>().is_err());
    assert!("red,,blue".parse::<ColorScheme>().is_err());
}

#[test]
fn default_scheme_builds_full_palette() {
    let pal = ColorScheme::default().palette(DEFAULT_LEVELS).unwrap();
    assert_eq!(pal.len(), 256);
    assert_eq!(pal.levels(), 255);
    assert_eq!(pal.color(0), Rgba8::opaque(255, 255, 255));
    assert_eq!(pal.color(pal.background_index()), Rgba8::opaque(0, 0, 17));
    assert_eq!(pal.transparent_index(), 255);
    assert_eq!(pal.color(pal.transparent_index()), Rgba8::transparent());
}

#[test]
fn palette_size_bounds() {
    assert!(Palette::new(vec![Rgba8::opaque(0, 0, 0)]).is_err());
    assert!(Palette::new(vec![Rgba8::opaque(0, 0, 0); 257]).is_err());
    assert!(ColorScheme::default().palette(0).is_err());
    assert!(ColorScheme::default().palette(256).is_err());
    assert_eq!(ColorScheme::default().palette(1).unwrap().len(), 2);
}

#[test]
fn ink_index_spans_the_levels() {
    let pal = ColorScheme::default().palette(DEFAULT_LEVELS).unwrap();
    assert_eq!(pal.ink_index(0.0), 0);
    assert_eq!(pal.ink_index(1.0), pal.background_index());
    assert_eq!(pal.ink_index(0.5), 127);
    assert_eq!(pal.ink_index(0.9), 229);
    assert_eq!(pal.ink_index(0.999), 254);
    assert_eq!(pal.glow_limit(), 128);

    let tiny = Palette::new(vec![
        Rgba8::opaque(0, 0, 0),
        Rgba8::opaque(255, 255, 255),
        Rgba8::transparent(),
    ])
    .unwrap();
    assert_eq!(tiny.ink_index(0.0), 0);
    assert_eq!(tiny.ink_index(0.49), 0);
    assert_eq!(tiny.ink_index(0.99), 1);
    assert_eq!(tiny.ink_index(1.0), tiny.background_index());
    assert_eq!(tiny.glow_limit(), 1);
}
