use super::*;

#[test]
fn geo_point_rejects_out_of_range() {
    assert!(GeoPoint::new(51.5, -0.1).is_ok());
    assert!(GeoPoint::new(90.5, 0.0).is_err());
    assert!(GeoPoint::new(0.0, -180.5).is_err());
    assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
}

#[test]
fn pixel_rect_extent_and_containment() {
    let full = PixelRect::full(3, 3);
    assert_eq!(full.width(), 3);
    assert_eq!(full.height(), 3);
    assert!(full.contains(2, 2));
    assert!(!full.contains(3, 0));

    let r = PixelRect::new(1, 1, 2, 2);
    assert!(full.contains_rect(r));
    assert!(!r.contains_rect(full));
    assert!(!r.is_empty());
    assert!(PixelRect::new(2, 0, 2, 3).is_empty());
}

#[test]
fn rgba_constructors() {
    assert_eq!(Rgba8::opaque(1, 2, 3).to_array(), [1, 2, 3, 255]);
    assert_eq!(Rgba8::transparent().a, 0);
}
