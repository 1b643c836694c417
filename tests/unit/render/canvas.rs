use super::*;

#[test]
fn starts_at_background() {
    let c = Canvas::new(4, 3, 9);
    for y in 0..3 {
        for x in 0..4 {
            assert_eq!(c.index_at(x, y), Some(9));
        }
    }
    assert_eq!(c.index_at(4, 0), None);
    assert_eq!(c.index_at(-1, 0), None);
}

#[test]
fn darken_only_lowers() {
    let mut c = Canvas::new(2, 2, 200);
    assert!(c.darken(1, 1, 100));
    assert!(!c.darken(1, 1, 150));
    assert!(!c.darken(1, 1, 100));
    assert!(c.darken(1, 1, 3));
    assert_eq!(c.index_at(1, 1), Some(3));
    assert_eq!(c.index_at(0, 0), Some(200));
}

#[test]
fn darken_final_value_is_minimum_of_proposals() {
    let proposals = [180u8, 40, 90, 40, 250, 12, 77, 13];
    let mut c = Canvas::new(1, 1, 254);
    for &p in &proposals {
        c.darken(0, 0, p);
    }
    assert_eq!(c.index_at(0, 0), proposals.iter().copied().min());
}

#[test]
fn out_of_bounds_writes_are_ignored() {
    let mut c = Canvas::new(2, 2, 5);
    assert!(!c.darken(-1, 0, 0));
    assert!(!c.darken(0, -1, 0));
    assert!(!c.darken(2, 0, 0));
    assert!(!c.darken(0, 2, 0));
    assert_eq!(c, Canvas::new(2, 2, 5));
}

#[test]
fn into_frame_covers_full_canvas() {
    let mut c = Canvas::new(3, 2, 7);
    c.darken(2, 1, 1);
    let f = c.into_frame();
    assert_eq!(f.bounds(), crate::foundation::core::PixelRect::full(3, 2));
    assert_eq!(f.index_at(2, 1), Some(1));
    assert_eq!(f.index_at(3, 0), None);
    assert!(!f.is_optimized());
}
