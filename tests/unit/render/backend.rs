use super::*;

fn frame(data: Vec<u8>) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data,
        premultiplied: true,
    }
}

#[test]
fn unpremultiply_restores_straight_color() {
    let mut f = frame(vec![64, 0, 32, 128, 0, 0, 0, 0]);
    f.unpremultiply();
    assert!(!f.premultiplied);
    assert_eq!(f.pixel(0, 0), Some([128, 0, 64, 128]));
    assert_eq!(f.pixel(1, 0), Some([0, 0, 0, 0]));
}

#[test]
fn pixel_is_bounds_checked() {
    let f = frame(vec![0; 8]);
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 1), None);
    assert!(!f.has_ink());
}
