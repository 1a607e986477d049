use super::*;

fn frame(data: Vec<u8>, w: u32, h: u32, premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data,
        premultiplied,
    }
}

#[test]
fn encodes_readable_png_with_straight_alpha() {
    // 2x1: opaque red, half-transparent premultiplied white
    let f = frame(vec![255, 0, 0, 255, 128, 128, 128, 128], 2, 1, true);
    let png = encode_png(&f).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let back = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (2, 1));
    assert_eq!(back.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(back.get_pixel(1, 0).0, [255, 255, 255, 128]);
}

#[test]
fn straight_frames_pass_through() {
    let f = frame(vec![10, 20, 30, 40], 1, 1, false);
    let back = image::load_from_memory(&encode_png(&f).unwrap())
        .unwrap()
        .to_rgba8();
    assert_eq!(back.get_pixel(0, 0).0, [10, 20, 30, 40]);
}

#[test]
fn mismatched_buffer_is_encode_error() {
    let err = encode_png(&frame(vec![0; 7], 1, 2, true)).unwrap_err();
    assert!(matches!(err, GridError::Encode(_)));
    assert!(matches!(
        encode_png(&frame(Vec::new(), 0, 0, true)),
        Err(GridError::Encode(_))
    ));
}

#[test]
fn unpremultiply_clears_fully_transparent() {
    let mut px = [9, 9, 9, 0, 64, 0, 0, 64];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, [0, 0, 0, 0, 255, 0, 0, 64]);
}
