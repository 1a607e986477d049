use super::*;

#[test]
fn premul_rounds_like_canvas() {
    let p = Rgba8::rgba(100, 50, 200, 128).premul();
    assert_eq!(
        p,
        Rgba8Premul {
            r: ((100u16 * 128 + 127) / 255) as u8,
            g: ((50u16 * 128 + 127) / 255) as u8,
            b: ((200u16 * 128 + 127) / 255) as u8,
            a: 128,
        }
    );
}

#[test]
fn straight_premul_straight_is_close() {
    let c = Rgba8::rgba(37, 99, 235, 204);
    let back = c.premul().to_straight();
    assert_eq!(back.a, c.a);
    assert!((i16::from(back.r) - i16::from(c.r)).abs() <= 1);
    assert!((i16::from(back.g) - i16::from(c.g)).abs() <= 1);
    assert!((i16::from(back.b) - i16::from(c.b)).abs() <= 1);
}

#[test]
fn zero_alpha_unpremultiplies_to_transparent() {
    let p = Rgba8Premul::from_straight_rgba(255, 255, 255, 0);
    assert_eq!(p.to_straight(), Rgba8::transparent());
}

#[test]
fn alpha_fraction_maps_to_u8() {
    assert_eq!(Rgba8::rgb(0, 0, 0).with_alpha_f(0.8).a, 204);
    assert_eq!(Rgba8::rgb(0, 0, 0).with_alpha_f(2.0).a, 255);
}

#[test]
fn canvas_pixel_size_scales_and_rounds_up() {
    let c = Canvas {
        width: 708.0,
        height: 832.5,
    };
    assert_eq!(c.pixel_size(2.0), (1416, 1665));
}
