use super::*;

#[test]
fn garbage_font_bytes_are_font_error() {
    let err = FontBook::from_bytes(b"definitely not a font".to_vec(), None).unwrap_err();
    assert!(matches!(err, GridError::Font(_)), "{err:?}");
}

#[test]
fn missing_font_file_is_font_error() {
    let err = FontBook::from_paths(Path::new("target/no/such/font.ttf"), None).unwrap_err();
    assert!(matches!(err, GridError::Font(_)));
    assert!(err.to_string().contains("font.ttf"));
}

#[test]
fn bold_roles() {
    assert!(FontRole::Title.is_bold());
    assert!(FontRole::Pill.is_bold());
    assert!(!FontRole::Footer.is_bold());
}

fn dejavu() -> FontBook {
    FontBook::from_paths(
        Path::new("tests/data/fonts/DejaVuSans.ttf"),
        Some(Path::new("tests/data/fonts/DejaVuSans-Bold.ttf")),
    )
    .unwrap()
}

#[test]
fn families_come_from_font_bytes() {
    let book = dejavu();
    assert!(book.regular_family().contains("DejaVu"));
    assert!(book.bold_family().is_some_and(|f| f.contains("DejaVu")));
}

#[test]
fn shaped_width_matches_measured_width() {
    let mut book = dejavu();
    for style in [
        TextStyle::new(FontRole::Title, 48.0),
        TextStyle::new(FontRole::Pill, 9.0),
        TextStyle::new(FontRole::Footer, 12.0),
    ] {
        let measured = book.measure("Frieren", style).unwrap();
        let shaped = book.shape("Frieren", style).unwrap().unwrap();
        assert_eq!(shaped.width, measured);
        assert_eq!(shaped.glyphs.len(), 7);
        assert!(shaped.ascent > 0.0 && shaped.descent > 0.0);
        assert!(shaped.ascent + shaped.descent < f64::from(style.size_px) * 1.5);
    }
}

#[test]
fn glyphs_sit_on_first_baseline_left_to_right() {
    let mut book = dejavu();
    let shaped = book
        .shape("Mob Psycho", TextStyle::new(FontRole::Pill, 14.0))
        .unwrap()
        .unwrap();
    assert!(shaped.glyphs.iter().all(|g| g.y.abs() < 1e-3));
    assert!(shaped.glyphs.windows(2).all(|w| w[0].x <= w[1].x));
    assert!(shaped.glyphs[0].x.abs() < 1e-3);
}

#[test]
fn bold_roles_measure_wider() {
    let mut book = dejavu();
    let bold = book
        .measure("Year in Review", TextStyle::new(FontRole::Title, 24.0))
        .unwrap();
    let regular = book
        .measure("Year in Review", TextStyle::new(FontRole::Footer, 24.0))
        .unwrap();
    assert!(bold > regular, "{bold} <= {regular}");
}

#[test]
fn empty_text_shapes_nothing() {
    let mut book = dejavu();
    let style = TextStyle::new(FontRole::Pill, 9.0);
    assert_eq!(book.measure("", style).unwrap(), 0.0);
    assert!(book.shape("", style).unwrap().is_none());
    assert!(book.measure("x", TextStyle::new(FontRole::Pill, f32::NAN)).is_err());
}
