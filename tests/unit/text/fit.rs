use super::*;
use crate::text::mono::MonoMetrics;

fn pill(size: f32) -> TextStyle {
    TextStyle::new(FontRole::Pill, size)
}

#[test]
fn default_title_fits_at_max_size() {
    let mut m = MonoMetrics::new();
    let size = fit_font_size(&mut m, "Year in Review", FontRole::Title, 632.0, 48.0, 24.0, 2.0)
        .unwrap();
    assert_eq!(size, 48.0);
}

#[test]
fn long_title_takes_largest_fitting_ladder_step() {
    let mut m = MonoMetrics::new();
    let title = format!("{}'s Year in Review", "a".repeat(20));
    let size = fit_font_size(&mut m, &title, FontRole::Title, 632.0, 48.0, 24.0, 2.0).unwrap();
    assert_eq!(size, 34.0);

    let w = m.measure(&title, TextStyle::new(FontRole::Title, size)).unwrap();
    assert!(w <= 632.0);
    let w_up = m
        .measure(&title, TextStyle::new(FontRole::Title, size + 2.0))
        .unwrap();
    assert!(w_up > 632.0);
}

#[test]
fn overlong_title_floors_at_min() {
    let mut m = MonoMetrics::new();
    let title = "x".repeat(400);
    let size = fit_font_size(&mut m, &title, FontRole::Title, 632.0, 48.0, 24.0, 2.0).unwrap();
    assert_eq!(size, 24.0);
}

#[test]
fn ladder_is_validated() {
    let mut m = MonoMetrics::new();
    assert!(fit_font_size(&mut m, "x", FontRole::Title, 10.0, 48.0, 24.0, 0.0).is_err());
    assert!(fit_font_size(&mut m, "x", FontRole::Title, 10.0, 20.0, 24.0, 2.0).is_err());
}

#[test]
fn fitting_text_is_untouched() {
    let mut m = MonoMetrics::new();
    let out = truncate_with_ellipsis(&mut m, "Naruto", pill(10.0), 50.0).unwrap();
    assert_eq!(out, "Naruto");
}

#[test]
fn truncation_trims_trailing_space_before_ellipsis() {
    let mut m = MonoMetrics::new();
    let out = truncate_with_ellipsis(&mut m, "Attack on Titan", pill(10.0), 50.0).unwrap();
    assert_eq!(out, "Attack...");
}

#[test]
fn sixty_char_title_stays_within_width() {
    let mut m = MonoMetrics::new();
    let title = "The Melancholy of a Very Long Light Novel Adaptation Season 2";
    assert!(title.chars().count() >= 60);
    let out = truncate_with_ellipsis(&mut m, title, pill(9.0), 100.0).unwrap();
    assert!(out.ends_with(ELLIPSIS));
    assert!(m.measure(&out, pill(9.0)).unwrap() <= 100.0);
    assert!(out.len() < title.len());
}

#[test]
fn truncation_degenerates_to_bare_ellipsis() {
    let mut m = MonoMetrics::new();
    let out = truncate_with_ellipsis(&mut m, "Monogatari", pill(10.0), 4.0).unwrap();
    assert_eq!(out, ELLIPSIS);
}

#[test]
fn wrap_keeps_short_text_on_one_line() {
    let mut m = MonoMetrics::new();
    let lines = wrap_lines(&mut m, "Naruto", pill(10.0), 50.0, 2).unwrap();
    assert_eq!(lines, vec!["Naruto".to_string()]);
}

#[test]
fn wrap_folds_overflow_into_last_line() {
    let mut m = MonoMetrics::new();
    let lines = wrap_lines(&mut m, "Fullmetal Alchemist Brotherhood", pill(10.0), 50.0, 2).unwrap();
    assert_eq!(lines, vec!["Fullmetal".to_string(), "Alchemi...".to_string()]);
}

#[test]
fn wrap_truncates_single_overlong_word() {
    let mut m = MonoMetrics::new();
    let lines = wrap_lines(&mut m, "Fullmetal Alchemist Brotherhood", pill(10.0), 50.0, 3).unwrap();
    assert_eq!(
        lines,
        vec![
            "Fullmetal".to_string(),
            "Alchemist".to_string(),
            "Brother...".to_string()
        ]
    );
}

#[test]
fn wrap_of_empty_text_is_one_empty_line() {
    let mut m = MonoMetrics::new();
    let lines = wrap_lines(&mut m, "   ", pill(10.0), 50.0, 2).unwrap();
    assert_eq!(lines, vec![String::new()]);
}
