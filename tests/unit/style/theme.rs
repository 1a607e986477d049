use super::*;

#[test]
fn presets_validate() {
    Theme::daylight().validate().unwrap();
    Theme::slate().validate().unwrap();
    assert_eq!(Theme::preset("Slate"), Some(Theme::slate()));
    assert_eq!(Theme::preset("light"), Some(Theme::daylight()));
    assert!(Theme::preset("neon").is_none());
}

#[test]
fn presets_differ_on_truncation_and_ring() {
    let day = Theme::daylight();
    let night = Theme::slate();
    assert_eq!(day.title_policy, TitlePolicy::Ellipsis);
    assert_eq!(night.title_policy, TitlePolicy::Wrap { max_lines: 2 });
    assert_eq!(day.highlight.color.rgba8().a, 255);
    assert!(night.highlight.color.rgba8().a < 255);
}

#[test]
fn partial_json_overrides_daylight() {
    let theme = Theme::from_json_str(
        r##"{
            "background": "#000000",
            "card": {"radius": 4},
            "title_policy": {"mode": "wrap", "max_lines": 3}
        }"##,
    )
    .unwrap();
    assert_eq!(theme.background, ColorDef::rgb(0, 0, 0));
    assert_eq!(theme.card.radius, 4.0);
    assert_eq!(theme.card.fill, Theme::daylight().card.fill);
    assert_eq!(theme.title_policy, TitlePolicy::Wrap { max_lines: 3 });
    assert_eq!(theme.footer, Theme::daylight().footer);
}

#[test]
fn theme_round_trips_through_json() {
    let s = serde_json::to_string(&Theme::slate()).unwrap();
    assert_eq!(Theme::from_json_str(&s).unwrap(), Theme::slate());
}

#[test]
fn degenerate_values_are_rejected() {
    let mut t = Theme::daylight();
    t.title.colors.clear();
    assert!(t.validate().is_err());

    let mut t = Theme::daylight();
    t.title.min_size = 60.0;
    assert!(t.validate().is_err());

    let mut t = Theme::daylight();
    t.title.step = 0.0;
    assert!(t.validate().is_err());

    let mut t = Theme::daylight();
    t.title_policy = TitlePolicy::Wrap { max_lines: 0 };
    assert!(t.validate().is_err());

    let mut t = Theme::daylight();
    t.title_pill.font_size = f32::NAN;
    assert!(t.validate().is_err());
}

#[test]
fn pill_end_pad_sets_text_room() {
    let daylight = Theme::daylight();
    assert_eq!(daylight.title_pill.text_room(135.0), 127.0);
    assert_eq!(daylight.label_pill.text_room(135.0), 119.0);
    assert_eq!(daylight.title_pill.text_room(4.0), 0.0);

    let t = Theme::from_json_str(r#"{"title_pill": {"end_pad": 3}}"#).unwrap();
    assert_eq!(t.title_pill.end_pad, Some(3.0));
    assert!(Theme::from_json_str(r#"{"title_pill": {"end_pad": -1}}"#).is_err());
}
