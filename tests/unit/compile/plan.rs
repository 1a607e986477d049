use std::sync::Arc;

use super::*;
use crate::foundation::error::GridError;
use crate::grid::model::{BEST_ANIME_LABEL, GridSize};
use crate::text::fit::ELLIPSIS;
use crate::text::mono::MonoMetrics;

fn img(w: u32, h: u32) -> PreparedImage {
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(vec![255; (w * h * 4) as usize]),
    }
}

fn compile(spec: &RenderSpec, theme: &Theme, images: &[Option<PreparedImage>]) -> GridPlan {
    compile_grid(spec, theme, images, None, &mut MonoMetrics::new()).unwrap()
}

fn cell_texts(plan: &GridPlan, cell: usize) -> Vec<(String, Point)> {
    plan.ops[plan.cell_ops[cell].clone()]
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, origin, .. } => Some((text.clone(), *origin)),
            _ => None,
        })
        .collect()
}

fn ring_count(plan: &GridPlan, theme: &Theme) -> usize {
    plan.ops
        .iter()
        .filter(|op| matches!(op, DrawOp::StrokePath { width, .. } if *width == theme.highlight.width))
        .count()
}

#[test]
fn empty_three_by_three_draws_only_cards() {
    let spec = RenderSpec::empty(GridSize::Three);
    let plan = compile(&spec, &Theme::daylight(), &[]);

    assert_eq!(plan.title, "Year in Review");
    assert_eq!(plan.layout.title_font_size, 48.0);
    assert_eq!(plan.canvas.height, 100.0 + 3.0 * 216.0 + 2.0 * 12.0 + 60.0);
    assert_eq!(plan.pixel_size(), (1416, 1664));

    assert_eq!(plan.cell_ops.len(), 9);
    for range in &plan.cell_ops {
        // card fill + border
        assert_eq!(range.len(), 2);
    }
    assert!(plan.images.is_empty());
    assert!(!plan.ops.iter().any(|op| matches!(op, DrawOp::Image { .. })));
    // background, title, cards, footer
    assert_eq!(plan.ops.len(), 2 + 9 * 2 + 1);
}

#[test]
fn best_anime_cell_gets_ring_and_both_pills() {
    let theme = Theme::daylight();
    let mut spec = RenderSpec::empty(GridSize::Three);
    spec.cells[0] = Cell::with_image("aot.png", "Attack on Titan").labeled(BEST_ANIME_LABEL);
    let plan = compile(&spec, &theme, &[Some(img(4, 2))]);

    assert_eq!(ring_count(&plan, &theme), 1);
    let ops = &plan.ops[plan.cell_ops[0].clone()];
    assert!(matches!(ops[2], DrawOp::StrokePath { .. }));
    assert!(matches!(ops[3], DrawOp::Image { image: 0, .. }));

    let texts = cell_texts(&plan, 0);
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[0].0, BEST_ANIME_LABEL);
    assert_eq!(texts[1].0, "Attack on Titan");
    assert!(texts[0].1.y < texts[1].1.y, "label pill sits above title pill");
}

#[test]
fn only_exact_best_anime_label_highlights() {
    let theme = Theme::daylight();
    let mut spec = RenderSpec::empty(GridSize::Three);
    spec.cells[0] = Cell::empty().labeled("best anime");
    spec.cells[1] = Cell::empty().labeled("Best Anime ");
    spec.cells[2] = Cell::empty().labeled("Best Opening");
    spec.cells[5] = Cell::empty().labeled(BEST_ANIME_LABEL);
    let plan = compile(&spec, &theme, &[]);

    assert_eq!(ring_count(&plan, &theme), 1);
    assert_eq!(plan.cell_ops[5].len(), 3);
}

#[test]
fn cells_without_prepared_image_draw_no_pills() {
    let mut spec = RenderSpec::empty(GridSize::Three);
    // occupied but failed to load
    spec.cells[3] = Cell::with_image("broken.png", "Broken").labeled("Fav");
    // image present for an unoccupied cell is ignored
    spec.cells[4] = Cell::empty().labeled("Fav");
    let mut images = vec![None; 9];
    images[4] = Some(img(2, 2));
    let plan = compile(&spec, &Theme::daylight(), &images);

    assert!(cell_texts(&plan, 3).is_empty());
    assert!(cell_texts(&plan, 4).is_empty());
    assert!(plan.images.is_empty());
}

#[test]
fn trailing_cells_do_not_change_the_plan() {
    let theme = Theme::daylight();
    let mut a = RenderSpec::empty(GridSize::Three);
    a.cells[8] = Cell::with_image("x.png", "Frieren").labeled("Fav");
    let mut b = a.clone();
    for (i, c) in b.cells.iter_mut().enumerate().skip(9) {
        *c = Cell::with_image("junk.png", format!("junk {i}")).labeled(BEST_ANIME_LABEL);
    }

    let images = vec![None, None, None, None, None, None, None, None, Some(img(3, 3))];
    let pa = compile(&a, &theme, &images);
    let pb = compile(&b, &theme, &images);
    assert_eq!(pa.ops, pb.ops);
    assert_eq!(pa.cell_ops, pb.cell_ops);
}

#[test]
fn long_title_is_truncated_within_pill() {
    let theme = Theme::daylight();
    let title = "x".repeat(60);
    let mut spec = RenderSpec::empty(GridSize::Four);
    spec.cells[0] = Cell::with_image("a.png", title.clone());
    let plan = compile(&spec, &theme, &[Some(img(1, 1))]);

    let texts = cell_texts(&plan, 0);
    assert_eq!(texts.len(), 1);
    let drawn = &texts[0].0;
    assert!(drawn.ends_with(ELLIPSIS));

    let max_pill = plan.layout.cell_size - 2.0 * theme.pills.inset;
    let text_max = theme.title_pill.text_room(max_pill);
    let w = MonoMetrics::new()
        .measure(drawn, TextStyle::new(FontRole::Pill, theme.title_pill.font_size))
        .unwrap();
    assert!(w <= text_max, "{w} > {text_max}");

    let card_left = plan.layout.cell_origin(0).x;
    let pill_right = card_left + theme.pills.inset + max_pill;
    assert!(texts[0].1.x + w <= pill_right);
}

#[test]
fn daylight_title_may_run_to_the_pill_edge() {
    let theme = Theme::daylight();
    let mut spec = RenderSpec::empty(GridSize::Four);
    // 159px cell: 127px of text room, 28 chars at 4.5px each
    let title = "x".repeat(28);
    spec.cells[0] = Cell::with_image("a.png", title.clone());
    let plan = compile(&spec, &theme, &[Some(img(1, 1))]);
    assert_eq!(plan.layout.cell_size, 159.0);
    assert_eq!(cell_texts(&plan, 0)[0].0, title);

    let slate = Theme::slate();
    assert_eq!(slate.title_pill.text_room(159.0 - 32.0), 159.0 - 52.0);
}

#[test]
fn wrap_policy_sets_two_lines() {
    let theme = Theme::slate();
    let mut spec = RenderSpec::empty(GridSize::Three);
    spec.cells[0] = Cell::with_image("a.png", "Fullmetal Alchemist: Brotherhood Season Two");
    let plan = compile(&spec, &theme, &[Some(img(1, 1))]);

    let texts = cell_texts(&plan, 0);
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[0].0, "Fullmetal Alchemist:");
    assert_eq!(texts[1].0, "Brotherhood Season Two");
    assert_eq!(texts[1].1.y - texts[0].1.y, theme.title_pill.line_height);
}

#[test]
fn title_uses_username_and_shrinks() {
    let mut spec = RenderSpec::empty(GridSize::Three);
    spec.username = Some("a".repeat(20));
    let plan = compile(&spec, &Theme::daylight(), &[]);
    assert_eq!(plan.title, format!("{}'s Year in Review", "a".repeat(20)));
    assert_eq!(plan.layout.title_font_size, 34.0);
    assert_eq!(plan.layout.title_height, 100.0);

    spec.username = Some("   ".to_string());
    assert_eq!(compile(&spec, &Theme::daylight(), &[]).title, "Year in Review");
}

#[test]
fn title_paint_follows_theme() {
    let spec = RenderSpec::empty(GridSize::Three);
    let day = compile(&spec, &Theme::daylight(), &[]);
    match &day.ops[1] {
        DrawOp::Text {
            paint: Paint::Linear { start, end, stops },
            align: TextAlign::Center,
            ..
        } => {
            assert_eq!((start.x, end.x), (154.0, 554.0));
            assert_eq!(stops.len(), 3);
            assert_eq!(stops[1].0, 0.5);
        }
        other => panic!("unexpected title op {other:?}"),
    }

    let slate = compile(&spec, &Theme::slate(), &[]);
    assert!(matches!(
        &slate.ops[1],
        DrawOp::Text {
            paint: Paint::Solid(_),
            ..
        }
    ));
}

#[test]
fn logo_moves_footer_text() {
    let spec = RenderSpec::empty(GridSize::Three);
    let logo = img(8, 8);
    let plan = compile_grid(
        &spec,
        &Theme::daylight(),
        &[],
        Some(&logo),
        &mut MonoMetrics::new(),
    )
    .unwrap();

    let n = plan.ops.len();
    assert!(matches!(plan.ops[n - 2], DrawOp::Image { image: 0, .. }));
    match &plan.ops[n - 1] {
        DrawOp::Text { origin, text, .. } => {
            assert_eq!(origin.x, 40.0);
            assert_eq!(text, "Made by @Pesto808");
        }
        other => panic!("unexpected footer op {other:?}"),
    }
}

#[test]
fn too_few_cells_is_validation_error() {
    let spec = RenderSpec {
        cells: vec![Cell::empty(); 8],
        grid_size: GridSize::Three,
        username: None,
    };
    let err = compile_grid(&spec, &Theme::daylight(), &[], None, &mut MonoMetrics::new())
        .unwrap_err();
    assert!(matches!(err, GridError::Validation(_)));
}
