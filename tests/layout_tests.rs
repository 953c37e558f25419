// tests/layout_tests.rs
//
// Раскладка сетки: координаты линий и полей для рендерера.

mod common;

use bracket_engine::domain::EntryId;
use bracket_engine::engine::{paint_weight, Renderer, TextControl};
use bracket_engine::infra::LayoutSettings;

use common::*;

/// Рендерер, который просто записывает вызовы.
#[derive(Default)]
struct Recorder {
    settings: LayoutSettings,
    lines: Vec<(i32, i32, i32, i32)>,
    texts: Vec<(String, i32, i32)>,
    matches: Vec<TextControl>,
    seeds: Vec<TextControl>,
}

impl Renderer for Recorder {
    fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.lines.push((x1, y1, x2, y2));
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        self.texts.push((text.to_string(), x, y));
    }

    fn draw_match_text_control(&mut self, control: TextControl) {
        self.matches.push(control);
    }

    fn draw_seed_text_control(&mut self, control: TextControl) {
        self.seeds.push(control);
    }
}

fn control<'a>(controls: &'a [TextControl], round: &str, index: usize) -> &'a TextControl {
    let id = EntryId::new(round, index);
    controls
        .iter()
        .find(|c| c.id == id)
        .unwrap_or_else(|| panic!("no control for {}", id))
}

//
// TEST 1 — количество вызовов рендерера
//
#[test]
fn paint_calls_renderer_for_every_entry() {
    let t = seeded_mini();
    let mut r = Recorder::default();
    let size = t.paint(&mut r, WEIGHT, false);

    assert!(size.is_some());
    assert_eq!(r.seeds.len(), 4);
    assert_eq!(r.matches.len(), 6);
    assert_eq!(r.texts.len(), 4, "one seed number per seed entry");
    // 10 горизонталей + вертикали пар: 2 (посев) + 1 (полуфинал) + 1 (утешительная).
    assert_eq!(r.lines.len(), 14);

    assert!(t.paint(&mut r, "999", false).is_none());
}

//
// TEST 2 — координаты раунда посева
//
#[test]
fn seed_round_coordinates() {
    let t = seeded_mini();
    let mut r = Recorder::default();
    t.paint(&mut r, WEIGHT, true).unwrap();

    let first = control(&r.seeds, "Seeds", 0);
    assert_eq!((first.x, first.y, first.width, first.height), (20, 6, 300, 14));
    assert_eq!(first.text, "Adams");
    assert_eq!(first.team.as_deref(), Some("Alpha"));
    assert!(first.refresh);

    assert_eq!(r.texts[0], ("1".to_string(), 0, 6));
    assert_eq!(r.lines[0], (0, 20, 300, 20));

    let last = control(&r.seeds, "Seeds", 3);
    assert_eq!(last.y, 95 - 14);
    assert_eq!(last.text, "Davis");
}

//
// TEST 3 — раунды схваток и блок утешительной сетки
//
#[test]
fn match_rounds_and_consolation_block() {
    let t = empty_mini();
    let mut r = Recorder::default();
    let (max_x, max_y) = t.paint(&mut r, WEIGHT, false).unwrap();

    let semis0 = control(&r.matches, "Semis", 0);
    assert_eq!((semis0.x, semis0.y, semis0.width, semis0.height), (303, 18, 129, 14));
    assert_eq!(semis0.text, "");
    assert_eq!(semis0.team, None);

    let semis1 = control(&r.matches, "Semis", 1);
    assert_eq!(semis1.y, 82 - 14);

    let first = control(&r.matches, "First Place", 0);
    assert_eq!((first.x, first.y), (438, 43));

    // Утешительная сетка начинается под основной, снова от левого края.
    let cons0 = control(&r.matches, "Cons", 0);
    assert_eq!((cons0.x, cons0.y, cons0.width), (3, 131, 129));
    let cons1 = control(&r.matches, "Cons", 1);
    assert_eq!(cons1.y, 170 - 14);

    let third = control(&r.matches, "Third Place", 0);
    assert_eq!((third.x, third.y), (138, 143));

    assert_eq!((max_x, max_y), (570, 195));
}

//
// TEST 4 — раскладка зависит от настроек рендерера
//
#[test]
fn layout_uses_renderer_settings() {
    let t = seeded_mini();
    let mut r = Recorder {
        settings: LayoutSettings {
            seed_start: 40,
            seed_offset: 10,
            ..LayoutSettings::default()
        },
        ..Recorder::default()
    };
    let wc = t.weight_class(WEIGHT).unwrap();
    paint_weight(wc, &mut r, false);

    let first = control(&r.seeds, "Seeds", 0);
    assert_eq!((first.x, first.y), (10, 26));
}
