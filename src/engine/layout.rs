// src/engine/layout.rs

use crate::domain::bracket::{Entry, EntryKind, WeightClass};
use crate::domain::ids::EntryId;
use crate::domain::RoundIndex;
use crate::infra::settings::LayoutSettings;

/// Текстовое поле записи, которое рендерер должен разместить.
#[derive(Clone, Debug, PartialEq)]
pub struct TextControl {
    pub id: EntryId,
    /// Имя борца или пустая строка.
    pub text: String,
    pub team: Option<String>,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Перерисовать подписи (например, после смены команды).
    pub refresh: bool,
}

/// Рендерер сетки. Размеры и отступы берутся из его настроек.
pub trait Renderer {
    fn settings(&self) -> &LayoutSettings;

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);

    fn draw_text(&mut self, text: &str, x: i32, y: i32);

    fn draw_match_text_control(&mut self, control: TextControl);

    fn draw_seed_text_control(&mut self, control: TextControl);
}

/// Шаги раскладки для одного раунда.
struct RoundFrame {
    start: (i32, i32),
    length: i32,
    step: i32,
}

/// Обойти сетку весовой категории и вызвать рендерер.
///
/// Раунды идут столбцами слева направо. Шаг между записями удваивается,
/// когда следующий раунд другого размера; если раунд больше предыдущего,
/// начинается новый блок под уже нарисованным (утешительная сетка).
/// Возвращает (max_x, max_y) нарисованной области.
pub fn paint_weight<R: Renderer + ?Sized>(wc: &WeightClass, renderer: &mut R, refresh_labels: bool) -> (i32, i32) {
    let settings = renderer.settings().clone();

    let mut step = settings.initial_step;
    let mut start = (0, settings.seed_start);
    let mut max_x = 0;
    let mut max_y = 0;

    for (i, round) in wc.rounds.iter().enumerate() {
        let num = round.num_entries();
        let next_num = wc.rounds.get(i + 1).map(|r| r.num_entries());

        if i > 0 && num > wc.rounds[i - 1].num_entries() {
            step = settings.initial_step;
            start = (0, max_y + step * 2);
        }

        let length = if i == 0 {
            settings.seed_length
        } else {
            settings.match_length
        };

        let frame = RoundFrame { start, length, step };
        let (new_start, round_max_x, round_max_y) =
            paint_round(wc, i, renderer, &settings, &frame, refresh_labels);

        start = new_start;
        if next_num != Some(num) {
            step *= 2;
        }
        max_x = max_x.max(round_max_x);
        max_y = max_y.max(round_max_y);
    }

    (max_x, max_y + settings.initial_step)
}

fn paint_round<R: Renderer + ?Sized>(
    wc: &WeightClass,
    round: RoundIndex,
    renderer: &mut R,
    settings: &LayoutSettings,
    frame: &RoundFrame,
    refresh_labels: bool,
) -> ((i32, i32), i32, i32) {
    let Some(r) = wc.round(round) else {
        return (frame.start, frame.start.0, frame.start.1);
    };

    let (x, start_y) = frame.start;
    let mut y = start_y;
    for (i, entry) in r.entries.iter().enumerate() {
        renderer.draw_line(x, y, x + frame.length, y);
        let id = EntryId::new(r.name.clone(), i);
        paint_entry(entry, id, renderer, settings, (x, y), frame.length, refresh_labels);
        y += frame.step;
    }

    let max_x = x + frame.length;
    let max_y = y - frame.step;

    // Вертикали, соединяющие пары записей.
    let mut y = start_y;
    for _ in (0..r.num_entries().saturating_sub(1)).step_by(2) {
        renderer.draw_line(x + frame.length, y, x + frame.length, y + frame.step);
        y += frame.step * 2;
    }

    ((x + frame.length, start_y + frame.step / 2), max_x, max_y)
}

fn paint_entry<R: Renderer + ?Sized>(
    entry: &Entry,
    id: EntryId,
    renderer: &mut R,
    settings: &LayoutSettings,
    (x, y): (i32, i32),
    length: i32,
    refresh: bool,
) {
    let text = entry
        .wrestler
        .as_ref()
        .map(|w| w.name.clone())
        .unwrap_or_default();
    let team = entry.wrestler.as_ref().map(|w| w.team.clone());

    match entry.kind {
        EntryKind::Seed { seed } => {
            renderer.draw_text(&seed.to_string(), x, y - settings.seed_height);
            renderer.draw_seed_text_control(TextControl {
                id,
                text,
                team,
                x: x + settings.seed_offset,
                y: y - settings.seed_height,
                width: settings.seed_length,
                height: settings.seed_height,
                refresh,
            });
        }
        EntryKind::Match => {
            renderer.draw_match_text_control(TextControl {
                id,
                text,
                team,
                x: x + settings.match_offset,
                y: y - settings.match_height,
                width: length - 2 * settings.match_offset,
                height: settings.match_height,
                refresh,
            });
        }
    }
}
