// src/bin/bracket_cli.rs

use std::env;
use std::path::PathBuf;

use bracket_engine::api::{bout_count_message, execute, run_query, Command, Query, QueryResponse, SeedCommand};
use bracket_engine::builder::TournamentBuilder;
use bracket_engine::engine::{simulate_tournament, RandomSource, Renderer, TextControl};
use bracket_engine::infra::{
    map_template_to_dto, plain_text_report, AppSettings, JsonFileStorage, LayoutSettings, SystemRng, TournamentStorage,
};

/// Рендерер-заглушка: считает вызовы и печатает поля записей.
struct ConsoleRenderer {
    settings: LayoutSettings,
    lines: usize,
}

impl Renderer for ConsoleRenderer {
    fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    fn draw_line(&mut self, _x1: i32, _y1: i32, _x2: i32, _y2: i32) {
        self.lines += 1;
    }

    fn draw_text(&mut self, _text: &str, _x: i32, _y: i32) {}

    fn draw_match_text_control(&mut self, control: TextControl) {
        if !control.text.is_empty() {
            println!("  [{:>4},{:>4}] {:<28} {}", control.x, control.y, control.id.to_string(), control.text);
        }
    }

    fn draw_seed_text_control(&mut self, control: TextControl) {
        if !control.text.is_empty() {
            println!(
                "  [{:>4},{:>4}] {:<28} {} ({})",
                control.x,
                control.y,
                control.id.to_string(),
                control.text,
                control.team.unwrap_or_default()
            );
        }
    }
}

const TEAMS: [&str; 4] = ["Bristol Central", "Bristol Eastern", "Southington", "Plainville"];
const WEIGHTS: [&str; 3] = ["103", "112", "Hwt"];

fn main() {
    env_logger::builder().format_target(false).init();

    let args: Vec<String> = env::args().collect();
    let template = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| "Bristol Central Invitational".to_string());
    let out_dir = PathBuf::from(args.get(2).cloned().unwrap_or_else(|| "tournaments".to_string()));

    println!("bracket_cli: турнир по шаблону \"{}\"", template);

    let settings = match AppSettings::load(&out_dir.join("settings.json")) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("bracket_cli: настройки не загружены: {}", e);
            return;
        }
    };

    // 1. Шаблоны
    let builder = TournamentBuilder::new();
    println!();
    println!("Доступные шаблоны:");
    for t in builder.templates().iter().map(map_template_to_dto) {
        println!("  - {} ({} seeds, {} rounds)", t.name, t.seed_slots, t.rounds);
    }

    // 2. Турнир
    let mut tournament = match builder.create(&template, "Dev Invitational", &WEIGHTS, &TEAMS) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("bracket_cli: ошибка создания турнира: {}", e);
            return;
        }
    };
    tournament.rules = settings.scoring.clone();
    tournament.move_in_policy = settings.move_in_policy;

    // 3. Посев: по 3 борца от команды в каждом весе, места по порядку номеров.
    let mut rng = SystemRng;
    for weight in WEIGHTS {
        let mut seed = 1;
        for team in TEAMS {
            for n in 0..3 {
                let prefix = if rng.next_below(6) == 0 { "JV " } else { "" };
                let name = format!("{}{} {}{}", prefix, &team[..3], weight, n + 1);
                let cmd = Command::Seed(SeedCommand::Set {
                    weight: weight.to_string(),
                    seed,
                    team: team.to_string(),
                    name,
                });
                if let Err(e) = execute(&mut tournament, cmd) {
                    eprintln!("bracket_cli: посев {} / {}: {:?}", weight, seed, e);
                }
                seed += 1;
            }
        }
    }

    if let QueryResponse::BoutCount(n) = run_query(&tournament, Query::CountBouts) {
        println!();
        println!("{}", bout_count_message(n));
    }

    // 4. Симуляция
    match simulate_tournament(&mut tournament, &mut rng) {
        Ok(n) => println!("Симулировано результатов: {}", n),
        Err(e) => {
            eprintln!("bracket_cli: ошибка симуляции: {}", e);
            return;
        }
    }

    // 5. Сетка первого веса
    println!();
    println!("================ BRACKET {} ================", WEIGHTS[0]);
    let mut renderer = ConsoleRenderer {
        settings: settings.layout.clone(),
        lines: 0,
    };
    if let Some((max_x, max_y)) = tournament.paint(&mut renderer, WEIGHTS[0], false) {
        println!("Размер: {}x{}, линий: {}", max_x, max_y, renderer.lines);
    }

    // 6. Отчёт и сохранение
    println!();
    println!("{}", plain_text_report(&mut tournament));
    println!();

    let mut storage = JsonFileStorage::new(&out_dir);
    match storage.save("dev_invitational", &tournament) {
        Ok(()) => println!("Сохранено в {}", storage.path_for("dev_invitational").display()),
        Err(e) => eprintln!("bracket_cli: ошибка сохранения: {}", e),
    }
}
