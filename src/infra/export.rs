use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::domain::tournament::Tournament;
use crate::engine::placement::PlaceWinner;

/// Текстовый отчёт: командные очки, призёры по весам, лидер по туше.
///
/// Очки пересчитываются по всем весам перед выводом.
pub fn plain_text_report(tournament: &mut Tournament) -> String {
    let scores = tournament.calc_scores(None);
    let weights = tournament.weights();
    let place_winners = tournament.get_place_winners(&weights);
    let fast_fall = tournament.calc_fast_fall();

    let mut out = String::new();
    let _ = write!(out, "{}\n\n", tournament.name);

    out.push_str("--- Team Scores ---\n");
    for (i, row) in scores.iter().enumerate() {
        let _ = writeln!(out, "{}\t{:.1}\t{}", i + 1, row.score, row.team);
    }
    out.push('\n');

    out.push_str("--- Place Winners ---\n");
    for weight in &place_winners {
        let _ = writeln!(out, "{}", weight.weight);
        for (i, pw) in weight.places.iter().enumerate() {
            let _ = writeln!(out, "{} {}", i + 1, place_line(pw));
        }
        out.push('\n');
    }

    out.push_str("--- Fastest Fall Winner ---\n");
    match fast_fall.first() {
        Some(leader) => {
            let _ = write!(
                out,
                "{} from {}\n{} lbs, {} pins, {}",
                leader.name,
                leader.team,
                leader.weight,
                leader.pins,
                leader.time_text()
            );
        }
        None => out.push_str("No winner"),
    }
    out
}

fn place_line(pw: &PlaceWinner) -> String {
    format!(
        "{}, {}, {}",
        pw.name.as_deref().unwrap_or("None"),
        pw.team.as_deref().unwrap_or("None"),
        pw.result
            .as_ref()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "None".to_string())
    )
}

/// Записать текстовый отчёт в файл.
pub fn write_plain_text(tournament: &mut Tournament, path: &Path) -> std::io::Result<()> {
    let report = plain_text_report(tournament);
    fs::write(path, report)?;
    log::info!("tournament {} exported to {}", tournament.name, path.display());
    Ok(())
}
