use comfy_table::{Table, ContentArrangement, presets::UTF8_FULL, Cell, Color};

use crate::import::ImportResult;
use lotto_db::models::{Draw, Game};
use lotto_stats::engine::StatsReport;
use lotto_stats::NumberCount;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn join_numbers(nums: impl IntoIterator<Item = u8>) -> String {
    nums.into_iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn join_counts(counts: &[NumberCount], take: usize) -> String {
    counts
        .iter()
        .take(take)
        .map(|c| format!("{} ({})", c.num, c.count))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn display_draws(game: Game, draws: &[Draw]) {
    if draws.is_empty() {
        println!("Aucun tirage {} à afficher.", game.display_name());
        return;
    }

    println!("\n── {} ──", game.display_name());
    let mut table = new_table(vec!["Date", "Numéros", game.special_name()]);

    for draw in draws {
        let mut sorted = draw.numbers.clone();
        sorted.sort();
        let special = draw
            .special
            .map(|s| format!("{:2}", s))
            .unwrap_or_else(|| "—".to_string());

        table.add_row(vec![draw.date.to_string(), join_numbers(sorted), special]);
    }

    println!("{table}");
}

pub fn display_import_summary(game: Game, result: &ImportResult) {
    println!("Import {} terminé :", game.display_name());
    println!("  Total lignes lues : {}", result.total_records);
    println!("  Insérés           : {}", result.inserted);
    println!("  Remplacés         : {}", result.replaced);
    if result.errors > 0 {
        println!("  Erreurs           : {}", result.errors);
    }
}

pub fn display_report(game: Game, report: &StatsReport) {
    println!("\n📊 {} : statistiques\n", game.display_name());

    println!("── Fréquences ──");
    let mut table = new_table(vec!["Période", "Tirages", "Plus fréquents", "Moins fréquents"]);
    for period in &report.frequency.periods {
        table.add_row(vec![
            period.label.to_string(),
            period.total_draws.to_string(),
            join_counts(&period.top10, 5),
            join_counts(&period.bottom10, 5),
        ]);
    }
    println!("{table}");

    println!("\n── Retards (score d'échéance) ──");
    let mut table = new_table(vec!["Numéro", "Retard", "Retard max", "Sorties", "Intervalle moyen", "Score"]);
    for entry in &report.gaps.ranking {
        let r = &entry.record;
        let color = if r.due_score >= 200.0 {
            Color::Red
        } else if r.due_score >= 100.0 {
            Color::Yellow
        } else {
            Color::White
        };
        table.add_row(vec![
            Cell::new(format!("{:2}", entry.num)),
            Cell::new(r.current),
            Cell::new(r.max),
            Cell::new(r.appearances),
            Cell::new(format!("{:.2}", r.avg_interval)),
            Cell::new(format!("{:.1}", r.due_score)).fg(color),
        ]);
    }
    println!("{table}");

    println!("\n── Meilleures paires ──");
    let mut table = new_table(vec!["Paire", "Sorties"]);
    for pair in report.pairs.best_pairs.iter().take(10) {
        table.add_row(vec![pair.pair.to_string(), pair.count.to_string()]);
    }
    println!("{table}");

    println!("\n── {} ──", game.special_name());
    let mut table = new_table(vec!["Plus fréquents", "Plus en retard"]);
    let overdue = report
        .special
        .gaps
        .iter()
        .take(5)
        .map(|g| format!("{} ({})", g.num, g.gap))
        .collect::<Vec<_>>()
        .join(", ");
    table.add_row(vec![join_counts(&report.special.frequency, 5), overdue]);
    println!("{table}");

    if let Some(last) = report.patterns.sum_dist.history.first() {
        println!("\nSomme du dernier tirage ({}) : {}", last.date, last.sum);
    }

    println!("\n🎯 Sélections");
    println!("  Chauds   : {}", join_numbers(report.predictions.hot_and_ready.iter().copied()));
    println!("  En retard: {}", join_numbers(report.predictions.overdue.iter().copied()));
}
