//! Winterfest Headless Simulation Harness
//!
//! Validates pure game logic without any screens or sensors.
//! Runs entirely in-process. No UI, no timers, no device input.
//!
//! Usage:
//!   cargo run -p winterfest-simtest
//!   cargo run -p winterfest-simtest -- --verbose
//!   cargo run -p winterfest-simtest -- --seed 1234

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use winterfest_logic::ai::AiMarksman;
use winterfest_logic::config::{RecordPolicy, SessionConfig, TournamentConfig};
use winterfest_logic::events::{rules_for, EventKind};
use winterfest_logic::ledger::TournamentLedger;
use winterfest_logic::persistence;
use winterfest_logic::ranking;
use winterfest_logic::scoring::score_shot;
use winterfest_logic::sensor::AngularSample;
use winterfest_logic::session::EventSession;
use winterfest_logic::stability::StabilityFilter;
use winterfest_logic::tournament::Tournament;

// ── Tournament config (same JSON the app ships) ─────────────────────────
const CONFIG_JSON: &str = include_str!("../../../data/tournament.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let seed = args
        .iter()
        .position(|a| a == "--seed")
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(2026);

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_filter(verbose)),
    )
    .init();

    println!("=== Winterfest Simulation Harness (seed {}) ===\n", seed);
    log::debug!("harness args: {:?}", &args[1..]);

    let mut results = Vec::new();

    // 1. Shipped config
    results.extend(validate_config(verbose));

    // 2. Stability filter bounds
    results.extend(validate_stability(seed, verbose));

    // 3. Scoring properties
    results.extend(validate_scoring(verbose));

    // 4. Session state machine
    results.extend(validate_session(seed, verbose));

    // 5. Ranking & medals
    results.extend(validate_ranking(verbose));

    // 6. Full AI tournament
    results.extend(run_tournament(seed, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn log_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

// ── 1. Config ───────────────────────────────────────────────────────────

fn validate_config(verbose: bool) -> Vec<TestResult> {
    println!("--- Config ---");
    let mut results = Vec::new();

    match TournamentConfig::from_json(CONFIG_JSON) {
        Ok(config) => {
            results.push(check(
                "config_parse",
                true,
                format!(
                    "{} players, {} events, {} targets",
                    config.player_count, config.event_count, config.session.target_count
                ),
            ));
            results.push(check(
                "config_matches_defaults",
                config == TournamentConfig::default(),
                "shipped JSON equals compiled defaults".into(),
            ));
        }
        Err(e) => results.push(check("config_parse", false, format!("{}", e))),
    }

    let bad = TournamentConfig::from_json(r#"{ "player_count": 6 }"#);
    results.push(check(
        "config_rejects_six_players",
        bad.is_err(),
        match bad {
            Err(e) => e.to_string(),
            Ok(_) => "accepted 6 players".into(),
        },
    ));

    if verbose {
        println!("  config checks: {}", results.len());
    }
    results
}

// ── 2. Stability ────────────────────────────────────────────────────────

fn validate_stability(seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Stability Filter ---");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut filter = StabilityFilter::new(10);
    let mut min = f32::MAX;
    let mut max = f32::MIN;

    for i in 0..20_000 {
        let scale = if i % 1000 == 999 { 1e6 } else { rng.gen_range(0.0..3.0f32) };
        let sample = if i % 4999 == 0 {
            AngularSample::new(f32::NAN, 0.0, 0.0)
        } else {
            AngularSample::new(
                rng.gen_range(-1.0f32..1.0) * scale,
                rng.gen_range(-1.0f32..1.0) * scale,
                rng.gen_range(-1.0f32..1.0) * scale,
            )
        };
        filter.observe(sample);
        min = min.min(filter.stability());
        max = max.max(filter.stability());
    }

    if verbose {
        println!("  stability range over sweep: [{:.3}, {:.3}]", min, max);
    }

    let mut still = StabilityFilter::new(10);
    for _ in 0..10 {
        still.observe(AngularSample::ZERO);
    }

    vec![
        check(
            "stability_in_unit_interval",
            (0.0..=1.0).contains(&min) && (0.0..=1.0).contains(&max),
            format!("observed [{:.3}, {:.3}]", min, max),
        ),
        check(
            "stability_still_device",
            still.stability() == 1.0,
            format!("still device reads {:.3}", still.stability()),
        ),
    ]
}

// ── 3. Scoring ──────────────────────────────────────────────────────────

fn validate_scoring(verbose: bool) -> Vec<TestResult> {
    println!("--- Scoring ---");
    let mut results = Vec::new();

    let radii = [0.05f32, 0.065, 0.08];
    let bullseye_ok = radii.iter().all(|&r| score_shot(0.0, r, 1.0) == 100);
    results.push(check(
        "scoring_bullseye",
        bullseye_ok,
        "distance 0 at full stability scores 100".into(),
    ));

    let miss_ok = radii.iter().all(|&r| score_shot(1.5 * r, r, 1.0) == 0);
    results.push(check(
        "scoring_miss",
        miss_ok,
        "distance 1.5r scores 0".into(),
    ));

    let mut violations = 0;
    for &r in &radii {
        for s in [0.71f32, 0.8, 0.9, 1.0] {
            let mut prev = u32::MAX;
            for i in 0..=300 {
                let points = score_shot(i as f32 * r / 150.0, r, s);
                if points > prev {
                    violations += 1;
                }
                prev = points;
            }
        }
    }
    results.push(check(
        "scoring_monotonic_distance",
        violations == 0,
        format!("{} monotonicity violations", violations),
    ));

    if verbose {
        for d in [0.0, 0.2, 0.4, 0.6, 0.8, 1.0, 1.2] {
            println!("  d={:.1}r → {} pts", d, score_shot(d * 0.05, 0.05, 1.0));
        }
    }
    results
}

// ── 4. Session ──────────────────────────────────────────────────────────

fn validate_session(seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Event Session ---");
    let mut results = Vec::new();

    let mut session = EventSession::biathlon(SessionConfig::default(), seed);
    session.start();

    for _ in 0..10 {
        session.observe_sample(AngularSample::new(2.0, 2.0, 2.0));
    }
    let shaky_fire = session.fire();
    results.push(check(
        "session_fire_gated_by_stability",
        shaky_fire.is_none() && session.score() == 0 && session.target_index() == 0,
        format!("stability {:.2}, fire ignored", session.stability()),
    ));

    let mut cycles = 0;
    while !session.is_complete() && cycles < 100 {
        for _ in 0..10 {
            session.observe_sample(AngularSample::ZERO);
        }
        session.fire();
        session.advance();
        cycles += 1;
    }
    results.push(check(
        "session_completes",
        session.is_complete() && cycles == 5 && session.current_target().is_none(),
        format!("{} cycles, score {}", cycles, session.score()),
    ));

    let unsupported = EventKind::ALL
        .iter()
        .filter(|k| rules_for(**k, &SessionConfig::default()).is_err())
        .count();
    results.push(check(
        "session_unsupported_events_rejected",
        unsupported == EventKind::ALL.len() - 1,
        format!("{} of {} events rejected", unsupported, EventKind::ALL.len()),
    ));

    if verbose {
        for shot in session.shots() {
            println!(
                "  target {}: d={:.3} stab={:.2} → {}",
                shot.target_index, shot.hit_distance, shot.stability, shot.points
            );
        }
    }
    results
}

// ── 5. Ranking ──────────────────────────────────────────────────────────

fn validate_ranking(verbose: bool) -> Vec<TestResult> {
    println!("--- Ranking & Medals ---");
    let mut results = Vec::new();

    let mut ledger = TournamentLedger::new(3, 1, RecordPolicy::Overwrite);
    record_all(&mut ledger, &[(0, 0, 50), (1, 0, 50), (2, 0, 80)], &mut results);
    let order: Vec<usize> = ranking::standings(&ledger, 3, 1)
        .iter()
        .map(|r| r.player)
        .collect();
    results.push(check(
        "ranking_stable_ties",
        order == vec![2, 0, 1],
        format!("order {:?}", order),
    ));

    let mut ledger = TournamentLedger::new(4, 2, RecordPolicy::Overwrite);
    record_all(
        &mut ledger,
        &[(0, 0, 100), (1, 0, 80), (2, 0, 60), (3, 1, 90)],
        &mut results,
    );
    let g = ranking::medals_for(&ledger, 0, 4, 2);
    let b = ranking::medals_for(&ledger, 2, 4, 2);
    let lone = ranking::medals_for(&ledger, 3, 4, 2);
    results.push(check(
        "ranking_medal_policy",
        g.gold == 1 && b.bronze == 1 && lone.total() == 0,
        format!("p0 {:?}, p2 {:?}, lone scorer {:?}", g, b, lone),
    ));

    if verbose {
        println!("  ranking checks: {}", results.len());
    }
    results
}

/// Record `(player, event, score)` writes, failing a check for any rejected one.
fn record_all(ledger: &mut TournamentLedger, writes: &[(usize, usize, u32)], results: &mut Vec<TestResult>) {
    for &(player, event, score) in writes {
        if let Err(e) = ledger.record_result(player, event, score) {
            results.push(check(
                "ranking_ledger_write",
                false,
                format!("p{} e{}: {}", player, event, e),
            ));
        }
    }
}

// ── 6. Tournament ───────────────────────────────────────────────────────

fn run_tournament(seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- AI Tournament ---");
    let mut results = Vec::new();

    let config = TournamentConfig::default();
    let mut tournament = match Tournament::from_registration(config, &["Kari"], &["NOR"], seed) {
        Ok(t) => t,
        Err(e) => {
            results.push(check("tournament_create", false, e.to_string()));
            return results;
        }
    };

    let skills = [0.85, 0.35, 0.6, 0.95];
    let mut errors = Vec::new();
    for round in 0..3 {
        for (player, &skill) in skills.iter().enumerate() {
            let marksman = AiMarksman::new(skill);
            if let Err(e) = tournament.play_ai_attempt(player, EventKind::Biathlon, &marksman) {
                errors.push(format!("round {} p{}: {}", round, player, e));
            }
        }
    }
    results.push(check(
        "tournament_rounds",
        errors.is_empty(),
        if errors.is_empty() {
            "3 rounds × 4 players recorded".into()
        } else {
            errors.join("; ")
        },
    ));

    let attempts_ok = (0..4).all(|p| tournament.ledger().attempts_of(p, 0) == 3);
    results.push(check(
        "tournament_attempts_counted",
        attempts_ok,
        "every entrant has 3 biathlon attempts".into(),
    ));

    let standings = tournament.standings();
    println!("\n  Standings:");
    for (place, row) in standings.iter().enumerate() {
        let medals = row.medals;
        println!(
            "  {}. {:<8} {:<4} {:>4} pts  G{} S{} B{}",
            place + 1,
            tournament.roster().name(row.player),
            tournament.roster().country(row.player),
            row.total_score,
            medals.gold,
            medals.silver,
            medals.bronze
        );
    }
    let sorted = standings
        .windows(2)
        .all(|w| w[0].total_score >= w[1].total_score);
    results.push(check(
        "tournament_standings_sorted",
        sorted,
        format!("leader {}", tournament.roster().name(standings[0].player)),
    ));

    let roundtrip = persistence::to_bytes(&tournament.snapshot())
        .and_then(|bytes| persistence::from_bytes(&bytes));
    results.push(match roundtrip {
        Ok(snap) => check(
            "tournament_snapshot_roundtrip",
            snap == tournament.snapshot(),
            "bincode snapshot restored".into(),
        ),
        Err(e) => check("tournament_snapshot_roundtrip", false, e.to_string()),
    });

    if verbose {
        match persistence::to_json(&tournament.snapshot()) {
            Ok(json) => println!("\n{}", json),
            Err(e) => println!("  snapshot json failed: {}", e),
        }
        let pretty = serde_json::to_string_pretty(&tournament.medal_table()).unwrap_or_default();
        println!("\n  Medal table:\n{}", pretty);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_ledger_write_fails_a_check() {
        let mut ledger = TournamentLedger::new(2, 1, RecordPolicy::Overwrite);
        let mut results = Vec::new();
        record_all(&mut ledger, &[(0, 0, 40), (5, 0, 10)], &mut results);
        assert_eq!(ledger.score_of(0, 0), 40);
        assert_eq!(results.len(), 1);
        assert!(!results[0].passed);
        assert!(results[0].detail.starts_with("p5 e0"));
    }

    #[test]
    fn ledger_info_lines_show_by_default() {
        assert_eq!(log_filter(false), "info");
        assert_eq!(log_filter(true), "debug");
    }
}
