//! Flappy Mode entry point
//!
//! On the web the JavaScript presentation layer drives `WebGame` (see
//! `platform::web`). Natively this runs a headless autopilot game, saves the
//! score to a JSON leaderboard and prints the result.
//!
//! Usage: `flappy-mode [NAME] [SEED] [SCORES_FILE]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_mode::persistence::file::FileScoreStore;
    use flappy_mode::persistence::{SubmitOutcome, submit_game_over};
    use flappy_mode::sim::autopilot;
    use flappy_mode::{GameSession, Settings, Tuning};

    /// Ten minutes of play at 60 Hz
    const MAX_DEMO_TICKS: u64 = 60 * 60 * 10;

    env_logger::init();
    log::info!("Flappy Mode (native) starting...");

    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| Settings::load().player_name);
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            eprintln!("Invalid seed: {e}");
            std::process::exit(2);
        }
        None => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0),
    };
    let scores_path = args
        .next()
        .unwrap_or_else(|| "flappy_mode_scores.json".to_string());

    let mut session = match GameSession::new(seed, Tuning::default()) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    if let Err(e) = session.request_start(&name) {
        eprintln!("{e}");
        std::process::exit(2);
    }
    log::info!("Autopilot playing as {} with seed {}", name, seed);

    let mut summary = None;
    while session.state().time_ticks < MAX_DEMO_TICKS {
        if autopilot::wants_jump(session.state()) {
            session.request_jump();
        }
        if let Some(done) = session.step() {
            summary = Some(done);
            break;
        }
    }

    let Some(summary) = summary else {
        let state = session.state();
        println!(
            "Autopilot survived {} ticks (score {}, level {}); not submitted",
            state.time_ticks, state.score, state.level
        );
        return;
    };

    println!(
        "Game over ({:?}): score {}, level {}",
        summary.cause, summary.score, summary.level
    );

    let store = FileScoreStore::new(&scores_path);
    let report = futures_lite::future::block_on(submit_game_over(
        &store,
        &summary.nickname,
        summary.score,
    ));
    match &report.outcome {
        SubmitOutcome::Created | SubmitOutcome::Improved { .. } => {
            println!("New personal best saved to {}", store.path().display())
        }
        SubmitOutcome::NotImproved { best } => println!("Personal best is still {best}"),
        SubmitOutcome::Failed { reason } => println!("Score not saved: {reason}"),
    }

    if let Some(top) = &report.top_scores {
        println!("\nTop {}:", top.len());
        for (i, record) in top.iter().enumerate() {
            println!("{:>3}. {:<20} {:>8}", i + 1, record.nickname, record.score);
        }
    }
    session.accept_report(summary.run_id, report);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
