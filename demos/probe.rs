use std::env;

use tablebase_verdict::{DEFAULT_FEN, OracleConfig, Prober};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // 1. Pick the position, bare kings by default
    let fen = env::args().nth(1).unwrap_or_else(|| DEFAULT_FEN.to_string());

    // 2. Open the configured oracle once and share it
    let oracle = OracleConfig::from_env().open()?;
    let prober = Prober::new(&oracle);

    // 3. Report
    let report = prober.report(&fen)?;
    println!("------------------------------------------------");
    println!("{} ({})", report.verdict.status, report.material);
    println!("------------------------------------------------");
    for (label, group) in [
        ("Winning", &report.moves.winning),
        ("Drawing", &report.moves.drawing),
        ("Losing", &report.moves.losing),
    ] {
        if group.is_empty() {
            continue;
        }
        println!("{label}:");
        for m in group {
            println!("  {:<8} {}", m.san, m.badge);
        }
    }

    // 4. Machine-readable summary, if the position is legal
    if !report.illegal {
        let summary = prober.probe_text(&report.fen)?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
