use clap::Parser;

use redaccel_feedback::Persona;

use super::*;

#[test]
fn parses_rank_with_defaults() {
    let cli = Cli::try_parse_from(["redaccel", "rank", "--keyword", "rust tool"])
        .expect("expected valid cli args");

    match cli.command {
        Commands::Rank(args) => {
            assert_eq!(args.keyword, "rust tool");
            assert_eq!(args.top_n, 10);
            assert!(!args.no_traffic);
            assert!(!args.json);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_rank_flags() {
    let cli = Cli::try_parse_from([
        "redaccel",
        "rank",
        "-k",
        "crm",
        "--top-n",
        "3",
        "--no-traffic",
        "--json",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Rank(RankArgs {
            top_n: 3,
            no_traffic: true,
            json: true,
            ..
        })
    ));
}

#[test]
fn rank_requires_keyword() {
    assert!(Cli::try_parse_from(["redaccel", "rank"]).is_err());
}

#[test]
fn parses_simulate() {
    let cli = Cli::try_parse_from([
        "redaccel",
        "simulate",
        "--name",
        "Redaccel",
        "--description",
        "Thread finder",
        "--feature",
        "ranking",
        "--feature",
        "traffic",
        "--persona",
        "skeptic",
        "--persona",
        "power-user",
        "--per-persona",
        "3",
        "--conversion-rate",
        "0.02",
    ])
    .unwrap();

    match cli.command {
        Commands::Simulate(args) => {
            assert_eq!(args.features, vec!["ranking", "traffic"]);
            assert_eq!(args.personas, vec![Persona::Skeptic, Persona::PowerUser]);
            assert_eq!(args.per_persona, 3);
            assert_eq!(args.market_size, 10_000);
            assert_eq!(args.conversion_rate, Some(0.02));
            assert!(args.target_population.is_none());
            assert!(args.pricing_file.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn simulate_requires_a_feature() {
    assert!(Cli::try_parse_from([
        "redaccel",
        "simulate",
        "--name",
        "Redaccel",
        "--description",
        "Thread finder",
    ])
    .is_err());
}

#[test]
fn simulate_rejects_unknown_persona() {
    assert!(Cli::try_parse_from([
        "redaccel",
        "simulate",
        "--name",
        "Redaccel",
        "--description",
        "Thread finder",
        "--feature",
        "ranking",
        "--persona",
        "pirate",
    ])
    .is_err());
}

#[test]
fn parses_personas_json() {
    let cli = Cli::try_parse_from(["redaccel", "personas", "--json"]).unwrap();
    assert!(matches!(cli.command, Commands::Personas { json: true }));
}

#[test]
fn personas_listing_succeeds() {
    assert!(simulate::run_personas(true).is_ok());
    assert!(simulate::run_personas(false).is_ok());
}
