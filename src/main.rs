use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use skewboost::config::{load_experiment_config, ExperimentConfig};
use skewboost::experiment::run_comparison;
use skewboost::report::{render_comparison, render_split_summary, write_scores_csv};
use skewboost::weights::WeightStrategy;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("SKEWBOOST_LOG", "error,skewboost=info"))
        .init();

    let matches = Command::new("skewboost")
        .version(clap::crate_version!())
        .about("Compare sample-weighting strategies for imbalanced boosted-tree classification")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to a JSON experiment configuration file. Flags override its values.")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("samples")
                .short('n')
                .long("samples")
                .help("Number of samples to generate")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("features")
                .long("features")
                .help("Number of feature columns")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("informative")
                .long("informative")
                .help("Number of feature columns carrying class signal")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("positive_fraction")
                .short('p')
                .long("positive-fraction")
                .help("Fraction of samples labeled positive")
                .value_parser(clap::value_parser!(f32)),
        )
        .arg(
            Arg::new("test_fraction")
                .short('t')
                .long("test-fraction")
                .help("Fraction of each class held out for testing")
                .value_parser(clap::value_parser!(f32)),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .help("Seed for both dataset generation and the stratified split")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("max_depth")
                .long("max-depth")
                .help("Maximum tree depth")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("rounds")
                .short('r')
                .long("rounds")
                .help("Number of boosting rounds")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("learning_rate")
                .short('l')
                .long("learning-rate")
                .help("Shrinkage applied to each boosting round")
                .value_parser(clap::value_parser!(f32)),
        )
        .arg(
            Arg::new("pos_weight")
                .long("pos-weight")
                .help("Positive-class weight for the manual strategy")
                .value_parser(clap::value_parser!(f32)),
        )
        .arg(
            Arg::new("neg_weight")
                .long("neg-weight")
                .help("Negative-class weight for the manual strategy")
                .value_parser(clap::value_parser!(f32)),
        )
        .arg(
            Arg::new("strategies")
                .long("strategies")
                .help("Comma-separated strategy list: uniform, manual, auto")
                .value_parser(clap::builder::NonEmptyStringValueParser::new()),
        )
        .arg(
            Arg::new("output_file")
                .short('o')
                .long("output")
                .help("Write per-sample test scores of every strategy to this CSV file")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .get_matches();

    let config = build_config(&matches)?;

    let report = match run_comparison(&config) {
        Ok(report) => report,
        Err(e) => {
            log::error!("Comparison failed: {:#}", e);
            std::process::exit(1)
        }
    };

    println!("{}", render_split_summary(&report));
    println!();
    println!("{}", render_comparison(&report));

    if let Some(path) = matches.get_one::<PathBuf>("output_file") {
        write_scores_csv(&report, path)?;
        log::info!("Wrote test scores to {:?}", path);
    }

    Ok(())
}

/// Start from the JSON config (or defaults) and fold the CLI flags on top.
fn build_config(matches: &ArgMatches) -> Result<ExperimentConfig> {
    let mut config = if let Some(path) = matches.get_one::<PathBuf>("config") {
        log::info!("Loading experiment config from {:?}", path);
        load_experiment_config(path)?
    } else {
        ExperimentConfig::default()
    };

    if let Some(&samples) = matches.get_one::<usize>("samples") {
        config.generator.samples = samples;
    }
    if let Some(&features) = matches.get_one::<usize>("features") {
        config.generator.features = features;
    }
    if let Some(&informative) = matches.get_one::<usize>("informative") {
        config.generator.informative = informative;
    }
    if let Some(&fraction) = matches.get_one::<f32>("positive_fraction") {
        config.generator.positive_fraction = fraction;
    }
    if let Some(&fraction) = matches.get_one::<f32>("test_fraction") {
        config.test_fraction = fraction;
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.generator.seed = seed;
        config.split_seed = seed;
    }
    if let Some(&depth) = matches.get_one::<u32>("max_depth") {
        config.trainer.max_depth = depth;
    }
    if let Some(&rounds) = matches.get_one::<u32>("rounds") {
        config.trainer.num_boost_round = rounds;
    }
    if let Some(&rate) = matches.get_one::<f32>("learning_rate") {
        config.trainer.learning_rate = rate;
    }

    if let Some(list) = matches.get_one::<String>("strategies") {
        config.strategies = list
            .split(',')
            .map(|s| s.trim().parse::<WeightStrategy>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(anyhow::Error::msg)?;
    }

    // Manual weight flags apply to every manual strategy in the list.
    let pos_weight = matches.get_one::<f32>("pos_weight").copied();
    let neg_weight = matches.get_one::<f32>("neg_weight").copied();
    if pos_weight.is_some() || neg_weight.is_some() {
        for strategy in &mut config.strategies {
            if let WeightStrategy::ManualClassWeight {
                neg_weight: neg,
                pos_weight: pos,
            } = strategy
            {
                if let Some(w) = neg_weight {
                    *neg = w;
                }
                if let Some(w) = pos_weight {
                    *pos = w;
                }
            }
        }
    }

    Ok(config)
}
