mod cli;
mod logging;

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use clap::Parser;
use tracing::{debug, error, info};

use microbe_web::command::Session;
use microbe_web::config::RunConfig;
use microbe_web::error::Result;
use microbe_web::foodweb::FoodWeb;
use microbe_web::model::entity::Attribute;
use microbe_web::search::{find_best_with, pick_best, rank_all, Selection};
use microbe_web::{io as data, SiteProfile};

use crate::cli::{Cli, Commands, FeedArgs, SelectArgs};
use crate::logging::LogSettings;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = LogSettings::from_cli(&cli).install() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let result = match cli.command {
        Commands::Select(args) => select(args),
        Commands::Feed(args) => feed(args),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn select(args: SelectArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };
    if let Some(group_size) = args.group_size {
        config.group_size = group_size;
    }
    if args.undesired_trait_check {
        config.rules.undesired_trait_check = true;
    }

    let microbes = data::load_microbes(&args.microbes)?;
    info!("Loaded {} candidate microbes.", microbes.len());

    let best = if args.all {
        let ranked = rank_all(&microbes, &config.profile, config.group_size, config.rules)?;
        for selection in &ranked {
            println!("Combo {:?} -> Score: {}", selection.group.names(), selection.score);
        }
        println!();
        pick_best(ranked)?
    } else {
        find_best_with(&microbes, &config.profile, config.group_size, config.rules)?
    };
    print_selection(&best, &config);
    Ok(())
}

fn print_selection(best: &Selection, config: &RunConfig) {
    println!("Selected microbes:");
    for m in best.group.members() {
        let mut traits: Vec<&String> = m.traits.iter().collect();
        traits.sort();
        println!("  {}", m.name);
        println!("     - Permeability: {}", m.permeability);
        println!("     - Mobility:     {}", m.mobility);
        println!("     - Energy:       {}", m.energy);
        println!("     - Traits:       {:?}\n", traits);
    }

    println!(
        "Top {} microbes (Total Score: {}/{}):\n",
        best.group.len(),
        best.score,
        config.rules.max_score()
    );

    let averages = best.averages();
    let profile: &SiteProfile = &config.profile;
    println!("Group averages:");
    for attribute in Attribute::ALL {
        println!("  Avg {:<13} {:.2}", format!("{}:", attribute.key()), averages.get(attribute));
        println!("  Range:            {}", profile.range(attribute));
    }
}

fn feed(args: FeedArgs) -> Result<()> {
    let records = data::load_species(&args.species)?;
    let web = FoodWeb::build(records)?;
    info!("Built food web with {} species.", web.len());
    print_web(&web);

    let reader: Box<dyn BufRead> = match &args.commands {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => {
            println!("\nEnter an animal to simulate feeding (or type 'exit'):");
            Box::new(io::stdin().lock())
        }
    };

    let mut session = Session::new(web);
    let tally = session.run(reader, |outcome, _| println!("{outcome}"))?;
    info!(fed = tally.fed, hungry = tally.hungry, ignored = tally.ignored, "Exiting simulation.");

    println!();
    print_web(session.web());
    Ok(())
}

fn print_web(web: &FoodWeb) {
    for (order, species) in web.eating_order().into_iter().enumerate() {
        let layer = web.trophic_layer(&species.name).map(|l| l.level()).unwrap_or_default();
        println!(
            "{}. {} (layer {}, provided: {}, needed: {})",
            order + 1,
            species.name,
            layer,
            species.calories_provided,
            species.calories_needed
        );
    }
    for species in web.iter().filter(|s| s.is_producer()) {
        println!(
            "{} (producer, provided: {}, needed: {})",
            species.name, species.calories_provided, species.calories_needed
        );
    }
}
