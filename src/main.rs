use std::time::{Duration, Instant};

use clap::Parser;
use flight_rl::{AgentConfig, Position, QLearningAgent, Route, StepReport, StopHandle, ThreadSleepPacer};

#[derive(Parser, Debug)]
#[command(name = "flight_rl", about = "Fly a Q-learning pilot between two points")]
struct Args {
    /// Departure as LAT,LNG
    #[arg(long, value_parser = parse_position, default_value = "0,0")]
    source: Position,

    /// Arrival as LAT,LNG
    #[arg(long, value_parser = parse_position, default_value = "0,10")]
    dest: Position,

    #[arg(long, default_value_t = 1)]
    episodes: usize,

    #[arg(long)]
    seed: Option<u64>,

    /// JSON agent config; unspecified fields keep their defaults
    #[arg(long)]
    config: Option<String>,

    /// Override the per-step visualization delay
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Print every step, not just episode summaries
    #[arg(long)]
    steps: bool,
}

fn parse_position(raw: &str) -> Result<Position, String> {
    let (lat, lng) = raw.split_once(',').ok_or_else(|| format!("expected LAT,LNG, got {raw:?}"))?;
    let lat = lat.trim().parse::<f64>().map_err(|e| format!("latitude: {e}"))?;
    let lng = lng.trim().parse::<f64>().map_err(|e| format!("longitude: {e}"))?;
    Ok(Position::new(lat, lng))
}

fn main() -> flight_rl::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AgentConfig::from_json_file(path)?,
        None => AgentConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(delay) = args.delay_ms {
        config.step_delay_ms = delay;
    }

    let route = Route::new(args.source, args.dest)?;
    let mut agent = QLearningAgent::new(config)?;
    let mut pacer = ThreadSleepPacer(if args.episodes > 1 && args.delay_ms.is_none() {
        Duration::ZERO
    } else {
        agent.config().step_delay()
    });
    let stop = StopHandle::new();

    println!(
        "Route {} -> {}: {:.0} km, exploration {:.0}%",
        route.source,
        route.destination,
        route.total_distance(),
        agent.exploration_rate() * 100.0
    );

    let start = Instant::now();
    let print_steps = args.steps;
    let mut sink = |r: &StepReport| {
        if print_steps {
            println!(
                "  Step {:3}: Speed {:2}, Fuel {:5.1}%, Dist {:6.0}km, at {}",
                r.step,
                r.speed,
                r.fuel.max(0.0),
                r.distance_km,
                r.position
            );
        }
    };

    for ep in 0..args.episodes {
        let summary = agent.fly_episode(route, &mut sink, &mut pacer, &stop);
        println!(
            "E{:6}  {:?} after {} steps, fuel: {:.1}%, R: {:.2}, states: {}",
            ep,
            summary.outcome,
            summary.steps,
            summary.final_fuel.max(0.0),
            summary.total_reward,
            summary.table_size
        );
    }

    println!("Training time: {:?}", start.elapsed());
    Ok(())
}
