use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use xorshift_tt::config::DEFAULT_MAX_DEPTH;
use xorshift_tt::movegen::DEFAULT_DIFFS;
use xorshift_tt::transposition::DEFAULT_HASH_BITS;
use xorshift_tt::{Move, MoveGenerator, Search, SearchConfig, SearchResult, State, BENCHMARK_STATE};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Measure how a transposition table changes alpha-beta node counts"
)]
struct Cli {
    /// Search depth in plies
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    depth: u32,

    /// Branching factor
    #[arg(long, default_value_t = 4)]
    moves: usize,

    /// Table size exponent (2^n entries)
    #[arg(long, default_value_t = DEFAULT_HASH_BITS)]
    hash_bits: u32,

    /// Mixing iterations per (move, mover) pair (comma separated)
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_DIFFS)]
    diffs: Vec<u32>,

    /// Root state, decimal or 0x-prefixed hex
    #[arg(long, value_parser = parse_state)]
    state: Option<u64>,

    /// Draw the root state from a seeded RNG instead
    #[arg(long, conflicts_with = "state")]
    seed: Option<u64>,

    /// Search without the transposition table
    #[arg(long)]
    no_table: bool,

    /// Run with and without the table and report the difference
    #[arg(long, conflicts_with = "no_table")]
    compare: bool,

    /// Print the states reached by move orders 0,1 and 1,0 from the root
    #[arg(long)]
    show_transposition: bool,
}

fn parse_state(value: &str) -> Result<u64, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => value.replace('_', "").parse(),
    };
    parsed.map_err(|e| format!("invalid state '{value}': {e}"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let root = match (cli.state, cli.seed) {
        (Some(data), _) => State::new(data),
        (None, Some(seed)) => State::new(StdRng::seed_from_u64(seed).gen()),
        (None, None) => BENCHMARK_STATE,
    };

    let config = SearchConfig::default()
        .with_hash_bits(cli.hash_bits)
        .with_moves_per_state(cli.moves)
        .with_diffs(&cli.diffs)
        .with_max_depth(cli.depth)
        .with_table(!cli.no_table);

    let mut search = Search::from_config(&config).context("failed to set up search")?;

    if cli.show_transposition {
        show_transposition(&search, root)?;
    }

    if cli.compare {
        let without = search.run(root, cli.depth, false)?;
        search.clear_table();
        let with = search.run(root, cli.depth, true)?;

        report("without table", &without, root);
        report("with table", &with, root);
        print_table_fill(&search);

        let reduction = 1.0 - with.nodes as f64 / without.nodes.max(1) as f64;
        println!("node reduction: {:.1}%", reduction * 100.0);
        let speedup = without.elapsed.as_secs_f64() / with.elapsed.as_secs_f64().max(f64::EPSILON);
        println!("speedup: {speedup:.2}x");
    } else {
        let result = search.search(root)?;
        report(if cli.no_table { "without table" } else { "with table" }, &result, root);
        print_table_fill(&search);
    }

    Ok(())
}

/// Successors of `root` under move orders 0,1 and 1,0, or `None` when the
/// branching factor leaves only one move.
fn transposed_pair(generator: &MoveGenerator, root: State) -> Result<Option<(State, State)>> {
    if generator.moves_per_state() < 2 {
        return Ok(None);
    }
    let (first, second) = (Move::new(0), Move::new(1));

    let a = generator.apply_move(generator.apply_move(root, first)?, second)?;
    let b = generator.apply_move(generator.apply_move(root, second)?, first)?;
    Ok(Some((a, b)))
}

fn show_transposition(search: &Search, root: State) -> Result<()> {
    let generator = search.move_generator();
    let Some((a, b)) = transposed_pair(generator, root).context("failed to apply demo moves")?
    else {
        log::warn!(
            "skipping transposition demo: needs at least 2 moves per state, got {}",
            generator.moves_per_state()
        );
        return Ok(());
    };

    println!("root:     {root}");
    println!("0 then 1: {a}");
    println!("1 then 0: {b}");
    println!("same state: {}", a == b);
    Ok(())
}

fn report(label: &str, result: &SearchResult, root: State) {
    println!("[{label}]");
    println!("depth: {}", result.depth);
    println!("count: {}", result.nodes);
    println!("cache hits: {} ({:.2}%)", result.cache_hits, result.hit_rate() * 100.0);
    println!("root value: {}", result.root_value);
    println!("root value estimate: {}", root.value());
    if let Some(mv) = result.best_move {
        println!("best move: {mv}");
    }
    println!("time: {:.3}s", result.elapsed.as_secs_f64());
}

fn print_table_fill(search: &Search) {
    if let Some(table) = search.transposition_table() {
        println!(
            "table fill: {}/{} (2^{} slots, {}‰)",
            table.occupied(),
            table.capacity(),
            table.hash_bits(),
            table.fill_permille()
        );
    }
}
