mod choice;
mod expr;
mod ir;
mod manifest;
mod printer;
mod profile;
mod runtime;
mod scope;
mod stmt;
mod symbols;
mod value;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use rand::SeedableRng;

use ir::RootNode;
use manifest::Manifest;
use profile::{available_profiles, get_profile};
use stmt::ProgramGenerator;
use symbols::SymbolTable;

#[derive(Parser)]
#[command(name = "php-stress")]
#[command(about = "Generate random PHP programs for differential testing")]
struct Cli {
    /// Generation profile (available: minimal, full)
    #[arg(long, default_value = "full")]
    profile: String,

    /// Number of programs to generate
    #[arg(long, default_value_t = 10)]
    count: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Output base directory
    #[arg(long, default_value = "/tmp/php-stress")]
    output: PathBuf,

    /// List available profiles and exit
    #[arg(long)]
    list_profiles: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.list_profiles {
        println!("Available profiles:");
        for name in available_profiles() {
            println!("  {}", name);
        }
        return ExitCode::SUCCESS;
    }

    let profile = match get_profile(&cli.profile) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Use the provided seed or derive one from the current time.
    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    if let Err(e) = fs::create_dir_all(&cli.output) {
        eprintln!(
            "error: failed to create base directory '{}': {}",
            cli.output.display(),
            e
        );
        return ExitCode::FAILURE;
    }

    let run_dir = cli.output.join(format!("seed-{seed}"));
    if run_dir.exists() {
        eprintln!("error: run directory already exists: {}", run_dir.display());
        return ExitCode::FAILURE;
    }
    if let Err(e) = fs::create_dir(&run_dir) {
        eprintln!(
            "error: failed to create run directory '{}': {}",
            run_dir.display(),
            e
        );
        return ExitCode::FAILURE;
    }

    let manifest = Manifest::new(seed, cli.profile.clone(), cli.count);
    if let Err(e) = manifest.write_to_dir(&run_dir) {
        eprintln!("error: failed to write manifest: {}", e);
        return ExitCode::FAILURE;
    }

    if let Err(e) = runtime::write_runtime_lib(&run_dir) {
        eprintln!("error: failed to write runtime library: {}", e);
        return ExitCode::FAILURE;
    }

    let symtab = SymbolTable::builtin();
    for i in 0..cli.count {
        // Each program gets its own derived seed so any single file can be
        // regenerated without replaying the whole batch.
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed.wrapping_add(i as u64));
        let mut generator = ProgramGenerator::new(&mut rng, &symtab, &profile.gen);
        let roots = generator.generate_program();

        let path = run_dir.join(format!("prog_{i}.php"));
        if let Err(e) = fs::write(&path, render_program(&roots)) {
            eprintln!("error: failed to write '{}': {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    }

    println!("php-stress: generated program batch");
    println!("  seed:     {seed}");
    println!("  profile:  {}", cli.profile);
    println!("  programs: {}", cli.count);
    println!("  output:   {}", run_dir.display());

    ExitCode::SUCCESS
}

/// Render a program file: the `<?php` header plus every root node.
fn render_program(roots: &[RootNode]) -> String {
    let mut out = String::from("<?php\n\n");
    for root in roots {
        printer::print_root_node(&mut out, root);
    }
    out
}
