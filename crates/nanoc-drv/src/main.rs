use clap::Parser;
use nanoc_drv::cli::{Cli, Command};
use nanoc_drv::harness::{self, HarnessConfig, Verdict};
use nanoc_drv::pipeline::{self, Emit, Source};
use nanoc_drv::subprocess;
use nanoc_util::FileId;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    let result = match cli.command {
        Command::Build {
            input,
            emit,
            output,
            assemble,
            cc,
        } => run_build(&input, emit, output.as_deref(), assemble, &cc),
        Command::Interp { input } => run_interp(&input),
        Command::Test {
            test_dir,
            cc,
            no_cache,
        } => run_test(&test_dir, &cc, !no_cache),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("could not read {}: {e}", path.display()))
}

fn run_build(
    input: &Path,
    emit: Emit,
    output: Option<&Path>,
    assemble: bool,
    cc: &str,
) -> anyhow::Result<ExitCode> {
    let text = read_source(input)?;
    log::debug!("lexing {}", input.display());
    let rendered = pipeline::render(
        Source {
            file: FileId::DUMMY,
            text: &text,
        },
        emit,
    )?;

    if assemble {
        anyhow::ensure!(
            matches!(emit, Emit::Asm | Emit::IrAsm),
            "--assemble only makes sense with --emit asm or --emit ir-asm"
        );
        let out_path = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| input.with_extension(""));
        log::debug!("assembling with {cc}");
        subprocess::assemble_and_link(cc, &rendered, &out_path)?;
        println!("wrote {}", out_path.display());
    } else if let Some(out_path) = output {
        std::fs::write(out_path, rendered)?;
    } else {
        println!("{rendered}");
    }

    Ok(ExitCode::SUCCESS)
}

fn run_interp(input: &Path) -> anyhow::Result<ExitCode> {
    let text = read_source(input)?;
    let exit = pipeline::interpret(Source {
        file: FileId::DUMMY,
        text: &text,
    })?;
    println!("{exit}");
    Ok(ExitCode::from((exit & 0xFF) as u8))
}

fn run_test(test_dir: &Path, cc: &str, use_cache: bool) -> anyhow::Result<ExitCode> {
    let summary = harness::run(&HarnessConfig {
        test_dir: test_dir.to_path_buf(),
        cc: cc.to_string(),
        use_cache,
    })?;

    for outcome in &summary.outcomes {
        match &outcome.verdict {
            Verdict::Agree(code) => {
                println!("ok    {} (exit {code})", outcome.path.display());
            }
            Verdict::Disagree {
                interp,
                codegen,
                ground_truth,
            } => {
                println!(
                    "FAIL  {} interp={interp:?} codegen={codegen:?} ground_truth={ground_truth:?}",
                    outcome.path.display()
                );
            }
            Verdict::Error(msg) => {
                println!("ERROR {} {msg}", outcome.path.display());
            }
        }
    }

    println!(
        "{} passed, {} failed ({} cache misses)",
        summary.passed(),
        summary.failed(),
        summary.cache_misses
    );
    for phase in summary.perf.phases() {
        if let Some(stats) = summary.perf.stats(phase) {
            println!(
                "  {phase:<12} min={:>8.3?} max={:>8.3?} avg={:>8.3?} n={}",
                stats.min, stats.max, stats.avg, stats.count
            );
        }
    }

    Ok(if summary.failed() == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
