//! The ground-truth test harness (spec component C9), grounded on
//! `original_source/++c/test.cpp`: for every `.c` fixture under a
//! directory tree, run the interpreter, run the AST codegen's emitted
//! assembly (assembled and linked by an external compiler driver), and
//! compare both against an external reference compiler's own execution
//! of the same source - spec §8 invariant 4, the central cross-check.
//!
//! Independent fixtures are fanned out over `rayon` (an ambient
//! test-tooling convenience, not a core-pipeline concern - spec §5
//! keeps the compiler itself strictly single-threaded); the shared test
//! cache and perf histograms are behind a `Mutex` for the duration of
//! the run.

use crate::cache::{path_hash, TestCache};
use crate::dirwalk::collect_files;
use crate::error::DriverError;
use crate::pipeline::{self, Source};
use crate::subprocess;
use crate::timer::PerfNumbers;
use nanoc_util::FileId;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub struct HarnessConfig {
    pub test_dir: PathBuf,
    pub cc: String,
    pub use_cache: bool,
}

#[derive(Debug)]
pub enum Verdict {
    /// Interpreter, codegen, and ground truth all agree on this exit code.
    Agree(i64),
    /// At least one of the three disagreed; holds each side's result.
    Disagree {
        interp: Option<i64>,
        codegen: Option<i32>,
        ground_truth: Option<i32>,
    },
    /// A pipeline stage (lex/parse/resolve) failed before any result
    /// could be compared.
    Error(String),
}

pub struct FileOutcome {
    pub path: PathBuf,
    pub verdict: Verdict,
}

pub struct Summary {
    pub outcomes: Vec<FileOutcome>,
    pub perf: PerfNumbers,
    pub cache_misses: u32,
}

impl Summary {
    pub fn passed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.verdict, Verdict::Agree(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }
}

pub fn run(config: &HarnessConfig) -> Result<Summary, DriverError> {
    let files = collect_files(&config.test_dir, ".c").map_err(|e| DriverError::io(&config.test_dir, e))?;
    let cache_path = config.test_dir.join("tests.cache");

    let cache = Mutex::new(if config.use_cache {
        TestCache::load(&cache_path).map_err(|e| DriverError::CorruptCache(e.to_string()))?
    } else {
        TestCache::new()
    });
    let perf = Mutex::new(PerfNumbers::new());

    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .map(|path| evaluate_file(path, &config.cc, &cache, &perf))
        .collect();

    let cache_misses = {
        let cache = cache.lock().unwrap();
        if config.use_cache {
            let _ = cache.save(&cache_path);
        }
        cache.misses()
    };

    Ok(Summary {
        outcomes,
        perf: perf.into_inner().unwrap(),
        cache_misses,
    })
}

fn evaluate_file(
    path: &Path,
    cc: &str,
    cache: &Mutex<TestCache>,
    perf: &Mutex<PerfNumbers>,
) -> FileOutcome {
    match try_evaluate_file(path, cc, cache, perf) {
        Ok(verdict) => FileOutcome {
            path: path.to_path_buf(),
            verdict,
        },
        Err(e) => FileOutcome {
            path: path.to_path_buf(),
            verdict: Verdict::Error(e.to_string()),
        },
    }
}

fn try_evaluate_file(
    path: &Path,
    cc: &str,
    cache: &Mutex<TestCache>,
    perf: &Mutex<PerfNumbers>,
) -> Result<Verdict, DriverError> {
    let start = std::time::Instant::now();
    let text = std::fs::read_to_string(path).map_err(|e| DriverError::io(path, e))?;
    perf.lock().unwrap().record("read_file", start.elapsed());

    let interp_result = {
        let s = Source {
            file: FileId::DUMMY,
            text: &text,
        };
        let t0 = std::time::Instant::now();
        let r = pipeline::interpret(s);
        perf.lock().unwrap().record("interp", t0.elapsed());
        r
    };

    let codegen_result = {
        let t0 = std::time::Instant::now();
        let r = pipeline::render(
            Source {
                file: FileId::DUMMY,
                text: &text,
            },
            pipeline::Emit::Asm,
        );
        perf.lock().unwrap().record("gen_asm", t0.elapsed());
        r.and_then(|asm| {
            let dir = tempfile::tempdir().map_err(|e| DriverError::io(path, e))?;
            let exe = dir.path().join("fixture.out");
            let t0 = std::time::Instant::now();
            subprocess::assemble_and_link(cc, &asm, &exe)?;
            perf.lock().unwrap().record("assemble", t0.elapsed());

            let t0 = std::time::Instant::now();
            let code = subprocess::run_executable(&exe);
            perf.lock().unwrap().record("run_exe", t0.elapsed());
            code
        })
    };

    let hash = path_hash(path);
    let ground_truth_result = {
        let t0 = std::time::Instant::now();
        let cached = cache.lock().unwrap().get(hash);
        let result = match cached {
            Some(exit_code) => Ok(exit_code),
            None => {
                let exit_code = subprocess::ground_truth(cc, path)?;
                cache.lock().unwrap().insert(hash, exit_code);
                Ok(exit_code)
            }
        };
        perf.lock().unwrap().record("ground_truth", t0.elapsed());
        result
    };

    let interp = interp_result.ok();
    let codegen = codegen_result.ok();
    let ground_truth = ground_truth_result.ok();

    let agree = match (interp, codegen, ground_truth) {
        (Some(i), Some(c), Some(g)) => i == c as i64 && c as i64 == g as i64,
        _ => false,
    };

    if agree {
        Ok(Verdict::Agree(interp.unwrap()))
    } else {
        Ok(Verdict::Disagree {
            interp,
            codegen,
            ground_truth,
        })
    }
}
