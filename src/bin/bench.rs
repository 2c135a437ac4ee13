//! `heap-bench` — a small CLI that times both allocators across a handful of
//! allocation patterns and reports the results as CSV.
//!
//! ```text
//! heap-bench [-a segregated|buddy|all] [-n NUM_OPS] [-o FILE]
//! ```
//!
//! Only built with the `bench-harness` feature: the library itself never
//! needs `env_logger` or `rand`.

use inplace_heap::{AlgorithmKind, Facade};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{self, Write};
use std::time::Instant;

const DEFAULT_HEAP_SIZE: usize = 10 * 1024 * 1024;
const MAX_ALLOCS: usize = 10_000;
/// Seed reproducing the original benchmark's `srand(42)` for the random
/// scenario's size draws and shuffle.
const RNG_SEED: u64 = 42;

struct BenchResult {
    allocator_name: &'static str,
    benchmark_name: &'static str,
    alloc_time_us: f64,
    free_time_us: f64,
    alloc_ops: usize,
    free_ops: usize,
}

impl BenchResult {
    fn alloc_ops_per_sec(&self) -> f64 {
        if self.alloc_time_us <= 0.0 {
            0.0
        } else {
            self.alloc_ops as f64 / (self.alloc_time_us / 1_000_000.0)
        }
    }

    fn free_ops_per_sec(&self) -> f64 {
        if self.free_time_us <= 0.0 {
            0.0
        } else {
            self.free_ops as f64 / (self.free_time_us / 1_000_000.0)
        }
    }
}

fn print_csv_header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "Allocator,Benchmark,AllocTime_us,FreeTime_us,AllocOps,FreeOps,AllocOpsPerSec,FreeOpsPerSec,PeakUtilization"
    )
}

fn print_result_csv<W: Write>(out: &mut W, result: &BenchResult, peak_utilization: f64) -> io::Result<()> {
    writeln!(
        out,
        "{},{},{:.2},{:.2},{},{},{:.2},{:.2},{:.6}",
        result.allocator_name,
        result.benchmark_name,
        result.alloc_time_us,
        result.free_time_us,
        result.alloc_ops,
        result.free_ops,
        result.alloc_ops_per_sec(),
        result.free_ops_per_sec(),
        peak_utilization,
    )
}

fn micros(duration: std::time::Duration) -> f64 {
    duration.as_secs_f64() * 1_000_000.0
}

/// Allocate `num_ops` (capped at 100,000) blocks of 64 bytes each, then free
/// them all in the same order they were allocated.
fn benchmark_sequential(facade: &mut Facade<'_>, name: &'static str, num_ops: usize) -> (BenchResult, f64) {
    let n = num_ops.min(100_000);
    facade.reset_stats();

    let alloc_start = Instant::now();
    let mut ptrs = Vec::with_capacity(n);
    for _ in 0..n {
        match facade.alloc(64) {
            Some(ptr) => ptrs.push(ptr),
            None => break,
        }
    }
    let alloc_time = micros(alloc_start.elapsed());

    let free_start = Instant::now();
    for ptr in &ptrs {
        unsafe { facade.free(*ptr) };
    }
    let free_time = micros(free_start.elapsed());

    let ops = ptrs.len();
    (
        BenchResult {
            allocator_name: name,
            benchmark_name: "Sequential",
            alloc_time_us: alloc_time,
            free_time_us: free_time,
            alloc_ops: ops,
            free_ops: ops,
        },
        facade.stats().peak_utilization(),
    )
}

/// Allocate blocks of random sizes in `[16, 2064)`, shuffle the resulting
/// pointers, then free them in the shuffled order.
fn benchmark_random(facade: &mut Facade<'_>, name: &'static str, num_ops: usize) -> (BenchResult, f64) {
    let cap = num_ops.min(2000);
    facade.reset_stats();
    let mut rng = StdRng::seed_from_u64(RNG_SEED);

    let alloc_start = Instant::now();
    let mut ptrs = Vec::with_capacity(cap);
    for _ in 0..cap {
        let size = 16 + rng.gen_range(0..2048);
        match facade.alloc(size) {
            Some(ptr) => ptrs.push(ptr),
            None => break,
        }
    }
    let alloc_time = micros(alloc_start.elapsed());

    // Fisher-Yates shuffle to approximate a random free order.
    let len = ptrs.len();
    for i in 0..len.saturating_sub(1) {
        let j = i + rng.gen_range(0..(len - i));
        ptrs.swap(i, j);
    }

    let free_start = Instant::now();
    for ptr in &ptrs {
        unsafe { facade.free(*ptr) };
    }
    let free_time = micros(free_start.elapsed());

    let ops = ptrs.len();
    (
        BenchResult {
            allocator_name: name,
            benchmark_name: "Random",
            alloc_time_us: alloc_time,
            free_time_us: free_time,
            alloc_ops: ops,
            free_ops: ops,
        },
        facade.stats().peak_utilization(),
    )
}

/// Interleave small and large allocations: 500 32-byte blocks, free every
/// other one, allocate 250 128-byte blocks in their place, then free
/// everything.
fn benchmark_mixed(facade: &mut Facade<'_>, name: &'static str) -> (BenchResult, f64) {
    facade.reset_stats();
    let mut ptrs: Vec<Option<core::ptr::NonNull<u8>>> = vec![None; 500];

    let mut alloc_time = 0.0;
    let mut free_time = 0.0;
    let mut alloc_ops = 0;
    let mut free_ops = 0;

    let t0 = Instant::now();
    for slot in ptrs.iter_mut() {
        *slot = facade.alloc(32);
        if slot.is_some() {
            alloc_ops += 1;
        }
    }
    alloc_time += micros(t0.elapsed());

    let t0 = Instant::now();
    for slot in ptrs.iter_mut().step_by(2) {
        if let Some(ptr) = slot.take() {
            unsafe { facade.free(ptr) };
            free_ops += 1;
        }
    }
    free_time += micros(t0.elapsed());

    let t0 = Instant::now();
    for slot in ptrs.iter_mut().step_by(2) {
        *slot = facade.alloc(128);
        if slot.is_some() {
            alloc_ops += 1;
        }
    }
    alloc_time += micros(t0.elapsed());

    let t0 = Instant::now();
    for slot in ptrs.iter_mut() {
        if let Some(ptr) = slot.take() {
            unsafe { facade.free(ptr) };
            free_ops += 1;
        }
    }
    free_time += micros(t0.elapsed());

    (
        BenchResult {
            allocator_name: name,
            benchmark_name: "Mixed",
            alloc_time_us: alloc_time,
            free_time_us: free_time,
            alloc_ops,
            free_ops,
        },
        facade.stats().peak_utilization(),
    )
}

/// Allocate as many 256-byte blocks as `num_ops` allows (capped at
/// `MAX_ALLOCS`), then free them all.
fn benchmark_stress(facade: &mut Facade<'_>, name: &'static str, num_ops: usize) -> (BenchResult, f64) {
    facade.reset_stats();
    let n = num_ops.min(MAX_ALLOCS);

    let alloc_start = Instant::now();
    let mut ptrs = Vec::with_capacity(n);
    for _ in 0..n {
        match facade.alloc(256) {
            Some(ptr) => ptrs.push(ptr),
            None => break,
        }
    }
    let alloc_time = micros(alloc_start.elapsed());

    let free_start = Instant::now();
    for ptr in &ptrs {
        unsafe { facade.free(*ptr) };
    }
    let free_time = micros(free_start.elapsed());

    let ops = ptrs.len();
    (
        BenchResult {
            allocator_name: name,
            benchmark_name: "Stress",
            alloc_time_us: alloc_time,
            free_time_us: free_time,
            alloc_ops: ops,
            free_ops: ops,
        },
        facade.stats().peak_utilization(),
    )
}

fn run_benchmarks<W: Write>(kind: AlgorithmKind, name: &'static str, num_ops: usize, out: &mut W) -> io::Result<()> {
    log::info!("running benchmarks for {name}");

    let mut facade = Facade::create_with_malloc(DEFAULT_HEAP_SIZE, kind)
        .expect("DEFAULT_HEAP_SIZE comfortably exceeds either algorithm's minimum block");
    let (result, util) = benchmark_sequential(&mut facade, name, num_ops);
    print_result_csv(out, &result, util)?;

    let mut facade = Facade::create_with_malloc(DEFAULT_HEAP_SIZE, kind).unwrap();
    let (result, util) = benchmark_random(&mut facade, name, num_ops);
    print_result_csv(out, &result, util)?;

    let mut facade = Facade::create_with_malloc(DEFAULT_HEAP_SIZE, kind).unwrap();
    let (result, util) = benchmark_mixed(&mut facade, name);
    print_result_csv(out, &result, util)?;

    let mut facade = Facade::create_with_malloc(DEFAULT_HEAP_SIZE, kind).unwrap();
    let (result, util) = benchmark_stress(&mut facade, name, num_ops);
    print_result_csv(out, &result, util)?;

    Ok(())
}

fn print_usage(prog_name: &str) {
    println!("Usage: {prog_name} [OPTIONS]");
    println!("Options:");
    println!("  -a, --allocator <type>   Allocator type: segregated, buddy, all (default: all)");
    println!("  -n, --num-ops <number>   Number of operations (default: 10000)");
    println!("  -o, --output <file>      Output CSV file (default: stdout)");
    println!("  -h, --help               Show this help message");
}

enum Selection {
    All,
    One(AlgorithmKind, &'static str),
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let prog_name = args.first().map(String::as_str).unwrap_or("heap-bench");

    let mut selection = Selection::All;
    let mut num_ops: usize = 10_000;
    let mut output_file: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-a" | "--allocator" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: Missing allocator type");
                    print_usage(prog_name);
                    std::process::exit(1);
                };
                selection = match value.as_str() {
                    "segregated" => Selection::One(AlgorithmKind::Segregated, "segregated"),
                    "buddy" => Selection::One(AlgorithmKind::Buddy, "buddy"),
                    "all" => Selection::All,
                    other => {
                        eprintln!("Error: Unknown allocator type: {other}");
                        print_usage(prog_name);
                        std::process::exit(1);
                    }
                };
                i += 2;
            }
            "-n" | "--num-ops" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: Missing number of operations");
                    print_usage(prog_name);
                    std::process::exit(1);
                };
                num_ops = match value.parse() {
                    Ok(n) => n,
                    Err(_) => {
                        eprintln!("Error: Invalid number of operations: {value}");
                        print_usage(prog_name);
                        std::process::exit(1);
                    }
                };
                i += 2;
            }
            "-o" | "--output" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: Missing output file");
                    print_usage(prog_name);
                    std::process::exit(1);
                };
                output_file = Some(value.clone());
                i += 2;
            }
            "-h" | "--help" => {
                print_usage(prog_name);
                return;
            }
            other => {
                eprintln!("Error: Unknown option: {other}");
                print_usage(prog_name);
                std::process::exit(1);
            }
        }
    }

    let mut file_writer;
    let mut stdout_writer;
    let out: &mut dyn Write = match &output_file {
        Some(path) => {
            file_writer = File::create(path).unwrap_or_else(|e| {
                eprintln!("Error: could not create {path}: {e}");
                std::process::exit(1);
            });
            &mut file_writer
        }
        None => {
            stdout_writer = io::stdout();
            &mut stdout_writer
        }
    };

    print_csv_header(out).expect("writing the CSV header should not fail");

    match selection {
        Selection::All => {
            run_benchmarks(AlgorithmKind::Segregated, "segregated", num_ops, out).unwrap();
            run_benchmarks(AlgorithmKind::Buddy, "buddy", num_ops, out).unwrap();
        }
        Selection::One(kind, name) => {
            run_benchmarks(kind, name, num_ops, out).unwrap();
        }
    }
}
