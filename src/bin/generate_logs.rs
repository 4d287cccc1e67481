//! Writes synthetic `compare.log`, `time_diff.log` and `10_to_100.log` files
//! in the formats `benchplot` reads. Useful for trying the viewer without
//! running the real benchmarks.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "generate-logs", about = "Write synthetic benchmark logs")]
struct Cli {
    #[arg(default_value = ".", help = "Directory the logs are written to")]
    dir: PathBuf,
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// SplitMix64: one u64 of state, good enough for demo noise.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// One local-search run on an `n`-element input: (size, value, seconds).
fn local_search(n: u32, linear: bool, rng: &mut SimpleRng) -> (u32, f64, f64) {
    let nf = f64::from(n);
    let size = ((nf * rng.uniform(0.35, 0.55)).round() as u32).clamp(1, n);
    let value = nf.ln() * f64::from(size) * rng.uniform(0.95, 1.05);
    let seconds = if linear {
        nf * 2.0e-5 * rng.uniform(0.8, 1.2)
    } else {
        nf * nf * 1.5e-6 * rng.uniform(0.8, 1.2)
    };
    (size, value, seconds)
}

fn create(dir: &Path, name: &str) -> Result<BufWriter<File>> {
    let path = dir.join(name);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn write_compare(dir: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let mut out = create(dir, "compare.log")?;
    let mut rows = 0;
    for n in 10..200 {
        let (s1, f1, t1) = local_search(n, false, rng);
        let (s2, f2, t2) = local_search(n, true, rng);
        writeln!(out, "{s1} {s2} {f1:.6} {f2:.6} {t1:.6} {t2:.6}")?;
        rows += 1;
    }
    out.flush()?;
    Ok(rows)
}

fn write_time_diff(dir: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let mut out = create(dir, "time_diff.log")?;
    let mut rows = 0;
    for n in 10..200 {
        let (s1, _, t1) = local_search(n, false, rng);
        let (s2, _, t2) = local_search(n, true, rng);
        writeln!(out, "{s1} {s2} {t1:.6} {t2:.6}")?;
        rows += 1;
    }
    out.flush()?;
    Ok(rows)
}

fn write_features(dir: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let (eta, eps, delta) = (0.00001, 2.0, 0.1);
    let mut out = create(dir, "10_to_100.log")?;
    let mut rows = 0;
    for k in 10..=100u32 {
        let kf = f64::from(k);
        let seconds = kf * kf * 4.0e-5 * rng.uniform(0.9, 1.1);
        let objective = 1.0 - 0.15 * (-kf / 25.0).exp() + rng.uniform(-0.003, 0.003);
        let r2 = objective - rng.uniform(0.0, 0.01);
        let sse = 0.0145 - 0.003 * (1.0 - (-kf / 30.0).exp()) + rng.uniform(-0.0002, 0.0002);
        let pearson = r2.sqrt();
        writeln!(
            out,
            "{k} {eta:.6} {eps:.6} {delta:.6} {k} {seconds:.6}s {objective:.6} {sse:.6} {pearson:.6} {r2:.6}"
        )?;
        rows += 1;
    }
    out.flush()?;
    Ok(rows)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    std::fs::create_dir_all(&cli.dir)
        .with_context(|| format!("creating {}", cli.dir.display()))?;

    let mut rng = SimpleRng::new(cli.seed);
    let compare = write_compare(&cli.dir, &mut rng)?;
    let time_diff = write_time_diff(&cli.dir, &mut rng)?;
    let features = write_features(&cli.dir, &mut rng)?;

    println!(
        "Wrote compare.log ({compare} rows), time_diff.log ({time_diff} rows), \
         10_to_100.log ({features} rows) to {}",
        cli.dir.display()
    );
    Ok(())
}
