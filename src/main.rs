use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use serde_json::json;
use std::{fs, path::Path, path::PathBuf};
use sufftk::{compress, stats, Alphabet, LcpArray, SuffixTable};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress text files into .sfk artifacts
    Compress {
        /// Input files
        inputs: Vec<PathBuf>,

        /// Directory the artifacts are written to
        #[arg(short, long)]
        out_dir: PathBuf,
    },

    /// Restore text files from .sfk artifacts
    Decompress {
        /// Compressed artifacts
        inputs: Vec<PathBuf>,

        /// Directory the restored files are written to
        #[arg(short, long)]
        out_dir: PathBuf,
    },

    /// Print suffix array / LCP statistics of a file as JSON
    Stats {
        /// Input file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let alphabet = Alphabet::text();

    match args.command {
        Command::Compress { inputs, out_dir } => {
            fs::create_dir_all(&out_dir)?;
            // Each file is an independent instance; compress them in parallel.
            inputs.into_par_iter().try_for_each(|path| {
                let text = read_text(&path)?;
                let packed = compress::compress(&text, &alphabet)
                    .with_context(|| format!("compressing {}", path.display()))?;
                let out = artifact_path(&out_dir, &path, "sfk");
                fs::write(&out, bincode::serialize(&packed)?)
                    .with_context(|| format!("writing {}", out.display()))
            })
        }
        Command::Decompress { inputs, out_dir } => {
            fs::create_dir_all(&out_dir)?;
            inputs.into_par_iter().try_for_each(|path| {
                let bytes = fs::read(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let packed = bincode::deserialize(&bytes)
                    .with_context(|| format!("decoding {}", path.display()))?;
                let text = compress::decompress(&packed, &alphabet)
                    .with_context(|| format!("decompressing {}", path.display()))?;
                let out = artifact_path(&out_dir, &path, "txt");
                fs::write(&out, text).with_context(|| format!("writing {}", out.display()))
            })
        }
        Command::Stats { input } => {
            let text = read_text(&input)?;
            let table = SuffixTable::new(text, &alphabet)
                .with_context(|| format!("indexing {}", input.display()))?;
            let lcp = LcpArray::build(&table);
            let scalar = stats::lcp_stats(&table, &lcp);
            let repeat = stats::longest_repeated_substring(&table, &lcp).map(|(start, len)| {
                json!({
                    "start": start,
                    "length": len,
                    "substring": String::from_utf8_lossy(&table.text()[start..start + len]),
                })
            });
            let report = json!({
                "length": table.len(),
                "stats": scalar,
                "longest_repeated_substring": repeat,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

/// Reads a file's first line, the unit the compressor works on.
fn read_text(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let line = bytes
        .split(|&b| b == b'\n' || b == b'\r')
        .next()
        .unwrap_or(&bytes);
    Ok(line.to_vec())
}

fn artifact_path(out_dir: &Path, input: &Path, extension: &str) -> PathBuf {
    let name = input.file_stem().unwrap_or_else(|| input.as_os_str());
    out_dir.join(Path::new(name).with_extension(extension))
}
