//! Command-line interface for `fke-rng`.

#![forbid(unsafe_code)]

use std::io::{self, ErrorKind, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use fke_rng::{FastKeyErasureRng, OsEntropySource, WideFastKeyErasureRng, SEED_SIZE};
use zeroize::Zeroizing;

/// Fast-key-erasure random byte stream.
#[derive(Parser, Debug)]
#[command(
    name = "fke",
    version,
    author,
    about = "Stream forward-secure random bytes from an AES-256 fast-key-erasure generator"
)]
struct Cli {
    /// Number of bytes to write (unbounded when omitted).
    #[arg(long, value_name = "BYTES")]
    count: Option<u64>,
    /// Hex-encode output, one chunk per line.
    #[arg(long, default_value_t = false)]
    hex: bool,
    /// Bytes generated per write.
    #[arg(long, value_name = "N", default_value_t = 4096)]
    chunk_size: usize,
    /// Use 96-byte output blocks.
    #[arg(long, default_value_t = false)]
    wide: bool,
    /// Extra seed material mixed into the key (up to 32 bytes as hex).
    #[arg(long, value_name = "HEX")]
    seed: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.chunk_size == 0 {
        bail!("chunk size must be positive");
    }
    let seed = cli.seed.as_deref().map(parse_seed_hex).transpose()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = if cli.wide {
        let mut rng = WideFastKeyErasureRng::new_wide(OsEntropySource)
            .context("create generator")?;
        if let Some(seed) = &seed {
            rng.reseed_with(seed).context("mix seed")?;
        }
        stream(|buf| rng.fill(buf), &mut out, &cli)
    } else {
        let mut rng = FastKeyErasureRng::new(OsEntropySource).context("create generator")?;
        if let Some(seed) = &seed {
            rng.reseed_with(seed).context("mix seed")?;
        }
        stream(|buf| rng.fill(buf), &mut out, &cli)
    };

    match result {
        Err(err) if is_broken_pipe(&err) => Ok(()),
        other => other,
    }
}

/// Writes `cli.count` bytes (or forever) produced by `fill` to `out`.
fn stream<F, W>(mut fill: F, out: &mut W, cli: &Cli) -> Result<()>
where
    F: FnMut(&mut [u8]) -> fke_rng::Result<()>,
    W: Write,
{
    let mut buf = Zeroizing::new(vec![0u8; cli.chunk_size]);
    let mut remaining = cli.count;
    loop {
        let len = match remaining {
            Some(0) => break,
            Some(left) => usize::try_from(left).map_or(buf.len(), |left| left.min(buf.len())),
            None => buf.len(),
        };
        let chunk = &mut buf[..len];
        fill(chunk).context("generate bytes")?;
        if cli.hex {
            let mut line = Zeroizing::new(hex::encode(&*chunk));
            line.push('\n');
            out.write_all(line.as_bytes()).context("write output")?;
        } else {
            out.write_all(chunk).context("write output")?;
        }
        if let Some(left) = remaining.as_mut() {
            *left -= len as u64;
        }
    }
    out.flush().context("flush output")?;
    log::debug!("stream finished");
    Ok(())
}

fn parse_seed_hex(hex_str: &str) -> Result<Zeroizing<Vec<u8>>> {
    let bytes = Zeroizing::new(hex::decode(hex_str.trim()).context("decode seed hex")?);
    if bytes.is_empty() || bytes.len() > SEED_SIZE {
        bail!("seed must be 1 to {SEED_SIZE} bytes (2 to {} hex characters)", SEED_SIZE * 2);
    }
    Ok(bytes)
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == ErrorKind::BrokenPipe)
    })
}
