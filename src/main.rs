//! `chordsheet` - render chord-over-lyrics sheets to PNG.
//!
//! Usage:
//!   `chordsheet [--chords FILE] [--title TEXT] [--width PX] [--out PATH] [--data-url] [--reset] INPUT...`
//!
//! Each INPUT is a lyric text file. Chords come from `--chords` or the
//! `<stem>.chords.json` file next to the lyrics. Several inputs are rendered in parallel into the output
//! directory.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use chordsheet::config::Config;
use chordsheet::constants::export::{DEFAULT_FILE_NAME, DEFAULT_TITLE};
use chordsheet::render::LayoutConfig;
use chordsheet::session::{load_chords, save_chords, sidecar_path, ChordSession};
use chordsheet::source::{load_sheet, LyricSheet};

const USAGE: &str = "Usage: chordsheet [--chords FILE] [--title TEXT] [--width PX] [--out PATH] [--data-url] [--reset] INPUT...";

#[derive(Debug, Default)]
struct Args {
    inputs: Vec<String>,
    chords: Option<PathBuf>,
    title: Option<String>,
    width: Option<u32>,
    out: Option<PathBuf>,
    data_url: bool,
    reset: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().with_context(|| format!("{name} needs a value"));
        match arg.as_str() {
            "--chords" => parsed.chords = Some(PathBuf::from(value("--chords")?)),
            "--title" => parsed.title = Some(value("--title")?),
            "--width" => {
                let width = value("--width")?;
                parsed.width = Some(width.parse().with_context(|| format!("invalid width {width:?}"))?);
            }
            "--out" => parsed.out = Some(PathBuf::from(value("--out")?)),
            "--data-url" => parsed.data_url = true,
            "--reset" => parsed.reset = true,
            "-h" | "--help" => bail!(USAGE),
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
            _ => parsed.inputs.push(arg),
        }
    }

    if parsed.inputs.is_empty() {
        bail!(USAGE);
    }
    if parsed.inputs.len() > 1 && (parsed.chords.is_some() || parsed.data_url) {
        bail!("--chords and --data-url apply to a single input");
    }
    Ok(parsed)
}

fn build_session(sheet: &LyricSheet, args: &Args, config: &Config) -> Result<ChordSession> {
    let mut session = ChordSession::new(sheet.lyrics.clone());
    session.page_width = args.width.unwrap_or(config.page_width);
    session.title = Some(args.title.clone().unwrap_or_else(|| {
        if sheet.title.trim().is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            sheet.title.clone()
        }
    }));

    let sidecar = sidecar_path(&sheet.path);
    if args.reset {
        session.reset();
        if sidecar.is_file() {
            save_chords(session.chords(), &sidecar)?;
            tracing::info!("Cleared chords in {}", sidecar.display());
        }
        return Ok(session);
    }

    let chord_file = args.chords.clone().or_else(|| sidecar.is_file().then_some(sidecar));
    if let Some(path) = chord_file {
        session.set_chords(load_chords(&path)?);
        tracing::info!("Loaded {} chords from {}", session.chords().len(), path.display());
    }
    Ok(session)
}

fn render_one(session: &ChordSession, base: &LayoutConfig, out: &Path) -> Result<()> {
    let export = session.export(base)?;
    export.write_to(out)?;
    println!("Wrote {} ({} bytes)", out.display(), export.bytes.len());
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chordsheet=info")))
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    let config = Config::load()?;
    let base = config.layout();

    let sheets = args
        .inputs
        .iter()
        .map(|input| load_sheet(Path::new(input)).with_context(|| format!("reading {input}")))
        .collect::<Result<Vec<_>>>()?;
    let sessions = sheets
        .iter()
        .map(|sheet| build_session(sheet, &args, &config))
        .collect::<Result<Vec<_>>>()?;

    if let [session] = sessions.as_slice() {
        if args.data_url {
            println!("{}", session.export(&base)?.data_url());
            return Ok(());
        }
        let out = args.out.clone().unwrap_or_else(|| config.output_dir.join(DEFAULT_FILE_NAME));
        return render_one(session, &base, &out);
    }

    let out_dir = args.out.clone().unwrap_or_else(|| config.output_dir.clone());
    std::fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let failures: Vec<String> = sheets
        .par_iter()
        .zip(sessions.par_iter())
        .filter_map(|(sheet, session)| {
            let out = out_dir.join(sheet.png_name());
            render_one(session, &base, &out)
                .err()
                .map(|e| format!("{}: {e:#}", sheet.path.display()))
        })
        .collect();

    for failure in &failures {
        eprintln!("Render failed for {failure}");
    }
    if !failures.is_empty() {
        bail!("{} of {} sheets failed to render", failures.len(), sheets.len());
    }
    Ok(())
}
