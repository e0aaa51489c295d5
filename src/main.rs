// SPDX-License-Identifier: MPL-2.0
use lens_gallery::config;
use lens_gallery::domain::gallery::{EntryId, IntakeSource};
use lens_gallery::error::{Error, Result};
use lens_gallery::gallery::{Gallery, ModalView, Presenter, Snapshot};
use lens_gallery::intake::DiskFile;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
lens_gallery: load images into a gallery and print its state

USAGE:
  lens_gallery [OPTIONS] <FILE>...

OPTIONS:
  --drop             Treat files as a drag-and-drop (non-images are skipped up front)
  --open <ID>        Open the detail modal on an entry after loading
  --config <DIR>     Read settings.toml from DIR
  --diagnostics      Print the diagnostics report as JSON
  -v, --verbose      Debug logging (RUST_LOG overrides)
  -h, --help         Print this help
";

struct Args {
    drop: bool,
    open: Option<u64>,
    config_dir: Option<PathBuf>,
    diagnostics: bool,
    verbose: bool,
    files: Vec<OsString>,
}

fn parse_args() -> std::result::Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    Ok(Some(Args {
        drop: args.contains("--drop"),
        open: args.opt_value_from_str("--open")?,
        config_dir: args.opt_value_from_str("--config")?,
        diagnostics: args.contains("--diagnostics"),
        verbose: args.contains(["-v", "--verbose"]),
        files: args.finish(),
    }))
}

/// Prints one status line per render.
struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn render(&mut self, snapshot: &Snapshot<'_>) {
        let modal = match snapshot.modal() {
            ModalView::Open(entry) => format!(", modal on {}", entry.id()),
            ModalView::Closed => String::new(),
        };
        println!(
            "[{:?}] {} entries, {} pending{modal}",
            snapshot.view_state(),
            snapshot.entries().len(),
            snapshot.pending_decodes(),
        );
    }
}

fn print_gallery(gallery: &Gallery) {
    let snapshot = gallery.snapshot();
    if snapshot.view_state().shows_empty_placeholder() {
        println!("No images yet. Add some files to get started.");
        return;
    }
    for (thumbnail, entry) in snapshot.thumbnails().zip(snapshot.entries()) {
        let dimensions = entry
            .payload()
            .dimensions()
            .map(|(width, height)| format!("{width}x{height}"))
            .unwrap_or_else(|| "?".to_string());
        println!(
            "{:>5}  {:<32} {:>10}  {:>11}  {}",
            thumbnail.id.to_string(),
            thumbnail.caption,
            thumbnail.size_label,
            dimensions,
            entry.acquired_at().format("%Y-%m-%d %H:%M"),
        );
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let Some(args) = parse_args().map_err(|err| Error::Arguments(err.to_string()))? else {
        print!("{HELP}");
        return Ok(());
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (config, warning) = config::load_with_override(args.config_dir);
    if let Some(warning) = warning {
        eprintln!("warning: {warning}");
    }

    let mut gallery = Gallery::new(&config).with_presenter(Box::new(TerminalPresenter));
    let reporter = gallery.diagnostics_handle();

    let mut files = Vec::with_capacity(args.files.len());
    for path in args.files.into_iter().map(PathBuf::from) {
        match DiskFile::open(&path).await {
            Ok(file) => files.push(file),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "cannot open file");
                reporter.log_message(format!("cannot open {}: {err}", path.display()));
            }
        }
    }

    let source = if args.drop {
        IntakeSource::Drop
    } else {
        IntakeSource::Picker
    };
    let summary = gallery.ingest(files, source).await;
    println!(
        "{} offered, {} accepted, {} added, {} rejected, {} failed",
        summary.offered, summary.accepted, summary.appended, summary.rejected, summary.failed
    );

    if let Some(id) = args.open {
        gallery.open(EntryId::new(id));
    }

    print_gallery(&gallery);

    if args.diagnostics {
        gallery.diagnostics_mut().process_pending();
        println!("{}", gallery.diagnostics().export_json()?);
    }

    Ok(())
}
