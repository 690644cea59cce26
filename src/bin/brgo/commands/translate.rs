//! `brgo translate` command

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

use crate::cli::TranslateArgs;
use brgo::ops::{translate, TranslateEvent, TranslateOptions, TranslateOutcome};
use brgo::util::shell::Progress;
use brgo::util::{GlobalContext, Shell, Status};
use brgo::KeywordTable;

pub fn execute(args: TranslateArgs, shell: &Arc<Shell>) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.load_config();

    // --layout overrides config
    let mut directory = config.directory_options();
    if let Some(layout) = args.layout {
        directory.layout = layout;
    }

    let opts = TranslateOptions {
        output: args.output,
        directory,
    };

    let start = Instant::now();
    shell.status(Status::Translating, args.input.display());

    let mut progress: Option<Progress> = None;
    let outcome = translate(KeywordTable::pt_br(), &args.input, &opts, |event| match event {
        TranslateEvent::Planned { files, .. } => {
            progress = Some(shell.progress(files as u64, "Translating"));
        }
        TranslateEvent::Translated(job) => {
            shell.verbose(
                Status::Translated,
                format!("{} -> {}", job.input.display(), job.output.display()),
            );
            if let Some(p) = progress.as_mut() {
                p.inc(1);
            }
        }
    })?;
    drop(progress);

    match outcome {
        TranslateOutcome::File { output, lines, .. } => {
            shell.finished(
                format!("{} ({} lines)", output.display(), lines),
                start.elapsed(),
            );
        }
        TranslateOutcome::Directory(report) => {
            for path in &report.skipped {
                shell.status(Status::Skipped, path.display());
            }
            shell.status(Status::Created, report.manifest.display());
            shell.finished(
                format!(
                    "{} files in {} packages",
                    report.translated.len(),
                    report.packages.len()
                ),
                start.elapsed(),
            );
        }
    }

    Ok(())
}
