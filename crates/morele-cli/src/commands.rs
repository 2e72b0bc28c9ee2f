use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use morele_cli::pipeline::{self, ConfigLayers, OutputTarget, read_options};
use morele_output::publish_hint;

use crate::cli::{SuggestArgs, TransformArgs};
use crate::summary::{
    print_preview, print_schema, print_suggestions, print_transform_summary,
};

pub fn run_schema() {
    print_schema();
}

pub fn run_transform(args: &TransformArgs) -> Result<()> {
    let options = read_options(args.input.separator, args.input.encoding.as_deref())?;
    let config = pipeline::build_config(&ConfigLayers {
        config_file: args.config.as_deref(),
        auto: args.auto,
        maps: &args.maps,
        sets: &args.sets,
    })?;
    let target = if args.dry_run {
        OutputTarget::DryRun
    } else if let Some(path) = &args.output {
        OutputTarget::File(path.clone())
    } else {
        OutputTarget::Directory(args.output_dir.clone())
    };

    let run = pipeline::run_transform(&args.input.input, &options, config, &target, Local::now())?;

    if let Some(rows) = args.preview {
        print_preview("Input", &run.input, rows);
        print_preview("Output", &run.mapped.data, rows);
    }
    print_transform_summary(&run);
    if let Some(path) = &run.output {
        println!("Output: {}", path.display());
        println!("Publish with:");
        println!("  {}", publish_hint(&path.display().to_string()));
    }
    Ok(())
}

pub fn run_suggest(args: &SuggestArgs) -> Result<()> {
    let options = read_options(args.input.separator, args.input.encoding.as_deref())?;
    let (headers, result) =
        pipeline::run_suggest(&args.input.input, &options, args.min_confidence)?;
    print_suggestions(&headers, &result);
    if let Some(path) = &args.write {
        result
            .to_config()
            .save(path)
            .with_context(|| format!("write mapping config {}", path.display()))?;
        info!(path = %path.display(), "saved suggested mapping");
        println!("Saved mapping config: {}", path.display());
    }
    Ok(())
}
