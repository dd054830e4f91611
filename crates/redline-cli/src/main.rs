use anyhow::{Context, Result, bail};
use redline_config::Config;
use redline_engine::io::{annotations_sidecar, read_annotations, read_source, write_markup};
use redline_engine::selection::point_at_rendered_offset;
use redline_engine::{
    Annotation, Bound, RenderOptions, Selection, SelectionWatcher, parse_markup, render, validate,
};
use relative_path::RelativePathBuf;
use std::path::{Path, PathBuf};
use std::{env, process};

const USAGE: &str = "\
Usage:
  redline render <text-file> [annotations-file] [--no-paragraphs] [--output <file>]
  redline resolve <markup-file> <start> <end>";

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };
    log::debug!("Config: {config:?}");

    match args.first().map(String::as_str) {
        Some("render") => render_command(&args[1..], &config),
        Some("resolve") => resolve_command(&args[1..], &config),
        _ => {
            eprintln!("{USAGE}");
            process::exit(1);
        }
    }
}

fn render_command(args: &[String], config: &Config) -> Result<()> {
    let mut options = RenderOptions {
        auto_paragraph: config.auto_paragraph,
        filler: config.filler,
    };
    let mut files = vec![];
    let mut output = None;
    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-paragraphs" => options.auto_paragraph = false,
            "--output" => {
                output = Some(args.next().context("--output needs a file argument")?);
            }
            flag if flag.starts_with("--") => bail!("unknown option '{flag}'\n{USAGE}"),
            file => files.push(file),
        }
    }

    let (text_file, annotations_file) = match files.as_slice() {
        [text] => (*text, None),
        [text, annotations] => (*text, Some(*annotations)),
        _ => {
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    let (root, source) = locate(text_file, config)?;
    let text = read_source(&source, &root)?;
    let annotations = match annotations_file {
        Some(file) => {
            let (root, path) = locate(file, config)?;
            read_annotations(&path, &root)?
        }
        None => sidecar_annotations(&root, &source)?,
    };
    validate(text.chars().count(), &annotations)
        .with_context(|| format!("invalid annotations for '{text_file}'"))?;

    log::info!(
        "Rendering {} with {} annotation(s)",
        source,
        annotations.len()
    );
    let markup = render(&text, &annotations, &options);
    match output {
        Some(file) => {
            let (root, path) = locate(file, config)?;
            write_markup(&path, &root, &markup)?;
            log::info!("Wrote {}", path.to_path(&root).display());
        }
        None => println!("{markup}"),
    }
    Ok(())
}

fn sidecar_annotations(root: &Path, source: &RelativePathBuf) -> Result<Vec<Annotation>> {
    let sidecar = annotations_sidecar(source);
    if !sidecar.to_path(root).exists() {
        log::info!("No annotations file at {sidecar}, rendering plain text");
        return Ok(vec![]);
    }
    Ok(read_annotations(&sidecar, root)?)
}

fn resolve_command(args: &[String], config: &Config) -> Result<()> {
    let [markup_file, start, end] = args else {
        eprintln!("{USAGE}");
        process::exit(1);
    };
    let start: usize = start
        .parse()
        .with_context(|| format!("start offset '{start}' is not a number"))?;
    let end: usize = end
        .parse()
        .with_context(|| format!("end offset '{end}' is not a number"))?;

    let (root, path) = locate(markup_file, config)?;
    let markup = read_source(&path, &root)?;
    // printed `render` output ends with a newline
    let markup = markup.strip_suffix('\n').unwrap_or(&markup);
    let tree = parse_markup(markup)
        .with_context(|| format!("'{markup_file}' is not rendered markup"))?;

    let container = tree.root();
    let mut watcher = SelectionWatcher::new();
    watcher.register(container);
    watcher.start();

    let rendered_len = tree.text_len(container);
    let (Some(anchor), Some(focus)) = (
        point_at_rendered_offset(&tree, container, start, Bound::Start),
        point_at_rendered_offset(&tree, container, end, Bound::End),
    ) else {
        bail!("offsets {start}..{end} are outside the rendered text (length {rendered_len})");
    };

    match watcher.handle(&tree, &Selection::between(anchor, focus)) {
        Some(resolved) => {
            for range in resolved.ranges {
                println!("{} {}", range.start, range.end);
            }
            Ok(())
        }
        None => bail!("selection {start}..{end} does not resolve to raw offsets"),
    }
}

/// Splits a path argument into a root directory and a path relative to it.
/// Relative arguments resolve against the configured documents directory.
fn locate(arg: &str, config: &Config) -> Result<(PathBuf, RelativePathBuf)> {
    let path = Path::new(arg);
    if path.is_absolute() {
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let name = path
            .file_name()
            .with_context(|| format!("'{arg}' is not a file path"))?;
        return Ok((root, RelativePathBuf::from(name.to_string_lossy().into_owned())));
    }
    let root = config
        .documents_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let relative = RelativePathBuf::from_path(path)
        .with_context(|| format!("'{arg}' is not a relative path"))?;
    Ok((root, relative))
}
