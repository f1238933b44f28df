use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;

use khmer_segmenter::{Segmenter, SegmenterConfig};

#[derive(Serialize)]
struct LineResult<'a> {
    input: &'a str,
    segments: Vec<String>,
}

fn main() -> io::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut dict_path: Option<PathBuf> = None;
    let mut freq_path: Option<PathBuf> = None;
    let mut input_files: Vec<PathBuf> = Vec::new();
    let mut output_file: Option<PathBuf> = None;
    let mut threads: Option<usize> = None;
    let mut config = SegmenterConfig::default();
    let mut input_text: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dict" => {
                i += 1;
                dict_path = args.get(i).map(PathBuf::from);
            }
            "--freq" => {
                i += 1;
                freq_path = args.get(i).map(PathBuf::from);
            }
            "--input" => {
                i += 1;
                while i < args.len() && !args[i].starts_with("--") {
                    input_files.push(PathBuf::from(&args[i]));
                    i += 1;
                }
                continue;
            }
            "--output" => {
                i += 1;
                output_file = args.get(i).map(PathBuf::from);
            }
            "--threads" => {
                i += 1;
                if let Some(n) = args.get(i).and_then(|s| s.parse().ok()) {
                    threads = Some(n);
                }
            }
            "--no-repair" => config.enable_repair_mode = false,
            "--no-acronym" => config.enable_acronym_detection = false,
            "--no-merging" => config.enable_unknown_merging = false,
            arg if !arg.starts_with('-') => {
                match &mut input_text {
                    Some(text) => {
                        text.push(' ');
                        text.push_str(arg);
                    }
                    None => input_text = Some(arg.to_string()),
                }
            }
            other => {
                eprintln!("unrecognized flag: {other}");
            }
        }
        i += 1;
    }

    let Some(dict_path) = dict_path else {
        eprintln!(
            "usage: khmer_segment --dict <path> [--freq <path>] [--input <path...>] \
             [--output <path>] [--threads <N>] [--no-repair] [--no-acronym] [--no-merging] [text]"
        );
        return Ok(());
    };

    let segmenter = match Segmenter::new(&dict_path, freq_path.as_deref(), config) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            eprintln!("failed to initialize segmenter: {e}");
            std::process::exit(1);
        }
    };

    if let Some(threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .expect("thread pool is configured exactly once at startup, before any other rayon call");
    }

    let mut out: Box<dyn Write> = match &output_file {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    if !input_files.is_empty() {
        let mut lines: Vec<String> = Vec::new();
        for path in &input_files {
            let reader = BufReader::new(File::open(path)?);
            for line in reader.lines() {
                let line = line?;
                lines.push(line.strip_prefix('\u{FEFF}').map(str::to_string).unwrap_or(line));
            }
        }

        let results: Vec<(String, Result<Vec<String>, _>)> = lines
            .par_iter()
            .map(|line| (line.clone(), segmenter.segment(line)))
            .collect();

        for (line, result) in &results {
            match result {
                Ok(segments) => {
                    let record = LineResult {
                        input: line,
                        segments: segments.clone(),
                    };
                    writeln!(out, "{}", serde_json::to_string(&record)?)?;
                }
                Err(e) => {
                    log::warn!("failed to segment line: {e}");
                }
            }
        }
    } else if let Some(text) = input_text {
        match segmenter.segment(&text) {
            Ok(segments) => {
                let record = LineResult {
                    input: &text,
                    segments,
                };
                writeln!(out, "{}", serde_json::to_string(&record)?)?;
            }
            Err(e) => {
                eprintln!("failed to segment text: {e}");
                std::process::exit(1);
            }
        }
    } else {
        eprintln!("no input provided; pass --input <path...> or a bare text argument");
    }

    Ok(())
}
