//! Fixture builders shared by the integration tests.

#![allow(dead_code)]

use hound::{SampleFormat, WavSpec, WavWriter};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// A tier to render into a TextGrid fixture.
pub struct TierFixture<'a> {
    pub name: &'a str,
    pub intervals: &'a [(f64, f64, &'a str)],
}

/// Write a mono 16-bit ramp of `secs` seconds.
pub fn write_wav(path: &Path, sample_rate: u32, secs: u32) -> PathBuf {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for i in 0..sample_rate * secs {
        writer.write_sample((i % 20_000) as i16).unwrap();
    }
    writer.finalize().unwrap();
    path.to_path_buf()
}

/// Render a long-format TextGrid with the given interval tiers.
pub fn textgrid(xmax: f64, tiers: &[TierFixture<'_>]) -> String {
    let mut out = String::new();
    writeln!(out, "File type = \"ooTextFile\"").unwrap();
    writeln!(out, "Object class = \"TextGrid\"").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "xmin = 0").unwrap();
    writeln!(out, "xmax = {xmax}").unwrap();
    writeln!(out, "tiers? <exists>").unwrap();
    writeln!(out, "size = {}", tiers.len()).unwrap();
    writeln!(out, "item []:").unwrap();
    for (t, tier) in tiers.iter().enumerate() {
        writeln!(out, "    item [{}]:", t + 1).unwrap();
        writeln!(out, "        class = \"IntervalTier\"").unwrap();
        writeln!(out, "        name = \"{}\"", tier.name).unwrap();
        writeln!(out, "        xmin = 0").unwrap();
        writeln!(out, "        xmax = {xmax}").unwrap();
        writeln!(out, "        intervals: size = {}", tier.intervals.len()).unwrap();
        for (i, (start, end, text)) in tier.intervals.iter().enumerate() {
            writeln!(out, "        intervals [{}]:", i + 1).unwrap();
            writeln!(out, "            xmin = {start}").unwrap();
            writeln!(out, "            xmax = {end}").unwrap();
            writeln!(out, "            text = \"{}\"", text.replace('"', "\"\"")).unwrap();
        }
    }
    out
}

/// Write a single-tier TextGrid.
pub fn write_textgrid(path: &Path, xmax: f64, intervals: &[(f64, f64, &str)]) -> PathBuf {
    let contents = textgrid(
        xmax,
        &[TierFixture {
            name: "utterances",
            intervals,
        }],
    );
    fs::write(path, contents).unwrap();
    path.to_path_buf()
}

/// Input and output directories of one test corpus.
pub struct CorpusDirs {
    pub root: tempfile::TempDir,
    pub audio: PathBuf,
    pub grids: PathBuf,
    pub output: PathBuf,
}

impl CorpusDirs {
    pub fn new() -> Self {
        let root = tempfile::TempDir::new().unwrap();
        let audio = root.path().join("audio");
        let grids = root.path().join("transcripts");
        let output = root.path().join("out");
        fs::create_dir_all(&audio).unwrap();
        fs::create_dir_all(&grids).unwrap();
        Self {
            root,
            audio,
            grids,
            output,
        }
    }

    /// The ten-second `call1` recording: a greeting, a blank gap, a question.
    pub fn add_call1(&self) {
        write_wav(&self.audio.join("call1.wav"), 16_000, 10);
        write_textgrid(
            &self.grids.join("call1.TextGrid"),
            10.0,
            &[(0.0, 1.0, "hello"), (1.0, 2.0, "  "), (2.0, 3.0, "how are you")],
        );
    }

    pub fn dataset_dir(&self) -> PathBuf {
        self.output.join("primock57")
    }
}

/// Every file under `dir`, relative path and bytes, sorted by path.
pub fn snapshot(dir: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    let mut files = Vec::new();
    collect(dir, dir, &mut files);
    files.sort();
    files
}

fn collect(base: &Path, dir: &Path, files: &mut Vec<(PathBuf, Vec<u8>)>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect(base, &path, files);
        } else {
            let rel = path.strip_prefix(base).unwrap().to_path_buf();
            files.push((rel, fs::read(&path).unwrap()));
        }
    }
}
