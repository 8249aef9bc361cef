//! On-disk formats of a run: the string order and hook table as CSV, the
//! run parameters as a pretty-printed JSON manifest.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use sa_greedy::{Chord, StringOrder};
use sa_hooks::HookSet;
use serde::{Deserialize, Serialize};

use crate::Boundary;

pub fn write_string_order(path: &Path, order: &StringOrder) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "index,start,end").context("writing csv header")?;
    for (i, chord) in order.iter().enumerate() {
        writeln!(out, "{i},{},{}", chord.start, chord.end).context("writing csv row")?;
    }
    out.flush().with_context(|| format!("flushing {}", path.display()))
}

/// Reads a file produced by [`write_string_order`].
///
/// Rows must appear in index order; the index column is checked, not trusted.
pub fn read_string_order(path: &Path) -> Result<StringOrder> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut lines = text.lines().enumerate();

    match lines.next() {
        Some((_, header)) if header.trim() == "index,start,end" => {}
        Some((_, header)) => bail!("{}: unexpected header {header:?}", path.display()),
        None => bail!("{}: empty file", path.display()),
    }

    let mut order = StringOrder::new();
    for (line_no, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let [index, start, end] = fields[..] else {
            bail!("{}:{}: expected 3 fields, got {}", path.display(), line_no + 1, fields.len());
        };
        let parse = |s: &str, what: &str| {
            s.parse::<usize>()
                .with_context(|| format!("{}:{}: bad {what} {s:?}", path.display(), line_no + 1))
        };
        let index = parse(index, "index")?;
        if index != order.len() {
            bail!(
                "{}:{}: expected index {}, got {index}",
                path.display(),
                line_no + 1,
                order.len()
            );
        }
        order.push(Chord::new(parse(start, "start")?, parse(end, "end")?));
    }

    Ok(order)
}

/// Hook positions for drilling or marking a physical board.
pub fn write_hooks(path: &Path, hooks: &HookSet) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "index,x,y").context("writing csv header")?;
    for (i, p) in hooks.iter().enumerate() {
        writeln!(out, "{i},{},{}", p.x, p.y).context("writing csv row")?;
    }
    out.flush().with_context(|| format!("flushing {}", path.display()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDto {
    pub file: PathBuf,
    pub size: usize,
    pub crop_factor: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsDto {
    pub shape: Boundary,
    /// Requested hook count.
    pub hooks: usize,
    /// Hooks actually placed; smaller than `hooks` when a rectangle layout
    /// collapses coincident positions.
    pub actual_hooks: usize,
    pub strings: usize,
    pub discount: f32,
    pub distance: usize,
    pub random_accept: f32,
    pub start: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub offset: usize,
    pub save_file: PathBuf,
}

/// Everything needed to rebuild the hooks and re-render a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub image: ImageDto,
    pub settings: SettingsDto,
}

pub fn write_manifest(path: &Path, manifest: &RunManifest) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(manifest).context("serializing run manifest")?;
    fs::write(path, bytes).with_context(|| format!("writing json {}", path.display()))
}

pub fn read_manifest(path: &Path) -> Result<RunManifest> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

/// `base` with `suffix` appended to its file name, e.g. `out/cat` + `_hooks.csv`.
pub fn sibling(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.file_name().map(|s| s.to_os_string()).unwrap_or_default();
    name.push(suffix);
    base.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use sa_core::Point2i;
    use sa_greedy::{Chord, StringOrder};
    use sa_hooks::HookSet;

    use super::{
        ImageDto, RunManifest, SettingsDto, read_manifest, read_string_order, sibling,
        write_hooks, write_manifest, write_string_order,
    };
    use crate::Boundary;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("sa-cli-persist");
        fs::create_dir_all(&dir).expect("temp dir");
        dir.join(name)
    }

    #[test]
    fn string_order_csv_layout() {
        let path = scratch("order.csv");
        let order = StringOrder::from(vec![Chord::new(0, 7), Chord::new(7, 3), Chord::new(3, 12)]);
        write_string_order(&path, &order).expect("written");

        let text = fs::read_to_string(&path).expect("readable");
        assert_eq!(text, "index,start,end\n0,0,7\n1,7,3\n2,3,12\n");
        assert_eq!(read_string_order(&path).expect("parsed"), order);
    }

    #[test]
    fn malformed_rows_report_line_numbers() {
        let path = scratch("bad_field.csv");
        fs::write(&path, "index,start,end\n0,1,2\n1,2,x\n").expect("written");
        let err = format!("{:#}", read_string_order(&path).unwrap_err());
        assert!(err.contains(":3:"), "{err}");
        assert!(err.contains("bad end"), "{err}");

        let path = scratch("bad_count.csv");
        fs::write(&path, "index,start,end\n0,1\n").expect("written");
        let err = format!("{:#}", read_string_order(&path).unwrap_err());
        assert!(err.contains(":2: expected 3 fields"), "{err}");

        let path = scratch("bad_index.csv");
        fs::write(&path, "index,start,end\n1,1,2\n").expect("written");
        assert!(read_string_order(&path).is_err());

        let path = scratch("bad_header.csv");
        fs::write(&path, "a,b,c\n").expect("written");
        assert!(read_string_order(&path).is_err());
    }

    #[test]
    fn hook_table_lists_positions() {
        let path = scratch("hooks.csv");
        let hooks = HookSet::from_points(vec![
            Point2i::new(5, 0),
            Point2i::new(0, 9),
            Point2i::new(9, 9),
        ])
        .expect("valid hooks");
        write_hooks(&path, &hooks).expect("written");
        let text = fs::read_to_string(&path).expect("readable");
        assert_eq!(text, "index,x,y\n0,5,0\n1,0,9\n2,9,9\n");
    }

    #[test]
    fn manifest_json_shape() {
        let path = scratch("run.json");
        let manifest = RunManifest {
            image: ImageDto {
                file: PathBuf::from("portrait.jpg"),
                size: 500,
                crop_factor: 1.0,
            },
            settings: SettingsDto {
                shape: Boundary::Rectangle,
                hooks: 200,
                actual_hooks: 196,
                strings: 3000,
                discount: 0.3,
                distance: 15,
                random_accept: 0.0,
                start: 0,
                seed: Some(7),
                offset: 4,
                save_file: PathBuf::from("out/portrait"),
            },
        };
        write_manifest(&path, &manifest).expect("written");

        let value: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).expect("readable")).expect("json");
        assert_eq!(value["image"]["size"], 500);
        assert_eq!(value["settings"]["shape"], "rectangle");
        assert_eq!(value["settings"]["actual_hooks"], 196);

        assert_eq!(read_manifest(&path).expect("parsed"), manifest);
    }

    #[test]
    fn sibling_appends_to_file_name() {
        assert_eq!(sibling(Path::new("out/cat"), "_hooks.csv"), Path::new("out/cat_hooks.csv"));
        assert_eq!(sibling(Path::new("cat"), ".json"), Path::new("cat.json"));
    }
}
