//! Whole-file drivers for the NSP sprite container: container -> one raster
//! image per slot, and a directory of rasters -> container.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::formats::nsp::{self, SPRITE_COUNT};
use crate::formats::sprite::Sprite;
use crate::graphics::raster;

/// Converts an NSP container into `<base>_<slot>.png` images under
/// `output_dir`, creating the directory if needed.
pub fn convert(input: &Path, output_dir: &Path) -> Result<()> {
    let data = fs::read(input).with_context(|| format!("reading {input:?}"))?;
    let sprites = nsp::decode(&data).with_context(|| format!("decoding {input:?}"))?;

    fs::create_dir_all(output_dir)?;

    let base = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "SPRITE".to_string());

    for (slot, sprite) in sprites.iter().enumerate() {
        let path = output_dir.join(format!("{base}_{slot}.png"));
        raster::write_sprite(&path, sprite).with_context(|| format!("writing {path:?}"))?;
    }

    tracing::info!(
        "converted {} sprites from {:?} into {:?}",
        sprites.len(),
        input,
        output_dir
    );
    Ok(())
}

/// Rebuilds an NSP container from `<prefix>_<slot>.png` images in
/// `input_dir`, in slot order.
pub fn rebuild(input_dir: &Path, prefix: &str, output_file: &Path) -> Result<()> {
    let files = collect_slot_files(input_dir, prefix)?;
    if files.is_empty() {
        bail!("no input files matching {prefix}_*.png found at {input_dir:?}");
    }
    if files.len() != SPRITE_COUNT {
        tracing::warn!(
            "expected {} sprite files, found {}; the container will not match the original layout",
            SPRITE_COUNT,
            files.len()
        );
    }

    let mut sprites = Vec::with_capacity(files.len());
    for (_, path) in &files {
        let sprite: Sprite =
            raster::read_sprite(path).with_context(|| format!("reading {path:?}"))?;
        sprites.push(sprite);
    }

    let blob = nsp::encode(&sprites)?;
    fs::write(output_file, blob).with_context(|| format!("writing {output_file:?}"))?;

    tracing::info!(
        "rebuilt {:?} from {} sprite files",
        output_file,
        sprites.len()
    );
    Ok(())
}

/// Finds `<prefix>_<n>.png` files and orders them by slot number, the
/// natural order of the names `convert` writes.
fn collect_slot_files(input_dir: &Path, prefix: &str) -> Result<Vec<(usize, PathBuf)>> {
    let lead = format!("{prefix}_");
    let mut files = Vec::new();

    for entry in fs::read_dir(input_dir).with_context(|| format!("listing {input_dir:?}"))? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(slot) = name
            .strip_prefix(&lead)
            .and_then(|rest| rest.strip_suffix(".png"))
            .and_then(|digits| digits.parse::<usize>().ok())
        else {
            continue;
        };
        files.push((slot, path));
    }

    files.sort_by_key(|&(slot, _)| slot);
    Ok(files)
}
