use std::{
    env,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use fs_err as fs;
use walkdir::WalkDir;

use freerect::AtlasPacker;

use crate::{
    asset_name::AssetName,
    atlas::{TextureAtlas, TextureEntry},
    image::Image,
    options::{GlobalOptions, PackOptions},
    padding::PADDING_WIDTH,
};

struct PackInput {
    name: AssetName,
    image: Image,
}

pub fn pack(_global: GlobalOptions, options: PackOptions) -> anyhow::Result<()> {
    let roots = if options.paths.is_empty() {
        vec![env::current_dir()?]
    } else {
        options.paths
    };

    let mut inputs = Vec::new();
    for root in &roots {
        collect_images(root, &mut inputs)?;
    }

    log::info!("Packing {} images", inputs.len());

    // Largest first: big images fragment the free space the most, so they go
    // in while the space is still contiguous.
    inputs.sort_by_key(|input| {
        let (width, height) = input.image.size();
        std::cmp::Reverse(width as u64 * height as u64)
    });

    let size = options.size;
    let mut packer = AtlasPacker::new((size.width as i32, size.height as i32));
    let mut surface = Image::new_empty_rgba8((size.width, size.height));
    let mut atlas = TextureAtlas::new(size.width, size.height, options.undefined_name);
    let mut unplaced = Vec::new();

    for input in inputs {
        let (width, height) = input.image.size();

        match packer.insert((width as i32, height as i32)) {
            Some(placed) => {
                let (x, y) = placed.min();
                surface.blit(&input.image, (x as u32, y as u32));

                log::debug!("Placed {} at ({}, {})", input.name, x, y);

                atlas.textures.push(TextureEntry {
                    name: input.name,
                    bounds: placed,
                    padding: PADDING_WIDTH,
                });
            }
            None => {
                log::warn!(
                    "No space left for {} ({}x{} with padding)",
                    input.name,
                    width,
                    height
                );
                unplaced.push(input.name);
            }
        }
    }

    let descriptor_path = options.output.with_extension("json");

    let output_file = BufWriter::new(fs::File::create(&options.output)?);
    surface.encode_png(output_file)?;
    atlas.write_to_file(&descriptor_path)?;

    log::info!(
        "Wrote {} textures to {} and {}",
        atlas.textures.len(),
        options.output.display(),
        descriptor_path.display()
    );

    if !unplaced.is_empty() {
        let names: Vec<_> = unplaced.iter().map(AssetName::to_string).collect();
        bail!(
            "{} image(s) did not fit in the {}x{} atlas: {}",
            unplaced.len(),
            size.width,
            size.height,
            names.join(", ")
        );
    }

    Ok(())
}

/// Decodes and pads every image under `root`, which may be a single file or
/// a folder to search recursively. Entries are visited in name order so that
/// repeated runs see the same input sequence.
fn collect_images(root: &Path, inputs: &mut Vec<PackInput>) -> anyhow::Result<()> {
    // Name images relative to the folder the walk started from; a single
    // file is named after the file alone.
    let name_root: PathBuf = if root.is_file() {
        root.parent().unwrap_or(root).to_owned()
    } else {
        root.to_owned()
    };

    let walker = WalkDir::new(root).sort_by(|a, b| a.file_name().cmp(b.file_name()));

    for entry in walker {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type().is_file() || !is_image_path(path) {
            continue;
        }

        let name = AssetName::from_paths(&name_root, path);

        let file = BufReader::new(fs::File::open(path)?);
        let image = Image::decode_png(file)
            .with_context(|| format!("could not decode {}", path.display()))?;

        inputs.push(PackInput {
            name,
            image: image.padded(),
        });
    }

    Ok(())
}

fn is_image_path(path: &Path) -> bool {
    match path.extension().and_then(|extension| extension.to_str()) {
        Some("png") => true,
        _ => false,
    }
}
