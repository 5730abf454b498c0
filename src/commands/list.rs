use crate::{
    atlas::{AtlasLookup, LookupResult, TextureAtlas},
    options::{GlobalOptions, ListOptions},
};

pub fn list(_global: GlobalOptions, options: ListOptions) -> anyhow::Result<()> {
    let atlas = TextureAtlas::read_from_file(&options.path)?;
    let lookup = AtlasLookup::new(&atlas);

    println!(
        "{}x{} atlas with {} texture(s), undefined name {:?}",
        atlas.width,
        atlas.height,
        atlas.textures.len(),
        atlas.undefined_name
    );

    if let LookupResult::Unresolved = lookup.resolve(&atlas.undefined_name) {
        log::warn!(
            "The undefined texture {:?} is not in the atlas; unknown lookups \
             will resolve to zero bounds",
            atlas.undefined_name
        );
    }

    for entry in &atlas.textures {
        let (x, y) = entry.bounds.min();
        let bounds = lookup.bounds(entry.name.as_ref());

        println!(
            "{}: {}x{} at ({}, {}), padding {}",
            entry.name,
            entry.bounds.width(),
            entry.bounds.height(),
            x,
            y,
            entry.padding
        );
        println!(
            "  uv ({:.6}, {:.6}) - ({:.6}, {:.6})",
            bounds.x.min, bounds.y.min, bounds.x.max, bounds.y.max
        );
    }

    Ok(())
}
