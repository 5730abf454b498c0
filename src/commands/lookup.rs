use crate::{
    atlas::{AtlasLookup, LookupResult, TextureAtlas},
    options::{GlobalOptions, LookupOptions},
};

pub fn lookup(_global: GlobalOptions, options: LookupOptions) -> anyhow::Result<()> {
    let atlas = TextureAtlas::read_from_file(&options.path)?;
    let lookup = AtlasLookup::new(&atlas);

    for name in &options.names {
        match lookup.resolve(name) {
            LookupResult::Found(bounds) => {
                println!(
                    "{}: ({:.6}, {:.6}) - ({:.6}, {:.6})",
                    name, bounds.x.min, bounds.y.min, bounds.x.max, bounds.y.max
                );
            }
            LookupResult::Fallback(bounds) => {
                println!(
                    "{}: not in atlas, falling back to {:?}: ({:.6}, {:.6}) - ({:.6}, {:.6})",
                    name,
                    atlas.undefined_name,
                    bounds.x.min,
                    bounds.y.min,
                    bounds.x.max,
                    bounds.y.max
                );
            }
            LookupResult::Unresolved => {
                println!(
                    "{}: not in atlas, and there is no {:?} entry to fall back to",
                    name, atlas.undefined_name
                );
            }
        }
    }

    Ok(())
}
