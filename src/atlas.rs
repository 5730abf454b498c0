//! The atlas data model: which texture landed where, and how a renderer
//! turns texture names into normalized sampling coordinates.

use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
};

use fs_err as fs;
use freerect::{Intervalf, Rect, Rectf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::asset_name::AssetName;

/// The root persisted object: the atlas surface size plus one entry per
/// packed texture. Built append-only during a pack run, then serialized as
/// the JSON descriptor next to the atlas image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TextureAtlas {
    pub width: u32,
    pub height: u32,

    /// The name lookups fall back to when a texture is missing from the
    /// atlas. The named entry does not have to exist; lookups tolerate its
    /// absence by resolving to zero bounds.
    pub undefined_name: String,

    pub textures: Vec<TextureEntry>,
}

/// One packed texture. `bounds` is the placement exactly as the packer
/// returned it: the padded rectangle, including the bleed border recorded in
/// `padding`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EntrySchema", into = "EntrySchema")]
pub struct TextureEntry {
    pub name: AssetName,
    pub bounds: Rect,
    pub padding: u32,
}

/// The flat on-disk shape of one entry: top-left corner plus full padded
/// size, not yet shrunk by `padding`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct EntrySchema {
    name: AssetName,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    padding: u32,
}

impl From<EntrySchema> for TextureEntry {
    fn from(schema: EntrySchema) -> Self {
        Self {
            name: schema.name,
            bounds: Rect::from_min_size(
                (schema.x as i32, schema.y as i32),
                (schema.width as i32, schema.height as i32),
            ),
            padding: schema.padding,
        }
    }
}

impl From<TextureEntry> for EntrySchema {
    fn from(entry: TextureEntry) -> Self {
        let (x, y) = entry.bounds.min();

        Self {
            name: entry.name,
            x: x as u32,
            y: y as u32,
            width: entry.bounds.width() as u32,
            height: entry.bounds.height() as u32,
            padding: entry.padding,
        }
    }
}

impl TextureAtlas {
    pub fn new(width: u32, height: u32, undefined_name: String) -> Self {
        Self {
            width,
            height,
            undefined_name,
            textures: Vec::new(),
        }
    }

    /// Converts an entry's placement into normalized sampling bounds.
    ///
    /// The padding border is stripped first so that bilinear sampling stays
    /// inside the original image, then each coordinate is divided by the
    /// atlas size. The vertical axis is flipped for bottom-left-origin
    /// texture coordinates: the returned rectangle pairs `u0` with `v1` and
    /// `u1` with `v0`, so its `y` interval runs high-to-low. Consumers with
    /// a top-left origin must flip it back themselves.
    pub fn tex_bounds(&self, entry: &TextureEntry) -> Rectf {
        let padding = entry.padding as i32;
        let (x0, y0) = entry.bounds.min();
        let (x1, y1) = entry.bounds.max();

        let width = self.width as f32;
        let height = self.height as f32;

        let u0 = (x0 + padding) as f32 / width;
        let u1 = (x1 - padding) as f32 / width;
        let v0 = (y0 + padding) as f32 / height;
        let v1 = (y1 - padding) as f32 / height;

        Rectf::new(Intervalf::new(u0, u1), Intervalf::new(v1, v0))
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, AtlasError> {
        let path = path.as_ref();

        let contents = fs::read(path).map_err(|source| AtlasError::Io {
            path: path.to_owned(),
            source,
        })?;

        serde_json::from_slice(&contents).map_err(|source| AtlasError::Json {
            path: path.to_owned(),
            source,
        })
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), AtlasError> {
        let path = path.as_ref();

        let contents = serde_json::to_vec_pretty(self).map_err(|source| AtlasError::Json {
            path: path.to_owned(),
            source,
        })?;

        fs::write(path, contents).map_err(|source| AtlasError::Io {
            path: path.to_owned(),
            source,
        })
    }
}

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("{} in {}", .source, .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{} in {}", .source, .path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// The outcome of resolving one texture name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LookupResult {
    /// The name is in the atlas.
    Found(Rectf),

    /// The name is missing; these are the bounds of the undefined entry.
    Fallback(Rectf),

    /// The name is missing and the atlas has no undefined entry either.
    Unresolved,
}

/// A name to normalized-bounds table derived from an atlas.
///
/// Every entry is keyed under both its exact name and its lowercased name,
/// so callers that lowercase their keys still hit. The table is ephemeral:
/// it is rebuilt from the descriptor and never persisted.
pub struct AtlasLookup {
    bounds: HashMap<String, Rectf>,
    undefined_bounds: Option<Rectf>,
}

impl AtlasLookup {
    pub fn new(atlas: &TextureAtlas) -> Self {
        let mut bounds = HashMap::with_capacity(atlas.textures.len() * 2);

        for entry in &atlas.textures {
            let tex_bounds = atlas.tex_bounds(entry);
            let name: &str = entry.name.as_ref();

            bounds.insert(name.to_owned(), tex_bounds);
            bounds.insert(name.to_lowercase(), tex_bounds);
        }

        let undefined_bounds = bounds.get(atlas.undefined_name.as_str()).copied();

        Self {
            bounds,
            undefined_bounds,
        }
    }

    /// Resolves a name, never failing: unknown names fall back to the
    /// undefined entry's bounds, or to the zero rectangle if the atlas has
    /// no undefined entry.
    pub fn bounds(&self, name: &str) -> Rectf {
        match self.resolve(name) {
            LookupResult::Found(bounds) | LookupResult::Fallback(bounds) => bounds,
            LookupResult::Unresolved => Rectf::ZERO,
        }
    }

    /// Like [`bounds`](AtlasLookup::bounds), but tells the caller whether
    /// the name hit, fell back, or had nothing to fall back to.
    pub fn resolve(&self, name: &str) -> LookupResult {
        if let Some(&bounds) = self.bounds.get(name) {
            return LookupResult::Found(bounds);
        }

        match self.undefined_bounds {
            Some(bounds) => LookupResult::Fallback(bounds),
            None => LookupResult::Unresolved,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn atlas_with_foo() -> TextureAtlas {
        let mut atlas = TextureAtlas::new(100, 100, String::from("Undefined.png"));
        atlas.textures.push(TextureEntry {
            name: AssetName::from("Foo.png"),
            bounds: Rect::from_min_size((10, 10), (10, 10)),
            padding: 1,
        });

        atlas
    }

    #[test]
    fn tex_bounds_strips_padding_and_flips() {
        let atlas = atlas_with_foo();
        let bounds = atlas.tex_bounds(&atlas.textures[0]);

        assert_eq!(bounds.x.min, 11.0 / 100.0);
        assert_eq!(bounds.x.max, 19.0 / 100.0);

        // The vertical axis is flipped: min y carries the larger coordinate.
        assert_eq!(bounds.y.min, 19.0 / 100.0);
        assert_eq!(bounds.y.max, 11.0 / 100.0);
    }

    #[test]
    fn lookup_is_case_insensitive_for_lowercased_queries() {
        let atlas = atlas_with_foo();
        let lookup = AtlasLookup::new(&atlas);
        let expected = atlas.tex_bounds(&atlas.textures[0]);

        assert_eq!(lookup.bounds("Foo.png"), expected);
        assert_eq!(lookup.bounds("foo.png"), expected);
        assert_eq!(lookup.resolve("foo.png"), LookupResult::Found(expected));
    }

    #[test]
    fn lookup_miss_without_undefined_entry_is_zero() {
        let atlas = atlas_with_foo();
        let lookup = AtlasLookup::new(&atlas);

        assert_eq!(lookup.bounds("Missing.png"), Rectf::ZERO);
        assert_eq!(lookup.resolve("Missing.png"), LookupResult::Unresolved);
    }

    #[test]
    fn lookup_miss_falls_back_to_undefined_entry() {
        let mut atlas = atlas_with_foo();
        atlas.textures.push(TextureEntry {
            name: AssetName::from("Undefined.png"),
            bounds: Rect::from_min_size((40, 40), (12, 12)),
            padding: 1,
        });

        let lookup = AtlasLookup::new(&atlas);
        let undefined = atlas.tex_bounds(&atlas.textures[1]);

        assert_eq!(lookup.bounds("Missing.png"), undefined);
        assert_eq!(
            lookup.resolve("Missing.png"),
            LookupResult::Fallback(undefined)
        );
    }

    #[test]
    fn descriptor_uses_flat_schema_keys() {
        let atlas = atlas_with_foo();
        let value = serde_json::to_value(&atlas).unwrap();

        assert_eq!(value["width"], 100);
        assert_eq!(value["undefinedName"], "Undefined.png");
        assert_eq!(value["textures"][0]["name"], "Foo.png");
        assert_eq!(value["textures"][0]["x"], 10);
        assert_eq!(value["textures"][0]["y"], 10);
        assert_eq!(value["textures"][0]["width"], 10);
        assert_eq!(value["textures"][0]["height"], 10);
        assert_eq!(value["textures"][0]["padding"], 1);
    }

    #[test]
    fn descriptor_round_trips_through_json() {
        let atlas = atlas_with_foo();

        let encoded = serde_json::to_string(&atlas).unwrap();
        let decoded: TextureAtlas = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, atlas);
    }
}
