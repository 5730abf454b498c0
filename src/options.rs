use std::{path::PathBuf, str::FromStr};

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(about = "A tool that packs folders of images into texture atlases")]
pub struct Options {
    #[structopt(flatten)]
    pub global: GlobalOptions,

    #[structopt(subcommand)]
    pub command: Subcommand,
}

#[derive(Debug, StructOpt)]
pub struct GlobalOptions {
    /// Logging verbosity. Give once for debug logging and twice for trace
    /// logging. The RUST_LOG environment variable takes precedence.
    #[structopt(long = "verbose", short = "v", global = true, parse(from_occurrences))]
    pub verbosity: u8,
}

#[derive(Debug, StructOpt)]
pub enum Subcommand {
    /// Pack images into an atlas image and descriptor pair.
    Pack(PackOptions),

    /// Print the contents of an atlas descriptor.
    List(ListOptions),

    /// Resolve texture names against an atlas descriptor.
    Lookup(LookupOptions),
}

#[derive(Debug, StructOpt)]
pub struct PackOptions {
    /// Image files or folders of images to pack. Defaults to the current
    /// working directory if no paths are given.
    pub paths: Vec<PathBuf>,

    /// The path to write the atlas image to. The descriptor is written next
    /// to it with a .json extension.
    #[structopt(long, short)]
    pub output: PathBuf,

    /// The size of the atlas surface: one number like "512", or a pair like
    /// "1024x512".
    #[structopt(long, default_value = "1024")]
    pub size: AtlasSize,

    /// The texture name that lookups fall back to when a name is missing
    /// from the atlas.
    #[structopt(long, default_value = "undefined.png")]
    pub undefined_name: String,
}

#[derive(Debug, StructOpt)]
pub struct ListOptions {
    /// The path to an atlas descriptor.
    pub path: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct LookupOptions {
    /// The path to an atlas descriptor.
    pub path: PathBuf,

    /// The texture names to resolve.
    #[structopt(required = true)]
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct AtlasSize {
    pub width: u32,
    pub height: u32,
}

impl FromStr for AtlasSize {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parse_axis = |axis: &str| {
            axis.trim()
                .parse::<u32>()
                .map_err(|_| format!("'{}' is not a valid atlas dimension.", axis.trim()))
        };

        let (width, height) = match value.split_once('x') {
            Some((width, height)) => (parse_axis(width)?, parse_axis(height)?),
            None => {
                let side = parse_axis(value)?;
                (side, side)
            }
        };

        if width == 0 || height == 0 {
            return Err(String::from("Atlas dimensions must be nonzero."));
        }

        Ok(AtlasSize { width, height })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn square_size() {
        let size: AtlasSize = "512".parse().unwrap();
        assert_eq!((size.width, size.height), (512, 512));
    }

    #[test]
    fn rectangular_size() {
        let size: AtlasSize = "1024x512".parse().unwrap();
        assert_eq!((size.width, size.height), (1024, 512));
    }

    #[test]
    fn rejected_sizes() {
        assert!("".parse::<AtlasSize>().is_err());
        assert!("0".parse::<AtlasSize>().is_err());
        assert!("512x0".parse::<AtlasSize>().is_err());
        assert!("512xtall".parse::<AtlasSize>().is_err());
    }
}
