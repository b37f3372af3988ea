use std::path::PathBuf;

use structopt::StructOpt;

use crate::generator::Bounds;
use crate::output::OpenMode;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "simtel",
    about = "Emits synthetic host telemetry as JSON Lines to stdout and a file"
)]
pub struct CliOpt {
    #[structopt(
        long = "output",
        short = "o",
        default_value = "data.json",
        parse(from_os_str)
    )]
    pub output: PathBuf,

    /// Keep existing samples in the output file instead of truncating it.
    #[structopt(long = "append", short = "a")]
    pub append: bool,

    /// Clamp percentage fields to [0, 100] and network to >= 0.
    #[structopt(long = "clamp")]
    pub clamp: bool,

    /// Stop after emitting this many samples.
    #[structopt(long = "count", short = "n")]
    pub count: Option<usize>,
}

impl CliOpt {
    pub fn open_mode(&self) -> OpenMode {
        if self.append {
            OpenMode::Append
        } else {
            OpenMode::Truncate
        }
    }

    pub fn bounds(&self) -> Bounds {
        if self.clamp {
            Bounds::Clamped
        } else {
            Bounds::Unbounded
        }
    }
}
