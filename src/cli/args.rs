use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::constants::{
    DEFAULT_FONT_SIZE, DEFAULT_NCSS_URL, DEFAULT_PLOT_HEIGHT, DEFAULT_PLOT_WIDTH, DEFAULT_VARIABLE,
};

#[derive(Parser)]
#[command(name = "metar-plotter")]
#[command(about = "METAR surface observation station-plot renderer")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch observations and render a classified station plot
    Plot {
        #[arg(
            short,
            long,
            help = "Geographic envelope as 'west,east,south,north'",
            default_value = "-125,-65,23,52"
        )]
        bbox: String,

        #[arg(long, default_value = "1", help = "Window length in hours, ending now")]
        hours_back: i64,

        #[arg(long, help = "Window start (RFC 3339), overrides --hours-back")]
        start: Option<String>,

        #[arg(long, help = "Window end (RFC 3339) [default: now]")]
        end: Option<String>,

        #[arg(long, default_value = DEFAULT_NCSS_URL, help = "Subset service endpoint")]
        server: String,

        #[arg(long, default_value = DEFAULT_VARIABLE)]
        variable: String,

        #[arg(long, help = "Comma-separated threshold levels in display units")]
        levels: Option<String>,

        #[arg(long, help = "Comma-separated colors, one per level")]
        colors: Option<String>,

        #[arg(long, help = "JSON style file with levels and colors")]
        style_file: Option<PathBuf>,

        #[arg(
            long,
            default_value = "false",
            help = "Band the bottom bin as [L0, L1) instead of the legacy 'below minimum' comparison"
        )]
        corrected_bottom_bin: bool,

        #[arg(
            short,
            long,
            help = "Output PNG path [default: metar-{variable}-{YYMMDD-HHMM}.png]"
        )]
        output_file: Option<PathBuf>,

        #[arg(long, default_value_t = DEFAULT_PLOT_WIDTH)]
        width: u32,

        #[arg(long, default_value_t = DEFAULT_PLOT_HEIGHT)]
        height: u32,

        #[arg(long, default_value_t = DEFAULT_FONT_SIZE)]
        font_size: u32,
    },

    /// Fetch and classify observations without rendering
    Classify {
        #[arg(
            short,
            long,
            help = "Geographic envelope as 'west,east,south,north'",
            default_value = "-125,-65,23,52"
        )]
        bbox: String,

        #[arg(long, default_value = "1", help = "Window length in hours, ending now")]
        hours_back: i64,

        #[arg(long, help = "Window start (RFC 3339), overrides --hours-back")]
        start: Option<String>,

        #[arg(long, help = "Window end (RFC 3339) [default: now]")]
        end: Option<String>,

        #[arg(long, default_value = DEFAULT_NCSS_URL, help = "Subset service endpoint")]
        server: String,

        #[arg(long, default_value = DEFAULT_VARIABLE)]
        variable: String,

        #[arg(long, help = "Comma-separated threshold levels in display units")]
        levels: Option<String>,

        #[arg(long, help = "Comma-separated colors, one per level")]
        colors: Option<String>,

        #[arg(long, help = "JSON style file with levels and colors")]
        style_file: Option<PathBuf>,

        #[arg(
            long,
            default_value = "false",
            help = "Band the bottom bin as [L0, L1) instead of the legacy 'below minimum' comparison"
        )]
        corrected_bottom_bin: bool,

        #[arg(
            short,
            long,
            help = "Read observations from a local CSV file instead of the network"
        )]
        input: Option<PathBuf>,
    },
}
