use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path prefix of the inputs (<stem>intra_<k>_apa.npy, <stem>inter_apa.npy)
    #[arg(value_name = "INPUT_STEM")]
    pub input_stem: String,

    /// Output image; format follows the extension (png, jpg, bmp, svg)
    #[arg(value_name = "OUTPUT_PATH")]
    pub output_path: PathBuf,
}
