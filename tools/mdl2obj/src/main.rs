use std::{
	path::PathBuf,
	process::ExitCode
};

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use meshio_models_idtech::{
	ExportCfg,
	ExportFlag
};

use meshio_mdl2obj::{
	convert,
	ConvertCfg
};

#[derive(Parser)]
#[command(name = "mdl2obj")]
#[command(about = "Convert a Quake MDL model into Wavefront OBJ/MTL", long_about = None)]
struct Cli {
	/// Model to convert
	input: PathBuf,

	/// Directory receiving the output files
	#[arg(short, long, default_value = ".")]
	output_dir: PathBuf,

	/// Emit vertex normals from the precalculated normal table
	#[arg(long)]
	normals: bool,

	/// Convert from Z-up to Y-up
	#[arg(long)]
	y_up: bool,

	/// Directory of the texture referenced by the material
	#[arg(long, default_value = "textures")]
	texture_dir: String,

	/// Extension of the texture referenced by the material
	#[arg(long, default_value = "jpg")]
	texture_ext: String,

	/// Log section offsets while walking the model
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> ExitCode {
	let cli = Cli::parse();

	let level = if cli.verbose { "debug" } else { "info" };
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
		.with_writer(std::io::stderr)
		.init();

	let mut flags = ExportFlag::default();
	flags.set(ExportFlag::NORMALS, cli.normals);
	flags.set(ExportFlag::Y_UP, cli.y_up);

	let cfg = ConvertCfg {
		output_dir: cli.output_dir,
		export: ExportCfg {
			flags: flags,
			texture_dir: cli.texture_dir,
			texture_ext: cli.texture_ext,
		},
	};

	match convert(&cli.input, &cfg) {
		Ok(_) => ExitCode::SUCCESS,
		Err(e) => {
			error!("{}", e);
			ExitCode::FAILURE
		},
	}
}
