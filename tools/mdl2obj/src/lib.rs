use std::{
	fs,
	io,
	path::{
		Path,
		PathBuf
	}
};

use thiserror::Error;
use tracing::{
	debug,
	info,
	warn
};

use meshio_models_idtech::{
	ExportCfg,
	material,
	MeshEmitter,
	mdl::{
		MdlError,
		Model
	}
};

use meshio_models_wavefront::{
	mtl::export::write_mtl,
	obj::export::write_obj
};

#[derive(Debug, Error)]
pub enum ConvertError {
	#[error("Can't read {path}: {source}")]
	Read {
		path: PathBuf,
		source: io::Error,
	},
	#[error("Can't write {path}: {source}")]
	Write {
		path: PathBuf,
		source: io::Error,
	},
	#[error("{path}: {source}")]
	Model {
		path: PathBuf,
		source: MdlError,
	},
	#[error("Can't derive a model name from {0}")]
	InvalidPath(PathBuf),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConvertCfg {
	/// Directory receiving the `.mtl` and `.obj` files
	pub output_dir: PathBuf,
	pub export: ExportCfg,
}

impl Default for ConvertCfg {
	fn default() -> Self {
		Self {
			output_dir: PathBuf::from("."),
			export: ExportCfg::default(),
		}
	}
}

/// Name shared by the material and output files: the input's file name without its directory and
/// last extension
pub fn model_name(path: &Path) -> Result<String, ConvertError> {
	path.file_stem()
		.and_then(|s| s.to_str())
		.filter(|s| !s.is_empty())
		.map(|s| s.to_string())
		.ok_or_else(|| ConvertError::InvalidPath(path.to_path_buf()))
}

/// `<name>.obj` for single-frame models, `<name>_<index>.obj` otherwise
pub fn frame_file_name(name: &str, index: usize, num_frames: u32) -> String {
	match num_frames {
		1 => format!("{}.obj", name),
		_ => format!("{}_{}.obj", name, index),
	}
}

/// Converts the model at `input`, returning the written paths, material library first. Every
/// file is rendered in memory before the first one is written, so a malformed model leaves
/// nothing behind.
pub fn convert(input: &Path, cfg: &ConvertCfg) -> Result<Vec<PathBuf>, ConvertError> {
	let name = model_name(input)?;
	let data = fs::read(input).map_err(|e| ConvertError::Read {
		path: input.to_path_buf(),
		source: e,
	})?;

	let model_err = |e: MdlError| ConvertError::Model {
		path: input.to_path_buf(),
		source: e,
	};

	let model = Model::walk(&data).map_err(model_err)?;
	let frames = model.locate_frames().map_err(model_err)?;
	debug!(bytes = data.len(), frames = frames.len(), "Walked {}", input.display());
	if frames.is_empty() {
		warn!("{} has no frames, only the material will be written", input.display());
	}

	let emitter = MeshEmitter::new(&model, &name, &cfg.export).map_err(model_err)?;
	let mtl_name = format!("{}.mtl", name);

	let mut outputs: Vec<(PathBuf, Vec<u8>)> = vec![];

	let mut mtl = vec![];
	write_mtl(&mut mtl, &[material(&name, &cfg.export)]).map_err(|e| ConvertError::Write {
		path: cfg.output_dir.join(&mtl_name),
		source: e,
	})?;
	outputs.push((cfg.output_dir.join(&mtl_name), mtl));

	for (k, frame) in frames.iter().enumerate() {
		let mesh = emitter.emit(frame).map_err(model_err)?;
		let path = cfg.output_dir.join(frame_file_name(&name, k, model.header.num_frames));

		let mut obj = vec![];
		write_obj(&mut obj, Some(&mtl_name), &mesh).map_err(|e| ConvertError::Write {
			path: path.clone(),
			source: e,
		})?;
		outputs.push((path, obj));
	}

	let mut written = vec![];
	for (path, contents) in outputs {
		fs::write(&path, contents).map_err(|e| ConvertError::Write {
			path: path.clone(),
			source: e,
		})?;
		info!("Wrote {}", path.display());
		written.push(path);
	}

	Ok(written)
}
