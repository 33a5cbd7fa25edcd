pub mod anorms;
pub mod mdl;

use bitflags::bitflags;
use tracing::debug;

use ultraviolet::vec::{
	Vec2,
	Vec3
};

use meshio_core::scene::{
	Face,
	FaceVertex,
	Material,
	MatPropValue,
	MatPropValueID,
	Mesh,
	UpAxis
};

use anorms::NORMALS;
use mdl::*;

bitflags! {
	pub struct ExportFlag: u32 {
		/// Emit per-vertex normals from the precalculated table
		const NORMALS = 1;
		/// Rotate the Z-up model space into Y-up
		const Y_UP = 2;
	}
}

impl Default for ExportFlag {
	fn default() -> Self {
		ExportFlag::empty()
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExportCfg {
	pub flags: ExportFlag,
	/// Directory prepended to the diffuse texture reference
	pub texture_dir: String,
	pub texture_ext: String,
}

impl Default for ExportCfg {
	fn default() -> Self {
		Self {
			flags: ExportFlag::default(),
			texture_dir: "textures".to_string(),
			texture_ext: "jpg".to_string(),
		}
	}
}

/// Material shared by every frame of a model. The texture is only referenced by name.
pub fn material(name: &str, cfg: &ExportCfg) -> Material {
	Material::new(name)
		.with(MatPropValueID::Ambient, MatPropValue::Vector3(Vec3::one()))
		.with(MatPropValueID::Diffuse, MatPropValue::Vector3(Vec3::one()))
		.with(MatPropValueID::Specular, MatPropValue::Vector3(Vec3::zero()))
		.with(MatPropValueID::Transparency, MatPropValue::Float(1.0))
		.with(MatPropValueID::Illumination, MatPropValue::Integer(1))
		.with(MatPropValueID::SpecularExponent, MatPropValue::Float(0.0))
		.with(MatPropValueID::DiffuseMap,
			MatPropValue::Text(format!("{}/{}.{}", cfg.texture_dir, name, cfg.texture_ext)))
}

/// Expands a quantized vertex into model space, `scale * v + origin` per component
pub fn dequantize(scale: Vec3, origin: Vec3, vert: &Vertex) -> Vec3 {
	Vec3::new(
		scale.x * f32::from(vert.v[0]) + origin.x,
		scale.y * f32::from(vert.v[1]) + origin.y,
		scale.z * f32::from(vert.v[2]) + origin.z,
	)
}

/// Atlas coordinates as UVs. Vertices on the seam get a second UV, offset by half the atlas
/// width, appended after the first `num_verts` entries; everything else gets an unused `(0, 0)`
/// there. The second set is left out when nothing lies on the seam.
fn tex_coords(model: &Model) -> Result<Vec<Vec2>, MdlError> {
	let header = &model.header;
	if !model.texcoords.is_empty() {
		if header.skin_width == 0 {
			return Err(MdlError::MalformedCounts { field: "skin width", value: 0 });
		}
		if header.skin_height == 0 {
			return Err(MdlError::MalformedCounts { field: "skin height", value: 0 });
		}
	}

	let width = header.skin_width as f32;
	let height = header.skin_height as f32;
	let half = i64::from(header.skin_width / 2);

	let mut uvs: Vec<Vec2> = model.texcoords.iter()
		.map(|tc| Vec2::new(tc.s as f32 / width, 1.0 - tc.t as f32 / height))
		.collect();

	if model.texcoords.iter().any(|tc| tc.on_seam) {
		uvs.extend(model.texcoords.iter().map(|tc| match tc.on_seam {
			true => Vec2::new((i64::from(tc.s) + half) as f32 / width, 1.0 - tc.t as f32 / height),
			false => Vec2::zero(),
		}));
	}

	Ok(uvs)
}

/// Faces in target winding order, `(v0, v2, v1)`. Back-facing triangles pick the seam UV of any
/// corner on the seam.
fn faces(model: &Model, normals: bool) -> Result<Vec<Face>, MdlError> {
	let num_verts = model.header.num_verts;

	model.triangles.iter().enumerate().map(|(i, tri)| {
		let corner = |slot: usize| -> Result<FaceVertex, MdlError> {
			let index = tri.indices[slot];
			let tc = model.texcoords.get(index as usize).ok_or(MdlError::VertexIndex {
				triangle: i,
				index: index,
				num_verts: num_verts,
			})?;

			let uv = match tri.orient == FaceOrient::Back && tc.on_seam {
				true => index as usize + num_verts as usize,
				false => index as usize,
			};

			Ok(FaceVertex {
				position: index as usize,
				uv: Some(uv),
				normal: if normals { Some(index as usize) } else { None },
			})
		};

		Ok(Face::Triangle([corner(0)?, corner(2)?, corner(1)?]))
	}).collect()
}

/// Builds one [`Mesh`] per frame. UVs and faces don't vary between frames, so they're worked out
/// once up front.
#[derive(Clone, Debug)]
pub struct MeshEmitter<'m, 'a> {
	model: &'m Model<'a>,
	material: String,
	flags: ExportFlag,
	uvs: Vec<Vec2>,
	faces: Vec<Face>,
}

impl<'m, 'a> MeshEmitter<'m, 'a> {
	pub fn new(model: &'m Model<'a>, material: &str, cfg: &ExportCfg) -> Result<Self, MdlError> {
		let uvs = tex_coords(model)?;
		let faces = faces(model, cfg.flags.contains(ExportFlag::NORMALS))?;

		debug!(uvs = uvs.len(), faces = faces.len(), seam = uvs.len() > model.texcoords.len(),
			"Prepared shared mesh data");

		Ok(Self {
			model: model,
			material: material.to_string(),
			flags: cfg.flags,
			uvs: uvs,
			faces: faces,
		})
	}

	/// Whether a second UV set is emitted for seam vertices
	pub fn has_seam_uvs(&self) -> bool {
		self.uvs.len() > self.model.texcoords.len()
	}

	fn orient(&self, v: Vec3) -> Vec3 {
		match self.flags.contains(ExportFlag::Y_UP) {
			true => Vec3::new(-v.x, v.z, v.y),
			false => v,
		}
	}

	/// Builds the mesh for an already located frame
	pub fn emit(&self, frame: &Frame<'a>) -> Result<Mesh, MdlError> {
		let header = &self.model.header;

		let mut mesh = Mesh::new(&frame.name());
		mesh.material = Some(self.material.clone());
		if self.flags.contains(ExportFlag::Y_UP) {
			mesh.up = UpAxis::Y;
		}

		mesh.positions = frame.verts.iter()
			.map(|v| self.orient(dequantize(header.scale, header.origin, &v)))
			.collect();

		if self.flags.contains(ExportFlag::NORMALS) {
			mesh.normals = frame.verts.iter().enumerate().map(|(i, v)| {
				let n = NORMALS.get(v.normal_index as usize).ok_or(MdlError::NormalIndex {
					vertex: i,
					index: v.normal_index,
				})?;

				Ok(self.orient(Vec3::new(n[0], n[1], n[2])))
			}).collect::<Result<_, MdlError>>()?;
		}

		mesh.uvs = self.uvs.clone();
		mesh.faces = self.faces.clone();

		Ok(mesh)
	}

	/// Builds the mesh for frame `index`. Frames can only be found by walking the ones before.
	pub fn emit_frame(&self, index: usize) -> Result<Mesh, MdlError> {
		for (i, frame) in self.model.frames().enumerate() {
			let frame = frame?;
			if i == index {
				return self.emit(&frame);
			}
		}

		Err(MdlError::FrameIndex {
			index: index,
			num_frames: self.model.header.num_frames,
		})
	}
}
