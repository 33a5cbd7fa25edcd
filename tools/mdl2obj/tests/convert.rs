use std::{
	fs,
	path::{
		Path,
		PathBuf
	}
};

use tempfile::TempDir;
use ultraviolet::vec::Vec3;

use meshio_core::scene::{
	Face,
	FaceVertex
};

use meshio_models_idtech::{
	ExportFlag,
	mdl::{
		export::*,
		FaceOrient,
		MdlError,
		TexCoord,
		Triangle,
		Vertex
	}
};

use meshio_models_wavefront::{
	mtl::import::materials,
	obj::import::obj
};

use meshio_mdl2obj::{
	convert,
	ConvertCfg,
	ConvertError
};

fn vert(x: u8, y: u8, z: u8) -> Vertex {
	Vertex {
		v: [x, y, z],
		normal_index: 5,
	}
}

/// Three vertices, the first on the seam, shared by a back- and a front-facing triangle
fn ogre(num_frames: u8) -> Vec<u8> {
	let mut builder = ModelBuilder::new(4, 2);
	builder.scale = Vec3::new(0.5, 1.0, 2.0);
	builder.origin = Vec3::new(-1.0, 0.0, 1.0);
	builder.skins = vec![SkinData::Single(vec![0; 8])];
	builder.texcoords = vec![
		TexCoord { on_seam: true, s: 0, t: 0 },
		TexCoord { on_seam: false, s: 2, t: 1 },
		TexCoord { on_seam: false, s: 3, t: 2 },
	];
	builder.triangles = vec![
		Triangle { orient: FaceOrient::Back, indices: [0, 1, 2] },
		Triangle { orient: FaceOrient::Front, indices: [2, 1, 0] },
	];
	builder.frames = (0..num_frames).map(|k| FrameData {
		name: format!("stand{}", k + 1),
		verts: vec![vert(2 + k, 3, 4), vert(0, 0, 0), vert(1, 1, 1)],
		..FrameData::default()
	}).collect();

	let mut data = vec![];
	builder.write(&mut data).unwrap();
	data
}

fn setup(data: &[u8]) -> (TempDir, PathBuf, ConvertCfg) {
	let dir = tempfile::tempdir().unwrap();
	let input = dir.path().join("ogre.mdl");
	fs::write(&input, data).unwrap();

	let output_dir = dir.path().join("out");
	fs::create_dir(&output_dir).unwrap();

	let cfg = ConvertCfg {
		output_dir: output_dir,
		..ConvertCfg::default()
	};

	(dir, input, cfg)
}

fn read(path: &Path) -> String {
	fs::read_to_string(path).unwrap()
}

fn corner(position: usize, uv: usize, normal: Option<usize>) -> FaceVertex {
	FaceVertex {
		position: position,
		uv: Some(uv),
		normal: normal,
	}
}

#[test]
fn test_single_frame() {
	let (_dir, input, cfg) = setup(&ogre(1));
	let written = convert(&input, &cfg).unwrap();

	let mtl = cfg.output_dir.join("ogre.mtl");
	let obj = cfg.output_dir.join("ogre.obj");
	assert_eq!(vec![mtl.clone(), obj.clone()], written);

	assert_eq!("newmtl ogre\n\
		Ka 1 1 1\n\
		Kd 1 1 1\n\
		Ks 0 0 0\n\
		Tr 1\n\
		illum 1\n\
		Ns 0\n\
		map_Kd textures/ogre.jpg\n", read(&mtl));

	assert_eq!("mtllib ogre.mtl\n\
		usemtl ogre\n\
		v 0 3 9\n\
		v -1 0 1\n\
		v -0.5 1 3\n\
		vt 0 1\n\
		vt 0.5 0.5\n\
		vt 0.75 0\n\
		vt 0.5 1\n\
		vt 0 0\n\
		vt 0 0\n\
		f 1/4 3/3 2/2\n\
		f 3/3 1/1 2/2\n", read(&obj));
}

#[test]
fn test_frame_files() {
	let (_dir, input, cfg) = setup(&ogre(3));
	let written = convert(&input, &cfg).unwrap();

	assert_eq!(4, written.len());
	assert!(!cfg.output_dir.join("ogre.obj").exists());

	for k in 0..3u8 {
		let doc = obj(&read(&cfg.output_dir.join(format!("ogre_{}.obj", k)))).unwrap();
		assert_eq!(vec!["ogre.mtl".to_string()], doc.material_libs);
		assert_eq!(Some("ogre".to_string()), doc.material);
		assert_eq!(Vec3::new(0.5 * f32::from(2 + k) - 1.0, 3.0, 9.0), doc.positions[0]);
		assert_eq!(6, doc.uvs.len());
	}
}

#[test]
fn test_read_back() {
	let (_dir, input, cfg) = setup(&ogre(1));
	convert(&input, &cfg).unwrap();

	let mats = materials(&read(&cfg.output_dir.join("ogre.mtl"))).unwrap();
	assert_eq!(1, mats.len());
	assert_eq!("ogre", mats[0].name);

	let doc = obj(&read(&cfg.output_dir.join("ogre.obj"))).unwrap();
	assert_eq!(vec![
		Face::Triangle([corner(0, 3, None), corner(2, 2, None), corner(1, 1, None)]),
		Face::Triangle([corner(2, 2, None), corner(0, 0, None), corner(1, 1, None)]),
	], doc.faces);
}

#[test]
fn test_normals_y_up() {
	let (_dir, input, mut cfg) = setup(&ogre(1));
	cfg.export.flags = ExportFlag::NORMALS | ExportFlag::Y_UP;
	cfg.export.texture_dir = "skins".to_string();
	cfg.export.texture_ext = "png".to_string();
	convert(&input, &cfg).unwrap();

	let mats = materials(&read(&cfg.output_dir.join("ogre.mtl"))).unwrap();
	assert_eq!("ogre", mats[0].name);
	assert!(read(&cfg.output_dir.join("ogre.mtl")).contains("map_Kd skins/ogre.png\n"));

	let doc = obj(&read(&cfg.output_dir.join("ogre.obj"))).unwrap();
	assert_eq!(Vec3::new(-0.0, 9.0, 3.0), doc.positions[0]);
	assert_eq!(vec![Vec3::unit_y(); 3], doc.normals);
	assert_eq!(Face::Triangle([corner(0, 3, Some(0)), corner(2, 2, Some(2)), corner(1, 1, Some(1))]),
		doc.faces[0]);
}

#[test]
fn test_truncated_writes_nothing() {
	let data = ogre(3);
	let (_dir, input, cfg) = setup(&data[..data.len() - 2]);

	assert!(matches!(convert(&input, &cfg), Err(ConvertError::Model {
		source: MdlError::TruncatedInput(_),
		..
	})));
	assert_eq!(0, fs::read_dir(&cfg.output_dir).unwrap().count());
}

#[test]
fn test_missing_input() {
	let (dir, _input, cfg) = setup(&ogre(1));

	assert!(matches!(convert(&dir.path().join("shambler.mdl"), &cfg), Err(ConvertError::Read { .. })));
}
