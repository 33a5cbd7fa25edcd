use byteorder::{
	ByteOrder,
	LE
};

use std::{
	borrow::Cow,
	marker::PhantomData
};

use thiserror::Error;
use tracing::{
	debug,
	warn
};

use ultraviolet::vec::Vec3;

use meshio_core::{
	io_ext::{
		SliceReader,
		Truncated
	},
	rtag4
};

pub const MAGIC: u32 = rtag4!(b"IDPO");
pub const VERSION: i32 = 6;

pub const HEADER_SIZE: usize = 84;
pub const TEX_COORD_SIZE: usize = 12;
pub const TRIANGLE_SIZE: usize = 16;
pub const VERTEX_SIZE: usize = 4;
/// Tag, bounding box and name preceding each pose
pub const FRAME_HEADER_SIZE: usize = 28;
/// Group bounding box and interval, between a group's tag and its pose header
pub const FRAME_GROUP_SIZE: usize = 12;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum MdlError {
	#[error("Truncated input: {0}")]
	TruncatedInput(#[from] Truncated),
	#[error("Malformed {field} count: {value}")]
	MalformedCounts {
		field: &'static str,
		value: i64,
	},
	#[error("Triangle {triangle} references vertex {index}, but the model has {num_verts}")]
	VertexIndex {
		triangle: usize,
		index: u32,
		num_verts: u32,
	},
	#[error("Vertex {vertex} uses normal {index}, which has no precalculated value")]
	NormalIndex {
		vertex: usize,
		index: u8,
	},
	#[error("Frame {index} requested, but the model has {num_frames}")]
	FrameIndex {
		index: usize,
		num_frames: u32,
	},
}

/// Reads a signed count, rejecting negative values
fn count(buf: &mut SliceReader, field: &'static str) -> Result<u32, MdlError> {
	let value = buf.read_i32_le()?;

	u32::try_from(value).map_err(|_| MdlError::MalformedCounts {
		field: field,
		value: value.into(),
	})
}

/// Byte length of `count` records of `size` bytes
fn section_size(field: &'static str, count: u32, size: usize) -> Result<usize, MdlError> {
	(count as usize).checked_mul(size).ok_or(MdlError::MalformedCounts {
		field: field,
		value: count.into(),
	})
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SyncType {
	Synchronize = 0,
	Random,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Header {
	pub magic: u32,
	pub version: i32,
	pub scale: Vec3,
	pub origin: Vec3,
	pub bounding_radius: f32,
	pub eye_pos: Vec3,
	pub num_skins: u32,
	pub skin_width: u32,
	pub skin_height: u32,
	pub num_verts: u32,
	pub num_tris: u32,
	pub num_frames: u32,
	pub sync_type: SyncType,
	pub flags: u32,
	pub size: f32,
}

impl Header {
	fn read(buf: &mut SliceReader) -> Result<Header, MdlError> {
		let magic = buf.read_u32_le()?;
		if magic != MAGIC {
			warn!("Model isn't tagged as IDPO: {:#010x}", magic);
		}

		let version = buf.read_i32_le()?;
		if version != VERSION {
			warn!(version, "Unexpected model version");
		}

		Ok(Header {
			magic: magic,
			version: version,
			scale: buf.read_vec3_le()?,
			origin: buf.read_vec3_le()?,
			bounding_radius: buf.read_f32_le()?,
			eye_pos: buf.read_vec3_le()?,
			num_skins: count(buf, "skin")?,
			skin_width: count(buf, "skin width")?,
			skin_height: count(buf, "skin height")?,
			num_verts: count(buf, "vertex")?,
			num_tris: count(buf, "triangle")?,
			num_frames: count(buf, "frame")?,
			sync_type: match buf.read_i32_le()? {
				0 => SyncType::Synchronize,
				_ => SyncType::Random,
			},
			flags: buf.read_u32_le()?,
			size: buf.read_f32_le()?,
		})
	}
}

/// Fixed-size record decodable from a validated byte range
pub trait Record: Sized {
	const SIZE: usize;

	/// Decodes a record from exactly [`Record::SIZE`] bytes
	fn decode(bytes: &[u8]) -> Self;
}

/// Borrowed view over a contiguous run of [`Record`]s
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Table<'a, T> {
	data: &'a [u8],
	_record: PhantomData<T>,
}

impl<'a, T> Table<'a, T>
where
	T: Record + 'a,
{
	fn read(buf: &mut SliceReader<'a>, count: u32, field: &'static str) -> Result<Table<'a, T>, MdlError> {
		Ok(Table {
			data: buf.take(section_size(field, count, T::SIZE)?)?,
			_record: PhantomData,
		})
	}

	pub fn len(&self) -> usize {
		self.data.len() / T::SIZE
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<T> {
		let start = index.checked_mul(T::SIZE)?;
		self.data.get(start..start.checked_add(T::SIZE)?).map(T::decode)
	}

	pub fn iter(&self) -> impl Iterator<Item = T> + 'a {
		self.data.chunks_exact(T::SIZE).map(T::decode)
	}
}

pub type TexCoords<'a> = Table<'a, TexCoord>;
pub type Triangles<'a> = Table<'a, Triangle>;
pub type Vertices<'a> = Table<'a, Vertex>;

/// Byte size of one skin image
fn image_size(header: &Header) -> Result<usize, MdlError> {
	(header.skin_width as usize)
		.checked_mul(header.skin_height as usize)
		.ok_or(MdlError::MalformedCounts {
			field: "skin height",
			value: header.skin_height.into(),
		})
}

/// Skin image(s), borrowed from the input buffer. Pixels are palette indices. A group stores one
/// duration for the whole sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum Skin<'a> {
	Single(&'a [u8]),
	Group {
		time: f32,
		images: Vec<&'a [u8]>,
	},
}

impl<'a> Skin<'a> {
	fn read(image_size: usize, buf: &mut SliceReader<'a>) -> Result<Skin<'a>, MdlError> {
		if buf.read_i32_le()? == 0 {
			return Ok(Skin::Single(buf.take(image_size)?));
		}

		let num_images = count(buf, "skin group image")?;
		let time = buf.read_f32_le()?;
		let pixels = buf.take(section_size("skin group image", num_images, image_size)?)?;

		Ok(Skin::Group {
			time: time,
			images: (0..(num_images as usize))
				.map(move |i| &pixels[i * image_size..(i + 1) * image_size])
				.collect(),
		})
	}

	/// Advances past one entry without decoding its images
	fn skip(image_size: usize, buf: &mut SliceReader<'a>) -> Result<(), MdlError> {
		let num_images = match buf.read_i32_le()? {
			0 => 1,
			_ => {
				let num_images = count(buf, "skin group image")?;
				// time
				buf.skip(4)?;
				num_images
			},
		};

		buf.skip(section_size("skin group image", num_images, image_size)?)?;

		Ok(())
	}

	pub fn num_images(&self) -> usize {
		match self {
			Skin::Single(_) => 1,
			Skin::Group { images, .. } => images.len(),
		}
	}
}

/// Lazy walk over the skin block. Each entry's size is only known once its tag is read, so the
/// sequence can't be indexed, and it ends after the first error.
#[derive(Clone, Debug)]
pub struct Skins<'a> {
	buf: SliceReader<'a>,
	image_size: usize,
	remaining: u32,
}

impl<'a> Iterator for Skins<'a> {
	type Item = Result<Skin<'a>, MdlError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.remaining == 0 {
			return None;
		}

		let skin = Skin::read(self.image_size, &mut self.buf);
		self.remaining = match skin {
			Ok(_) => self.remaining - 1,
			Err(_) => 0,
		};

		Some(skin)
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TexCoord {
	pub on_seam: bool,
	pub s: i32,
	pub t: i32,
}

impl Record for TexCoord {
	const SIZE: usize = TEX_COORD_SIZE;

	fn decode(bytes: &[u8]) -> TexCoord {
		TexCoord {
			on_seam: LE::read_i32(&bytes[0..4]) != 0,
			s: LE::read_i32(&bytes[4..8]),
			t: LE::read_i32(&bytes[8..12]),
		}
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FaceOrient {
	Back = 0,
	Front,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Triangle {
	pub orient: FaceOrient,
	pub indices: [u32; 3],
}

impl Record for Triangle {
	const SIZE: usize = TRIANGLE_SIZE;

	fn decode(bytes: &[u8]) -> Triangle {
		Triangle {
			orient: match LE::read_i32(&bytes[0..4]) {
				0 => FaceOrient::Back,
				_ => FaceOrient::Front,
			},
			indices: [
				LE::read_u32(&bytes[4..8]),
				LE::read_u32(&bytes[8..12]),
				LE::read_u32(&bytes[12..16]),
			],
		}
	}
}

/// Quantized position plus an index into [`crate::anorms::NORMALS`]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Vertex {
	pub v: [u8; 3],
	pub normal_index: u8,
}

impl Record for Vertex {
	const SIZE: usize = VERTEX_SIZE;

	fn decode(bytes: &[u8]) -> Vertex {
		Vertex {
			v: [bytes[0], bytes[1], bytes[2]],
			normal_index: bytes[3],
		}
	}
}

impl Vertex {
	fn read(buf: &mut SliceReader) -> Result<Vertex, MdlError> {
		Ok(Vertex::decode(buf.take(VERTEX_SIZE)?))
	}
}

/// Extra data preceding the pose of a frame tagged as a group
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameGroup {
	pub min: Vertex,
	pub max: Vertex,
	pub time: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame<'a> {
	/// Offset of the frame's tag
	pub offset: usize,
	/// Size of the whole frame block, pose included
	pub len: usize,
	pub group: Option<FrameGroup>,
	pub bb_min: Vertex,
	pub bb_max: Vertex,
	pub name: [u8; 16],
	pub verts: Vertices<'a>,
}

impl<'a> Frame<'a> {
	fn read(num_verts: u32, buf: &mut SliceReader<'a>) -> Result<Frame<'a>, MdlError> {
		let offset = buf.position();

		let group = match buf.read_i32_le()? {
			0 => None,
			_ => Some(FrameGroup {
				min: Vertex::read(buf)?,
				max: Vertex::read(buf)?,
				time: buf.read_f32_le()?,
			}),
		};

		let bb_min = Vertex::read(buf)?;
		let bb_max = Vertex::read(buf)?;
		let name = buf.read_array::<16>()?;
		let verts = Table::read(buf, num_verts, "vertex")?;

		Ok(Frame {
			offset: offset,
			len: buf.position() - offset,
			group: group,
			bb_min: bb_min,
			bb_max: bb_max,
			name: name,
			verts: verts,
		})
	}

	/// The frame name, up to the first NUL
	pub fn name(&self) -> Cow<'_, str> {
		let end = self.name.iter().position(|&c| c == 0).unwrap_or(self.name.len());
		String::from_utf8_lossy(&self.name[..end])
	}
}

/// Lazy walk over the frame table, see [`Skins`]
#[derive(Clone, Debug)]
pub struct Frames<'a> {
	buf: SliceReader<'a>,
	num_verts: u32,
	remaining: u32,
}

impl<'a> Iterator for Frames<'a> {
	type Item = Result<Frame<'a>, MdlError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.remaining == 0 {
			return None;
		}

		let frame = Frame::read(self.num_verts, &mut self.buf);
		self.remaining = match frame {
			Ok(_) => self.remaining - 1,
			Err(_) => 0,
		};

		Some(frame)
	}
}

/// Typed overlay of an MDL buffer. Sections are located, not copied.
#[derive(Clone, Debug, PartialEq)]
pub struct Model<'a> {
	pub header: Header,
	pub texcoords: TexCoords<'a>,
	pub triangles: Triangles<'a>,
	data: &'a [u8],
	image_size: usize,
	frame_offset: usize,
}

impl<'a> Model<'a> {
	/// Walks the header, skin block, texture coordinates and triangles. Frames are left for
	/// [`Model::frames`].
	pub fn walk(data: &'a [u8]) -> Result<Model<'a>, MdlError> {
		let mut buf = SliceReader::new(data);
		let header = Header::read(&mut buf)?;

		let image_size = image_size(&header)?;
		for _ in 0..header.num_skins {
			Skin::skip(image_size, &mut buf)?;
		}
		debug!(offset = buf.position(), skins = header.num_skins, "Located texture coordinates");

		let texcoords = Table::read(&mut buf, header.num_verts, "vertex")?;
		let triangles = Table::read(&mut buf, header.num_tris, "triangle")?;
		debug!(offset = buf.position(), frames = header.num_frames, "Located frame table");

		Ok(Model {
			header: header,
			texcoords: texcoords,
			triangles: triangles,
			data: data,
			image_size: image_size,
			frame_offset: buf.position(),
		})
	}

	pub fn skins(&self) -> Skins<'a> {
		Skins {
			buf: SliceReader::at(self.data, HEADER_SIZE),
			image_size: self.image_size,
			remaining: self.header.num_skins,
		}
	}

	pub fn frame_table_offset(&self) -> usize {
		self.frame_offset
	}

	pub fn frames(&self) -> Frames<'a> {
		Frames {
			buf: SliceReader::at(self.data, self.frame_offset),
			num_verts: self.header.num_verts,
			remaining: self.header.num_frames,
		}
	}

	/// Runs the whole frame table once, recording where each frame lives
	pub fn locate_frames(&self) -> Result<Vec<Frame<'a>>, MdlError> {
		self.frames().collect()
	}
}

#[cfg(any(test, feature = "export"))]
pub mod export {
	use byteorder::{
		LE,
		WriteBytesExt
	};

	use std::io::{
		Result,
		Write
	};

	use ultraviolet::vec::Vec3;

	use super::*;

	#[derive(Clone, Debug, PartialEq)]
	pub enum SkinData {
		Single(Vec<u8>),
		Group {
			time: f32,
			images: Vec<Vec<u8>>,
		},
	}

	#[derive(Clone, Debug, Default, PartialEq)]
	pub struct FrameData {
		pub group: Option<FrameGroup>,
		pub bb_min: Vertex,
		pub bb_max: Vertex,
		pub name: String,
		pub verts: Vec<Vertex>,
	}

	/// Assembles an MDL file. Counts are taken from the lengths of the section vectors.
	#[derive(Clone, Debug, PartialEq)]
	pub struct ModelBuilder {
		pub scale: Vec3,
		pub origin: Vec3,
		pub bounding_radius: f32,
		pub eye_pos: Vec3,
		pub skin_width: u32,
		pub skin_height: u32,
		pub sync_type: SyncType,
		pub flags: u32,
		pub size: f32,
		pub skins: Vec<SkinData>,
		pub texcoords: Vec<TexCoord>,
		pub triangles: Vec<Triangle>,
		pub frames: Vec<FrameData>,
	}

	impl ModelBuilder {
		pub fn new(skin_width: u32, skin_height: u32) -> ModelBuilder {
			ModelBuilder {
				scale: Vec3::one(),
				origin: Vec3::zero(),
				bounding_radius: 0.0,
				eye_pos: Vec3::zero(),
				skin_width: skin_width,
				skin_height: skin_height,
				sync_type: SyncType::Synchronize,
				flags: 0,
				size: 0.0,
				skins: vec![],
				texcoords: vec![],
				triangles: vec![],
				frames: vec![],
			}
		}

		pub fn write<W>(&self, w: &mut W) -> Result<()>
		where
			W: Write,
		{
			w.write_u32::<LE>(MAGIC)?;
			w.write_i32::<LE>(VERSION)?;
			write_vec3(w, self.scale)?;
			write_vec3(w, self.origin)?;
			w.write_f32::<LE>(self.bounding_radius)?;
			write_vec3(w, self.eye_pos)?;
			w.write_u32::<LE>(self.skins.len() as u32)?;
			w.write_u32::<LE>(self.skin_width)?;
			w.write_u32::<LE>(self.skin_height)?;
			w.write_u32::<LE>(self.texcoords.len() as u32)?;
			w.write_u32::<LE>(self.triangles.len() as u32)?;
			w.write_u32::<LE>(self.frames.len() as u32)?;
			w.write_i32::<LE>(self.sync_type as i32)?;
			w.write_u32::<LE>(self.flags)?;
			w.write_f32::<LE>(self.size)?;

			for skin in self.skins.iter() {
				match skin {
					SkinData::Single(pixels) => {
						w.write_i32::<LE>(0)?;
						w.write_all(pixels)?;
					},
					SkinData::Group { time, images } => {
						w.write_i32::<LE>(1)?;
						w.write_u32::<LE>(images.len() as u32)?;
						w.write_f32::<LE>(*time)?;
						for pixels in images.iter() {
							w.write_all(pixels)?;
						}
					},
				}
			}

			for tc in self.texcoords.iter() {
				w.write_i32::<LE>(tc.on_seam as i32)?;
				w.write_i32::<LE>(tc.s)?;
				w.write_i32::<LE>(tc.t)?;
			}

			for tri in self.triangles.iter() {
				w.write_i32::<LE>(tri.orient as i32)?;
				for i in tri.indices.iter() {
					w.write_u32::<LE>(*i)?;
				}
			}

			for frame in self.frames.iter() {
				match frame.group {
					Some(group) => {
						w.write_i32::<LE>(1)?;
						write_vertex(w, group.min)?;
						write_vertex(w, group.max)?;
						w.write_f32::<LE>(group.time)?;
					},
					None => w.write_i32::<LE>(0)?,
				}

				write_vertex(w, frame.bb_min)?;
				write_vertex(w, frame.bb_max)?;

				let mut name = [0; 16];
				let len = frame.name.len().min(16);
				name[..len].copy_from_slice(&frame.name.as_bytes()[..len]);
				w.write_all(&name)?;

				for v in frame.verts.iter() {
					write_vertex(w, *v)?;
				}
			}

			Ok(())
		}
	}

	fn write_vec3<W>(w: &mut W, v: Vec3) -> Result<()>
	where
		W: Write,
	{
		w.write_f32::<LE>(v.x)?;
		w.write_f32::<LE>(v.y)?;
		w.write_f32::<LE>(v.z)
	}

	fn write_vertex<W>(w: &mut W, v: Vertex) -> Result<()>
	where
		W: Write,
	{
		w.write_all(&v.v)?;
		w.write_u8(v.normal_index)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use super::export::*;

	fn vert(x: u8, y: u8, z: u8) -> Vertex {
		Vertex {
			v: [x, y, z],
			normal_index: 0,
		}
	}

	fn builder() -> ModelBuilder {
		let mut mdl = ModelBuilder::new(4, 2);
		mdl.skins.push(SkinData::Single(vec![7; 8]));
		mdl.texcoords = vec![
			TexCoord { on_seam: true, s: 3, t: 1 },
			TexCoord { on_seam: false, s: 1, t: 0 },
			TexCoord { on_seam: false, s: 2, t: 2 },
		];
		mdl.triangles = vec![
			Triangle { orient: FaceOrient::Front, indices: [0, 1, 2] },
			Triangle { orient: FaceOrient::Back, indices: [2, 1, 0] },
		];
		mdl.frames = vec![
			FrameData {
				name: "stand1".to_string(),
				bb_max: vert(9, 9, 9),
				verts: vec![vert(1, 2, 3), vert(4, 5, 6), vert(7, 8, 9)],
				..Default::default()
			},
			FrameData {
				group: Some(FrameGroup {
					min: vert(0, 0, 0),
					max: vert(255, 255, 255),
					time: 0.1,
				}),
				name: "run1".to_string(),
				verts: vec![vert(10, 11, 12), vert(13, 14, 15), vert(16, 17, 18)],
				..Default::default()
			},
		];

		mdl
	}

	fn bytes(mdl: &ModelBuilder) -> Vec<u8> {
		let mut data = vec![];
		mdl.write(&mut data).unwrap();
		data
	}

	#[test]
	fn test_header() {
		let mut mdl = builder();
		mdl.scale = Vec3::new(0.5, 0.25, 2.0);
		mdl.origin = Vec3::new(-1.0, 0.0, 8.0);
		mdl.sync_type = SyncType::Random;
		let data = bytes(&mdl);
		let model = Model::walk(&data).unwrap();

		assert_eq!(MAGIC, model.header.magic);
		assert_eq!(VERSION, model.header.version);
		assert_eq!(Vec3::new(0.5, 0.25, 2.0), model.header.scale);
		assert_eq!(Vec3::new(-1.0, 0.0, 8.0), model.header.origin);
		assert_eq!((1, 4, 2), (model.header.num_skins, model.header.skin_width, model.header.skin_height));
		assert_eq!((3, 2, 2), (model.header.num_verts, model.header.num_tris, model.header.num_frames));
		assert_eq!(SyncType::Random, model.header.sync_type);
	}

	#[test]
	fn test_sections() {
		let data = bytes(&builder());
		let model = Model::walk(&data).unwrap();

		assert_eq!(HEADER_SIZE + 4 + 8 + 3 * TEX_COORD_SIZE + 2 * TRIANGLE_SIZE, model.frame_table_offset());
		assert_eq!(3, model.texcoords.len());
		assert_eq!(Some(TexCoord { on_seam: true, s: 3, t: 1 }), model.texcoords.get(0));
		assert_eq!(None, model.texcoords.get(3));
		assert_eq!(vec![FaceOrient::Front, FaceOrient::Back],
			model.triangles.iter().map(|t| t.orient).collect::<Vec<_>>());
		assert_eq!(Some([2, 1, 0]), model.triangles.get(1).map(|t| t.indices));
	}

	#[test]
	fn test_frames() {
		let data = bytes(&builder());
		let model = Model::walk(&data).unwrap();
		let frames = model.locate_frames().unwrap();

		assert_eq!(2, frames.len());
		assert_eq!(model.frame_table_offset(), frames[0].offset);
		assert_eq!(FRAME_HEADER_SIZE + 3 * VERTEX_SIZE, frames[0].len);
		assert_eq!("stand1", frames[0].name());
		assert_eq!(None, frames[0].group);
		assert_eq!(vert(9, 9, 9), frames[0].bb_max);
		assert_eq!(Some(vert(1, 2, 3)), frames[0].verts.get(0));

		assert_eq!(frames[0].offset + frames[0].len, frames[1].offset);
		assert_eq!(FRAME_GROUP_SIZE + FRAME_HEADER_SIZE + 3 * VERTEX_SIZE, frames[1].len);
		assert_eq!("run1", frames[1].name());
		assert_eq!(Some(0.1f32), frames[1].group.map(|g| g.time));
		assert_eq!(vec![vert(10, 11, 12), vert(13, 14, 15), vert(16, 17, 18)],
			frames[1].verts.iter().collect::<Vec<_>>());
		assert_eq!(data.len(), frames[1].offset + frames[1].len);
	}

	#[test]
	fn test_simple_skin_advance() {
		let data = bytes(&builder());
		let model = Model::walk(&data).unwrap();

		assert_eq!(Some(TexCoord { on_seam: true, s: 3, t: 1 }), model.texcoords.get(0));
		assert_eq!(vec![Skin::Single(&[7; 8][..])], model.skins().collect::<Result<Vec<_>, _>>().unwrap());
	}

	#[test]
	fn test_group_skin_advance() {
		let mut mdl = builder();
		mdl.skins = vec![SkinData::Group {
			time: 0.3,
			images: vec![vec![1; 8], vec![2; 8], vec![3; 8]],
		}];
		let data = bytes(&mdl);
		let model = Model::walk(&data).unwrap();

		let texcoord_offset = model.frame_table_offset() - 3 * TEX_COORD_SIZE - 2 * TRIANGLE_SIZE;
		assert_eq!(HEADER_SIZE + 12 + 3 * 8, texcoord_offset);
		assert_eq!(Some(TexCoord { on_seam: true, s: 3, t: 1 }), model.texcoords.get(0));
		assert_eq!(Some(TexCoord { on_seam: false, s: 2, t: 2 }), model.texcoords.get(2));

		let skins = model.skins().collect::<Result<Vec<_>, _>>().unwrap();
		assert_eq!(1, skins.len());
		assert_eq!(3, skins[0].num_images());
		match &skins[0] {
			Skin::Group { time, images } => {
				assert_eq!(0.3f32, *time);
				assert_eq!(&[3; 8][..], images[2]);
			},
			_ => panic!("expected a skin group"),
		}
	}

	#[test]
	fn test_group_skin_layout() {
		// type, image count, one duration, then the images
		let single = bytes(&builder());
		let mut data = single[..HEADER_SIZE].to_vec();
		data.extend_from_slice(&1i32.to_le_bytes());
		data.extend_from_slice(&3i32.to_le_bytes());
		data.extend_from_slice(&0.1f32.to_le_bytes());
		for i in 1..=3u8 {
			data.extend_from_slice(&[i; 8]);
		}
		data.extend_from_slice(&single[HEADER_SIZE + 4 + 8..]);

		let model = Model::walk(&data).unwrap();
		assert_eq!(Some(TexCoord { on_seam: true, s: 3, t: 1 }), model.texcoords.get(0));
		assert_eq!(2, model.locate_frames().unwrap().len());
		assert_eq!(vec![Skin::Group {
			time: 0.1,
			images: vec![&[1; 8][..], &[2; 8][..], &[3; 8][..]],
		}], model.skins().collect::<Result<Vec<_>, _>>().unwrap());

		let mut mdl = builder();
		mdl.skins = vec![SkinData::Group {
			time: 0.1,
			images: vec![vec![1; 8], vec![2; 8], vec![3; 8]],
		}];
		assert_eq!(data, bytes(&mdl));
	}

	#[test]
	fn test_truncated_group_skin() {
		let mut mdl = builder();
		mdl.skins = vec![SkinData::Group { time: 0.1, images: vec![vec![1; 8], vec![2; 8]] }];
		let data = bytes(&mdl);

		for len in HEADER_SIZE..HEADER_SIZE + 12 + 16 {
			assert!(matches!(Model::walk(&data[..len]), Err(MdlError::TruncatedInput(_))));
		}
	}

	#[test]
	fn test_skins_after_walk() {
		let mut mdl = builder();
		mdl.skins = vec![
			SkinData::Single(vec![4; 8]),
			SkinData::Group { time: 0.5, images: vec![vec![5; 8], vec![6; 8]] },
		];
		let data = bytes(&mdl);
		let model = Model::walk(&data).unwrap();

		let skins = model.skins().collect::<Result<Vec<_>, _>>().unwrap();
		assert_eq!(vec![1, 2], skins.iter().map(Skin::num_images).collect::<Vec<_>>());
		assert_eq!(Skin::Single(&[4; 8][..]), skins[0]);
	}

	#[test]
	fn test_mixed_skins() {
		let mut mdl = builder();
		mdl.skins = vec![
			SkinData::Group { time: 0.5, images: vec![vec![1; 8]] },
			SkinData::Single(vec![2; 8]),
		];
		let data = bytes(&mdl);
		let model = Model::walk(&data).unwrap();

		assert_eq!(2, model.skins().count());
		assert_eq!(3, model.locate_frames().unwrap()[1].verts.len());
	}

	#[test]
	fn test_truncated_everywhere() {
		let data = bytes(&builder());

		for len in 0..data.len() {
			let result = Model::walk(&data[..len]).and_then(|model| model.locate_frames());
			match result {
				Err(MdlError::TruncatedInput(_)) => (),
				other => panic!("cut at {} of {} gave {:?}", len, data.len(), other),
			}
		}
	}

	#[test]
	fn test_negative_count() {
		let mut data = bytes(&builder());
		// num_verts
		data[60..64].copy_from_slice(&(-3i32).to_le_bytes());

		assert_eq!(Err(MdlError::MalformedCounts { field: "vertex", value: -3 }), Model::walk(&data));
	}

	#[test]
	fn test_negative_group_size() {
		let mut mdl = builder();
		mdl.skins = vec![SkinData::Group { time: 0.0, images: vec![] }];
		let mut data = bytes(&mdl);
		data[HEADER_SIZE + 4..HEADER_SIZE + 8].copy_from_slice(&(-1i32).to_le_bytes());

		assert_eq!(Err(MdlError::MalformedCounts { field: "skin group image", value: -1 }), Model::walk(&data));
	}

	#[test]
	fn test_oversized_group() {
		let mut mdl = builder();
		mdl.skins = vec![SkinData::Group { time: 0.0, images: vec![] }];
		let mut data = bytes(&mdl);
		data[HEADER_SIZE + 4..HEADER_SIZE + 8].copy_from_slice(&i32::MAX.to_le_bytes());

		assert!(matches!(Model::walk(&data), Err(MdlError::TruncatedInput(_))));
	}

	#[test]
	fn test_frame_name() {
		let mut frame = builder().frames.remove(0);
		frame.name = "deathbackwards01".to_string();
		let mut mdl = builder();
		mdl.frames = vec![frame];
		let data = bytes(&mdl);
		let model = Model::walk(&data).unwrap();

		assert_eq!("deathbackwards01", model.locate_frames().unwrap()[0].name());
	}

	#[test]
	fn test_no_frames() {
		let mut mdl = builder();
		mdl.frames.clear();
		let data = bytes(&mdl);
		let model = Model::walk(&data).unwrap();

		assert_eq!(data.len(), model.frame_table_offset());
		assert!(model.locate_frames().unwrap().is_empty());
	}
}
