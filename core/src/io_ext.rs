use byteorder::{
	ByteOrder,
	LE
};

use thiserror::Error;
use ultraviolet::vec::Vec3;

/// Returned when a read would run past the end of the underlying buffer
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[error("needed {needed} bytes at offset {offset}, only {available} remain")]
pub struct Truncated {
	pub offset: usize,
	pub needed: usize,
	pub available: usize,
}

pub type Result<T> = std::result::Result<T, Truncated>;

/// Bounds-checked little endian cursor over a borrowed byte buffer.
///
/// Every read is validated against the remaining length before the cursor moves, so a failed
/// read leaves the position untouched. Slices handed out borrow from the original buffer.
#[derive(Clone, Copy, Debug)]
pub struct SliceReader<'a> {
	data: &'a [u8],
	pos: usize,
}

impl<'a> SliceReader<'a> {
	pub fn new(data: &'a [u8]) -> SliceReader<'a> {
		SliceReader {
			data: data,
			pos: 0,
		}
	}

	/// Creates a reader positioned at `pos`, which may lie past the end
	pub fn at(data: &'a [u8], pos: usize) -> SliceReader<'a> {
		SliceReader {
			data: data,
			pos: pos,
		}
	}

	#[inline]
	pub fn position(&self) -> usize {
		self.pos
	}

	#[inline]
	pub fn remaining(&self) -> usize {
		self.data.len().saturating_sub(self.pos)
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.remaining() == 0
	}

	/// Borrows the next `len` bytes and advances past them
	pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
		let available = self.remaining();
		if len > available {
			return Err(Truncated {
				offset: self.pos,
				needed: len,
				available: available,
			});
		}

		if len == 0 {
			return Ok(&[]);
		}

		let out = &self.data[self.pos..self.pos + len];
		self.pos += len;

		Ok(out)
	}

	#[inline]
	pub fn skip(&mut self, len: usize) -> Result<()> {
		self.take(len).map(|_| ())
	}

	/// Reads a fixed-size byte array
	#[inline]
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let mut out = [0; N];
		out.copy_from_slice(self.take(N)?);

		Ok(out)
	}

	#[inline]
	pub fn read_i32_le(&mut self) -> Result<i32> {
		Ok(LE::read_i32(self.take(4)?))
	}

	#[inline]
	pub fn read_u32_le(&mut self) -> Result<u32> {
		Ok(LE::read_u32(self.take(4)?))
	}

	#[inline]
	pub fn read_f32_le(&mut self) -> Result<f32> {
		Ok(LE::read_f32(self.take(4)?))
	}

	/// Reads a little endian 3D vector
	#[inline]
	pub fn read_vec3_le(&mut self) -> Result<Vec3> {
		let xyz = self.take(12)?;

		Ok(Vec3::new(LE::read_f32(&xyz[0..4]), LE::read_f32(&xyz[4..8]), LE::read_f32(&xyz[8..12])))
	}
}
