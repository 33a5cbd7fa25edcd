#[cfg(feature = "io_ext")]
pub mod io_ext;

#[cfg(feature = "nom_ext")]
pub mod nom_ext;

pub mod scene;

/// Converts a 4-byte string into a 32-bit little endian integer, as used for file magic.
/// Byte strings longer than 4 bytes are truncated.
#[macro_export]
macro_rules! rtag4 {
	($b4: literal) => {
		u32::from_le_bytes([$b4[0], $b4[1], $b4[2], $b4[3]])
	}
}
