use super::ValueWriter;
use crate::Blob;
use anyhow::Result;
use byteorder::{ByteOrder, LittleEndian};
use std::{io::Write, marker::PhantomData};

/// Collects protobuf output in memory until it is turned into a [`Blob`].
pub struct ValueWriterBlob<E: ByteOrder> {
	buffer: Vec<u8>,
	order: PhantomData<E>,
}

impl ValueWriterBlob<LittleEndian> {
	/// Fixed-width protobuf fields are little-endian.
	#[must_use]
	pub fn new_le() -> ValueWriterBlob<LittleEndian> {
		ValueWriterBlob {
			buffer: Vec::new(),
			order: PhantomData,
		}
	}
}

impl<E: ByteOrder> ValueWriterBlob<E> {
	pub fn into_blob(self) -> Blob {
		Blob::from(self.buffer)
	}
}

impl<E: ByteOrder> ValueWriter<E> for ValueWriterBlob<E> {
	fn get_writer(&mut self) -> &mut dyn Write {
		&mut self.buffer
	}

	// the buffer only ever grows at its end
	fn position(&mut self) -> Result<u64> {
		Ok(self.buffer.len() as u64)
	}
}
