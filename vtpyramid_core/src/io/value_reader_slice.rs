use super::ValueReader;
use anyhow::{Result, ensure};
use byteorder::{ByteOrder, LittleEndian};
use std::{io::Read, marker::PhantomData};

/// Reads protobuf fields from a borrowed byte slice.
///
/// `rest` is the unread tail. Reading through [`Read`] for `&[u8]` shrinks it from the front.
pub struct ValueReaderSlice<'a, E: ByteOrder> {
	rest: &'a [u8],
	len: u64,
	order: PhantomData<E>,
}

impl<'a> ValueReaderSlice<'a, LittleEndian> {
	#[must_use]
	pub fn new_le(data: &'a [u8]) -> ValueReaderSlice<'a, LittleEndian> {
		ValueReaderSlice::over(data)
	}
}

impl<'a, E: ByteOrder> ValueReaderSlice<'a, E> {
	fn over(data: &'a [u8]) -> ValueReaderSlice<'a, E> {
		ValueReaderSlice {
			rest: data,
			len: data.len() as u64,
			order: PhantomData,
		}
	}
}

impl<'a, E: ByteOrder + 'a> ValueReader<'a, E> for ValueReaderSlice<'a, E> {
	fn get_reader(&mut self) -> &mut dyn Read {
		&mut self.rest
	}

	fn len(&self) -> u64 {
		self.len
	}

	fn position(&mut self) -> u64 {
		self.len - self.rest.len() as u64
	}

	fn get_sub_reader<'b>(&'b mut self, length: u64) -> Result<Box<dyn ValueReader<'b, E> + 'b>>
	where
		E: 'b,
	{
		let rest: &'a [u8] = self.rest;
		let available = rest.len();
		let length = usize::try_from(length).unwrap_or(usize::MAX);
		ensure!(
			length <= available,
			"sub-reader of {length} bytes exceeds the {available} remaining bytes"
		);
		let (head, tail) = rest.split_at(length);
		self.rest = tail;
		Ok(Box::new(ValueReaderSlice::<'b, E>::over(head)))
	}
}
