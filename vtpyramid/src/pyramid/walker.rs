//! Depth-first traversal of a [`TilePyramid`] with an explicit work stack.
//!
//! ```
//! use vtpyramid::pyramid::{PyramidVisitor, PyramidWalker, TilePyramid};
//! use vtpyramid_core::TileCoord;
//! use std::sync::Mutex;
//!
//! #[derive(Default)]
//! struct Collect(Mutex<Vec<TileCoord>>);
//!
//! impl PyramidVisitor for Collect {
//! 	fn prepare_column(&self, _level: u8, _x: u32) -> anyhow::Result<()> {
//! 		Ok(())
//! 	}
//! 	fn visit_tile(&self, coord: &TileCoord) -> anyhow::Result<()> {
//! 		self.0.lock().unwrap().push(*coord);
//! 		Ok(())
//! 	}
//! }
//!
//! let pyramid = TilePyramid::new(TileCoord::new(0, 0, 0)?, 1)?;
//! let visitor = Collect::default();
//! assert_eq!(PyramidWalker::new(pyramid).walk(&visitor)?, 5);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::{PyramidVisitor, TilePyramid};
use anyhow::{Context, Result};
use futures::{StreamExt, stream};
use log::trace;
use std::sync::Arc;
use vtpyramid_core::TileCoord;

pub struct PyramidWalker {
	pyramid: TilePyramid,
}

impl PyramidWalker {
	pub fn new(pyramid: TilePyramid) -> PyramidWalker {
		PyramidWalker { pyramid }
	}

	pub fn pyramid(&self) -> &TilePyramid {
		&self.pyramid
	}

	/// Yields every tile of the pyramid once, parents before their children.
	///
	/// Child columns are prepared through `visitor` when their parent is yielded, so a consumer
	/// may hand tiles to other threads in any order.
	pub fn iter<'a, V: PyramidVisitor + ?Sized>(&self, visitor: &'a V) -> PyramidIter<'a, V> {
		PyramidIter {
			visitor,
			stack: vec![self.pyramid.root],
			max_level: self.pyramid.max_level,
			failed: false,
		}
	}

	/// Visits all tiles one after another and returns how many were visited.
	/// The first error aborts the walk.
	pub fn walk<V: PyramidVisitor + ?Sized>(&self, visitor: &V) -> Result<u64> {
		let mut count = 0;
		for coord in self.iter(visitor) {
			visitor.visit_tile(&coord?)?;
			count += 1;
		}
		Ok(count)
	}

	/// Visits tiles on blocking worker threads, with at most `concurrency` tiles in flight.
	/// No new tiles are scheduled after the first error, which is returned.
	pub async fn walk_concurrent<V: PyramidVisitor + 'static>(&self, visitor: Arc<V>, concurrency: usize) -> Result<u64> {
		let mut tasks = stream::iter(self.iter(visitor.as_ref()))
			.map(|item| {
				let visitor = Arc::clone(&visitor);
				async move {
					let coord = item?;
					tokio::task::spawn_blocking(move || visitor.visit_tile(&coord))
						.await
						.with_context(|| format!("Task for tile {coord:?} did not complete"))?
				}
			})
			.buffer_unordered(concurrency.max(1));

		let mut count = 0;
		while let Some(result) = tasks.next().await {
			result?;
			count += 1;
		}
		Ok(count)
	}
}

pub struct PyramidIter<'a, V: PyramidVisitor + ?Sized> {
	visitor: &'a V,
	stack: Vec<TileCoord>,
	max_level: u8,
	failed: bool,
}

impl<V: PyramidVisitor + ?Sized> PyramidIter<'_, V> {
	fn descend(&mut self, coord: &TileCoord) -> Result<()> {
		let children = coord.children()?;
		let level = coord.level + 1;
		trace!("preparing columns {} and {} at level {level}", children[0].x, children[1].x);
		self.visitor.prepare_column(level, children[0].x)?;
		self.visitor.prepare_column(level, children[1].x)?;
		self.stack.extend(children.iter().rev());
		Ok(())
	}
}

impl<V: PyramidVisitor + ?Sized> Iterator for PyramidIter<'_, V> {
	type Item = Result<TileCoord>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}
		let coord = self.stack.pop()?;
		if coord.level < self.max_level
			&& let Err(error) = self.descend(&coord)
		{
			self.failed = true;
			return Some(Err(error.context(format!("Failed to descend below {coord:?}"))));
		}
		Some(Ok(coord))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use anyhow::bail;
	use pretty_assertions::assert_eq;
	use std::{
		collections::{HashMap, HashSet},
		sync::Mutex,
	};

	#[derive(Debug, PartialEq)]
	enum Event {
		Column(u8, u32),
		Tile(TileCoord),
	}

	#[derive(Default)]
	struct Recorder {
		events: Mutex<Vec<Event>>,
		fail_at: Option<TileCoord>,
	}

	impl Recorder {
		fn tiles(&self) -> Vec<TileCoord> {
			let events = self.events.lock().unwrap();
			events
				.iter()
				.filter_map(|e| match e {
					Event::Tile(c) => Some(*c),
					Event::Column(..) => None,
				})
				.collect()
		}
	}

	impl PyramidVisitor for Recorder {
		fn prepare_column(&self, level: u8, x: u32) -> Result<()> {
			self.events.lock().unwrap().push(Event::Column(level, x));
			Ok(())
		}

		fn visit_tile(&self, coord: &TileCoord) -> Result<()> {
			if self.fail_at == Some(*coord) {
				bail!("cannot render {coord:?}");
			}
			self.events.lock().unwrap().push(Event::Tile(*coord));
			Ok(())
		}
	}

	fn coord(level: u8, x: u32, y: u32) -> TileCoord {
		TileCoord::new(level, x, y).unwrap()
	}

	fn walker(level: u8, x: u32, y: u32, max_level: u8) -> PyramidWalker {
		PyramidWalker::new(TilePyramid::new(coord(level, x, y), max_level).unwrap())
	}

	#[test]
	fn zoom_0_to_1_visits_five_tiles_depth_first() -> Result<()> {
		let recorder = Recorder::default();
		assert_eq!(walker(0, 0, 0, 1).walk(&recorder)?, 5);
		assert_eq!(
			*recorder.events.lock().unwrap(),
			vec![
				Event::Column(1, 0),
				Event::Column(1, 1),
				Event::Tile(coord(0, 0, 0)),
				Event::Tile(coord(1, 0, 0)),
				Event::Tile(coord(1, 1, 0)),
				Event::Tile(coord(1, 0, 1)),
				Event::Tile(coord(1, 1, 1)),
			]
		);
		Ok(())
	}

	#[test]
	fn single_level_has_no_columns() -> Result<()> {
		let recorder = Recorder::default();
		assert_eq!(walker(4, 3, 9, 4).walk(&recorder)?, 1);
		assert_eq!(*recorder.events.lock().unwrap(), vec![Event::Tile(coord(4, 3, 9))]);
		Ok(())
	}

	#[test]
	fn every_tile_exactly_once_with_column_first() -> Result<()> {
		let walker = walker(2, 1, 3, 6);
		let recorder = Recorder::default();
		let count = walker.walk(&recorder)?;
		assert_eq!(count, walker.pyramid().count_tiles());

		let tiles = recorder.tiles();
		let unique: HashSet<TileCoord> = tiles.iter().copied().collect();
		assert_eq!(unique.len(), tiles.len());
		assert!(tiles.iter().all(|c| walker.pyramid().contains(c)));

		let events = recorder.events.lock().unwrap();
		let mut columns = HashSet::new();
		for event in events.iter() {
			match event {
				Event::Column(level, x) => _ = columns.insert((*level, *x)),
				Event::Tile(c) if c.level > 2 => assert!(columns.contains(&(c.level, c.x)), "{c:?} before its column"),
				Event::Tile(_) => {}
			}
		}
		Ok(())
	}

	#[test]
	fn children_follow_the_doubling_rule() -> Result<()> {
		let recorder = Recorder::default();
		walker(5, 10, 7, 7).walk(&recorder)?;
		let tiles = recorder.tiles();
		let mut per_parent: HashMap<TileCoord, Vec<TileCoord>> = HashMap::new();
		for tile in tiles.iter().filter(|c| c.level > 5) {
			per_parent.entry(tile.parent()?).or_default().push(*tile);
		}
		for (parent, mut children) in per_parent {
			children.sort();
			let mut expected = parent.children()?.to_vec();
			expected.sort();
			assert_eq!(children, expected);
		}
		Ok(())
	}

	#[test]
	fn first_error_stops_the_walk() {
		let recorder = Recorder {
			fail_at: Some(coord(1, 1, 0)),
			..Recorder::default()
		};
		let error = walker(0, 0, 0, 2).walk(&recorder).unwrap_err();
		assert_eq!(error.to_string(), "cannot render TileCoord(1, [1, 0])");
		// (0,0,0), (1,0,0) and its four children
		assert_eq!(recorder.tiles().len(), 6);
	}

	#[test]
	fn failing_column_ends_iteration() {
		struct NoColumns;
		impl PyramidVisitor for NoColumns {
			fn prepare_column(&self, _level: u8, _x: u32) -> Result<()> {
				bail!("read-only")
			}
			fn visit_tile(&self, _coord: &TileCoord) -> Result<()> {
				Ok(())
			}
		}
		let walker = walker(0, 0, 0, 3);
		let mut iter = walker.iter(&NoColumns);
		assert!(iter.next().unwrap().is_err());
		assert!(iter.next().is_none());
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn concurrent_walk_covers_the_pyramid() -> Result<()> {
		let walker = walker(1, 1, 0, 5);
		let recorder = Arc::new(Recorder::default());
		let count = walker.walk_concurrent(Arc::clone(&recorder), 8).await?;
		assert_eq!(count, 341);

		let mut concurrent = recorder.tiles();
		let sequential = Recorder::default();
		walker.walk(&sequential)?;
		let mut expected = sequential.tiles();
		concurrent.sort();
		expected.sort();
		assert_eq!(concurrent, expected);
		Ok(())
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
	async fn concurrent_walk_returns_the_error() {
		let recorder = Arc::new(Recorder {
			fail_at: Some(coord(3, 2, 2)),
			..Recorder::default()
		});
		let error = walker(0, 0, 0, 4).walk_concurrent(recorder, 4).await.unwrap_err();
		assert_eq!(error.to_string(), "cannot render TileCoord(3, [2, 2])");
	}
}
