use std::io::Write;

use tracing::trace;

use super::{Error, Frame, Result, MAX_WRITE};

/// Somewhere frames can be shown.
pub trait Sink {
	/// Deliver a whole frame.
	///
	/// When this returns `Ok`, the frame has been handed over in a single write and flushed:
	/// nothing from it is left buffered.
	fn send(&mut self, frame: &Frame) -> Result<()>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
	fn send(&mut self, frame: &Frame) -> Result<()> {
		(**self).send(frame)
	}
}

impl<S: Sink + ?Sized> Sink for Box<S> {
	fn send(&mut self, frame: &Frame) -> Result<()> {
		(**self).send(frame)
	}
}

/// A [`Sink`] over any [`Write`]r: a device file, stdout, or a byte buffer.
#[derive(Debug)]
pub struct WriterSink<W> {
	inner: W,
	buf: Vec<u8>,
}

impl<W: Write> WriterSink<W> {
	pub fn new(inner: W) -> Self {
		Self {
			inner,
			buf: Vec::with_capacity(MAX_WRITE),
		}
	}

	pub fn get_ref(&self) -> &W {
		&self.inner
	}

	pub fn into_inner(self) -> W {
		self.inner
	}
}

impl<W: Write> Sink for WriterSink<W> {
	fn send(&mut self, frame: &Frame) -> Result<()> {
		self.buf.clear();
		frame.encode_into(&mut self.buf);
		trace!(bytes = self.buf.len(), "writing frame");

		// the driver treats each write as a full redraw, so the frame must go out in one piece
		self.inner.write_all(&self.buf).map_err(Error::Write)?;
		self.inner.flush().map_err(Error::Write)
	}
}
