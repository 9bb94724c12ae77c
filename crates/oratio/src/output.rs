//! Where replies are printed.
//!
//! The chat loop only talks to an [`Output`], so it can run against a
//! terminal, a buffer in tests, or anything else that accepts text.

use std::io::{self, Write};
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::time::sleep;

/// A sink for text shown to the user.
#[async_trait]
pub trait Output: Send {
    /// Prints `text` as is. No newline is added.
    async fn print(&mut self, text: &str) -> io::Result<()>;
}

/// Prints text all at once.
#[derive(Debug)]
pub struct PlainOutput<W> {
    writer: W,
}

impl<W: Write + Send> PlainOutput<W> {
    /// Creates an output writing to `writer`.
    #[inline]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    #[inline]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W: Write + Send> Output for PlainOutput<W> {
    async fn print(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()
    }
}

/// The range of delays between two characters of a [`TypedOutput`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacing {
    min: Duration,
    max: Duration,
}

impl Pacing {
    /// Creates a pacing drawing delays uniformly from `min..=max`. The
    /// bounds are swapped if given in the wrong order.
    #[inline]
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// A pacing that never waits.
    #[inline]
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    fn next_delay(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

impl Default for Pacing {
    #[inline]
    fn default() -> Self {
        Self::new(Duration::from_millis(5), Duration::from_millis(30))
    }
}

/// Prints text one character at a time, like someone typing.
#[derive(Debug)]
pub struct TypedOutput<W> {
    writer: W,
    pacing: Pacing,
}

impl<W: Write + Send> TypedOutput<W> {
    /// Creates an output writing to `writer` with the default pacing.
    #[inline]
    pub fn new(writer: W) -> Self {
        Self::with_pacing(writer, Pacing::default())
    }

    /// Creates an output writing to `writer` with a custom pacing.
    #[inline]
    pub fn with_pacing(writer: W, pacing: Pacing) -> Self {
        Self { writer, pacing }
    }

    /// Returns the underlying writer.
    #[inline]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W: Write + Send> Output for TypedOutput<W> {
    async fn print(&mut self, text: &str) -> io::Result<()> {
        let mut buf = [0; 4];
        for ch in text.chars() {
            self.writer.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
            self.writer.flush()?;

            let delay = self.pacing.next_delay();
            if !delay.is_zero() {
                sleep(delay).await;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;

    #[tokio::test]
    async fn test_plain_output() {
        let mut output = PlainOutput::new(Vec::new());
        output.print("Hello, ").await.unwrap();
        output.print("world!").await.unwrap();
        assert_eq!(output.into_inner(), b"Hello, world!");
    }

    #[tokio::test(start_paused = true)]
    async fn test_typed_output() {
        let pacing =
            Pacing::new(Duration::from_millis(10), Duration::from_millis(20));
        let mut output = TypedOutput::with_pacing(Vec::new(), pacing);

        let started = Instant::now();
        output.print("héllo").await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(output.into_inner(), "héllo".as_bytes());
        assert!(elapsed >= Duration::from_millis(50));
        assert!(elapsed <= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_typed_output_without_pacing() {
        let mut output = TypedOutput::with_pacing(Vec::new(), Pacing::none());
        output.print("no delay").await.unwrap();
        assert_eq!(output.into_inner(), b"no delay");
    }

    #[test]
    fn test_pacing_bounds() {
        let pacing =
            Pacing::new(Duration::from_millis(30), Duration::from_millis(5));
        for _ in 0..100 {
            let delay = pacing.next_delay();
            assert!(delay >= Duration::from_millis(5));
            assert!(delay <= Duration::from_millis(30));
        }
    }
}
