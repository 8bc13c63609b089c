//! Configuration shared by decoders and encoders.

use bitflags::bitflags;

/// Default maximum nesting depth, matching the conventional codec default.
pub const DEFAULT_MAX_DEPTH: usize = 512;

bitflags! {
    /// Option bits controlling decode and encode behavior.
    ///
    /// Flags combine with bitwise-or; bits without a named constant are
    /// carried through `with_flags`/`add_flags` unchanged so callers can
    /// forward codec-specific bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use fluent_json::Flags;
    ///
    /// let flags = Flags::PRETTY_PRINT | Flags::ESCAPE_UNICODE;
    /// assert!(flags.contains(Flags::PRETTY_PRINT));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Flags: u32 {
        /// Decode JSON objects as ordered associative maps.
        ///
        /// Every decoded object is an ordered map already; the flag exists
        /// so the associative projection can be requested and forwarded
        /// explicitly, and `Decoder::to_map` merges it transiently.
        const OBJECT_AS_MAP = 1;
        /// Produce 4-space-indented multi-line output when encoding.
        const PRETTY_PRINT = 1 << 1;
        /// Escape all non-ASCII characters as `\uXXXX` when encoding.
        const ESCAPE_UNICODE = 1 << 2;
    }
}

impl Default for Flags {
    fn default() -> Self {
        Flags::empty()
    }
}

/// Immutable configuration attached to a decoder or encoder instance.
///
/// Mutators return a new value; an instance's configuration never changes
/// after construction.
///
/// # Examples
///
/// ```
/// use fluent_json::{Flags, Options};
///
/// let base = Options::default();
/// let strict = base.with_depth(4).add_flags(Flags::PRETTY_PRINT);
///
/// assert_eq!(base.max_depth, 512);
/// assert_eq!(strict.max_depth, 4);
/// assert!(strict.flags.contains(Flags::PRETTY_PRINT));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Maximum nesting depth. Nesting strictly deeper than this fails.
    ///
    /// Must be at least 1; a zero depth is rejected when decoding or
    /// encoding.
    pub max_depth: usize,

    /// Option bits. See [`Flags`].
    pub flags: Flags,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_depth: DEFAULT_MAX_DEPTH,
            flags: Flags::empty(),
        }
    }
}

impl Options {
    pub fn new(max_depth: usize, flags: Flags) -> Self {
        Options { max_depth, flags }
    }

    /// Returns a copy with the given depth limit.
    pub fn with_depth(self, max_depth: usize) -> Self {
        Options { max_depth, ..self }
    }

    /// Returns a copy with the flag set replaced.
    pub fn with_flags(self, flags: Flags) -> Self {
        Options { flags, ..self }
    }

    /// Returns a copy with the given flags merged in (bitwise or).
    pub fn add_flags(self, flags: Flags) -> Self {
        Options {
            flags: self.flags | flags,
            ..self
        }
    }
}
