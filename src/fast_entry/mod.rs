//! Fixed-capacity binary log entry for hot paths.
//!
//! A [`FastLogEntry`] stores a borrowed format string, a severity, a
//! timestamp and an inline `[u8; N]` buffer of type-tagged primitive
//! arguments. No heap allocation happens on construction; combining the
//! decoded arguments with the format string is left to a renderer such as
//! [`render`].

mod arg;
mod render;

use std::{ffi::CStr, marker::PhantomData};

use thiserror::Error;

use crate::level::SeverityLevel;

pub use arg::{EntryType, FastArg};
pub use render::render;

/// Errors raised while encoding arguments.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FastEntryError {
    #[error("arguments need {required} bytes but the entry holds {capacity}")]
    CapacityExceeded { required: usize, capacity: usize },
}

/// Total bytes `args` need in the buffer, tags included.
pub fn encoded_len(args: &[FastArg<'_>]) -> usize {
    args.iter().map(FastArg::encoded_len).sum()
}

/// A log entry whose arguments are packed into an inline byte buffer.
///
/// String arguments are stored as addresses and borrowed for `'a`, so the
/// entry cannot outlive the strings it refers to. The buffer holds no
/// pointers into itself and may be moved or copied freely.
#[derive(Clone, Copy, Debug)]
pub struct FastLogEntry<'a, const N: usize> {
    format: &'a str,
    level: SeverityLevel,
    timestamp: i64,
    data: [u8; N],
    _strings: PhantomData<&'a CStr>,
}

impl<'a, const N: usize> FastLogEntry<'a, N> {
    /// Build an entry and encode `args` into its buffer.
    ///
    /// Fails with [`FastEntryError::CapacityExceeded`] when the encoded
    /// arguments would not fit in `N` bytes.
    pub fn new(
        format: &'a str,
        level: SeverityLevel,
        timestamp: i64,
        args: &[FastArg<'a>],
    ) -> Result<Self, FastEntryError> {
        let mut entry = Self {
            format,
            level,
            timestamp,
            data: [0; N],
            _strings: PhantomData,
        };
        entry.serialize(args)?;
        Ok(entry)
    }

    /// Replace the encoded arguments.
    ///
    /// The capacity check runs before anything is written, so on error the
    /// buffer keeps its previous contents.
    pub fn serialize(&mut self, args: &[FastArg<'a>]) -> Result<(), FastEntryError> {
        let required = encoded_len(args);
        if required > N {
            return Err(FastEntryError::CapacityExceeded {
                required,
                capacity: N,
            });
        }
        self.data = [0; N];
        let mut pos = 0;
        for arg in args {
            self.data[pos] = arg.entry_type() as u8;
            pos += 1;
            pos += arg.write_value(&mut self.data[pos..]);
        }
        Ok(())
    }

    /// Iterate over the encoded arguments in order.
    pub fn args(&self) -> FastArgs<'_, 'a> {
        FastArgs {
            data: &self.data,
            pos: 0,
            _strings: PhantomData,
        }
    }

    /// Call `visit` once per encoded argument, in encoding order.
    pub fn decode<V>(&self, visit: V)
    where
        V: FnMut(FastArg<'a>),
    {
        self.args().for_each(visit);
    }

    pub fn format_string(&self) -> &'a str {
        self.format
    }

    /// Bytes occupied by the encoded arguments.
    pub fn encoded_len(&self) -> usize {
        self.args().map(|arg| arg.encoded_len()).sum()
    }

    pub fn level(&self) -> SeverityLevel {
        self.level
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Raw argument buffer.
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.data
    }
}

/// Iterator over the arguments of a [`FastLogEntry`].
///
/// Stops at the first `None` tag, at an unknown tag, or when the remaining
/// bytes cannot hold the value announced by a tag.
pub struct FastArgs<'e, 'a> {
    data: &'e [u8],
    pos: usize,
    _strings: PhantomData<&'a CStr>,
}

impl<'a> Iterator for FastArgs<'_, 'a> {
    type Item = FastArg<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let &tag = self.data.get(self.pos)?;
        let ty = match EntryType::try_from(tag) {
            Ok(EntryType::None) | Err(_) => {
                self.pos = self.data.len();
                return None;
            }
            Ok(ty) => ty,
        };
        let start = self.pos + 1;
        let end = start + ty.payload_size();
        let Some(value) = self.data.get(start..end) else {
            self.pos = self.data.len();
            return None;
        };
        self.pos = end;
        Some(read_value(ty, value))
    }
}

fn bytes<const S: usize>(value: &[u8]) -> [u8; S] {
    let mut out = [0; S];
    out.copy_from_slice(&value[..S]);
    out
}

fn read_value<'a>(ty: EntryType, value: &[u8]) -> FastArg<'a> {
    match ty {
        EntryType::U8 => FastArg::U8(value[0]),
        EntryType::I8 => FastArg::I8(i8::from_ne_bytes(bytes(value))),
        EntryType::U16 => FastArg::U16(u16::from_ne_bytes(bytes(value))),
        EntryType::I16 => FastArg::I16(i16::from_ne_bytes(bytes(value))),
        EntryType::U32 => FastArg::U32(u32::from_ne_bytes(bytes(value))),
        EntryType::I32 => FastArg::I32(i32::from_ne_bytes(bytes(value))),
        EntryType::U64 => FastArg::U64(u64::from_ne_bytes(bytes(value))),
        EntryType::I64 => FastArg::I64(i64::from_ne_bytes(bytes(value))),
        EntryType::Ptr => {
            FastArg::Ptr(usize::from_ne_bytes(bytes(value)) as *const std::ffi::c_void)
        }
        EntryType::CharPtr => {
            let ptr = arg::char_ptr_from_addr(usize::from_ne_bytes(bytes(value)));
            // SAFETY: the buffer is private and only `serialize` writes
            // `CharPtr` tags, always from a `&'a CStr`. The entry is bound to
            // `'a`, so the string is still alive and NUL-terminated here.
            FastArg::CharPtr(unsafe { CStr::from_ptr(ptr) })
        }
        EntryType::Boolean => FastArg::Bool(value[0] != 0),
        EntryType::Floating32 => FastArg::F32(f32::from_ne_bytes(bytes(value))),
        EntryType::Floating64 => FastArg::F64(f64::from_ne_bytes(bytes(value))),
        EntryType::None => unreachable!("none tags end iteration"),
    }
}

/// Build a [`FastLogEntry`] of the given capacity from heterogeneous
/// arguments.
///
/// ```
/// use lg_engine::{SeverityLevel, fast_entry};
///
/// let entry = fast_entry!(32; "{} of {}", SeverityLevel::Info, 0, 3u32, 10u64)
///     .expect("fits");
/// assert_eq!(entry.args().count(), 2);
/// ```
#[macro_export]
macro_rules! fast_entry {
    ($cap:expr; $format:expr, $level:expr, $timestamp:expr $(, $arg:expr)* $(,)?) => {
        $crate::fast_entry::FastLogEntry::<$cap>::new(
            $format,
            $level,
            $timestamp,
            &[$($crate::fast_entry::FastArg::from($arg)),*],
        )
    };
}
