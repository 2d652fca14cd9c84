//! The closed set of argument types a fast entry can carry.
//!
//! Each argument is written as one [`EntryType`] tag byte followed by the
//! value's native-endian bytes. Conversions exist only for the supported
//! primitives, so any other argument type is rejected at compile time.
//! Raw pointers of every pointee type collapse to [`FastArg::Ptr`]; C strings
//! are passed as `&CStr` and travel as [`FastArg::CharPtr`].

use std::{
    ffi::{CStr, c_char, c_void},
    fmt, mem,
};

/// One-byte type tag preceding each encoded value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EntryType {
    None = 0x0,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    Ptr,
    CharPtr,
    Boolean,
    Floating32,
    Floating64,
}

impl EntryType {
    /// Number of value bytes following the tag.
    pub const fn payload_size(self) -> usize {
        match self {
            EntryType::None => 0,
            EntryType::U8 | EntryType::I8 | EntryType::Boolean => 1,
            EntryType::U16 | EntryType::I16 => 2,
            EntryType::U32 | EntryType::I32 | EntryType::Floating32 => 4,
            EntryType::U64 | EntryType::I64 | EntryType::Floating64 => 8,
            EntryType::Ptr | EntryType::CharPtr => mem::size_of::<usize>(),
        }
    }
}

impl TryFrom<u8> for EntryType {
    type Error = u8;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Ok(match tag {
            0x0 => EntryType::None,
            0x1 => EntryType::U8,
            0x2 => EntryType::I8,
            0x3 => EntryType::U16,
            0x4 => EntryType::I16,
            0x5 => EntryType::U32,
            0x6 => EntryType::I32,
            0x7 => EntryType::U64,
            0x8 => EntryType::I64,
            0x9 => EntryType::Ptr,
            0xA => EntryType::CharPtr,
            0xB => EntryType::Boolean,
            0xC => EntryType::Floating32,
            0xD => EntryType::Floating64,
            other => return Err(other),
        })
    }
}

/// A single decoded (or to-be-encoded) argument.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FastArg<'a> {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    Ptr(*const c_void),
    CharPtr(&'a CStr),
    Bool(bool),
    F32(f32),
    F64(f64),
}

impl FastArg<'_> {
    pub fn entry_type(&self) -> EntryType {
        match self {
            FastArg::U8(_) => EntryType::U8,
            FastArg::I8(_) => EntryType::I8,
            FastArg::U16(_) => EntryType::U16,
            FastArg::I16(_) => EntryType::I16,
            FastArg::U32(_) => EntryType::U32,
            FastArg::I32(_) => EntryType::I32,
            FastArg::U64(_) => EntryType::U64,
            FastArg::I64(_) => EntryType::I64,
            FastArg::Ptr(_) => EntryType::Ptr,
            FastArg::CharPtr(_) => EntryType::CharPtr,
            FastArg::Bool(_) => EntryType::Boolean,
            FastArg::F32(_) => EntryType::Floating32,
            FastArg::F64(_) => EntryType::Floating64,
        }
    }

    /// Bytes this argument occupies in the buffer, tag included.
    pub fn encoded_len(&self) -> usize {
        1 + self.entry_type().payload_size()
    }

    /// Write the value bytes (without tag) into `out`, returning the count.
    ///
    /// `out` must hold at least `entry_type().payload_size()` bytes.
    pub(crate) fn write_value(&self, out: &mut [u8]) -> usize {
        fn put(out: &mut [u8], bytes: &[u8]) -> usize {
            out[..bytes.len()].copy_from_slice(bytes);
            bytes.len()
        }
        match *self {
            FastArg::U8(v) => put(out, &v.to_ne_bytes()),
            FastArg::I8(v) => put(out, &v.to_ne_bytes()),
            FastArg::U16(v) => put(out, &v.to_ne_bytes()),
            FastArg::I16(v) => put(out, &v.to_ne_bytes()),
            FastArg::U32(v) => put(out, &v.to_ne_bytes()),
            FastArg::I32(v) => put(out, &v.to_ne_bytes()),
            FastArg::U64(v) => put(out, &v.to_ne_bytes()),
            FastArg::I64(v) => put(out, &v.to_ne_bytes()),
            FastArg::Ptr(p) => put(out, &(p as usize).to_ne_bytes()),
            FastArg::CharPtr(s) => put(out, &(s.as_ptr() as usize).to_ne_bytes()),
            FastArg::Bool(v) => put(out, &[u8::from(v)]),
            FastArg::F32(v) => put(out, &v.to_ne_bytes()),
            FastArg::F64(v) => put(out, &v.to_ne_bytes()),
        }
    }
}

/// Address stored for a string argument.
pub(crate) fn char_ptr_from_addr(addr: usize) -> *const c_char {
    addr as *const c_char
}

impl fmt::Display for FastArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FastArg::U8(v) => write!(f, "{v}"),
            FastArg::I8(v) => write!(f, "{v}"),
            FastArg::U16(v) => write!(f, "{v}"),
            FastArg::I16(v) => write!(f, "{v}"),
            FastArg::U32(v) => write!(f, "{v}"),
            FastArg::I32(v) => write!(f, "{v}"),
            FastArg::U64(v) => write!(f, "{v}"),
            FastArg::I64(v) => write!(f, "{v}"),
            FastArg::Ptr(p) => write!(f, "{p:p}"),
            FastArg::CharPtr(s) => f.write_str(&s.to_string_lossy()),
            FastArg::Bool(v) => write!(f, "{v}"),
            FastArg::F32(v) => write!(f, "{v}"),
            FastArg::F64(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for FastArg<'_> {
                fn from(value: $ty) -> Self {
                    FastArg::$variant(value)
                }
            }
        )*
    };
}

impl_from_primitive! {
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    u32 => U32,
    i32 => I32,
    u64 => U64,
    i64 => I64,
    bool => Bool,
    f32 => F32,
    f64 => F64,
}

impl<T> From<*const T> for FastArg<'_> {
    fn from(ptr: *const T) -> Self {
        FastArg::Ptr(ptr.cast())
    }
}

impl<T> From<*mut T> for FastArg<'_> {
    fn from(ptr: *mut T) -> Self {
        FastArg::Ptr(ptr.cast_const().cast())
    }
}

impl<'a> From<&'a CStr> for FastArg<'a> {
    fn from(s: &'a CStr) -> Self {
        FastArg::CharPtr(s)
    }
}
