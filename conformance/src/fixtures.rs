//! Immutable inputs shared by every check
//!
//! The data vector and compression text are built once and borrowed by the
//! checks. The HMAC key lives in a buffer obtained from a
//! [`BufferAllocator`] and is wiped before it is handed back.

use std::fmt;

use tracing::debug;
use zeroize::Zeroize;

use crate::config::HarnessConfig;
use crate::error::SetupError;

/// Multi-paragraph text fed to the Huffman codec, NUL terminator included
pub const COMPRESSION_TEXT: &[u8] = concat!(
    "Biodiesel cupidatat marfa, cliche aute put a bird on it incididunt elit\n",
    "polaroid. Sunt tattooed bespoke reprehenderit. Sint twee organic id\n",
    "marfa. Commodo veniam ad esse gastropub. 3 wolf moon sartorial vero,\n",
    "plaid delectus biodiesel squid +1 vice. Post-ironic keffiyeh leggings\n",
    "selfies cray fap hoodie, forage anim. Carles cupidatat shoreditch, VHS\n",
    "small batch meggings kogi dolore food truck bespoke gastropub.\n",
    "\n",
    "Terry richardson adipisicing actually typewriter tumblr, twee whatever\n",
    "four loko you probably haven't heard of them high life. Messenger bag\n",
    "whatever tattooed deep v mlkshk. Brooklyn pinterest assumenda chillwave\n",
    "et, banksy ullamco messenger bag umami pariatur direct trade forage.\n",
    "Typewriter culpa try-hard, pariatur sint brooklyn meggings. Gentrify\n",
    "food truck next level, tousled irony non semiotics PBR ethical anim cred\n",
    "readymade. Mumblecore brunch lomo odd future, portland organic terry\n",
    "four loko whatever street art yr farm-to-table.\n",
    "\0",
)
.as_bytes();

/// What an allocation is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocPurpose {
    /// Secret key material
    Key,
}

impl fmt::Display for AllocPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocPurpose::Key => f.write_str("key"),
        }
    }
}

/// Source of fixed-capacity byte buffers
pub trait BufferAllocator {
    /// An empty buffer able to hold `capacity` bytes without growing
    fn allocate(&self, capacity: usize, purpose: AllocPurpose) -> Result<Vec<u8>, SetupError>;

    /// Take a buffer back. Its contents have already been wiped.
    fn release(&self, buffer: Vec<u8>, _purpose: AllocPurpose) {
        drop(buffer);
    }
}

/// Heap allocator that reports exhaustion instead of aborting
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAllocator;

impl BufferAllocator for SystemAllocator {
    fn allocate(&self, capacity: usize, purpose: AllocPurpose) -> Result<Vec<u8>, SetupError> {
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(capacity)
            .map_err(|_| SetupError::Alloc { capacity, purpose })?;
        Ok(buffer)
    }

    fn release(&self, mut buffer: Vec<u8>, _purpose: AllocPurpose) {
        // Clears spare capacity as well
        buffer.zeroize();
    }
}

/// The HMAC key, held for the duration of one run
pub struct KeyBuffer<'a> {
    bytes: Vec<u8>,
    allocator: &'a dyn BufferAllocator,
}

impl<'a> KeyBuffer<'a> {
    /// Allocate `capacity` bytes and copy `key` into the front
    pub fn new(
        allocator: &'a dyn BufferAllocator,
        key: &[u8],
        capacity: usize,
    ) -> Result<Self, SetupError> {
        if key.len() > capacity {
            return Err(SetupError::Config("key does not fit its buffer"));
        }
        let mut bytes = allocator.allocate(capacity, AllocPurpose::Key)?;
        bytes.extend_from_slice(key);
        debug!(capacity, len = key.len(), "key buffer allocated");
        Ok(Self { bytes, allocator })
    }

    /// The key bytes, without the unused tail of the allocation
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for KeyBuffer<'_> {
    fn drop(&mut self) {
        self.bytes.as_mut_slice().zeroize();
        self.allocator
            .release(std::mem::take(&mut self.bytes), AllocPurpose::Key);
        debug!("key buffer released");
    }
}

impl fmt::Debug for KeyBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyBuffer")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

/// Everything the checks read: data vector, text, and key
#[derive(Debug)]
pub struct Fixtures<'a> {
    data: Vec<u8>,
    text: &'static [u8],
    key: KeyBuffer<'a>,
}

impl<'a> Fixtures<'a> {
    /// Build the fixtures described by `config`, allocating the key through `allocator`
    pub fn new(config: &HarnessConfig, allocator: &'a dyn BufferAllocator) -> Result<Self, SetupError> {
        let key = KeyBuffer::new(allocator, config.key.as_bytes(), config.key_capacity)?;
        let data = (0..config.data_size).map(|i| i as u8).collect();
        Ok(Self {
            data,
            text: COMPRESSION_TEXT,
            key,
        })
    }

    /// Counting vector, `data[i] == i mod 256`
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Compression input
    pub fn text(&self) -> &[u8] {
        self.text
    }

    /// HMAC key
    pub fn key(&self) -> &[u8] {
        self.key.as_bytes()
    }
}
