/// Hash capability used to place members and keys on the ring.
///
/// Implementations must be pure: the same bytes always produce the same
/// value. Closures and functions with the signature `Fn(&[u8]) -> u32` can be
/// used directly.
pub trait RingHasher: Send + Sync {
    fn hash(&self, bytes: &[u8]) -> u32;
}

impl<F> RingHasher for F
where
    F: Fn(&[u8]) -> u32 + Send + Sync,
{
    fn hash(&self, bytes: &[u8]) -> u32 {
        self(bytes)
    }
}

/// CRC-32 (IEEE polynomial) checksum over the raw bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Crc32;

impl RingHasher for Crc32 {
    fn hash(&self, bytes: &[u8]) -> u32 {
        crc32fast::hash(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc32_check_value() {
        // Standard CRC-32/ISO-HDLC check value.
        assert_eq!(Crc32.hash(b"123456789"), 0xCBF4_3926);
        assert_eq!(Crc32.hash(b""), 0);
    }

    #[test]
    fn test_closure_hasher() {
        let hasher = |bytes: &[u8]| bytes.len() as u32;
        assert_eq!(hasher.hash(b"abcd"), 4);
    }

    #[test]
    fn test_fn_pointer_hasher() {
        fn first_byte(bytes: &[u8]) -> u32 {
            bytes.first().copied().unwrap_or_default() as u32
        }

        let hasher: Box<dyn RingHasher> = Box::new(first_byte);
        assert_eq!(hasher.hash(b"A"), 65);
    }
}
