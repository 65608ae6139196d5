//! Decoder Registry — version-keyed catalogue of protocol decoders.
//!
//! # Purpose
//! Every replay names the base build its streams were written with. The
//! registry maps base builds to [`ProtocolDecoder`]s and resolves a request:
//!
//! - exact match when the build is registered;
//! - otherwise the **highest** registered build (newest layout);
//! - [`RegistryError::NoDecoderAvailable`] when nothing is registered.
//!
//! The registry is built once at startup and shared read-only
//! (`Arc<dyn ProtocolDecoder>` handles), so concurrent parses need no locking.
//! There is no runtime discovery: callers register what they ship.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::decoder::ProtocolDecoder;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// A decoder for this base build is already registered.
    DuplicateBuild { base_build: u32 },
    /// The registry is empty; no layout can be trusted.
    NoDecoderAvailable { requested: Option<u32> },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateBuild { base_build } => {
                write!(f, "a decoder for base build {base_build} is already registered")
            }
            Self::NoDecoderAvailable {
                requested: Some(build),
            } => write!(f, "no decoder available for base build {build} (registry is empty)"),
            Self::NoDecoderAvailable { requested: None } => {
                write!(f, "no decoder available (registry is empty)")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Outcome of [`DecoderRegistry::resolve`].
#[derive(Clone)]
pub struct Resolution {
    pub requested: u32,
    pub decoder: Arc<dyn ProtocolDecoder>,
}

impl Resolution {
    pub fn base_build(&self) -> u32 {
        self.decoder.base_build()
    }

    /// `true` when the requested build was not registered and the newest
    /// layout was substituted.
    pub fn is_fallback(&self) -> bool {
        self.requested != self.base_build()
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("requested", &self.requested)
            .field("base_build", &self.base_build())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// DecoderRegistry
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct DecoderRegistry {
    decoders: BTreeMap<u32, Arc<dyn ProtocolDecoder>>,
}

impl DecoderRegistry {
    pub fn new() -> Self {
        Self {
            decoders: BTreeMap::new(),
        }
    }

    /// Register a decoder under its own base build.
    ///
    /// # Errors
    /// [`RegistryError::DuplicateBuild`] if that build is already registered.
    pub fn register(&mut self, decoder: Arc<dyn ProtocolDecoder>) -> Result<(), RegistryError> {
        let base_build = decoder.base_build();
        if self.decoders.contains_key(&base_build) {
            return Err(RegistryError::DuplicateBuild { base_build });
        }
        self.decoders.insert(base_build, decoder);
        Ok(())
    }

    pub fn contains(&self, base_build: u32) -> bool {
        self.decoders.contains_key(&base_build)
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Registered base builds, ascending.
    pub fn builds(&self) -> Vec<u32> {
        self.decoders.keys().copied().collect()
    }

    /// Decoder for the highest registered base build.
    pub fn latest(&self) -> Result<Arc<dyn ProtocolDecoder>, RegistryError> {
        self.decoders
            .last_key_value()
            .map(|(_, d)| Arc::clone(d))
            .ok_or(RegistryError::NoDecoderAvailable { requested: None })
    }

    /// Resolve a base build to a decoder, falling back to the newest layout.
    ///
    /// # Errors
    /// [`RegistryError::NoDecoderAvailable`] if the registry is empty.
    pub fn resolve(&self, base_build: u32) -> Result<Resolution, RegistryError> {
        let decoder = match self.decoders.get(&base_build) {
            Some(d) => Arc::clone(d),
            None => self
                .decoders
                .last_key_value()
                .map(|(_, d)| Arc::clone(d))
                .ok_or(RegistryError::NoDecoderAvailable {
                    requested: Some(base_build),
                })?,
        };
        Ok(Resolution {
            requested: base_build,
            decoder,
        })
    }
}

impl fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderRegistry")
            .field("builds", &self.builds())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeEvents;
    use crate::decoder::{DecodeError, TrackerEvents};
    use crate::records::{InitData, ReplayDetails, ReplayHeader};

    // Decoder that only knows its build; every decode fails.
    struct BuildOnly(u32);

    impl ProtocolDecoder for BuildOnly {
        fn base_build(&self) -> u32 {
            self.0
        }

        fn decode_header(&self, _bytes: &[u8]) -> Result<ReplayHeader, DecodeError> {
            Err(DecodeError::new("header", "not implemented"))
        }

        fn decode_details(&self, _bytes: &[u8]) -> Result<ReplayDetails, DecodeError> {
            Err(DecodeError::new("details", "not implemented"))
        }

        fn decode_initdata(&self, _bytes: &[u8]) -> Result<InitData, DecodeError> {
            Err(DecodeError::new("initdata", "not implemented"))
        }

        fn decode_tracker_events<'a>(&self, _bytes: &'a [u8]) -> TrackerEvents<'a> {
            Box::new(std::iter::empty())
        }

        fn decode_attributes(&self, _bytes: &[u8]) -> Result<AttributeEvents, DecodeError> {
            Err(DecodeError::new("attributes", "not implemented"))
        }
    }

    fn registry_with(builds: &[u32]) -> DecoderRegistry {
        let mut reg = DecoderRegistry::new();
        for b in builds {
            reg.register(Arc::new(BuildOnly(*b))).unwrap();
        }
        reg
    }

    #[test]
    fn exact_build_resolves_to_itself() {
        let reg = registry_with(&[1, 2, 5]);
        let res = reg.resolve(2).unwrap();
        assert_eq!(res.base_build(), 2);
        assert!(!res.is_fallback());
    }

    #[test]
    fn unknown_build_falls_back_to_highest() {
        let reg = registry_with(&[5, 1, 2]);
        let res = reg.resolve(3).unwrap();
        assert_eq!(res.requested, 3);
        assert_eq!(res.base_build(), 5);
        assert!(res.is_fallback());

        // Newer than anything registered also lands on the newest layout.
        assert_eq!(reg.resolve(99_999).unwrap().base_build(), 5);
    }

    #[test]
    fn empty_registry_has_no_decoder() {
        let reg = DecoderRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(
            reg.resolve(3).unwrap_err(),
            RegistryError::NoDecoderAvailable { requested: Some(3) }
        );
        assert!(matches!(
            reg.latest(),
            Err(RegistryError::NoDecoderAvailable { requested: None })
        ));
    }

    #[test]
    fn duplicate_build_is_rejected() {
        let mut reg = registry_with(&[7]);
        assert_eq!(
            reg.register(Arc::new(BuildOnly(7))),
            Err(RegistryError::DuplicateBuild { base_build: 7 })
        );
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn builds_are_listed_ascending() {
        let reg = registry_with(&[96370, 79033, 88500]);
        assert_eq!(reg.builds(), vec![79033, 88500, 96370]);
        assert_eq!(reg.latest().unwrap().base_build(), 96370);
        assert!(reg.contains(88500));
    }
}
