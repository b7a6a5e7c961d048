use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemoryStoreError {
    #[error("table lock poisoned by a panicked writer")]
    Poisoned,
}

impl From<MemoryStoreError> for pulse_store::StoreError {
    fn from(e: MemoryStoreError) -> Self {
        pulse_store::StoreError::Backend(e.to_string())
    }
}
