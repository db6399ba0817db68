use std::any::Any;
use std::sync::Arc;

/// Conversational memory owned by an assistant.
///
/// Tasks only hold a shared reference to it; reading and writing are left to
/// the concrete task and the assistant that owns the store.
pub trait AssistantMemory: Send + Sync {
    fn name(&self) -> &str;

    /// Access to the concrete store, for tasks that know what they were given.
    fn as_any(&self) -> &dyn Any;
}

pub type SharedMemory = Arc<dyn AssistantMemory>;
