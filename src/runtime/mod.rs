//! Model runtime
//!
//! This module provides the model registry and the codec layer that binds
//! the registered schema to pluggable serializers.

pub mod codec;
pub mod json;
pub mod registry;
pub mod xml;

// Re-exports
pub use codec::{
    CodecDispatcher, Serializer, SerializerContext, SerializerRegistry, FORMAT_JSON, FORMAT_XML,
};
pub use json::JsonSerializer;
pub use registry::{
    Model, ModelRegistrationParam, ModelRegistry, Module, ModuleId, RegistryConfig,
};
pub use xml::XmlSerializer;
