//! Model registry
//!
//! A [`ModelRegistry`] owns a shared, linked [`SchemaTree`] and indexes the
//! compiled models registered against it: models by id, modules by
//! qualified name, and the node shapes registered under anydata locations.
//! Indexes are concurrent maps with per-key locking, so lookups never wait
//! on a registry-wide lock.

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::names::{is_valid_model_id, normalize_model_id};
use crate::schema::{
    AnydataMembers, NodeId, NodeKind, SchemaContextResolver, SchemaNodeContextInfo, SchemaPath,
    SchemaTree,
};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

// =============================================================================
// Identifiers and parameters
// =============================================================================

/// Module identifier: name plus optional revision
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId {
    name: String,
    revision: Option<String>,
}

impl ModuleId {
    /// Create a module identifier
    pub fn new(name: impl Into<String>, revision: Option<&str>) -> Self {
        Self {
            name: name.into(),
            revision: revision.map(str::to_string),
        }
    }

    /// Module name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Module revision
    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    /// Qualified name: `name@revision`, or just the name
    pub fn qualified_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.revision {
            Some(rev) => write!(f, "{}@{}", self.name, rev),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A registered module: its identifier, namespace and root node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    id: ModuleId,
    namespace: String,
    node: NodeId,
}

impl Module {
    /// Module identifier
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    /// Module namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Module root in the schema tree
    pub fn node(&self) -> NodeId {
        self.node
    }
}

/// A registered model: an id and the modules compiled together under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    id: String,
    modules: Vec<Module>,
}

impl Model {
    /// Model id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Modules of the model, in registration order
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Module of this model by identifier
    pub fn get_module(&self, id: &ModuleId) -> Option<&Module> {
        self.modules.iter().find(|m| &m.id == id)
    }
}

/// Registration request for a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRegistrationParam {
    model_id: String,
    modules: Vec<ModuleId>,
}

impl ModelRegistrationParam {
    /// Request for a model id, taken verbatim
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            modules: Vec::new(),
        }
    }

    /// Request for a model id normalized from free text
    pub fn normalized(raw: &str) -> Result<Self> {
        Ok(Self::new(normalize_model_id(raw)?))
    }

    /// Add a module to the request, ignoring exact repeats
    pub fn with_module(mut self, module: ModuleId) -> Self {
        if !self.modules.contains(&module) {
            self.modules.push(module);
        }
        self
    }

    /// Requested model id
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Requested modules
    pub fn modules(&self) -> &[ModuleId] {
        &self.modules
    }
}

/// Registry configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Processing limits applied by resolution and codecs
    pub limits: Limits,
}

impl RegistryConfig {
    /// Configuration with explicit limits
    pub fn with_limits(limits: Limits) -> Self {
        Self { limits }
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Registry of compiled models over one shared schema tree
#[derive(Debug)]
pub struct ModelRegistry {
    tree: Arc<SchemaTree>,
    config: RegistryConfig,
    models: DashMap<String, Arc<Model>>,
    modules: DashMap<String, (Module, String)>,
    anydata: DashMap<NodeId, Vec<SchemaNodeContextInfo>>,
}

impl ModelRegistry {
    /// Create an empty registry over a schema tree
    pub fn new(tree: Arc<SchemaTree>, config: RegistryConfig) -> Self {
        Self {
            tree,
            config,
            models: DashMap::new(),
            modules: DashMap::new(),
            anydata: DashMap::new(),
        }
    }

    /// The shared schema tree
    pub fn tree(&self) -> &Arc<SchemaTree> {
        &self.tree
    }

    /// Registry configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register a model and index its modules
    pub fn register_model(&self, param: &ModelRegistrationParam) -> Result<Arc<Model>> {
        let id = param.model_id();
        if !is_valid_model_id(id) {
            return Err(Error::InvalidModel(format!("Invalid model id {}", id)));
        }
        if param.modules().is_empty() {
            return Err(Error::InvalidModel(format!("model '{}' has no modules", id)));
        }

        // a module named twice, with or without its revision, is indexed once
        let mut modules: Vec<Module> = Vec::with_capacity(param.modules().len());
        for module_id in param.modules() {
            let module = self.locate_module(id, module_id)?;
            if !modules.iter().any(|known| known.id() == module.id()) {
                modules.push(module);
            }
        }

        let model = Arc::new(Model {
            id: id.to_string(),
            modules,
        });

        match self.models.entry(id.to_string()) {
            Entry::Occupied(_) => return Err(Error::DuplicateModel(id.to_string())),
            Entry::Vacant(slot) => {
                self.index_modules(&model)?;
                slot.insert(Arc::clone(&model));
            }
        }

        tracing::info!(
            model = id,
            modules = model.modules().len(),
            "registered model"
        );
        Ok(model)
    }

    /// Remove a model and everything indexed for it
    ///
    /// Unregistering an unknown model is not an error.
    pub fn unregister_model(&self, param: &ModelRegistrationParam) -> Option<Arc<Model>> {
        let (_, model) = self.models.remove(param.model_id())?;
        for module in model.modules() {
            self.modules
                .remove_if(&module.id().qualified_name(), |_, (_, owner)| owner == model.id());
            self.anydata
                .retain(|anydata, _| self.tree.module_of(*anydata) != module.node());
        }
        tracing::info!(model = model.id(), "unregistered model");
        Some(model)
    }

    /// Model by id
    pub fn get_model(&self, id: &str) -> Option<Arc<Model>> {
        self.models.get(id).map(|m| Arc::clone(m.value()))
    }

    /// Snapshot of all registered models, ordered by id
    pub fn get_models(&self) -> Vec<Arc<Model>> {
        let mut models: Vec<_> = self.models.iter().map(|m| Arc::clone(m.value())).collect();
        models.sort_by(|a, b| a.id().cmp(b.id()));
        models
    }

    /// Registered module by identifier
    ///
    /// An identifier without a revision also matches the newest registered
    /// revision of the module.
    pub fn get_module(&self, id: &ModuleId) -> Option<Module> {
        if let Some(found) = self.get_module_by_qualified_name(&id.qualified_name()) {
            return Some(found);
        }
        if id.revision().is_some() {
            return None;
        }
        self.modules
            .iter()
            .filter(|entry| entry.value().0.id().name() == id.name())
            .map(|entry| entry.value().0.clone())
            .max_by(|a, b| a.id().revision().cmp(&b.id().revision()))
    }

    /// Registered module by `name@revision` or `name`
    pub fn get_module_by_qualified_name(&self, qualified_name: &str) -> Option<Module> {
        self.modules
            .get(qualified_name)
            .map(|entry| entry.value().0.clone())
    }

    /// Identifiers of all registered modules, sorted
    pub fn module_ids(&self) -> Vec<ModuleId> {
        let mut ids: Vec<_> = self
            .modules
            .iter()
            .map(|entry| entry.value().0.id().clone())
            .collect();
        ids.sort();
        ids
    }

    /// Map a structured path onto the schema node that defines it
    pub fn resolve_context(&self, path: &SchemaPath) -> Result<SchemaNodeContextInfo> {
        let module_id = ModuleId::new(path.module(), path.revision());
        let module = self
            .get_module(&module_id)
            .ok_or_else(|| Error::ModelNotFound(format!("module {} is not registered", module_id)))?;
        SchemaContextResolver::new(&self.tree, self, &self.config.limits)
            .resolve(path, module.node())
    }

    /// Register the node shapes legal beneath an anydata location
    pub fn register_anydata_schema(&self, anydata: &SchemaPath, members: &[SchemaPath]) -> Result<()> {
        let target = self.resolve_context(anydata)?.schema_node();
        let kind = self.tree.node(target).kind();
        if kind != NodeKind::Anydata {
            return Err(Error::Schema(format!(
                "{} resolves to a {}, not an anydata node",
                anydata, kind
            )));
        }

        let infos = members
            .iter()
            .map(|member| self.resolve_context(member).map(|info| info.anydata_copy()))
            .collect::<Result<Vec<_>>>()?;

        let mut entry = self.anydata.entry(target).or_default();
        for info in infos {
            if !entry.iter().any(|known| known.schema_node() == info.schema_node()) {
                entry.push(info);
            }
        }
        tracing::debug!(anydata = %anydata, members = entry.len(), "registered anydata schema");
        Ok(())
    }

    fn locate_module(&self, model_id: &str, module_id: &ModuleId) -> Result<Module> {
        let node = self
            .tree
            .find_module(module_id.name(), module_id.revision())
            .ok_or_else(|| {
                Error::InvalidModel(format!(
                    "model '{}' names module {} which is not in the schema tree",
                    model_id, module_id
                ))
            })?;
        let id = ModuleId::new(module_id.name(), self.tree.module_revision(node));
        Ok(Module {
            id,
            namespace: self.tree.node(node).namespace().to_string(),
            node,
        })
    }

    /// Index every module of `model`, rolling back on conflict
    fn index_modules(&self, model: &Model) -> Result<()> {
        let mut indexed = Vec::new();
        for module in model.modules() {
            let key = module.id().qualified_name();
            match self.modules.entry(key.clone()) {
                Entry::Occupied(existing) => {
                    let owner = existing.get().1.clone();
                    drop(existing);
                    for key in indexed {
                        self.modules.remove(&key);
                    }
                    return Err(Error::InvalidModel(format!(
                        "module {} is already registered by model '{}'",
                        module.id(),
                        owner
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert((module.clone(), model.id().to_string()));
                    indexed.push(key);
                }
            }
        }
        Ok(())
    }
}

impl AnydataMembers for ModelRegistry {
    fn anydata_members(&self, anydata: NodeId) -> Vec<SchemaNodeContextInfo> {
        self.anydata
            .get(&anydata)
            .map(|members| members.value().clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaTreeBuilder;
    use crate::types::{BuiltinType, TypeSpec};

    fn registry() -> ModelRegistry {
        let mut b = SchemaTreeBuilder::new();
        let sys = b
            .add_module("system", "urn:example:system", "sys", Some("2020-01-01"))
            .unwrap();
        let top = b.add_container(sys, "system").unwrap();
        b.add_leaf(top, "hostname", TypeSpec::builtin(BuiltinType::String))
            .unwrap();
        b.add_module("extra", "urn:example:extra", "ex", None).unwrap();
        ModelRegistry::new(Arc::new(b.build().unwrap()), RegistryConfig::default())
    }

    fn param(id: &str) -> ModelRegistrationParam {
        ModelRegistrationParam::new(id).with_module(ModuleId::new("system", None))
    }

    #[test]
    fn test_register_indexes_modules() {
        let reg = registry();
        let model = reg.register_model(&param("sys-model")).unwrap();
        assert_eq!(model.modules()[0].id().revision(), Some("2020-01-01"));
        assert!(reg.get_model("sys-model").is_some());
        assert!(reg.get_module_by_qualified_name("system@2020-01-01").is_some());
        assert!(reg.get_module(&ModuleId::new("system", None)).is_some());
        assert!(reg.get_module(&ModuleId::new("system", Some("2019-01-01"))).is_none());
        assert_eq!(reg.module_ids(), vec![ModuleId::new("system", Some("2020-01-01"))]);
    }

    #[test]
    fn test_duplicate_model() {
        let reg = registry();
        reg.register_model(&param("m1")).unwrap();
        let err = reg.register_model(&param("m1")).unwrap_err();
        assert!(matches!(err, Error::DuplicateModel(_)));
        assert_eq!(err.to_string(), "model with id 'm1' already exists");
    }

    #[test]
    fn test_invalid_models() {
        let reg = registry();
        assert!(matches!(
            reg.register_model(&param("bad id")),
            Err(Error::InvalidModel(_))
        ));
        assert!(matches!(
            reg.register_model(&ModelRegistrationParam::new("empty")),
            Err(Error::InvalidModel(_))
        ));
        let missing = ModelRegistrationParam::new("missing").with_module(ModuleId::new("nope", None));
        assert!(matches!(reg.register_model(&missing), Err(Error::InvalidModel(_))));
    }

    #[test]
    fn test_shared_module_conflict_rolls_back() {
        let reg = registry();
        reg.register_model(&param("m1")).unwrap();
        let overlapping = ModelRegistrationParam::new("m2")
            .with_module(ModuleId::new("extra", None))
            .with_module(ModuleId::new("system", None));
        assert!(reg.register_model(&overlapping).is_err());
        assert!(reg.get_module_by_qualified_name("extra").is_none());
        assert!(reg.get_model("m2").is_none());
    }

    #[test]
    fn test_repeated_module_registers_once() {
        let reg = registry();
        let repeated = ModelRegistrationParam::new("m1")
            .with_module(ModuleId::new("system", None))
            .with_module(ModuleId::new("system", None))
            .with_module(ModuleId::new("system", Some("2020-01-01")));
        assert_eq!(repeated.modules().len(), 2);

        let model = reg.register_model(&repeated).unwrap();
        assert_eq!(model.modules().len(), 1);
        assert_eq!(reg.module_ids(), vec![ModuleId::new("system", Some("2020-01-01"))]);
    }

    #[test]
    fn test_unregister_is_idempotent() {
        let reg = registry();
        reg.register_model(&param("m1")).unwrap();
        assert!(reg.unregister_model(&param("m1")).is_some());
        assert!(reg.unregister_model(&param("m1")).is_none());
        assert!(reg.get_module(&ModuleId::new("system", None)).is_none());
        assert!(reg.get_models().is_empty());
    }

    #[test]
    fn test_resolve_requires_registration() {
        let reg = registry();
        let path = SchemaPath::new("system", ["system", "hostname"]);
        assert!(matches!(reg.resolve_context(&path), Err(Error::ModelNotFound(_))));
        reg.register_model(&param("m1")).unwrap();
        assert!(reg.resolve_context(&path).is_ok());
    }
}
