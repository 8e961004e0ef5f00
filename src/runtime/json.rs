//! JSON serializer
//!
//! Member names follow the YANG JSON encoding: a member is qualified as
//! `module:name` at the top level and wherever its namespace differs from
//! its parent's. Lists and leaf-lists are arrays, the empty type is
//! `[null]`, and 64-bit integers and decimals travel as strings.

use crate::error::{Error, Result};
use crate::model::{CompositeData, CompositeStream, DataNode, DataNodeContent, NodeKey, ResourceData};
use crate::runtime::codec::{Serializer, SerializerContext};
use crate::schema::{NodeId, NodeKind};
use serde_json::{Map, Value as JsonValue};

/// Serializer for the "json" format
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    /// Create a compact JSON serializer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a serializer that indents its output
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    // =========================================================================
    // Decoding
    // =========================================================================

    fn decode_members(
        &self,
        ctx: &SerializerContext,
        parent: NodeId,
        parent_ns: Option<&str>,
        object: &Map<String, JsonValue>,
        depth: usize,
    ) -> Result<Vec<DataNode>> {
        ctx.limits().check_data_depth(depth)?;
        let mut nodes = Vec::new();
        for (member, value) in object {
            let (namespace, name) = match member.split_once(':') {
                Some((module, name)) => {
                    let module = ctx.module_by_name(module).ok_or_else(|| {
                        Error::Decode(format!("member '{}' names an unknown module", member))
                    })?;
                    (ctx.tree().node(module).namespace().to_string(), name)
                }
                None => match parent_ns {
                    Some(ns) => (ns.to_string(), member.as_str()),
                    None => {
                        return Err(Error::Decode(format!(
                            "top-level member '{}' must be module-qualified",
                            member
                        )))
                    }
                },
            };

            let schema = ctx
                .tree()
                .data_child(parent, name, Some(&namespace))
                .map(|info| info.schema_node())
                .ok_or_else(|| {
                    Error::Decode(format!(
                        "'{}' is not a data node under {}",
                        member,
                        ctx.tree().path_of(parent)
                    ))
                })?;

            match ctx.tree().node(schema).kind() {
                NodeKind::Leaf => nodes.push(ctx.value_node(schema, &literal(value)?)?),
                NodeKind::LeafList => {
                    for item in array(member, value)? {
                        nodes.push(ctx.value_node(schema, &literal(item)?)?);
                    }
                }
                NodeKind::List => {
                    for item in array(member, value)? {
                        nodes.push(self.decode_inner(ctx, schema, &namespace, item, depth)?);
                    }
                }
                _ => nodes.push(self.decode_inner(ctx, schema, &namespace, value, depth)?),
            }
        }
        Ok(nodes)
    }

    fn decode_inner(
        &self,
        ctx: &SerializerContext,
        schema: NodeId,
        namespace: &str,
        value: &JsonValue,
        depth: usize,
    ) -> Result<DataNode> {
        let object = value.as_object().ok_or_else(|| {
            Error::Decode(format!(
                "{} expects a JSON object",
                ctx.tree().path_of(schema)
            ))
        })?;
        let children = self.decode_members(ctx, schema, Some(namespace), object, depth + 1)?;
        ctx.inner_node(schema, children)
    }

    // =========================================================================
    // Encoding
    // =========================================================================

    fn encode_members(
        &self,
        ctx: &SerializerContext,
        nodes: &[DataNode],
        parent_ns: Option<&str>,
        out: &mut Map<String, JsonValue>,
        depth: usize,
    ) -> Result<()> {
        ctx.limits().check_data_depth(depth)?;
        for node in nodes {
            let id = node.schema_id();
            let member = if parent_ns == Some(id.namespace()) {
                id.name().to_string()
            } else {
                format!("{}:{}", ctx.module_name_for(id.namespace())?, id.name())
            };

            let value = match node.content() {
                DataNodeContent::Leaf(value) => value.to_json(),
                DataNodeContent::Inner(children) => {
                    let mut object = Map::new();
                    self.encode_members(ctx, children, Some(id.namespace()), &mut object, depth + 1)?;
                    JsonValue::Object(object)
                }
            };

            match node.key() {
                NodeKey::List(_) | NodeKey::LeafList(_) => {
                    let slot = out
                        .entry(member.clone())
                        .or_insert_with(|| JsonValue::Array(Vec::new()));
                    match slot {
                        JsonValue::Array(items) => items.push(value),
                        _ => {
                            return Err(Error::Encode(format!(
                                "'{}' mixes list entries with a single value",
                                member
                            )))
                        }
                    }
                }
                NodeKey::Schema(_) => {
                    if out.insert(member.clone(), value).is_some() {
                        return Err(Error::Encode(format!("'{}' appears more than once", member)));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Serializer for JsonSerializer {
    fn decode(&self, stream: &CompositeStream, ctx: &SerializerContext) -> Result<CompositeData> {
        let value: JsonValue = serde_json::from_str(stream.as_str()?)?;
        let object = value
            .as_object()
            .ok_or_else(|| Error::Decode("top-level JSON value must be an object".into()))?;

        let mut data = ResourceData::default();
        for (member, value) in object {
            let (module_name, _) = member.split_once(':').ok_or_else(|| {
                Error::Decode(format!("top-level member '{}' must be module-qualified", member))
            })?;
            let module = ctx.module_by_name(module_name).ok_or_else(|| {
                Error::Decode(format!("member '{}' names an unknown module", member))
            })?;
            let mut single = Map::new();
            single.insert(member.clone(), value.clone());
            for node in self.decode_members(ctx, module, None, &single, 1)? {
                data.add_data_node(node);
            }
        }
        Ok(CompositeData::new(data))
    }

    fn encode(&self, data: &CompositeData, ctx: &SerializerContext) -> Result<CompositeStream> {
        let resource = data.resource_data();
        let mut root = Map::new();
        self.encode_members(ctx, resource.data_nodes(), None, &mut root, 1)?;

        let root = JsonValue::Object(root);
        let text = if self.pretty {
            serde_json::to_string_pretty(&root)?
        } else {
            serde_json::to_string(&root)?
        };

        let stream = CompositeStream::new(text);
        Ok(match resource.resource_id() {
            Some(id) => stream.with_resource_id(id.to_string()),
            None => stream,
        })
    }
}

/// Literal text of a JSON scalar
fn literal(value: &JsonValue) -> Result<String> {
    match value {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        JsonValue::Array(items) if items.len() == 1 && items[0].is_null() => Ok(String::new()),
        other => Err(Error::Decode(format!("{} is not a leaf value", other))),
    }
}

fn array<'a>(member: &str, value: &'a JsonValue) -> Result<&'a Vec<JsonValue>> {
    value
        .as_array()
        .ok_or_else(|| Error::Decode(format!("'{}' expects a JSON array", member)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_forms() {
        assert_eq!(literal(&serde_json::json!("x")).unwrap(), "x");
        assert_eq!(literal(&serde_json::json!(42)).unwrap(), "42");
        assert_eq!(literal(&serde_json::json!(false)).unwrap(), "false");
        assert_eq!(literal(&serde_json::json!([null])).unwrap(), "");
        assert!(literal(&serde_json::json!({"a": 1})).is_err());
    }
}
