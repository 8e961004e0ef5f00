//! XML serializer
//!
//! Every data node is an element named after its schema node, in its
//! module's namespace. Encoded documents wrap the top-level nodes in a
//! NETCONF `<data>` element; decoding accepts either that wrapper or a
//! single top-level data element.

use crate::error::{Error, Result};
use crate::model::{CompositeData, CompositeStream, DataNode, DataNodeContent, ResourceData};
use crate::runtime::codec::{Serializer, SerializerContext};
use crate::schema::{NodeId, NodeKind};
use crate::types::{BuiltinType, TypedValue};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// NETCONF base namespace used for the `<data>` wrapper
pub const NETCONF_BASE_NS: &str = "urn:ietf:params:xml:ns:netconf:base:1.0";

const DATA_ELEMENT: &str = "data";

/// Serializer for the "xml" format
#[derive(Debug, Clone, Default)]
pub struct XmlSerializer;

impl XmlSerializer {
    /// Create an XML serializer
    pub fn new() -> Self {
        Self
    }

    fn decode_element(
        &self,
        ctx: &SerializerContext,
        parent: NodeId,
        element: roxmltree::Node<'_, '_>,
        depth: usize,
    ) -> Result<DataNode> {
        ctx.limits().check_data_depth(depth)?;
        let name = element.tag_name().name();
        let schema = ctx
            .tree()
            .data_child(parent, name, element.tag_name().namespace())
            .map(|info| info.schema_node())
            .ok_or_else(|| {
                Error::Decode(format!(
                    "<{}> is not a data node under {}",
                    name,
                    ctx.tree().path_of(parent)
                ))
            })?;

        match ctx.tree().node(schema).kind() {
            NodeKind::Leaf | NodeKind::LeafList => {
                ctx.value_node(schema, leaf_text(ctx, schema, element))
            }
            _ => {
                let children = element
                    .children()
                    .filter(|child| child.is_element())
                    .map(|child| self.decode_element(ctx, schema, child, depth + 1))
                    .collect::<Result<Vec<_>>>()?;
                ctx.inner_node(schema, children)
            }
        }
    }

    fn write_node<W: std::io::Write>(
        &self,
        ctx: &SerializerContext,
        writer: &mut Writer<W>,
        node: &DataNode,
        parent_ns: Option<&str>,
        depth: usize,
    ) -> Result<()> {
        ctx.limits().check_data_depth(depth)?;
        let id = node.schema_id();
        let mut start = BytesStart::new(id.name());
        if parent_ns != Some(id.namespace()) {
            start.push_attribute(("xmlns", id.namespace()));
        }

        match node.content() {
            DataNodeContent::Leaf(TypedValue::Empty) => write(writer, Event::Empty(start))?,
            DataNodeContent::Leaf(value) => {
                let text = value.to_string();
                write(writer, Event::Start(start))?;
                write(writer, Event::Text(BytesText::new(&text)))?;
                write(writer, Event::End(BytesEnd::new(id.name())))?;
            }
            DataNodeContent::Inner(children) => {
                write(writer, Event::Start(start))?;
                for child in children {
                    self.write_node(ctx, writer, child, Some(id.namespace()), depth + 1)?;
                }
                write(writer, Event::End(BytesEnd::new(id.name())))?;
            }
        }
        Ok(())
    }
}

/// Text content of a leaf element
///
/// Surrounding whitespace is significant only for string-typed leaves;
/// other literals are trimmed so indented documents decode.
fn leaf_text<'a>(
    ctx: &SerializerContext,
    schema: NodeId,
    element: roxmltree::Node<'a, '_>,
) -> &'a str {
    let text = element.text().unwrap_or("");
    let is_string = ctx
        .tree()
        .node(schema)
        .type_spec()
        .map_or(false, |spec| spec.effective_builtin() == BuiltinType::String);
    if is_string {
        text
    } else {
        text.trim()
    }
}

fn write<W: std::io::Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::Xml(format!("failed to write XML: {}", e)))
}

impl Serializer for XmlSerializer {
    fn decode(&self, stream: &CompositeStream, ctx: &SerializerContext) -> Result<CompositeData> {
        let doc = roxmltree::Document::parse(stream.as_str()?)
            .map_err(|e| Error::Xml(format!("error parsing XML: {}", e)))?;
        let root = doc.root_element();

        let wrapped = root.tag_name().name() == DATA_ELEMENT
            && root
                .tag_name()
                .namespace()
                .map_or(true, |ns| ctx.module_by_namespace(ns).is_none());
        let tops: Vec<_> = if wrapped {
            root.children().filter(|n| n.is_element()).collect()
        } else {
            vec![root]
        };

        let mut data = ResourceData::default();
        for element in tops {
            let namespace = element.tag_name().namespace().ok_or_else(|| {
                Error::Decode(format!(
                    "top-level element <{}> has no namespace",
                    element.tag_name().name()
                ))
            })?;
            let module = ctx.module_by_namespace(namespace).ok_or_else(|| {
                Error::Decode(format!("no module defines namespace {}", namespace))
            })?;
            data.add_data_node(self.decode_element(ctx, module, element, 1)?);
        }
        Ok(CompositeData::new(data))
    }

    fn encode(&self, data: &CompositeData, ctx: &SerializerContext) -> Result<CompositeStream> {
        let resource = data.resource_data();
        let mut writer = Writer::new(Vec::new());

        let wrapper = BytesStart::new(DATA_ELEMENT).with_attributes([("xmlns", NETCONF_BASE_NS)]);
        write(&mut writer, Event::Start(wrapper))?;
        for node in resource.data_nodes() {
            self.write_node(ctx, &mut writer, node, None, 1)?;
        }
        write(&mut writer, Event::End(BytesEnd::new(DATA_ELEMENT)))?;

        let stream = CompositeStream::new(writer.into_inner());
        Ok(match resource.resource_id() {
            Some(id) => stream.with_resource_id(id.to_string()),
            None => stream,
        })
    }
}
